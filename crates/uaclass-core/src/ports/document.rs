//! Document root port.
//!
//! Detection output ends up in the `class` attribute of the document root.
//! This port is the only way the core writes to the page.

/// Port for reading and replacing the document root's class string.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentRootPort: Send + Sync {
    /// Current value of the root `class` attribute (empty when unset).
    fn class_name(&self) -> String;

    /// Replace the root `class` attribute.
    fn set_class_name(&self, value: &str);
}
