//! In-memory document root.

use std::sync::Mutex;

use uaclass_core::ports::DocumentRootPort;

/// A document root whose `class` attribute lives in memory.
///
/// Useful for server-side rendering, where the committed class string is
/// written into the `<html>` tag of the response.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRoot {
    class_name: Mutex<String>,
}

impl InMemoryDocumentRoot {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            class_name: Mutex::new(initial.into()),
        }
    }

    /// Consume the root and return the final class string.
    pub fn into_class_name(self) -> String {
        self.class_name
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DocumentRootPort for InMemoryDocumentRoot {
    fn class_name(&self) -> String {
        self.class_name
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set_class_name(&self, value: &str) {
        let mut guard = self
            .class_name
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        value.clone_into(&mut *guard);
    }
}
