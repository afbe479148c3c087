//! Core domain types.
//!
//! Pure data and algorithms with no knowledge of how the browsing
//! environment is reached.

pub mod capabilities;
pub mod classes;
pub mod color;
pub mod font_size;
pub mod token_set;

pub use capabilities::{BrowserCapabilities, CapabilityReport, DataUrlOutcome};
pub use color::{ColorParseError, Rgb, TextColor, parse_color, resolve_text_color};
pub use font_size::{DEFAULT_FONT_SIZE_PX, FontSize, FontSizeBucket};
pub use token_set::TokenSet;
