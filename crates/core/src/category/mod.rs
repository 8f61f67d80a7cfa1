//! Category defaults and validation.

pub mod defaults;
pub mod validation;

pub use defaults::{DEFAULT_CATEGORIES, DEFAULT_COLOR, DEFAULT_ICON, DefaultCategory};
pub use validation::is_hex_color;
