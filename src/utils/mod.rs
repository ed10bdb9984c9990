//! Utility module

mod span;
mod error;

pub use span::SourceRange;
pub use error::{Error, Result};
