//! Shared helpers for `bing-translator`: query escaping, error-body text extraction
//! and response parsing.

mod error;
pub mod helper;

pub use error::Error;
