//! Example-shaped structural validation for generator output
//!
//! An external text generator is asked to produce JSON matching an example
//! instance (the "template"): a leaf-for-leaf sample of the expected shape,
//! not a formal schema language. This crate owns:
//! - Cleaning raw generator text (thinking-block and code-fence stripping)
//! - Structurally comparing a parsed value against a template value
//!
//! Validation is pure and short-circuits on the first mismatch, reporting the
//! dotted path at which it occurred.

pub mod clean;
pub mod validate;

pub use clean::{clean_payload, strip_thinking};
pub use validate::{check_payload, validate, SchemaMismatch};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
