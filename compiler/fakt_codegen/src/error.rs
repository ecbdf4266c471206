//! Code generation errors.

use thiserror::Error;

/// Why a fake could not be rendered.
///
/// Rendering is all-or-nothing: an error means no file is written.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A name cannot be written as a Kotlin identifier.
    #[error("`{name}` in `{declaration}` is not a valid Kotlin identifier")]
    InvalidIdentifier { declaration: String, name: String },

    /// Two functions have the same name and parameter types.
    #[error("`{declaration}` declares `{function}` twice with the same parameter types")]
    DuplicateFunction {
        declaration: String,
        function: String,
    },
}
