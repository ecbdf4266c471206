//! Extraction errors.

use fakt_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

/// Why a declaration could not be turned into an analysis record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The declaration kind cannot be implemented or subclassed.
    #[error("`{declaration}` is a {kind} and cannot be faked")]
    UnsupportedShape {
        declaration: String,
        kind: &'static str,
    },

    /// A class fake can only call a no-argument constructor.
    #[error(
        "class `{declaration}` needs {count} constructor argument(s); only classes constructible with `()` can be faked"
    )]
    RequiresConstructorArguments { declaration: String, count: usize },

    /// Neither the getter nor the backing field carries a type.
    #[error("property `{property}` of `{declaration}` has neither a getter nor a backing field type")]
    MissingPropertyType {
        declaration: String,
        property: String,
    },
}

impl ExtractError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExtractError::UnsupportedShape { .. }
            | ExtractError::RequiresConstructorArguments { .. } => ErrorCode::F0001,
            ExtractError::MissingPropertyType { .. } => ErrorCode::F0002,
        }
    }

    /// Unsupported shapes are skipped; everything else fails the declaration.
    pub fn is_skip(&self) -> bool {
        self.code() == ErrorCode::F0001
    }

    pub fn declaration(&self) -> &str {
        match self {
            ExtractError::UnsupportedShape { declaration, .. }
            | ExtractError::RequiresConstructorArguments { declaration, .. }
            | ExtractError::MissingPropertyType { declaration, .. } => declaration,
        }
    }

    /// The diagnostic reported for this error.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = if self.is_skip() {
            Diagnostic::warning(self.code()).with_note("the declaration was skipped")
        } else {
            Diagnostic::error(self.code())
                .with_note("generation for this declaration was aborted")
        };
        diagnostic
            .with_message(self.to_string())
            .with_declaration(self.declaration())
    }
}
