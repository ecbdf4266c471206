//! Driver errors.
//!
//! [`GenerateError`] fails one declaration and is kept in its outcome;
//! siblings still run. [`PipelineError`] aborts or fails the whole pass.

use std::io;
use std::path::PathBuf;

use fakt_analysis::ExtractError;
use fakt_codegen::CodegenError;
use fakt_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

use crate::ManifestError;

/// Why one declaration produced no fake.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerateError::Extract(e) => e.code(),
            GenerateError::Codegen(_) | GenerateError::Write { .. } => ErrorCode::F0003,
        }
    }

    pub fn to_diagnostic(&self, declaration: &str) -> Diagnostic {
        match self {
            GenerateError::Extract(e) => e.to_diagnostic(),
            GenerateError::Codegen(_) | GenerateError::Write { .. } => {
                Diagnostic::error(self.code())
                    .with_message(self.to_string())
                    .with_declaration(declaration)
                    .with_note("no partial output was written for this declaration")
            }
        }
    }
}

/// Whole-pass failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The output location resolver could not place a declaration.
    #[error("cannot resolve the output directory for `{declaration}`: {reason}")]
    OutputLocation { declaration: String, reason: String },

    /// Every declaration was attempted and these failed.
    #[error("{} of {total} declaration(s) failed: {}", failed.len(), failed.join(", "))]
    DeclarationsFailed { failed: Vec<String>, total: usize },
}

impl PipelineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::Manifest(_) => ErrorCode::F0009,
            PipelineError::OutputLocation { .. } => ErrorCode::F0007,
            PipelineError::DeclarationsFailed { .. } => ErrorCode::F0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            PipelineError::OutputLocation { declaration, .. } => diagnostic
                .with_declaration(declaration)
                .with_note("the generation pass was aborted; no files were written"),
            PipelineError::Manifest(_) => {
                diagnostic.with_note("the generation pass was aborted; no files were written")
            }
            PipelineError::DeclarationsFailed { .. } => diagnostic,
        }
    }
}
