//! Diagnostic sinks.

use crate::{Diagnostic, Severity};

/// Receiver of leveled diagnostics.
///
/// Takes `&self` so one sink can be shared across worker threads.
pub trait DiagnosticSink: Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at the matching level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        let code = diagnostic.code.as_str();
        let declaration = diagnostic.declaration.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Error => {
                tracing::error!(code, declaration, "{}", diagnostic.message);
            }
            Severity::Warning => {
                tracing::warn!(code, declaration, "{}", diagnostic.message);
            }
            Severity::Note => {
                tracing::info!(code, declaration, "{}", diagnostic.message);
            }
        }
    }
}

/// Drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}
