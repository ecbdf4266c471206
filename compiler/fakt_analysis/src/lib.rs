//! Signature extraction and generic pattern classification.
//!
//! ```text
//! SourceDeclaration ──extract──→ Extraction ──classify──→ GenericPattern + warnings
//! ```
//!
//! [`analyze`] runs both and reports classifier warnings to a sink.

mod classify;
mod error;
mod extract;

pub use classify::{classify, Classification};
pub use error::ExtractError;
pub use extract::{extract, lower_type, Extraction, UnresolvedBound};

use fakt_diagnostic::DiagnosticSink;
use fakt_ir::{DeclarationAnalysis, SourceDeclaration};

/// Extract and classify one declaration.
///
/// Warnings go to `sink`; they never stop the analysis.
pub fn analyze(
    declaration: &SourceDeclaration,
    sink: &dyn DiagnosticSink,
) -> Result<DeclarationAnalysis, ExtractError> {
    let extraction = extract(declaration)?;
    let Classification { pattern, warnings } = classify(&extraction);
    for warning in warnings {
        sink.report(warning);
    }
    let mut analysis = extraction.analysis;
    analysis.pattern = pattern;
    tracing::debug!(
        declaration = %analysis.id,
        ?pattern,
        functions = analysis.functions.len(),
        properties = analysis.properties.len(),
        "analyzed declaration"
    );
    Ok(analysis)
}
