//! The `signature` command: print the structural signature digest of each
//! declaration in a manifest, in the same `identity=digest` form the
//! signature cache stores.
//!
//! Stdout carries only digest lines; diagnostics go to the log.

use std::fmt::Write;
use std::path::Path;

use fakt_analysis::analyze;
use fakt_cache::StructuralSignature;
use fakt_codegen::{CodegenOptions, GENERATOR_VERSION};
use fakt_diagnostic::{DiagnosticSink, TracingSink};
use fakt_ir::SourceDeclaration;

use super::emit_diagnostics;
use crate::{load_manifest, PipelineError};

/// One `identity=digest` line per declaration that can be analyzed.
///
/// Declarations that cannot be analyzed are reported to `sink` and left out.
pub fn render_signatures(
    declarations: &[SourceDeclaration],
    options: &CodegenOptions,
    sink: &dyn DiagnosticSink,
) -> String {
    let fingerprint = options.fingerprint();
    let mut out = String::new();
    for declaration in declarations {
        match analyze(declaration, sink) {
            Ok(analysis) => {
                let signature =
                    StructuralSignature::compute(&analysis, GENERATOR_VERSION, &fingerprint);
                let _ = writeln!(out, "{}={}", analysis.id, signature.digest());
            }
            Err(e) => sink.report(e.to_diagnostic()),
        }
    }
    out
}

/// Digests match what `generate` records only when `options` match too.
pub fn print_signatures(manifest: &Path, options: &CodegenOptions) -> bool {
    let declarations = match load_manifest(manifest) {
        Ok(declarations) => declarations,
        Err(e) => {
            emit_diagnostics(&[PipelineError::from(e).to_diagnostic()]);
            return false;
        }
    };

    print!("{}", render_signatures(&declarations, options, &TracingSink));
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests {
    use super::*;
    use fakt_diagnostic::{DiagnosticQueue, ErrorCode};
    use fakt_ir::{SourceFunction, SourceKind, SourceMember, SourceType};

    #[test]
    fn one_line_per_analyzable_declaration() {
        let clock = SourceDeclaration::new("com.example", "Clock", SourceKind::Interface)
            .with_member(SourceMember::Function(SourceFunction::new(
                "now",
                SourceType::class("kotlin.Long"),
            )));
        let final_class = SourceDeclaration::new("com.example", "Money", SourceKind::FinalClass);
        let queue = DiagnosticQueue::new();

        let text = render_signatures(&[clock, final_class], &CodegenOptions::default(), &queue);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let (id, digest) = lines[0].split_once('=').unwrap_or_default();
        assert_eq!(id, "com.example.Clock");
        assert_eq!(digest.len(), 64);

        let diagnostics = queue.flush();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::F0001);
    }

    #[test]
    fn digests_follow_rendering_options() {
        let clock = SourceDeclaration::new("com.example", "Clock", SourceKind::Interface);
        let with_banner = render_signatures(
            std::slice::from_ref(&clock),
            &CodegenOptions::default(),
            &DiagnosticQueue::new(),
        );
        let without_banner = render_signatures(
            &[clock],
            &CodegenOptions { banner: false },
            &DiagnosticQueue::new(),
        );
        assert_ne!(with_banner, without_banner);
    }

    #[test]
    fn unloadable_manifest_fails_and_skips_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let options = CodegenOptions::default();
        assert!(!print_signatures(&dir.path().join("missing.json"), &options));

        let manifest = dir.path().join("fakes.json");
        std::fs::write(
            &manifest,
            r#"{ "declarations": [{ "package": "p", "name": "Money", "kind": "final_class" }] }"#,
        )
        .unwrap();
        assert!(print_signatures(&manifest, &options));
    }
}
