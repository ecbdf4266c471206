//! Generic pattern classifier.
//!
//! Decides where type parameters live, which gates the erasure branch in
//! the generators. Also flags generic usage that looks wrong. Warnings only:
//! the analysis is never changed here and generation always proceeds.

use fakt_diagnostic::{Diagnostic, ErrorCode};
use fakt_ir::{GenericPattern, MemberModality};

use crate::Extraction;

/// Classifier result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub pattern: GenericPattern,
    pub warnings: Vec<Diagnostic>,
}

/// Classify an extraction.
pub fn classify(extraction: &Extraction) -> Classification {
    let analysis = &extraction.analysis;
    let class_level = !analysis.type_parameters.is_empty();
    let method_level = analysis
        .functions
        .iter()
        .any(|f| !f.type_parameters.is_empty());
    let pattern = GenericPattern::from_levels(class_level, method_level);

    let declaration = analysis.qualified_name();
    let mut warnings = Vec::new();

    for bound in &extraction.unresolved_bounds {
        let owner = match &bound.function {
            Some(function) => format!("`{function}`"),
            None => "the declaration".to_string(),
        };
        warnings.push(
            Diagnostic::warning(ErrorCode::F0005)
                .with_message(format!(
                    "bound `{}` of type parameter `{}` on {owner} could not be resolved",
                    bound.text, bound.parameter
                ))
                .with_declaration(&declaration)
                .with_note("the bound was replaced by `Any?`"),
        );
    }

    for function in &analysis.functions {
        for param in &function.type_parameters {
            let used = function.parameters.iter().any(|p| p.ty.mentions(&param.name))
                || function.return_type.mentions(&param.name);
            if !used {
                warnings.push(
                    Diagnostic::warning(ErrorCode::F0006)
                        .with_message(format!(
                            "type parameter `{}` of `{}` is not used by any parameter or the return type",
                            param.name, function.name
                        ))
                        .with_declaration(&declaration),
                );
            }
        }
        if function.modality == MemberModality::Open && function.has_bounded_type_parameters() {
            warnings.push(
                Diagnostic::warning(ErrorCode::F0008)
                    .with_message(format!(
                        "open function `{}` has bounded type parameters and cannot forward to its supertype implementation",
                        function.name
                    ))
                    .with_declaration(&declaration)
                    .with_note("its default behavior fails until it is configured"),
            );
        }
    }

    for param in &analysis.type_parameters {
        let used = analysis.functions.iter().any(|f| {
            f.parameters.iter().any(|p| p.ty.mentions(&param.name))
                || f.return_type.mentions(&param.name)
                || f.type_parameters
                    .iter()
                    .any(|tp| tp.bounds.iter().any(|b| b.mentions(&param.name)))
        }) || analysis.properties.iter().any(|p| p.ty.mentions(&param.name))
            || analysis
                .type_parameters
                .iter()
                .filter(|tp| tp.name != param.name)
                .any(|tp| tp.bounds.iter().any(|b| b.mentions(&param.name)));
        if !used {
            warnings.push(
                Diagnostic::warning(ErrorCode::F0006)
                    .with_message(format!(
                        "type parameter `{}` is not used by any member",
                        param.name
                    ))
                    .with_declaration(&declaration),
            );
        }
    }

    Classification { pattern, warnings }
}
