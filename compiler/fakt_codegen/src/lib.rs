//! Kotlin fake generation.
//!
//! # Architecture
//!
//! ```text
//! DeclarationAnalysis
//!        ↓
//!    SlotTable          (unique member-derived identifiers)
//!        ↓
//!    ImportSet          (imports + which names stay qualified)
//!        ↓
//!   implementation ─┬─ factory ─┬─ configuration   (independent fragments)
//!                   ↓
//!   GeneratedArtifact   (assembled into one file per declaration)
//! ```
//!
//! Generation is a pure function of the analysis: the same input always
//! yields byte-identical output.

mod artifact;
mod context;
mod dsl;
mod error;
mod factory;
mod implementation;
mod imports;
pub mod naming;

pub use artifact::GeneratedArtifact;
pub use context::CodegenContext;
pub use error::CodegenError;
pub use imports::ImportSet;

use fakt_ir::DeclarationAnalysis;
use rustc_hash::FxHashSet;

use crate::naming::{is_valid_identifier, SlotTable};

/// Version stamped into structural signatures; a new generator invalidates
/// every cached signature.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Write a generated-file banner on the first line.
    pub banner: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { banner: true }
    }
}

impl CodegenOptions {
    /// Stable text naming every option that changes the rendered file.
    /// Folded into structural signatures so that changing an option
    /// regenerates.
    pub fn fingerprint(&self) -> String {
        format!("banner={}", self.banner)
    }
}

/// Generate the fake for one declaration.
pub fn generate(
    analysis: &DeclarationAnalysis,
    options: &CodegenOptions,
) -> Result<GeneratedArtifact, CodegenError> {
    validate(analysis)?;

    let slots = SlotTable::build(analysis);
    let imports = ImportSet::resolve(analysis, &implementation::default_value_imports(analysis));
    let renderer = imports.renderer();
    let capacity = artifact::estimated_size(analysis);

    let mut ctx = CodegenContext::new(&renderer, capacity);
    implementation::render_implementation(&mut ctx, analysis, &slots);
    let implementation = ctx.take_output();

    let mut ctx = CodegenContext::new(&renderer, 512);
    factory::render_factory(&mut ctx, analysis);
    let factory = ctx.take_output();

    let mut ctx = CodegenContext::new(&renderer, capacity / 2);
    dsl::render_configuration(&mut ctx, analysis, &slots);
    let configuration = ctx.take_output();

    tracing::trace!(
        declaration = %analysis.id,
        bytes = implementation.len() + factory.len() + configuration.len(),
        "rendered fake"
    );

    Ok(GeneratedArtifact {
        declaration: analysis.id.clone(),
        package: analysis.package.clone(),
        file_name: format!("{}.kt", naming::impl_class(&analysis.name)),
        banner: options.banner.then(|| {
            format!(
                "Generated by Fakt from {}. Do not edit.",
                analysis.qualified_name()
            )
        }),
        imports: imports.into_vec(),
        implementation,
        factory,
        configuration,
    })
}

fn validate(analysis: &DeclarationAnalysis) -> Result<(), CodegenError> {
    let declaration = analysis.qualified_name();
    let invalid = |name: &str| CodegenError::InvalidIdentifier {
        declaration: declaration.clone(),
        name: name.to_string(),
    };

    let mut names: Vec<&str> = vec![analysis.name.as_str()];
    names.extend(analysis.type_parameters.iter().map(|p| p.name.as_str()));
    names.extend(analysis.properties.iter().map(|p| p.name.as_str()));
    for function in &analysis.functions {
        names.push(&function.name);
        names.extend(function.parameters.iter().map(|p| p.name.as_str()));
        names.extend(function.type_parameters.iter().map(|p| p.name.as_str()));
    }
    if let Some(bad) = names.into_iter().find(|n| !is_valid_identifier(n)) {
        return Err(invalid(bad));
    }

    let mut seen = FxHashSet::default();
    for function in &analysis.functions {
        let key = (
            function.name.as_str(),
            function
                .parameters
                .iter()
                .map(fakt_ir::ParameterInfo::value_type)
                .collect::<Vec<_>>(),
        );
        if !seen.insert(key) {
            return Err(CodegenError::DuplicateFunction {
                declaration,
                function: function.name.clone(),
            });
        }
    }
    Ok(())
}
