//! Generated file assembly.

use std::path::PathBuf;

use fakt_ir::{DeclarationAnalysis, DeclarationId};

/// Everything generated for one declaration.
///
/// Built once per declaration per pass, written to disk, then dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub declaration: DeclarationId,
    pub package: String,
    /// `Fake<Name>Impl.kt`
    pub file_name: String,
    /// First-line comment, without the `// ` prefix.
    pub banner: Option<String>,
    /// Sorted import paths.
    pub imports: Vec<String>,
    pub implementation: String,
    pub factory: String,
    pub configuration: String,
}

impl GeneratedArtifact {
    /// Path relative to the output directory: package directories, then the
    /// file name.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&self.file_name);
        path
    }

    /// The complete file text: banner, package, imports, implementation,
    /// factory, configuration class.
    pub fn assemble(&self) -> String {
        let mut out = String::with_capacity(
            256 + self.implementation.len() + self.factory.len() + self.configuration.len(),
        );
        if let Some(banner) = &self.banner {
            out.push_str("// ");
            out.push_str(banner);
            out.push('\n');
        }
        if !self.package.is_empty() {
            out.push_str("package ");
            out.push_str(&self.package);
            out.push_str("\n\n");
        }
        if !self.imports.is_empty() {
            for import in &self.imports {
                out.push_str("import ");
                out.push_str(import);
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(&self.implementation);
        out.push('\n');
        out.push_str(&self.factory);
        out.push('\n');
        out.push_str(&self.configuration);
        out
    }
}

/// Output buffer size guess for one fragment.
pub(crate) fn estimated_size(analysis: &DeclarationAnalysis) -> usize {
    let mutable = analysis.properties.iter().filter(|p| p.is_mutable).count();
    512 + analysis.functions.len() * 900 + analysis.properties.len() * 700 + mutable * 500
}
