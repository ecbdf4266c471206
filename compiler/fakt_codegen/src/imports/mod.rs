//! Import resolution.
//!
//! Collects every class a generated file mentions and decides, per simple
//! name, which class gets the short name. Precedence follows Kotlin name
//! resolution: explicit imports, then the file's own package, then default
//! imports. Every other class with the same simple name is written fully
//! qualified instead of imported.

use std::collections::{BTreeMap, BTreeSet};

use fakt_ir::{DeclarationAnalysis, QualifiedName, TypeExpr};
use fakt_types::TypeRenderer;

/// Runtime classes every fake uses for its call counters.
const RUNTIME_CLASSES: &[(&str, &str)] = &[
    ("kotlinx.coroutines.flow", "MutableStateFlow"),
    ("kotlinx.coroutines.flow", "StateFlow"),
];

/// Runtime functions every fake uses.
const RUNTIME_FUNCTIONS: &[(&str, &str)] = &[("kotlinx.coroutines.flow", "update")];

/// The import list of one generated file and its naming policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSet {
    imports: BTreeSet<String>,
    qualified: BTreeSet<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Claim {
    Runtime,
    Imported,
    SamePackage,
    DefaultImported,
}

impl ImportSet {
    /// Resolve imports for a declaration.
    ///
    /// `functions` are top-level functions the generated code calls (default
    /// value factories such as `emptyFlow`).
    pub fn resolve(analysis: &DeclarationAnalysis, functions: &[QualifiedName]) -> Self {
        let package = analysis.package.as_str();
        let claim_of = |name: &QualifiedName| {
            if name.package() == package {
                Claim::SamePackage
            } else if name.is_default_imported() {
                Claim::DefaultImported
            } else {
                Claim::Imported
            }
        };

        // simple name -> (claim, import path), sorted for determinism
        let mut groups: BTreeMap<String, BTreeSet<(Claim, String)>> = BTreeMap::new();
        let mut add = |name: &QualifiedName, claim: Claim| {
            groups
                .entry(name.top_level().to_string())
                .or_default()
                .insert((claim, name.import_path()));
        };

        add(&QualifiedName::new(package, analysis.name.as_str()), Claim::SamePackage);
        for (pkg, simple) in RUNTIME_CLASSES {
            add(&QualifiedName::new(*pkg, *simple), Claim::Runtime);
        }
        for ty in analysis.referenced_types() {
            for name in class_names(ty) {
                add(&name, claim_of(&name));
            }
        }

        let mut imports = BTreeSet::new();
        let mut qualified = BTreeSet::new();
        for candidates in groups.values() {
            let mut candidates = candidates.iter();
            // BTreeSet order puts the winning claim first.
            let Some((claim, winner)) = candidates.next() else {
                continue;
            };
            if matches!(claim, Claim::Runtime | Claim::Imported) {
                imports.insert(winner.clone());
            }
            for (_, path) in candidates {
                if path != winner {
                    qualified.insert(path.clone());
                }
            }
        }

        for (pkg, simple) in RUNTIME_FUNCTIONS {
            imports.insert(QualifiedName::new(*pkg, *simple).import_path());
        }
        for function in functions {
            if claim_of(function) == Claim::Imported {
                imports.insert(function.import_path());
            }
        }

        ImportSet { imports, qualified }
    }

    /// Sorted import paths.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// Whether `path` is imported.
    pub fn contains(&self, path: &str) -> bool {
        self.imports.contains(path)
    }

    /// Import paths written fully qualified in the file.
    pub fn qualified(&self) -> impl Iterator<Item = &str> {
        self.qualified.iter().map(String::as_str)
    }

    /// A renderer applying this file's naming policy.
    pub fn renderer(&self) -> TypeRenderer {
        TypeRenderer::with_qualified(self.qualified.iter().cloned())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.imports.into_iter().collect()
    }
}

/// Class names mentioned anywhere in `ty`, excluding locals (`*`, `out`).
fn class_names(ty: &TypeExpr) -> Vec<QualifiedName> {
    let mut names = Vec::new();
    ty.walk(&mut |t| match t {
        TypeExpr::Generic { name, .. } | TypeExpr::Named(name) if !name.package().is_empty() => {
            names.push(name.clone());
        }
        _ => {}
    });
    names
}
