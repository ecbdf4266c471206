//! Qualified type names.

use std::fmt;

/// Packages whose members are visible in every Kotlin file without an import.
///
/// Matching is exact: `kotlin.coroutines` is *not* default-imported even
/// though `kotlin` is.
const DEFAULT_IMPORTED_PACKAGES: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
    "kotlin.jvm",
    "java.lang",
];

/// A package-qualified type name.
///
/// `simple` may itself contain dots for nested classes (`Outer.Inner`); the
/// import path for a nested class is the outermost class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    package: String,
    simple: String,
}

impl QualifiedName {
    /// Create a name from an explicit package and simple name.
    pub fn new(package: impl Into<String>, simple: impl Into<String>) -> Self {
        QualifiedName {
            package: package.into(),
            simple: simple.into(),
        }
    }

    /// A name with no package (type parameters, star projection, locals).
    pub fn local(simple: impl Into<String>) -> Self {
        Self::new("", simple)
    }

    /// A name in the `kotlin` package.
    pub fn kotlin(simple: impl Into<String>) -> Self {
        Self::new("kotlin", simple)
    }

    /// A name in the `kotlin.collections` package.
    pub fn collections(simple: impl Into<String>) -> Self {
        Self::new("kotlin.collections", simple)
    }

    /// Split a dotted fully-qualified name.
    ///
    /// Package segments are the leading segments that start with a lowercase
    /// letter; the first capitalized segment starts the class path. A name
    /// without any capitalized segment is split at its last dot.
    pub fn parse(fq_name: &str) -> Self {
        let segments: Vec<&str> = fq_name.split('.').collect();
        let class_start = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len().saturating_sub(1));
        QualifiedName {
            package: segments[..class_start].join("."),
            simple: segments[class_start..].join("."),
        }
    }

    /// The package, empty for local names.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The class path inside the package (`Outer.Inner` for nested classes).
    pub fn simple(&self) -> &str {
        &self.simple
    }

    /// The outermost class name, which is what gets imported.
    pub fn top_level(&self) -> &str {
        self.simple.split('.').next().unwrap_or(&self.simple)
    }

    /// The last segment of the class path.
    pub fn short(&self) -> &str {
        self.simple.rsplit('.').next().unwrap_or(&self.simple)
    }

    /// Fully-qualified path of the importable (outermost) class.
    pub fn import_path(&self) -> String {
        if self.package.is_empty() {
            self.top_level().to_string()
        } else {
            format!("{}.{}", self.package, self.top_level())
        }
    }

    /// Fully-qualified dotted form.
    pub fn full(&self) -> String {
        if self.package.is_empty() {
            self.simple.clone()
        } else {
            format!("{}.{}", self.package, self.simple)
        }
    }

    /// Whether the name is visible without an explicit import in any file.
    pub fn is_default_imported(&self) -> bool {
        self.package.is_empty() || DEFAULT_IMPORTED_PACKAGES.contains(&self.package.as_str())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.simple)
        } else {
            write!(f, "{}.{}", self.package, self.simple)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_package_from_class_path() {
        let name = QualifiedName::parse("com.example.models.User");
        assert_eq!(name.package(), "com.example.models");
        assert_eq!(name.simple(), "User");
        assert_eq!(name.full(), "com.example.models.User");
    }

    #[test]
    fn parse_nested_class() {
        let name = QualifiedName::parse("com.example.Outer.Inner");
        assert_eq!(name.package(), "com.example");
        assert_eq!(name.simple(), "Outer.Inner");
        assert_eq!(name.top_level(), "Outer");
        assert_eq!(name.short(), "Inner");
        assert_eq!(name.import_path(), "com.example.Outer");
    }

    #[test]
    fn parse_without_package() {
        let name = QualifiedName::parse("User");
        assert_eq!(name.package(), "");
        assert_eq!(name.simple(), "User");
    }

    #[test]
    fn parse_all_lowercase_splits_at_last_dot() {
        let name = QualifiedName::parse("com.example.thing");
        assert_eq!(name.package(), "com.example");
        assert_eq!(name.simple(), "thing");
    }

    #[test]
    fn default_imports_match_exact_packages() {
        assert!(QualifiedName::kotlin("Result").is_default_imported());
        assert!(QualifiedName::collections("List").is_default_imported());
        assert!(!QualifiedName::new("kotlin.coroutines", "CoroutineContext").is_default_imported());
        assert!(!QualifiedName::new("com.example", "User").is_default_imported());
    }
}
