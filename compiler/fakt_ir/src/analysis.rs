//! Analysis records produced by the signature extractor.
//!
//! A [`DeclarationAnalysis`] is built once per declaration per pass, handed to
//! the generators and then dropped. Member order is declaration order, and
//! both the generated file and the structural signature follow it.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::TypeExpr;

/// Stable identity of a declaration across passes.
///
/// Keyed by the fully-qualified name; this is what the signature store uses
/// as its key and what diagnostics print.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId(String);

impl DeclarationId {
    pub fn new(key: impl Into<String>) -> Self {
        DeclarationId(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the subject is implemented (`interface`) or subclassed (`class`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Interface,
    Class,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Interface => "interface",
            DeclarationKind::Class => "class",
        }
    }
}

/// Modality of a fakeable member.
///
/// Final and sealed members never reach the analysis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberModality {
    /// No implementation to fall back on; the default behavior fails.
    Abstract,
    /// Has a supertype implementation; the default behavior delegates to it.
    Open,
}

impl MemberModality {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberModality::Abstract => "abstract",
            MemberModality::Open => "open",
        }
    }
}

/// Where type parameters are declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenericPattern {
    NoGenerics,
    ClassLevelGenerics,
    MethodLevelGenerics,
    MixedGenerics,
}

impl GenericPattern {
    /// Pattern for the given combination of declaration- and method-level
    /// type parameters.
    pub fn from_levels(class_level: bool, method_level: bool) -> Self {
        match (class_level, method_level) {
            (false, false) => GenericPattern::NoGenerics,
            (true, false) => GenericPattern::ClassLevelGenerics,
            (false, true) => GenericPattern::MethodLevelGenerics,
            (true, true) => GenericPattern::MixedGenerics,
        }
    }

    /// The fake class itself is generic.
    pub fn has_class_level(self) -> bool {
        matches!(
            self,
            GenericPattern::ClassLevelGenerics | GenericPattern::MixedGenerics
        )
    }

    /// Some members need erased storage and cast bridging.
    pub fn needs_erasure(self) -> bool {
        matches!(
            self,
            GenericPattern::MethodLevelGenerics | GenericPattern::MixedGenerics
        )
    }
}

/// A type parameter and its upper bounds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameterInfo {
    pub name: String,
    /// Most specific bounds, `Any?` when unresolvable. Empty means unbounded.
    pub bounds: Vec<TypeExpr>,
    pub is_reified: bool,
}

impl TypeParameterInfo {
    pub fn new(name: impl Into<String>) -> Self {
        TypeParameterInfo {
            name: name.into(),
            bounds: Vec::new(),
            is_reified: false,
        }
    }

    #[must_use]
    pub fn with_bound(mut self, bound: TypeExpr) -> Self {
        self.bounds.push(bound);
        self
    }

    /// Two or more bounds render as a `where` clause.
    pub fn needs_where_clause(&self) -> bool {
        self.bounds.len() > 1
    }
}

/// One value parameter of a function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterInfo {
    pub name: String,
    /// For `vararg` parameters, the element type.
    pub ty: TypeExpr,
    pub is_vararg: bool,
    pub has_default_value: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        ParameterInfo {
            name: name.into(),
            ty,
            is_vararg: false,
            has_default_value: false,
        }
    }

    #[must_use]
    pub fn vararg(mut self) -> Self {
        self.is_vararg = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default_value = true;
        self
    }

    /// The type the parameter value has inside the function body.
    pub fn value_type(&self) -> TypeExpr {
        if self.is_vararg {
            TypeExpr::vararg_array(&self.ty)
        } else {
            self.ty.clone()
        }
    }
}

/// A fakeable function member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionInfo {
    pub name: String,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: TypeExpr,
    pub is_suspend: bool,
    pub is_inline: bool,
    pub type_parameters: Vec<TypeParameterInfo>,
    pub modality: MemberModality,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, return_type: TypeExpr) -> Self {
        FunctionInfo {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            is_suspend: false,
            is_inline: false,
            type_parameters: Vec::new(),
            modality: MemberModality::Abstract,
        }
    }

    #[must_use]
    pub fn with_param(mut self, param: ParameterInfo) -> Self {
        self.parameters.push(param);
        self
    }

    #[must_use]
    pub fn with_type_param(mut self, param: TypeParameterInfo) -> Self {
        self.type_parameters.push(param);
        self
    }

    #[must_use]
    pub fn suspending(mut self) -> Self {
        self.is_suspend = true;
        self
    }

    #[must_use]
    pub fn open(mut self) -> Self {
        self.modality = MemberModality::Open;
        self
    }

    /// Names of this function's own type parameters.
    pub fn type_parameter_names(&self) -> FxHashSet<String> {
        self.type_parameters.iter().map(|p| p.name.clone()).collect()
    }

    /// Whether any own type parameter carries a bound.
    ///
    /// Erased storage cannot name such a parameter, so an open member of this
    /// shape cannot forward to `super` from its default behavior.
    pub fn has_bounded_type_parameters(&self) -> bool {
        self.type_parameters.iter().any(|p| !p.bounds.is_empty())
    }

    /// The member as a function type: parameters (varargs as arrays) to the
    /// return type, suspend if the member is.
    pub fn signature_type(&self) -> TypeExpr {
        TypeExpr::function(
            self.parameters.iter().map(ParameterInfo::value_type).collect(),
            self.return_type.clone(),
            self.is_suspend,
        )
    }
}

/// A fakeable property member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: String,
    pub ty: TypeExpr,
    pub is_mutable: bool,
    pub is_nullable: bool,
    pub modality: MemberModality,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        let is_nullable = ty.is_nullable();
        PropertyInfo {
            name: name.into(),
            ty,
            is_mutable: false,
            is_nullable,
            modality: MemberModality::Abstract,
        }
    }

    #[must_use]
    pub fn mutable(mut self) -> Self {
        self.is_mutable = true;
        self
    }

    #[must_use]
    pub fn open(mut self) -> Self {
        self.modality = MemberModality::Open;
        self
    }
}

/// Everything the generators need to know about one declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclarationAnalysis {
    pub id: DeclarationId,
    pub kind: DeclarationKind,
    pub package: String,
    pub name: String,
    pub type_parameters: Vec<TypeParameterInfo>,
    pub functions: Vec<FunctionInfo>,
    pub properties: Vec<PropertyInfo>,
    pub pattern: GenericPattern,
}

impl DeclarationAnalysis {
    /// Fully-qualified dotted name.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Type parameters the fake class itself is generic over; empty unless
    /// the pattern has class-level generics.
    pub fn class_type_parameters(&self) -> &[TypeParameterInfo] {
        if self.pattern.has_class_level() {
            &self.type_parameters
        } else {
            &[]
        }
    }

    /// Every type expression the declaration mentions, in a fixed order:
    /// declaration bounds, then per function its bounds, parameters and return
    /// type, then property types.
    pub fn referenced_types(&self) -> Vec<&TypeExpr> {
        let mut types = Vec::new();
        for param in &self.type_parameters {
            types.extend(param.bounds.iter());
        }
        for function in &self.functions {
            for param in &function.type_parameters {
                types.extend(param.bounds.iter());
            }
            types.extend(function.parameters.iter().map(|p| &p.ty));
            types.push(&function.return_type);
        }
        types.extend(self.properties.iter().map(|p| &p.ty));
        types
    }
}
