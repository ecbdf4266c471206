//! Host-facing declaration model.
//!
//! This is the shape the host compiler's declaration tree is reduced to before
//! it reaches the extractor: names, modality facts, and resolved type trees.
//! Symbol resolution has already happened; `SourceType::Unresolved` marks the
//! places where it could not.

use std::path::PathBuf;

use crate::DeclarationId;

/// What kind of declaration carries the annotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Interface,
    SealedInterface,
    AbstractClass,
    OpenClass,
    FinalClass,
    SealedClass,
    EnumClass,
    Object,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Interface => "interface",
            SourceKind::SealedInterface => "sealed interface",
            SourceKind::AbstractClass => "abstract class",
            SourceKind::OpenClass => "open class",
            SourceKind::FinalClass => "final class",
            SourceKind::SealedClass => "sealed class",
            SourceKind::EnumClass => "enum class",
            SourceKind::Object => "object",
        }
    }
}

/// Member modality as declared (or inherited).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    #[default]
    Abstract,
    Open,
    Final,
    Sealed,
}

/// Where a member comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum MemberOrigin {
    /// Written in the declaration body.
    #[default]
    Declared,
    /// Inherited from a supertype without being redeclared.
    FakeOverride,
    /// Generated by the compiler (data-class `copy`, `componentN`, ...).
    Synthetic,
}

/// A resolved type reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// A class or interface, possibly applied to arguments.
    Class {
        fq_name: String,
        arguments: Vec<SourceType>,
        nullable: bool,
    },
    /// A reference to an in-scope type parameter.
    TypeParameter { name: String, nullable: bool },
    /// A function type.
    Function {
        parameters: Vec<SourceType>,
        return_type: Box<SourceType>,
        is_suspend: bool,
        nullable: bool,
    },
    /// `*` in an argument position.
    Star,
    /// The host could not resolve this reference; `text` is what was written.
    Unresolved { text: String },
}

impl SourceType {
    /// A non-null class reference without arguments.
    pub fn class(fq_name: impl Into<String>) -> Self {
        SourceType::Class {
            fq_name: fq_name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// A non-null class reference with arguments.
    pub fn applied(fq_name: impl Into<String>, arguments: Vec<SourceType>) -> Self {
        SourceType::Class {
            fq_name: fq_name.into(),
            arguments,
            nullable: false,
        }
    }

    /// A non-null type parameter reference.
    pub fn type_parameter(name: impl Into<String>) -> Self {
        SourceType::TypeParameter {
            name: name.into(),
            nullable: false,
        }
    }

    /// A non-null function type.
    pub fn function(parameters: Vec<SourceType>, return_type: SourceType, is_suspend: bool) -> Self {
        SourceType::Function {
            parameters,
            return_type: Box::new(return_type),
            is_suspend,
            nullable: false,
        }
    }

    /// Mark the reference nullable. No effect on `Star` and `Unresolved`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        match &mut self {
            SourceType::Class { nullable, .. }
            | SourceType::TypeParameter { nullable, .. }
            | SourceType::Function { nullable, .. } => *nullable = true,
            SourceType::Star | SourceType::Unresolved { .. } => {}
        }
        self
    }

    /// Whether the reference is marked nullable.
    pub fn is_nullable(&self) -> bool {
        match self {
            SourceType::Class { nullable, .. }
            | SourceType::TypeParameter { nullable, .. }
            | SourceType::Function { nullable, .. } => *nullable,
            SourceType::Star | SourceType::Unresolved { .. } => false,
        }
    }

    /// Whether this is the root `kotlin.Any` / `kotlin.Any?`.
    pub fn is_any(&self) -> bool {
        matches!(self, SourceType::Class { fq_name, .. } if fq_name == "kotlin.Any")
    }
}

/// A type parameter as declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceTypeParameter {
    pub name: String,
    pub bounds: Vec<SourceType>,
    pub is_reified: bool,
}

impl SourceTypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        SourceTypeParameter {
            name: name.into(),
            bounds: Vec::new(),
            is_reified: false,
        }
    }

    #[must_use]
    pub fn with_bound(mut self, bound: SourceType) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// A value parameter as declared. For `vararg`, `ty` is the element type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceParameter {
    pub name: String,
    pub ty: SourceType,
    pub is_vararg: bool,
    pub has_default: bool,
}

impl SourceParameter {
    pub fn new(name: impl Into<String>, ty: SourceType) -> Self {
        SourceParameter {
            name: name.into(),
            ty,
            is_vararg: false,
            has_default: false,
        }
    }
}

/// A function member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceFunction {
    pub name: String,
    pub type_parameters: Vec<SourceTypeParameter>,
    pub parameters: Vec<SourceParameter>,
    pub return_type: SourceType,
    pub modality: Modality,
    pub origin: MemberOrigin,
    pub is_suspend: bool,
    pub is_inline: bool,
}

impl SourceFunction {
    pub fn new(name: impl Into<String>, return_type: SourceType) -> Self {
        SourceFunction {
            name: name.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type,
            modality: Modality::Abstract,
            origin: MemberOrigin::Declared,
            is_suspend: false,
            is_inline: false,
        }
    }
}

/// A property member.
///
/// The type is known from the getter, the backing field, or both; when both
/// are present the getter wins.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceProperty {
    pub name: String,
    pub getter_type: Option<SourceType>,
    pub field_type: Option<SourceType>,
    pub is_mutable: bool,
    pub modality: Modality,
    pub origin: MemberOrigin,
}

impl SourceProperty {
    pub fn new(name: impl Into<String>, ty: SourceType) -> Self {
        SourceProperty {
            name: name.into(),
            getter_type: Some(ty),
            field_type: None,
            is_mutable: false,
            modality: Modality::Abstract,
            origin: MemberOrigin::Declared,
        }
    }
}

/// A member of a declaration, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceMember {
    Function(SourceFunction),
    Property(SourceProperty),
}

impl SourceMember {
    pub fn name(&self) -> &str {
        match self {
            SourceMember::Function(f) => &f.name,
            SourceMember::Property(p) => &p.name,
        }
    }

    pub fn origin(&self) -> MemberOrigin {
        match self {
            SourceMember::Function(f) => f.origin,
            SourceMember::Property(p) => p.origin,
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            SourceMember::Function(f) => f.modality,
            SourceMember::Property(p) => p.modality,
        }
    }
}

/// An annotated declaration handed over by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceDeclaration {
    pub name: String,
    pub package: String,
    pub kind: SourceKind,
    pub type_parameters: Vec<SourceTypeParameter>,
    pub members: Vec<SourceMember>,
    /// Simple names of the annotations on the declaration.
    pub annotations: Vec<String>,
    /// Constructor parameters without a default value. Only meaningful for
    /// classes; a fake can only subclass a class it can construct with `()`.
    pub required_constructor_params: usize,
    /// The compilation unit the declaration came from, if known.
    pub origin: Option<PathBuf>,
}

impl SourceDeclaration {
    pub fn new(package: impl Into<String>, name: impl Into<String>, kind: SourceKind) -> Self {
        SourceDeclaration {
            name: name.into(),
            package: package.into(),
            kind,
            type_parameters: Vec::new(),
            members: Vec::new(),
            annotations: Vec::new(),
            required_constructor_params: 0,
            origin: None,
        }
    }

    /// Fully-qualified dotted name.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Identity key used by the signature store.
    pub fn id(&self) -> DeclarationId {
        DeclarationId::new(self.qualified_name())
    }

    /// Whether the declaration carries an annotation with this simple name.
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotations.iter().any(|a| {
            a == simple_name || a.rsplit('.').next() == Some(simple_name)
        })
    }

    #[must_use]
    pub fn with_member(mut self, member: SourceMember) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }
}
