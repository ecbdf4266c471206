//! Intermediate representation for Fakt.
//!
//! Two families of types live here:
//!
//! - The **source model** ([`source`]): what the host compiler hands us for an
//!   annotated declaration. Member lists, modality flags, type trees with
//!   nullability. We never inspect host internals beyond this shape.
//! - The **analysis model** ([`analysis`], [`types`]): the language-agnostic
//!   record the extractor produces and every generator consumes.
//!
//! ```text
//! SourceDeclaration ──extract──→ DeclarationAnalysis ──render──→ Kotlin text
//!        (host)                    (TypeExpr trees)
//! ```
//!
//! All analysis types are plain owned data with `Clone, Eq, Hash` so they can be
//! compared across passes and fed to the structural signature.

pub mod analysis;
mod name;
pub mod source;
pub mod types;

pub use analysis::{
    DeclarationAnalysis, DeclarationId, DeclarationKind, FunctionInfo, GenericPattern,
    MemberModality, ParameterInfo, PropertyInfo, TypeParameterInfo,
};
pub use name::QualifiedName;
pub use source::{
    MemberOrigin, Modality, SourceDeclaration, SourceFunction, SourceKind, SourceMember,
    SourceParameter, SourceProperty, SourceType, SourceTypeParameter,
};
pub use types::{Primitive, TypeExpr};
