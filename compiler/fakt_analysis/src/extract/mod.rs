//! Signature extractor.
//!
//! Walks a declaration's members in order and builds the analysis record.
//! Excluded on the way: compiler-synthesized members, `equals`/`hashCode`/
//! `toString`, and final or sealed members. Inherited members that are still
//! abstract or open are kept so a fake covers the whole surface.

use fakt_ir::{
    DeclarationAnalysis, DeclarationKind, FunctionInfo, GenericPattern, MemberModality,
    MemberOrigin, Modality, ParameterInfo, Primitive, PropertyInfo, QualifiedName,
    SourceDeclaration, SourceFunction, SourceKind, SourceMember, SourceProperty, SourceType,
    SourceTypeParameter, TypeExpr, TypeParameterInfo,
};
use rustc_hash::FxHashSet;

use crate::ExtractError;

/// Members every object has; never faked.
const UNIVERSAL_MEMBERS: &[&str] = &["equals", "hashCode", "toString"];

/// A type parameter bound the host could not resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedBound {
    /// The declaring function, `None` for declaration-level parameters.
    pub function: Option<String>,
    pub parameter: String,
    /// The bound as written.
    pub text: String,
}

/// Extractor output: the analysis record (pattern not yet classified) and
/// facts the classifier turns into warnings.
#[derive(Clone, Debug)]
pub struct Extraction {
    pub analysis: DeclarationAnalysis,
    pub unresolved_bounds: Vec<UnresolvedBound>,
}

/// Build the analysis record for a declaration.
///
/// `pattern` is left as [`GenericPattern::NoGenerics`]; see [`crate::classify`].
pub fn extract(declaration: &SourceDeclaration) -> Result<Extraction, ExtractError> {
    let qualified = declaration.qualified_name();
    let kind = declaration_kind(declaration, &qualified)?;

    let mut unresolved_bounds = Vec::new();
    let type_parameters =
        lower_type_parameters(&declaration.type_parameters, None, &mut unresolved_bounds);

    let redeclared = redeclared_keys(declaration);
    let mut functions = Vec::new();
    let mut properties = Vec::new();
    for member in &declaration.members {
        let Some(modality) = fakeable(member) else {
            tracing::trace!(declaration = %qualified, member = member.name(), "excluded member");
            continue;
        };
        if member.origin() == MemberOrigin::FakeOverride
            && redeclared.contains(&member_key(member))
        {
            tracing::trace!(
                declaration = %qualified,
                member = member.name(),
                "inherited member is redeclared"
            );
            continue;
        }
        match member {
            SourceMember::Function(function) => {
                functions.push(lower_function(function, modality, &mut unresolved_bounds));
            }
            SourceMember::Property(property) => {
                properties.push(lower_property(property, modality, &qualified)?);
            }
        }
    }

    Ok(Extraction {
        analysis: DeclarationAnalysis {
            id: declaration.id(),
            kind,
            package: declaration.package.clone(),
            name: declaration.name.clone(),
            type_parameters,
            functions,
            properties,
            pattern: GenericPattern::NoGenerics,
        },
        unresolved_bounds,
    })
}

fn declaration_kind(
    declaration: &SourceDeclaration,
    qualified: &str,
) -> Result<DeclarationKind, ExtractError> {
    match declaration.kind {
        SourceKind::Interface => Ok(DeclarationKind::Interface),
        SourceKind::AbstractClass | SourceKind::OpenClass => {
            if declaration.required_constructor_params > 0 {
                return Err(ExtractError::RequiresConstructorArguments {
                    declaration: qualified.to_string(),
                    count: declaration.required_constructor_params,
                });
            }
            Ok(DeclarationKind::Class)
        }
        SourceKind::SealedInterface
        | SourceKind::FinalClass
        | SourceKind::SealedClass
        | SourceKind::EnumClass
        | SourceKind::Object => Err(ExtractError::UnsupportedShape {
            declaration: qualified.to_string(),
            kind: declaration.kind.as_str(),
        }),
    }
}

/// Overload identity: the name plus the parameter types for functions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum MemberKey {
    Function(String, Vec<TypeExpr>),
    Property(String),
}

fn member_key(member: &SourceMember) -> MemberKey {
    match member {
        SourceMember::Function(f) => MemberKey::Function(
            f.name.clone(),
            f.parameters.iter().map(|p| lower_type(&p.ty)).collect(),
        ),
        SourceMember::Property(p) => MemberKey::Property(p.name.clone()),
    }
}

/// Keys of the members written in the declaration body. A fake override
/// with the same key is the inherited view of one of these.
fn redeclared_keys(declaration: &SourceDeclaration) -> FxHashSet<MemberKey> {
    declaration
        .members
        .iter()
        .filter(|m| m.origin() == MemberOrigin::Declared)
        .map(member_key)
        .collect()
}

/// The modality a member is faked with, or `None` if it is excluded.
fn fakeable(member: &SourceMember) -> Option<MemberModality> {
    if member.origin() == MemberOrigin::Synthetic {
        return None;
    }
    if matches!(member, SourceMember::Function(f) if UNIVERSAL_MEMBERS.contains(&f.name.as_str()))
    {
        return None;
    }
    match member.modality() {
        Modality::Abstract => Some(MemberModality::Abstract),
        Modality::Open => Some(MemberModality::Open),
        Modality::Final | Modality::Sealed => None,
    }
}

fn lower_function(
    function: &SourceFunction,
    modality: MemberModality,
    unresolved: &mut Vec<UnresolvedBound>,
) -> FunctionInfo {
    let type_parameters = lower_type_parameters(
        &function.type_parameters,
        Some(&function.name),
        unresolved,
    );
    let parameters = function
        .parameters
        .iter()
        .map(|param| ParameterInfo {
            name: param.name.clone(),
            // `ty` already is the element type for varargs.
            ty: lower_type(&param.ty),
            is_vararg: param.is_vararg,
            has_default_value: param.has_default,
        })
        .collect();

    FunctionInfo {
        name: function.name.clone(),
        parameters,
        return_type: lower_type(&function.return_type),
        is_suspend: function.is_suspend,
        is_inline: function.is_inline,
        type_parameters,
        modality,
    }
}

fn lower_property(
    property: &SourceProperty,
    modality: MemberModality,
    declaration: &str,
) -> Result<PropertyInfo, ExtractError> {
    let Some(source_type) = property.getter_type.as_ref().or(property.field_type.as_ref()) else {
        return Err(ExtractError::MissingPropertyType {
            declaration: declaration.to_string(),
            property: property.name.clone(),
        });
    };
    let ty = lower_type(source_type);
    Ok(PropertyInfo {
        name: property.name.clone(),
        is_nullable: ty.is_nullable(),
        ty,
        is_mutable: property.is_mutable,
        modality,
    })
}

fn lower_type_parameters(
    params: &[SourceTypeParameter],
    function: Option<&str>,
    unresolved: &mut Vec<UnresolvedBound>,
) -> Vec<TypeParameterInfo> {
    params
        .iter()
        .map(|param| {
            let mut bounds = Vec::with_capacity(param.bounds.len());
            for bound in &param.bounds {
                match bound {
                    // `Any?` is the implicit bound; dropping it keeps the
                    // most specific bounds only.
                    SourceType::Class { nullable: true, .. } if bound.is_any() => {}
                    SourceType::Unresolved { text } => {
                        unresolved.push(UnresolvedBound {
                            function: function.map(str::to_string),
                            parameter: param.name.clone(),
                            text: text.clone(),
                        });
                        bounds.push(TypeExpr::top());
                    }
                    other => bounds.push(lower_type(other)),
                }
            }
            TypeParameterInfo {
                name: param.name.clone(),
                bounds,
                is_reified: param.is_reified,
            }
        })
        .collect()
}

/// Convert a host type reference into the analysis type algebra.
///
/// Unresolved references pass through as [`TypeExpr::Named`] with the text
/// that was written.
pub fn lower_type(ty: &SourceType) -> TypeExpr {
    let lowered = match ty {
        SourceType::Class {
            fq_name, arguments, ..
        } => {
            if arguments.is_empty() {
                match Primitive::from_qualified(fq_name) {
                    Some(primitive) => TypeExpr::Primitive(primitive),
                    None => TypeExpr::Named(QualifiedName::parse(fq_name)),
                }
            } else {
                TypeExpr::Generic {
                    name: QualifiedName::parse(fq_name),
                    args: arguments.iter().map(lower_type).collect(),
                }
            }
        }
        SourceType::TypeParameter { name, .. } => TypeExpr::TypeParam(name.clone()),
        SourceType::Function {
            parameters,
            return_type,
            is_suspend,
            ..
        } => TypeExpr::function(
            parameters.iter().map(lower_type).collect(),
            lower_type(return_type),
            *is_suspend,
        ),
        SourceType::Star => TypeExpr::star(),
        SourceType::Unresolved { text } => TypeExpr::Named(QualifiedName::parse(text)),
    };
    if ty.is_nullable() {
        lowered.nullable()
    } else {
        lowered
    }
}
