//! Declaration manifests.
//!
//! The `fakt` tool runs outside the Kotlin compiler, so the declarations it
//! fakes are described in JSON. Member types use Kotlin type syntax:
//!
//! ```json
//! {
//!   "imports": ["com.example.model.User"],
//!   "declarations": [
//!     {
//!       "package": "com.example",
//!       "name": "UserService",
//!       "kind": "interface",
//!       "annotations": ["Fake"],
//!       "members": [
//!         { "member": "property", "name": "baseUrl", "type": "String" },
//!         {
//!           "member": "function",
//!           "name": "getUser",
//!           "suspend": true,
//!           "parameters": [{ "name": "id", "type": "String" }],
//!           "returns": "Result<User>"
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

mod type_syntax;

pub use type_syntax::{parse_type, TypeScope, TypeSyntaxError};

use std::io;
use std::path::{Path, PathBuf};

use fakt_ir::{
    MemberOrigin, Modality, SourceDeclaration, SourceFunction, SourceKind, SourceMember,
    SourceParameter, SourceProperty, SourceType, SourceTypeParameter,
};
use serde::Deserialize;
use thiserror::Error;

/// A manifest that cannot be loaded.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid type `{text}` in `{declaration}`: {source}")]
    Type {
        declaration: String,
        text: String,
        #[source]
        source: TypeSyntaxError,
    },
}

/// Read and resolve a manifest file.
pub fn load_manifest(path: &Path) -> Result<Vec<SourceDeclaration>, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&text)
}

/// Parse and resolve manifest text.
pub fn parse_manifest(text: &str) -> Result<Vec<SourceDeclaration>, ManifestError> {
    let manifest: RawManifest = serde_json::from_str(text)?;
    let declarations = manifest
        .declarations
        .into_iter()
        .map(|raw| raw.into_source(&manifest.imports))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(declarations = declarations.len(), "loaded manifest");
    Ok(declarations)
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    declarations: Vec<RawDeclaration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawKind {
    #[default]
    Interface,
    SealedInterface,
    AbstractClass,
    OpenClass,
    FinalClass,
    SealedClass,
    EnumClass,
    Object,
}

impl From<RawKind> for SourceKind {
    fn from(kind: RawKind) -> Self {
        match kind {
            RawKind::Interface => SourceKind::Interface,
            RawKind::SealedInterface => SourceKind::SealedInterface,
            RawKind::AbstractClass => SourceKind::AbstractClass,
            RawKind::OpenClass => SourceKind::OpenClass,
            RawKind::FinalClass => SourceKind::FinalClass,
            RawKind::SealedClass => SourceKind::SealedClass,
            RawKind::EnumClass => SourceKind::EnumClass,
            RawKind::Object => SourceKind::Object,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawModality {
    #[default]
    Abstract,
    Open,
    Final,
    Sealed,
}

impl From<RawModality> for Modality {
    fn from(modality: RawModality) -> Self {
        match modality {
            RawModality::Abstract => Modality::Abstract,
            RawModality::Open => Modality::Open,
            RawModality::Final => Modality::Final,
            RawModality::Sealed => Modality::Sealed,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawOrigin {
    #[default]
    Declared,
    FakeOverride,
    Synthetic,
}

impl From<RawOrigin> for MemberOrigin {
    fn from(origin: RawOrigin) -> Self {
        match origin {
            RawOrigin::Declared => MemberOrigin::Declared,
            RawOrigin::FakeOverride => MemberOrigin::FakeOverride,
            RawOrigin::Synthetic => MemberOrigin::Synthetic,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTypeParameter {
    name: String,
    #[serde(default)]
    bounds: Vec<String>,
    #[serde(default)]
    reified: bool,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    vararg: bool,
    #[serde(default)]
    default: bool,
}

#[derive(Debug, Deserialize)]
struct RawFunction {
    name: String,
    #[serde(default)]
    type_parameters: Vec<RawTypeParameter>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(default = "unit")]
    returns: String,
    #[serde(default)]
    suspend: bool,
    #[serde(default)]
    inline: bool,
    #[serde(default)]
    modality: RawModality,
    #[serde(default)]
    origin: RawOrigin,
}

fn unit() -> String {
    "Unit".to_string()
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    /// Getter type.
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    field_type: Option<String>,
    #[serde(default)]
    mutable: bool,
    #[serde(default)]
    modality: RawModality,
    #[serde(default)]
    origin: RawOrigin,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
enum RawMember {
    Function(RawFunction),
    Property(RawProperty),
}

#[derive(Debug, Deserialize)]
struct RawDeclaration {
    #[serde(default)]
    package: String,
    name: String,
    #[serde(default)]
    kind: RawKind,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    type_parameters: Vec<RawTypeParameter>,
    #[serde(default)]
    required_constructor_params: usize,
    #[serde(default)]
    origin: Option<PathBuf>,
    #[serde(default)]
    members: Vec<RawMember>,
}

/// Resolves the type texts of one declaration.
struct Resolver<'a> {
    declaration: String,
    scope: TypeScope<'a>,
}

impl Resolver<'_> {
    fn ty(&self, scope: &TypeScope<'_>, text: &str) -> Result<SourceType, ManifestError> {
        parse_type(text, scope).map_err(|source| ManifestError::Type {
            declaration: self.declaration.clone(),
            text: text.to_string(),
            source,
        })
    }

    fn type_parameters(
        &self,
        scope: &TypeScope<'_>,
        params: Vec<RawTypeParameter>,
    ) -> Result<Vec<SourceTypeParameter>, ManifestError> {
        params
            .into_iter()
            .map(|raw| {
                let bounds = raw
                    .bounds
                    .iter()
                    .map(|bound| self.ty(scope, bound))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SourceTypeParameter {
                    name: raw.name,
                    bounds,
                    is_reified: raw.reified,
                })
            })
            .collect()
    }

    fn function(&self, raw: RawFunction) -> Result<SourceFunction, ManifestError> {
        let scope = self
            .scope
            .with_type_parameters(raw.type_parameters.iter().map(|p| p.name.as_str()));
        let parameters = raw
            .parameters
            .into_iter()
            .map(|p| {
                Ok(SourceParameter {
                    ty: self.ty(&scope, &p.ty)?,
                    name: p.name,
                    is_vararg: p.vararg,
                    has_default: p.default,
                })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?;
        Ok(SourceFunction {
            type_parameters: self.type_parameters(&scope, raw.type_parameters)?,
            return_type: self.ty(&scope, &raw.returns)?,
            name: raw.name,
            parameters,
            modality: raw.modality.into(),
            origin: raw.origin.into(),
            is_suspend: raw.suspend,
            is_inline: raw.inline,
        })
    }

    fn property(&self, raw: RawProperty) -> Result<SourceProperty, ManifestError> {
        let getter_type = raw.ty.map(|t| self.ty(&self.scope, &t)).transpose()?;
        let field_type = raw
            .field_type
            .map(|t| self.ty(&self.scope, &t))
            .transpose()?;
        Ok(SourceProperty {
            name: raw.name,
            getter_type,
            field_type,
            is_mutable: raw.mutable,
            modality: raw.modality.into(),
            origin: raw.origin.into(),
        })
    }
}

impl RawDeclaration {
    fn into_source(self, file_imports: &[String]) -> Result<SourceDeclaration, ManifestError> {
        let mut imports = self.imports;
        imports.extend(file_imports.iter().cloned());

        let mut declaration =
            SourceDeclaration::new(self.package.as_str(), self.name.as_str(), self.kind.into());
        let scope = TypeScope::new(&self.package, &imports)
            .with_type_parameters(self.type_parameters.iter().map(|p| p.name.as_str()));
        let resolver = Resolver {
            declaration: declaration.qualified_name(),
            scope,
        };

        declaration.type_parameters =
            resolver.type_parameters(&resolver.scope, self.type_parameters)?;
        for member in self.members {
            let member = match member {
                RawMember::Function(raw) => SourceMember::Function(resolver.function(raw)?),
                RawMember::Property(raw) => SourceMember::Property(resolver.property(raw)?),
            };
            declaration.members.push(member);
        }
        declaration.annotations = self.annotations;
        declaration.required_constructor_params = self.required_constructor_params;
        declaration.origin = self.origin;
        Ok(declaration)
    }
}
