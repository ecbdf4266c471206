//! Structural signatures.
//!
//! The signature text is one descriptor per line:
//!
//! ```text
//! fakt 0.1.0
//! options banner=true
//! interface com.example.Repository
//! tp 0 T : com.example.Entity
//! prop name : kotlin.String val abstract nonnull
//! fun <R> find(id: kotlin.String, vararg tags: kotlin.String = default): kotlin.Result<R> suspend abstract
//! ```
//!
//! Descriptors keep declaration order: the generated file lists members in
//! that order and overload slot suffixes are assigned by it, so a reordering
//! must regenerate. Every type is written with fully-qualified names.

use std::fmt::Write as _;

use fakt_ir::{DeclarationAnalysis, FunctionInfo, PropertyInfo, TypeExpr, TypeParameterInfo};
use sha2::{Digest, Sha256};

/// Digest over everything that can change a declaration's generated file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructuralSignature {
    text: String,
    digest: String,
}

impl StructuralSignature {
    /// Compute the signature of `analysis` as rendered by `generator_version`
    /// with the rendering `options` fingerprint.
    pub fn compute(
        analysis: &DeclarationAnalysis,
        generator_version: &str,
        options: &str,
    ) -> Self {
        let mut text = String::with_capacity(256);
        let _ = writeln!(text, "fakt {generator_version}");
        let _ = writeln!(text, "options {options}");
        let _ = writeln!(text, "{} {}", analysis.kind.as_str(), analysis.qualified_name());

        for (index, param) in analysis.type_parameters.iter().enumerate() {
            let _ = write!(text, "tp {index} ");
            write_type_parameter(param, &mut text);
            text.push('\n');
        }
        for property in &analysis.properties {
            text.push_str(&property_descriptor(property));
            text.push('\n');
        }
        for function in &analysis.functions {
            text.push_str(&function_descriptor(function));
            text.push('\n');
        }

        let digest = hex(&Sha256::digest(text.as_bytes()));
        StructuralSignature { text, digest }
    }

    /// Lowercase hex SHA-256 of the signature text.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// The descriptor text the digest is computed from.
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn property_descriptor(property: &PropertyInfo) -> String {
    let mut line = format!("prop {} : ", property.name);
    write_type(&property.ty, &mut line);
    let _ = write!(
        line,
        " {} {} {}",
        if property.is_mutable { "var" } else { "val" },
        property.modality.as_str(),
        if property.is_nullable { "nullable" } else { "nonnull" },
    );
    line
}

fn function_descriptor(function: &FunctionInfo) -> String {
    let mut line = String::from("fun ");
    if !function.type_parameters.is_empty() {
        line.push('<');
        for (i, param) in function.type_parameters.iter().enumerate() {
            if i > 0 {
                line.push_str(", ");
            }
            write_type_parameter(param, &mut line);
        }
        line.push_str("> ");
    }
    line.push_str(&function.name);
    line.push('(');
    for (i, param) in function.parameters.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        if param.is_vararg {
            line.push_str("vararg ");
        }
        line.push_str(&param.name);
        line.push_str(": ");
        write_type(&param.ty, &mut line);
        if param.has_default_value {
            line.push_str(" = default");
        }
    }
    line.push_str("): ");
    write_type(&function.return_type, &mut line);
    if function.is_suspend {
        line.push_str(" suspend");
    }
    if function.is_inline {
        line.push_str(" inline");
    }
    line.push(' ');
    line.push_str(function.modality.as_str());
    line
}

fn write_type_parameter(param: &TypeParameterInfo, out: &mut String) {
    if param.is_reified {
        out.push_str("reified ");
    }
    out.push_str(&param.name);
    for (i, bound) in param.bounds.iter().enumerate() {
        out.push_str(if i == 0 { " : " } else { " & " });
        write_type(bound, out);
    }
}

/// Canonical, fully-qualified type text.
fn write_type(ty: &TypeExpr, out: &mut String) {
    match ty {
        TypeExpr::Primitive(p) => {
            out.push_str("kotlin.");
            out.push_str(p.name());
        }
        TypeExpr::Nullable(inner) => {
            out.push('(');
            write_type(inner, out);
            out.push_str(")?");
        }
        TypeExpr::Generic { name, args } => {
            out.push_str(&name.full());
            out.push('<');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(arg, out);
            }
            out.push('>');
        }
        TypeExpr::Function {
            params,
            is_suspend,
            ret,
        } => {
            if *is_suspend {
                out.push_str("suspend ");
            }
            out.push('(');
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(param, out);
            }
            out.push_str(") -> ");
            write_type(ret, out);
        }
        TypeExpr::TypeParam(name) => {
            out.push('$');
            out.push_str(name);
        }
        TypeExpr::Named(name) => out.push_str(&name.full()),
    }
}

#[cfg(test)]
mod tests;
