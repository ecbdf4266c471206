//! Kotlin type rendering.

use fakt_ir::{QualifiedName, TypeExpr, TypeParameterInfo};
use rustc_hash::FxHashSet;

/// Renders type expressions as Kotlin source.
///
/// Class names are written by simple name unless their import path is in
/// the `qualified` set, in which case they are written in full. The import
/// resolver fills that set with names that collide with another import.
#[derive(Clone, Debug, Default)]
pub struct TypeRenderer {
    qualified: FxHashSet<String>,
}

impl TypeRenderer {
    /// A renderer that writes every class by simple name.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that writes the given import paths fully qualified.
    pub fn with_qualified(import_paths: impl IntoIterator<Item = String>) -> Self {
        TypeRenderer {
            qualified: import_paths.into_iter().collect(),
        }
    }

    /// Whether `name` is written fully qualified.
    pub fn is_qualified(&self, name: &QualifiedName) -> bool {
        !name.package().is_empty() && self.qualified.contains(&name.import_path())
    }

    /// Render a class name according to the name policy.
    pub fn name(&self, name: &QualifiedName) -> String {
        if self.is_qualified(name) {
            name.full()
        } else {
            name.simple().to_string()
        }
    }

    /// Render a type as a string.
    pub fn render(&self, ty: &TypeExpr) -> String {
        let mut buf = String::new();
        self.render_into(ty, &mut buf);
        buf
    }

    /// Render a type into an existing buffer.
    pub fn render_into(&self, ty: &TypeExpr, buf: &mut String) {
        match ty {
            TypeExpr::Primitive(p) => buf.push_str(p.name()),
            TypeExpr::Nullable(inner) => {
                // `() -> Unit?` would make the return nullable.
                if inner.is_function() {
                    buf.push('(');
                    self.render_into(inner, buf);
                    buf.push(')');
                } else {
                    self.render_into(inner, buf);
                }
                buf.push('?');
            }
            TypeExpr::Generic { name, args } => {
                if let Some(projected) = ty.out_projected() {
                    buf.push_str("out ");
                    self.render_into(projected, buf);
                    return;
                }
                buf.push_str(&self.name(name));
                if !args.is_empty() {
                    buf.push('<');
                    self.render_list(args, buf);
                    buf.push('>');
                }
            }
            TypeExpr::Function {
                params,
                is_suspend,
                ret,
            } => {
                if *is_suspend {
                    buf.push_str("suspend ");
                }
                buf.push('(');
                self.render_list(params, buf);
                buf.push_str(") -> ");
                self.render_into(ret, buf);
            }
            TypeExpr::TypeParam(name) => buf.push_str(name),
            TypeExpr::Named(name) => buf.push_str(&self.name(name)),
        }
    }

    fn render_list(&self, types: &[TypeExpr], buf: &mut String) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            self.render_into(ty, buf);
        }
    }

    /// Render a type parameter list, `<T : Bound, R>`, or nothing when empty.
    ///
    /// Parameters with two or more bounds are written bare; their bounds go
    /// to [`where_clause`](Self::where_clause). `reified` prefixes every
    /// parameter with `reified`.
    pub fn type_parameters(&self, params: &[TypeParameterInfo], reified: bool) -> String {
        if params.is_empty() {
            return String::new();
        }
        let mut buf = String::from("<");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            if reified {
                buf.push_str("reified ");
            }
            buf.push_str(&param.name);
            if let [bound] = param.bounds.as_slice() {
                buf.push_str(" : ");
                self.render_into(bound, &mut buf);
            }
        }
        buf.push('>');
        buf
    }

    /// Render the `where` clause for multi-bound parameters, including the
    /// leading space, or nothing when no parameter needs one.
    pub fn where_clause(&self, params: &[TypeParameterInfo]) -> String {
        let constraints: Vec<String> = params
            .iter()
            .filter(|p| p.needs_where_clause())
            .flat_map(|p| {
                p.bounds
                    .iter()
                    .map(move |bound| format!("{} : {}", p.name, self.render(bound)))
            })
            .collect();
        if constraints.is_empty() {
            String::new()
        } else {
            format!(" where {}", constraints.join(", "))
        }
    }

    /// Type arguments for using the parameters: `<T, R>`, or nothing.
    pub fn type_arguments(params: &[TypeParameterInfo]) -> String {
        if params.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        format!("<{}>", names.join(", "))
    }
}
