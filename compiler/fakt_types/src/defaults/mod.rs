//! Default-value synthesis.
//!
//! Every behavior field starts with a value built here. Rules, in order:
//!
//! 1. Nullable types default to `null`, whatever the inner shape.
//! 2. Primitives have fixed zero values.
//! 3. Known containers default to their empty form; explicit type arguments
//!    are written when an argument mentions an erased type parameter.
//! 4. `Result`, `Pair` and `Triple` default their payloads and are unsafe if
//!    any payload is.
//! 5. Function types default to a closure. `(X) -> X` is `{ it }`; a
//!    function taking only a block that returns an erased `T` and returning
//!    `T` runs the block. Otherwise the closure returns the default of its
//!    return type, or fails loudly.
//! 6. Everything else (type parameters, user classes, `Nothing`) has no safe
//!    value: the default is the fail-loudly expression.

use fakt_ir::{Primitive, QualifiedName, TypeExpr};

use crate::{Erasure, TypeRenderer};

/// A synthesized default expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultValue {
    /// Kotlin expression text.
    pub expression: String,
    /// `false` when evaluating the expression (or invoking the closure it
    /// denotes) throws.
    pub is_safe: bool,
    /// Imports the expression needs beyond the types it mentions.
    pub imports: Vec<QualifiedName>,
}

/// Builds default values for one member.
pub struct DefaultSynthesizer<'a> {
    renderer: &'a TypeRenderer,
    erasure: &'a Erasure,
    failure: String,
}

impl<'a> DefaultSynthesizer<'a> {
    /// `unconfigured` is the message of the fail-loudly expression.
    pub fn new(renderer: &'a TypeRenderer, erasure: &'a Erasure, unconfigured: &str) -> Self {
        DefaultSynthesizer {
            renderer,
            erasure,
            failure: format!("error({})", kotlin_string(unconfigured)),
        }
    }

    /// The fail-loudly expression. Has type `Nothing`.
    pub fn failure(&self) -> &str {
        &self.failure
    }

    /// Default value for `ty`.
    pub fn value(&self, ty: &TypeExpr) -> DefaultValue {
        let mut imports = Vec::new();
        let synth = self.synthesize(ty, &mut imports);
        DefaultValue {
            expression: synth.expression,
            is_safe: synth.is_safe,
            imports,
        }
    }

    fn unsafe_default(&self) -> Synth {
        Synth {
            expression: self.failure.clone(),
            is_safe: false,
        }
    }

    fn synthesize(&self, ty: &TypeExpr, imports: &mut Vec<QualifiedName>) -> Synth {
        match ty {
            TypeExpr::Nullable(_) => Synth::safe("null"),
            TypeExpr::Primitive(p) => match primitive_default(*p) {
                Some(expr) => Synth::safe(expr),
                None => self.unsafe_default(),
            },
            TypeExpr::Named(name) => match named_default(name) {
                Some(expr) => Synth::safe(expr),
                None => self.unsafe_default(),
            },
            TypeExpr::Generic { name, args } => self.generic(name, args, imports),
            TypeExpr::Function {
                params,
                is_suspend,
                ret,
            } => self.closure(params, *is_suspend, ret, imports),
            TypeExpr::TypeParam(_) => self.unsafe_default(),
        }
    }

    fn generic(
        &self,
        name: &QualifiedName,
        args: &[TypeExpr],
        imports: &mut Vec<QualifiedName>,
    ) -> Synth {
        let full = name.full();
        match full.as_str() {
            "kotlin.Result" => {
                let Some(value) = args.first() else {
                    return self.unsafe_default();
                };
                let payload = self.synthesize(value, imports);
                if payload.is_safe {
                    Synth::safe(format!(
                        "{}.success({})",
                        self.renderer.name(name),
                        payload.expression
                    ))
                } else {
                    self.unsafe_default()
                }
            }
            "kotlin.Pair" | "kotlin.Triple" => {
                let constructor = self.renderer.name(name);
                let mut parts = Vec::with_capacity(args.len());
                for arg in args {
                    let part = self.synthesize(arg, imports);
                    if !part.is_safe {
                        return self.unsafe_default();
                    }
                    parts.push(part.expression);
                }
                Synth::safe(format!("{constructor}({})", parts.join(", ")))
            }
            "kotlin.Array" => {
                // `emptyArray` needs a reified element; class-level type
                // parameters of the fake are not.
                let element_is_generic = args.iter().any(|arg| {
                    let mut generic = false;
                    arg.walk(&mut |t| {
                        if let TypeExpr::TypeParam(p) = t {
                            generic |= !self.erasure.is_erased(p);
                        }
                    });
                    generic
                });
                if element_is_generic {
                    self.unsafe_default()
                } else {
                    Synth::safe(self.empty_call("emptyArray", args))
                }
            }
            "kotlinx.coroutines.flow.Flow" => {
                imports.push(QualifiedName::new("kotlinx.coroutines.flow", "emptyFlow"));
                Synth::safe(self.empty_call("emptyFlow", args))
            }
            _ => match container_factory(&full) {
                Some(factory) => Synth::safe(self.empty_call(factory, args)),
                None => self.unsafe_default(),
            },
        }
    }

    /// `factory()` or `factory<Args>()` when an argument is erased.
    fn empty_call(&self, factory: &str, args: &[TypeExpr]) -> String {
        if !args.iter().any(|arg| self.erasure.touches(arg)) {
            return format!("{factory}()");
        }
        let rendered: Vec<String> = args
            .iter()
            .map(|arg| {
                let arg = arg.out_projected().unwrap_or(arg);
                self.renderer.render(&self.erasure.storage(arg))
            })
            .collect();
        format!("{factory}<{}>()", rendered.join(", "))
    }

    fn closure(
        &self,
        params: &[TypeExpr],
        is_suspend: bool,
        ret: &TypeExpr,
        imports: &mut Vec<QualifiedName>,
    ) -> Synth {
        if let [param] = params {
            if param == ret {
                return Synth::safe("{ it }");
            }
            if self.is_executable_identity(param, is_suspend, ret) {
                return Synth::safe("{ block -> block() }");
            }
        }

        let body = if ret.is_unit() {
            Synth::safe("")
        } else {
            self.synthesize(ret, imports)
        };
        let expression = match (params.len(), body.expression.is_empty()) {
            (0, true) => "{}".to_string(),
            (0, false) => format!("{{ {} }}", body.expression),
            (n, true) => format!("{{ {} -> }}", vec!["_"; n].join(", ")),
            (n, false) => format!("{{ {} -> {} }}", vec!["_"; n].join(", "), body.expression),
        };
        Synth {
            expression,
            is_safe: body.is_safe,
        }
    }

    /// `(() -> T) -> T` where `T` is erased. A suspend block can only be run
    /// from a suspend closure.
    fn is_executable_identity(&self, param: &TypeExpr, outer_suspend: bool, ret: &TypeExpr) -> bool {
        let TypeExpr::Function {
            params: block_params,
            is_suspend: block_suspend,
            ret: block_ret,
        } = param
        else {
            return false;
        };
        let TypeExpr::TypeParam(name) = ret else {
            return false;
        };
        block_params.is_empty()
            && **block_ret == *ret
            && self.erasure.is_erased(name)
            && (!*block_suspend || outer_suspend)
    }
}

struct Synth {
    expression: String,
    is_safe: bool,
}

impl Synth {
    fn safe(expression: impl Into<String>) -> Self {
        Synth {
            expression: expression.into(),
            is_safe: true,
        }
    }
}

fn primitive_default(primitive: Primitive) -> Option<&'static str> {
    Some(match primitive {
        Primitive::String => "\"\"",
        Primitive::Int => "0",
        Primitive::Long => "0L",
        Primitive::Short => "0.toShort()",
        Primitive::Byte => "0.toByte()",
        Primitive::Float => "0.0f",
        Primitive::Double => "0.0",
        Primitive::Boolean => "false",
        Primitive::Char => "'\\u0000'",
        Primitive::Unit => "Unit",
        Primitive::Any => "Any()",
        Primitive::Nothing => return None,
    })
}

/// Raw (argument-less) references: specialized arrays and containers.
fn named_default(name: &QualifiedName) -> Option<String> {
    if name.package() == "kotlin" && name.simple() != "Array" && name.simple().ends_with("Array")
    {
        return Some(format!("{}(0)", name.simple()));
    }
    container_factory(&name.full()).map(|factory| format!("{factory}()"))
}

fn container_factory(fq_name: &str) -> Option<&'static str> {
    Some(match fq_name {
        "kotlin.collections.List"
        | "kotlin.collections.Collection"
        | "kotlin.collections.Iterable" => "emptyList",
        "kotlin.collections.MutableList"
        | "kotlin.collections.MutableCollection"
        | "kotlin.collections.MutableIterable"
        | "kotlin.collections.ArrayList" => "mutableListOf",
        "kotlin.collections.Set" => "emptySet",
        "kotlin.collections.MutableSet" | "kotlin.collections.HashSet" => "mutableSetOf",
        "kotlin.collections.Map" => "emptyMap",
        "kotlin.collections.MutableMap" | "kotlin.collections.HashMap" => "mutableMapOf",
        "kotlin.sequences.Sequence" => "emptySequence",
        _ => return None,
    })
}

/// A Kotlin string literal with `\`, `"` and `$` escaped.
pub(crate) fn kotlin_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests;
