//! The type algebra consumed by every generator.
//!
//! `TypeExpr` is a closed sum type. Anything the host hands us that does not
//! fit one of the structured variants ends up as [`TypeExpr::Named`], which
//! renders verbatim and has no safe default.

use rustc_hash::FxHashSet;

use crate::QualifiedName;

/// Built-in scalar types with a fixed default value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    String,
    Int,
    Long,
    Short,
    Byte,
    Float,
    Double,
    Boolean,
    Char,
    Unit,
    Any,
    Nothing,
}

impl Primitive {
    /// All primitives, in declaration order.
    pub const ALL: [Primitive; 12] = [
        Primitive::String,
        Primitive::Int,
        Primitive::Long,
        Primitive::Short,
        Primitive::Byte,
        Primitive::Float,
        Primitive::Double,
        Primitive::Boolean,
        Primitive::Char,
        Primitive::Unit,
        Primitive::Any,
        Primitive::Nothing,
    ];

    /// Kotlin simple name (`String`, `Int`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Int => "Int",
            Primitive::Long => "Long",
            Primitive::Short => "Short",
            Primitive::Byte => "Byte",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Boolean => "Boolean",
            Primitive::Char => "Char",
            Primitive::Unit => "Unit",
            Primitive::Any => "Any",
            Primitive::Nothing => "Nothing",
        }
    }

    /// Look up a primitive by its `kotlin.*` qualified name.
    pub fn from_qualified(fq_name: &str) -> Option<Primitive> {
        let simple = fq_name.strip_prefix("kotlin.")?;
        Self::from_simple(simple)
    }

    /// Look up a primitive by simple name.
    pub fn from_simple(simple: &str) -> Option<Primitive> {
        Self::ALL.into_iter().find(|p| p.name() == simple)
    }

    /// Name of the specialized array class used for `vararg` of this primitive.
    pub fn array_class(self) -> Option<&'static str> {
        match self {
            Primitive::Int => Some("IntArray"),
            Primitive::Long => Some("LongArray"),
            Primitive::Short => Some("ShortArray"),
            Primitive::Byte => Some("ByteArray"),
            Primitive::Float => Some("FloatArray"),
            Primitive::Double => Some("DoubleArray"),
            Primitive::Boolean => Some("BooleanArray"),
            Primitive::Char => Some("CharArray"),
            Primitive::String | Primitive::Unit | Primitive::Any | Primitive::Nothing => None,
        }
    }
}

/// A type expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Built-in scalar.
    Primitive(Primitive),
    /// `inner?`. Never wraps another `Nullable` (see [`TypeExpr::nullable`]).
    Nullable(Box<TypeExpr>),
    /// A class applied to type arguments: `List<String>`.
    Generic {
        name: QualifiedName,
        args: Vec<TypeExpr>,
    },
    /// `(A, B) -> R` or `suspend (A) -> R`.
    Function {
        params: Vec<TypeExpr>,
        is_suspend: bool,
        ret: Box<TypeExpr>,
    },
    /// Reference to a declaration- or function-level type parameter.
    TypeParam(String),
    /// Any other class, rendered verbatim.
    Named(QualifiedName),
}

impl TypeExpr {
    /// The erasure target: `Any?`.
    pub fn top() -> Self {
        TypeExpr::Primitive(Primitive::Any).nullable()
    }

    /// `Unit`.
    pub fn unit() -> Self {
        TypeExpr::Primitive(Primitive::Unit)
    }

    /// Star projection in a type argument position.
    pub fn star() -> Self {
        TypeExpr::Named(QualifiedName::local("*"))
    }

    /// A named class without arguments.
    pub fn named(fq_name: &str) -> Self {
        TypeExpr::Named(QualifiedName::parse(fq_name))
    }

    /// A type parameter reference.
    pub fn param(name: impl Into<String>) -> Self {
        TypeExpr::TypeParam(name.into())
    }

    /// A class applied to arguments.
    pub fn generic(name: QualifiedName, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic { name, args }
    }

    /// `kotlin.collections.List<elem>`.
    pub fn list(elem: TypeExpr) -> Self {
        Self::generic(QualifiedName::collections("List"), vec![elem])
    }

    /// `kotlin.Result<value>`.
    pub fn result(value: TypeExpr) -> Self {
        Self::generic(QualifiedName::kotlin("Result"), vec![value])
    }

    /// A function type.
    pub fn function(params: Vec<TypeExpr>, ret: TypeExpr, is_suspend: bool) -> Self {
        TypeExpr::Function {
            params,
            is_suspend,
            ret: Box::new(ret),
        }
    }

    /// Make this type nullable. Idempotent.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            TypeExpr::Nullable(_) => self,
            other => TypeExpr::Nullable(Box::new(other)),
        }
    }

    /// Whether the outermost form is nullable.
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeExpr::Nullable(_))
    }

    /// The type without its outermost nullability marker.
    pub fn non_null(&self) -> &TypeExpr {
        match self {
            TypeExpr::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Whether this is `Unit` (non-nullable).
    pub fn is_unit(&self) -> bool {
        matches!(self, TypeExpr::Primitive(Primitive::Unit))
    }

    /// Whether this is a function type, ignoring nullability.
    pub fn is_function(&self) -> bool {
        matches!(self.non_null(), TypeExpr::Function { .. })
    }

    /// Pre-order walk over this type and every nested type.
    pub fn walk(&self, visit: &mut impl FnMut(&TypeExpr)) {
        visit(self);
        match self {
            TypeExpr::Nullable(inner) => inner.walk(visit),
            TypeExpr::Generic { args, .. } => {
                for arg in args {
                    arg.walk(visit);
                }
            }
            TypeExpr::Function { params, ret, .. } => {
                for param in params {
                    param.walk(visit);
                }
                ret.walk(visit);
            }
            TypeExpr::Primitive(_) | TypeExpr::TypeParam(_) | TypeExpr::Named(_) => {}
        }
    }

    /// Whether any of the given type parameters occurs anywhere in this type.
    pub fn mentions_any(&self, params: &FxHashSet<String>) -> bool {
        if params.is_empty() {
            return false;
        }
        let mut found = false;
        self.walk(&mut |ty| {
            if let TypeExpr::TypeParam(name) = ty {
                found |= params.contains(name);
            }
        });
        found
    }

    /// Whether the named type parameter occurs anywhere in this type.
    pub fn mentions(&self, param: &str) -> bool {
        let mut found = false;
        self.walk(&mut |ty| {
            if let TypeExpr::TypeParam(name) = ty {
                found |= name == param;
            }
        });
        found
    }

    /// Rebuild the type, replacing type parameters for which `replace`
    /// returns `Some`. Nullability of the replaced occurrence is preserved
    /// without producing a double `??`.
    #[must_use]
    pub fn substitute(&self, replace: &impl Fn(&str) -> Option<TypeExpr>) -> TypeExpr {
        match self {
            TypeExpr::TypeParam(name) => replace(name).unwrap_or_else(|| self.clone()),
            TypeExpr::Nullable(inner) => inner.substitute(replace).nullable(),
            TypeExpr::Generic { name, args } => TypeExpr::Generic {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(replace)).collect(),
            },
            TypeExpr::Function {
                params,
                is_suspend,
                ret,
            } => TypeExpr::Function {
                params: params.iter().map(|p| p.substitute(replace)).collect(),
                is_suspend: *is_suspend,
                ret: Box::new(ret.substitute(replace)),
            },
            TypeExpr::Primitive(_) | TypeExpr::Named(_) => self.clone(),
        }
    }

    /// Replace every occurrence of the given type parameters with `Any?`.
    #[must_use]
    pub fn erase(&self, params: &FxHashSet<String>) -> TypeExpr {
        if params.is_empty() {
            return self.clone();
        }
        self.substitute(&|name| params.contains(name).then(TypeExpr::top))
    }

    /// The array type a `vararg` parameter of this element type is received as.
    ///
    /// Primitive elements use their specialized array class (`IntArray`);
    /// everything else is `Array<out E>`.
    pub fn vararg_array(elem: &TypeExpr) -> TypeExpr {
        if let TypeExpr::Primitive(p) = elem {
            if let Some(array) = p.array_class() {
                return TypeExpr::Named(QualifiedName::kotlin(array));
            }
        }
        TypeExpr::generic(
            QualifiedName::kotlin("Array"),
            vec![TypeExpr::out_projection(elem.clone())],
        )
    }

    /// A use-site `out` projection, only meaningful as a type argument.
    pub fn out_projection(elem: TypeExpr) -> TypeExpr {
        TypeExpr::Generic {
            name: QualifiedName::local(OUT_PROJECTION),
            args: vec![elem],
        }
    }

    /// The projected type if this is an `out` projection.
    pub fn out_projected(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Generic { name, args }
                if name.package().is_empty() && name.simple() == OUT_PROJECTION =>
            {
                args.first()
            }
            _ => None,
        }
    }
}

/// Pseudo-class carrying a use-site `out` projection inside a type argument
/// list. Renders as `out <arg>`.
pub const OUT_PROJECTION: &str = "out";
