//! Method-level type parameter erasure.
//!
//! Behavior fields live on the fake class, which cannot be generic over a
//! function's own type parameters. Those parameters are stored as `Any?` and
//! cast back at the override. Declaration-level parameters stay as they are.

use fakt_ir::{FunctionInfo, TypeExpr};
use rustc_hash::FxHashSet;

/// The set of type parameters a member stores erased.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Erasure {
    erased: FxHashSet<String>,
}

impl Erasure {
    /// Nothing is erased (properties, non-generic functions).
    pub fn none() -> Self {
        Self::default()
    }

    /// Erase the function's own type parameters.
    pub fn for_function(function: &FunctionInfo) -> Self {
        Erasure {
            erased: function.type_parameter_names(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.erased.is_empty()
    }

    /// Whether the named type parameter is erased.
    pub fn is_erased(&self, name: &str) -> bool {
        self.erased.contains(name)
    }

    /// Whether the type mentions an erased parameter anywhere.
    pub fn touches(&self, ty: &TypeExpr) -> bool {
        ty.mentions_any(&self.erased)
    }

    /// The storage form of a type.
    pub fn storage(&self, ty: &TypeExpr) -> TypeExpr {
        ty.erase(&self.erased)
    }
}
