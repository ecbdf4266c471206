//! Type projection for Fakt.
//!
//! Turns [`TypeExpr`](fakt_ir::TypeExpr) trees into Kotlin source text and
//! synthesizes default values for them.
//!
//! - [`TypeRenderer`]: canonical type strings, type parameter lists and
//!   `where` clauses. Takes a set of names that must be written fully
//!   qualified (import collisions).
//! - [`DefaultSynthesizer`]: default-value expressions. Nullable types are
//!   always `null`; shapes without a safe value fail loudly when evaluated.
//! - [`Erasure`]: which type parameters a member stores as `Any?`.

mod defaults;
mod erasure;
mod render;

pub use defaults::{DefaultSynthesizer, DefaultValue};
pub use erasure::Erasure;
pub use render::TypeRenderer;
