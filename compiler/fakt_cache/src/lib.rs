//! Change detection for generated fakes.
//!
//! A [`StructuralSignature`] is a digest over everything about a declaration
//! that can influence its generated file. The [`SignatureStore`] remembers the
//! digest each declaration had when its fake was last written and answers
//! "does this need regenerating?".
//!
//! ```text
//! DeclarationAnalysis ──compute──→ StructuralSignature
//!                                         │
//!                 SignatureStore::needs_regeneration ── no ──→ skip
//!                                         │ yes
//!                                    generate, write
//!                                         │
//!                 SignatureStore::record_generation ──→ flush at end of pass
//! ```
//!
//! The store errs towards regenerating. A missing entry, a malformed line or
//! an unreadable file all mean "regenerate"; nothing ever causes a stale skip.

mod error;
mod signature;
mod store;

pub use error::CacheError;
pub use signature::StructuralSignature;
pub use store::{PersistMode, SignatureStore};
