//! Diagnostics for fake generation.
//!
//! The generator only ever talks to a [`DiagnosticSink`] with leveled
//! [`Diagnostic`]s; how they are printed is the sink's business.
//!
//! - Error codes for searchability (`fakt explain F0002`)
//! - The declaration the diagnostic is about, so it can be located
//! - Notes for context
//!
//! Two sinks ship with the crate: [`TracingSink`] forwards to `tracing`, and
//! [`DiagnosticQueue`] collects diagnostics for the CLI to render at the end
//! of a pass.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod queue;
mod sink;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{render_terminal, ColorMode};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use queue::DiagnosticQueue;
pub use sink::{DiagnosticSink, NullSink, TracingSink};
