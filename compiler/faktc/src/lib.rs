//! Fakt generator driver.
//!
//! Ties the pipeline crates together:
//!
//! ```text
//! manifest.json ──load──→ [SourceDeclaration]
//!                                │
//!                          Orchestrator::run
//!                                │  per declaration, in parallel
//!        analyze → signature → cache check → generate → write → record
//!                                │
//!                         GenerationReport
//! ```
//!
//! The `fakt` binary is a thin argument parser over [`commands`].

pub mod commands;
mod config;
mod error;
pub mod manifest;
mod orchestrator;
mod output;

pub use config::GenerationConfig;
pub use error::{GenerateError, PipelineError};
pub use manifest::{load_manifest, parse_manifest, ManifestError};
pub use orchestrator::{DeclarationOutcome, GenerationReport, Orchestrator, Outcome};
pub use output::{FixedOutputDir, OutputLocator};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// Safe to call multiple times. `RUST_LOG` takes precedence; otherwise the
/// level is `warn`, or `debug` for this workspace's crates when `verbose`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let fallback = if verbose {
            "warn,faktc=debug,fakt_analysis=debug,fakt_codegen=debug,fakt_cache=debug"
        } else {
            "warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}
