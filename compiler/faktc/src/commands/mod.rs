//! Command handlers for the `fakt` CLI.
//!
//! Each handler prints its own output and diagnostics and returns whether the
//! command succeeded; `main` turns `false` into exit status 1.

use std::io::IsTerminal;

use fakt_diagnostic::{render_terminal, ColorMode, Diagnostic};

mod explain;
mod generate;
mod signature;

pub use explain::explain_error;
pub use generate::{parse_generate_options, run_generate, GenerateOptions};
pub use signature::{print_signatures, render_signatures};

/// Print diagnostics to stderr, colored when stderr is a terminal.
fn emit_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let is_tty = std::io::stderr().is_terminal();
    eprint!("{}", render_terminal(diagnostics, ColorMode::Auto, is_tty));
}
