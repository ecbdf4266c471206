//! Terminal rendering of diagnostics.
//!
//! ```text
//! error[F0002]: missing type information
//!   --> com.example.UserService
//!    = property `name` has neither a getter nor a backing field type
//!    = note: generation for this declaration was aborted
//! ```

use std::fmt::Write;

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_string()
        }
    }

    fn severity(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        }
    }
}

/// Render diagnostics followed by an error/warning summary line.
pub fn render_terminal(diagnostics: &[Diagnostic], mode: ColorMode, is_tty: bool) -> String {
    let palette = Palette {
        enabled: mode.should_use_colors(is_tty),
    };
    let mut out = String::new();

    for diag in diagnostics {
        let head = format!("{}[{}]", diag.severity, diag.code);
        let _ = writeln!(
            out,
            "{}: {}",
            palette.paint(palette.severity(diag.severity), &head),
            palette.paint(colors::BOLD, diag.code.title())
        );
        if let Some(decl) = &diag.declaration {
            let _ = writeln!(out, "  {} {decl}", palette.paint(colors::SECONDARY, "-->"));
        }
        if !diag.message.is_empty() {
            let _ = writeln!(out, "   {} {}", palette.paint(colors::SECONDARY, "="), diag.message);
        }
        for note in &diag.notes {
            let _ = writeln!(
                out,
                "   {} note: {note}",
                palette.paint(colors::SECONDARY, "=")
            );
        }
        out.push('\n');
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.iter().filter(|d| d.is_warning()).count();
    if errors > 0 || warnings > 0 {
        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(palette.paint(
                colors::ERROR,
                &format!("{errors} error{}", plural_s(errors)),
            ));
        }
        if warnings > 0 {
            parts.push(palette.paint(
                colors::WARNING,
                &format!("{warnings} warning{}", plural_s(warnings)),
            ));
        }
        let _ = writeln!(out, "{}", parts.join(", "));
    }

    out
}
