//! Code generation context and output buffer.
//!
//! One `CodegenContext` renders one fragment (implementation, factory or
//! configuration class) of one declaration, then is dropped.

use fakt_types::TypeRenderer;

/// Indentation unit of generated Kotlin.
const INDENT: &str = "    ";

/// Output buffer with indentation tracking plus the type renderer every
/// fragment of a file shares.
pub struct CodegenContext<'a> {
    /// Renders types with the file's import policy.
    pub renderer: &'a TypeRenderer,
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
}

impl<'a> CodegenContext<'a> {
    /// Create a context with a pre-sized buffer.
    pub fn new(renderer: &'a TypeRenderer, capacity: usize) -> Self {
        Self {
            renderer,
            indent: 0,
            output: String::with_capacity(capacity),
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write indentation to output.
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Open a block: writes `header {` and indents.
    pub fn open(&mut self, header: &str) {
        self.writeln(&format!("{header} {{"));
        self.indent();
    }

    /// Close a block opened with [`open`](Self::open).
    pub fn close(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
