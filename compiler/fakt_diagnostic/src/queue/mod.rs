//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Declarations may be processed on several threads, so the queue is
//! internally locked and reports arrive in nondeterministic order. `flush`
//! restores a stable order: by declaration, then severity, then code.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::{Diagnostic, DiagnosticSink};

#[derive(Default)]
struct QueueState {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    error_count: usize,
}

/// Thread-safe collector of diagnostics.
#[derive(Default)]
pub struct DiagnosticQueue {
    state: Mutex<QueueState>,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic. Exact duplicates are dropped.
    ///
    /// Returns `true` if the diagnostic was added.
    pub fn add(&self, diagnostic: Diagnostic) -> bool {
        let mut state = self.state.lock();
        if !state.seen.insert(diagnostic.clone()) {
            return false;
        }
        if diagnostic.is_error() {
            state.error_count += 1;
        }
        state.diagnostics.push(diagnostic);
        true
    }

    /// Number of errors collected since the last flush.
    pub fn error_count(&self) -> usize {
        self.state.lock().error_count
    }

    /// Number of diagnostics collected since the last flush.
    pub fn len(&self) -> usize {
        self.state.lock().diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().diagnostics.is_empty()
    }

    /// Take all diagnostics in stable order and reset the queue.
    pub fn flush(&self) -> Vec<Diagnostic> {
        let mut state = self.state.lock();
        let mut diagnostics = std::mem::take(&mut state.diagnostics);
        state.seen.clear();
        state.error_count = 0;
        drop(state);

        diagnostics.sort_by(|a, b| {
            (&a.declaration, a.severity, a.code, &a.message)
                .cmp(&(&b.declaration, b.severity, b.code, &b.message))
        });
        diagnostics
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}

#[cfg(test)]
mod tests;
