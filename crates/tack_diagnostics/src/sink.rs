//! Accumulator for diagnostics emitted during a compile pass.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Collects diagnostics emitted while compiling a stylesheet.
///
/// The sink is `Sync` so content-scanning tasks can share it. Keyed warnings
/// emitted through [`emit_once`](Self::emit_once) are reported at most once
/// per key for the lifetime of the sink, which is how deprecation warnings
/// stay quiet across incremental rebuilds that share one sink.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    seen_keys: Mutex<HashSet<String>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            seen_keys: Mutex::new(HashSet::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        lock(&self.diagnostics).push(diag);
    }

    /// Emits a diagnostic unless one with the same key was already emitted.
    ///
    /// Returns `true` if the diagnostic was recorded.
    pub fn emit_once(&self, key: &str, diag: Diagnostic) -> bool {
        if !lock(&self.seen_keys).insert(key.to_string()) {
            return false;
        }
        self.emit(diag);
        true
    }

    /// Returns `true` if any error-severity diagnostics have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns the number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns the number of warning-severity diagnostics currently held.
    pub fn warning_count(&self) -> usize {
        lock(&self.diagnostics)
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    ///
    /// Keys recorded by [`emit_once`](Self::emit_once) are kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *lock(&self.diagnostics))
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        lock(&self.diagnostics).clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use tack_source::Span;

    fn make_error() -> Diagnostic {
        Diagnostic::error(
            DiagnosticCode::MISSING_CLOSING_BRACE,
            "missing closing }",
            Span::DUMMY,
        )
    }

    fn make_deprecation() -> Diagnostic {
        Diagnostic::warning(
            DiagnosticCode::DEPRECATED_AT_RULE,
            "`@variants` is deprecated",
            Span::DUMMY,
        )
    }

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn emit_error_counts() {
        let sink = DiagnosticSink::new();
        sink.emit(make_error());
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn emit_once_deduplicates_by_key() {
        let sink = DiagnosticSink::new();
        assert!(sink.emit_once("variants-at-rule-deprecated", make_deprecation()));
        assert!(!sink.emit_once("variants-at-rule-deprecated", make_deprecation()));
        assert!(sink.emit_once("responsive-at-rule-deprecated", make_deprecation()));
        assert_eq!(sink.warning_count(), 2);
        assert!(!sink.has_errors());
    }

    #[test]
    fn keys_survive_take_all() {
        let sink = DiagnosticSink::new();
        sink.emit_once("k", make_deprecation());
        assert_eq!(sink.take_all().len(), 1);
        assert!(!sink.emit_once("k", make_deprecation()));
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn shared_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for _ in 0..25 {
                        sink.emit(make_error());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(sink.error_count(), 100);
    }
}
