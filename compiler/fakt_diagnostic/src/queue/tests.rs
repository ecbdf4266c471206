use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn error(decl: &str, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::F0003)
        .with_message(message)
        .with_declaration(decl)
}

#[test]
fn duplicates_are_dropped() {
    let queue = DiagnosticQueue::new();
    assert!(queue.add(error("a.A", "boom")));
    assert!(!queue.add(error("a.A", "boom")));
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.error_count(), 1);
}

#[test]
fn flush_sorts_by_declaration_then_severity() {
    let queue = DiagnosticQueue::new();
    queue.report(error("b.B", "second"));
    queue.report(
        Diagnostic::warning(ErrorCode::F0006)
            .with_message("unused")
            .with_declaration("a.A"),
    );
    queue.report(error("a.A", "first"));

    let flushed: Vec<String> = queue.flush().iter().map(ToString::to_string).collect();
    assert_eq!(
        flushed,
        vec![
            "error[F0003]: a.A: first".to_string(),
            "warning[F0006]: a.A: unused".to_string(),
            "error[F0003]: b.B: second".to_string(),
        ]
    );
}

#[test]
fn flush_resets_state() {
    let queue = DiagnosticQueue::new();
    queue.report(error("a.A", "boom"));
    let _ = queue.flush();
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
    assert!(queue.add(error("a.A", "boom")));
}

#[test]
fn concurrent_reports_are_all_collected() {
    let queue = DiagnosticQueue::new();
    std::thread::scope(|scope| {
        for thread in 0..4 {
            let queue = &queue;
            scope.spawn(move || {
                for i in 0..25 {
                    queue.report(error(&format!("t{thread}.D{i}"), "boom"));
                }
            });
        }
    });
    assert_eq!(queue.len(), 100);
    assert_eq!(queue.error_count(), 100);
}
