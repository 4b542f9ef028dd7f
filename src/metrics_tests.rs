use super::*;

#[test]
fn test_operation_timer_creation() {
    let timer = OperationTimer::new("retention_sweep");
    assert_eq!(timer.name, "retention_sweep");
}

#[test]
fn test_operation_timer_elapsed_is_monotonic() {
    let timer = OperationTimer::new("retention_sweep");
    let first = timer.elapsed();
    let second = timer.elapsed();
    assert!(second >= first);
}

#[test]
fn test_generate_run_id_format() {
    let id = generate_run_id();
    assert_eq!(id.len(), 8);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_generate_run_id_unique() {
    assert_ne!(generate_run_id(), generate_run_id());
}
