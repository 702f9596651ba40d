//! Timing helper tests

use std::time::Duration;

use wiring_infrastructure::utils::TimedOperation;

#[test]
fn test_remaining_before_and_after_deadline() {
    let timer = TimedOperation::start();
    std::thread::sleep(Duration::from_millis(5));

    assert!(timer.elapsed() >= Duration::from_millis(5));
    assert!(timer.elapsed_ms() >= 5);
    assert!(timer.remaining(Duration::from_secs(60)).is_some());
    assert!(timer.remaining(Duration::from_millis(1)).is_none());
}
