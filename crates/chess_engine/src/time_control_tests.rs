use super::*;
use std::thread;

#[test]
fn test_search_limits_depth_only() {
    let limits = SearchLimits::depth(5);
    assert_eq!(limits.depth, 5);
    assert!(limits.move_time().is_none());
    assert!(!limits.time_control.is_stopped());
}

#[test]
fn test_search_limits_from_config() {
    let config = SearchConfig {
        depth: 3,
        time_limit_ms: Some(250),
        ..SearchConfig::default()
    };
    let limits = SearchLimits::from_config(&config);
    assert_eq!(limits.depth, 3);
    assert_eq!(limits.move_time(), Some(Duration::from_millis(250)));

    let unlimited = SearchLimits::from_config(&SearchConfig::default());
    assert!(unlimited.move_time().is_none());
}

#[test]
fn test_budget_runs_out() {
    let tc = TimeControl::new(Some(Duration::from_millis(10)));
    assert!(!tc.check_time(), "the clock has not started");
    tc.start();
    assert!(!tc.is_stopped());

    thread::sleep(Duration::from_millis(20));
    assert!(tc.check_time());
    assert!(tc.is_stopped());
    assert!(tc.elapsed() >= Duration::from_millis(20));
}

#[test]
fn test_unlimited_never_expires() {
    let tc = TimeControl::unlimited();
    assert_eq!(tc.elapsed(), Duration::ZERO);
    tc.start();
    thread::sleep(Duration::from_millis(10));
    assert!(!tc.check_time());
    assert!(tc.elapsed() >= Duration::from_millis(10));
}

#[test]
fn test_clones_share_flag_and_clock() {
    let tc = TimeControl::unlimited();
    let handle = tc.clone();
    thread::spawn(move || handle.stop())
        .join()
        .expect("stopper thread panicked");
    assert!(tc.is_stopped());

    let observer = tc.clone();
    tc.start();
    assert!(!observer.is_stopped(), "start clears a previous stop");
    thread::sleep(Duration::from_millis(5));
    assert!(observer.elapsed() >= Duration::from_millis(5));
}

#[test]
fn test_poll_reads_clock_on_interval() {
    let tc = TimeControl::new(Some(Duration::ZERO));
    tc.start();
    assert!(!tc.poll(1), "clock not read between intervals");
    assert!(!tc.is_stopped());
    assert!(tc.poll(CLOCK_POLL_INTERVAL));
    assert!(tc.poll(1), "stop flag is sticky");
}
