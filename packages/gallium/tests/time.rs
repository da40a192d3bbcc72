use std::time::{Duration, Instant};

use pistonite_ga as ga;

use ga::time;

#[test]
fn test_format_time() {
    assert_eq!(time::format_time(0.0), "00:00");
    assert_eq!(time::format_time(59.99), "00:59");
    assert_eq!(time::format_time(92.6), "01:32");
    assert_eq!(time::format_time(3599.0), "59:59");
    assert_eq!(time::format_time(3600.0), "1:00:00");
    assert_eq!(time::format_time(36_000.0 + 61.0), "10:01:01");
    assert_eq!(time::format_time(-5.0), "00:00");
    assert_eq!(time::format_time(f64::NAN), "00:00");
}

#[test]
fn test_rate_and_interval() {
    assert_eq!(time::rate(10.0, 4.0), 2.5);
    assert_eq!(time::rate(10.0, 0.0), 0.0);
    assert_eq!(time::interval(2.5), 0.4);
    assert_eq!(time::interval(0.0), 0.0);
}

#[test]
fn test_eta() {
    assert_eq!(time::eta(0, 0.0, 0.0), time::ETA_DONE);
    assert_eq!(time::eta(100, 5.0, 0.0), time::ETA_UNKNOWN);
    assert_eq!(time::eta(101, 23.0, 23.0 / 27.0), "01:31");
    assert_eq!(time::eta(10, 10.0, 1.0), "00:00");
}

#[test]
fn test_percentage() {
    assert_eq!(time::percentage(0, 0), 1.0);
    assert_eq!(time::percentage(5, 0), 1.0);
    assert_eq!(time::percentage(1, 4), 0.25);
    assert_eq!(time::percentage(6, 4), 1.5);
}

#[test]
fn test_elapsed_stops_at_completion() {
    let start = Instant::now();
    let done = start + Duration::from_secs(10);
    let now = start + Duration::from_secs(25);
    assert_eq!(time::elapsed(start, None, now), Duration::from_secs(25));
    assert_eq!(time::elapsed(start, Some(done), now), Duration::from_secs(10));
    assert_eq!(time::elapsed(now, None, start), Duration::ZERO);
}
