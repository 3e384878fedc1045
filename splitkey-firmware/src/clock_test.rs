use super::*;

use crate::clock_test_stub::ManualClock;
use crate::time_driver_test_stub::set_time;

#[test]
fn system_clock_reports_milliseconds() {
    set_time(123_456);
    assert_eq!(SystemClock.now(), Millis(123));

    set_time(10_000_999);
    assert_eq!(SystemClock.now(), Millis(10_000));
}

#[test]
fn until_wraps() {
    assert_eq!(Millis(100).until(Millis(110)), 10);
    assert_eq!(Millis(110).until(Millis(110)), 0);
    assert_eq!(Millis(111).until(Millis(110)), u32::MAX);

    let deadline = Millis(u32::MAX - 3).wrapping_add(10);
    assert_eq!(deadline, Millis(6));
    assert_eq!(Millis(u32::MAX - 3).until(deadline), 10);
    assert_eq!(Millis(2).until(deadline), 4);
}

#[test]
fn manual_clock_is_shared() {
    let clock = ManualClock::default();
    let by_ref = &clock;

    clock.set(u32::MAX);
    clock.advance(2);
    assert_eq!(by_ref.now(), Millis(1));
}
