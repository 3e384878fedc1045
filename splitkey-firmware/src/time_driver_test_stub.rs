extern crate std;

use core::{cell::Cell, task::Waker};
use embassy_time_driver::Driver;

struct TestTimeDriver;

impl Driver for TestTimeDriver {
    fn now(&self) -> u64 {
        NOW.get()
    }

    fn schedule_wake(&self, at: u64, waker: &Waker) {
        NOW.with(|now| {
            if at > now.get() {
                now.set(at);
            }
        });

        waker.wake_by_ref();
    }
}

std::thread_local! {
    static NOW: Cell<u64> = const { Cell::new(0) };
}

embassy_time_driver::time_driver_impl!(static TIME_DRIVER: TestTimeDriver = TestTimeDriver);

/// Set the current time for this thread, in ticks.
pub fn set_time(t: u64) {
    NOW.set(t);
}
