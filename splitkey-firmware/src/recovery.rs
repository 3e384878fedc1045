//! Last resort recovery. A half that has panicked is reset so the master sees the link come back
//! rather than a frozen report.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;

pub type ResetFn = &'static (dyn Fn() + Sync);

static RESET: CriticalSectionMutex<RefCell<Option<ResetFn>>> =
    CriticalSectionMutex::new(RefCell::new(None));

/// Register the function that resets the MCU.
///
/// ```
/// use splitkey_firmware::recovery::handle_reset;
/// # pub mod cortex_m { pub mod peripheral {pub mod SCB {pub fn sys_reset() {}}}}
///
/// fn myreset() {
///     cortex_m::peripheral::SCB::sys_reset();
/// }
///
/// handle_reset(Some(&myreset));
/// ```
pub fn handle_reset(value: Option<ResetFn>) {
    RESET.lock(|r| *r.borrow_mut() = value);
}

/// Call the registered reset function. It is only ever called once.
pub fn reset() {
    match RESET.lock(|r| r.borrow_mut().take()) {
        Some(f) => f(),
        None => crate::error!("reset requested but no reset function registered"),
    }
}

#[cfg(all(not(test), feature = "reset-on-panic", target_os = "none"))]
mod panic {
    #[panic_handler]
    fn panic(_info: &core::panic::PanicInfo) -> ! {
        super::reset();

        loop {}
    }
}
