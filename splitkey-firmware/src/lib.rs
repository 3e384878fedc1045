#![no_std]
//! Peripheral half of a splitkey keyboard.
//!
//! Every key has its own input pin. The [`publisher::Publisher`] samples them, runs the
//! [`debounce::Debouncer`] and packs the result into a [`KeyboardState`] bitmap which the bus
//! peripheral hands to the master half whenever it reads us. Scanning only ever happens in response
//! to bus activity; see [`bus`].
pub mod bus;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod publisher;
pub mod recovery;
pub mod sampler;

#[cfg(any(test, feature = "test-utils"))]
pub mod bus_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod clock_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod pin_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod time_driver_test_stub;

#[macro_use]
mod macros;

pub use splitkey_common::{report_len, KeyboardState, SLAVE_ADDRESS};

/// Values that can be handed to the logging macros.
#[cfg(feature = "defmt")]
pub trait Loggable: core::fmt::Debug + defmt::Format {}
#[cfg(feature = "defmt")]
impl<T: core::fmt::Debug + defmt::Format> Loggable for T {}

/// Values that can be handed to the logging macros.
#[cfg(not(feature = "defmt"))]
pub trait Loggable: core::fmt::Debug {}
#[cfg(not(feature = "defmt"))]
impl<T: core::fmt::Debug> Loggable for T {}
