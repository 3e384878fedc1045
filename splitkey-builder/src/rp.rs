//! RP2040 glue: the I2C slave peripheral as a [`SlaveBus`] and a macro that builds a complete
//! half from a pin list.

pub use embassy_rp::*;

use embassy_rp::i2c::Instance;
use embassy_rp::i2c_slave::{self, Command, I2cSlave, ReadStatus};
use splitkey_firmware::bus::{SlaveBus, Transfer};

/// Byte clocked out when the master reads past the end of the report. Reads as "released".
const PAD: u8 = 0xff;

/// Answers master reads with the current report.
pub struct I2cSlaveBus<'d, T: Instance> {
    dev: I2cSlave<'d, T>,
}

impl<'d, T: Instance> I2cSlaveBus<'d, T> {
    pub fn new(dev: I2cSlave<'d, T>) -> Self {
        Self { dev }
    }

    /// Slave configuration answering on the 7-bit `address`.
    pub fn config(address: u8) -> i2c_slave::Config {
        let mut config = i2c_slave::Config::default();
        config.addr = address as u16;
        config
    }

    async fn respond(&mut self, report: &[u8]) -> Result<Transfer, i2c_slave::Error> {
        if let ReadStatus::LeftoverBytes(n) = self.dev.respond_and_fill(report, PAD).await? {
            splitkey_firmware::debug!("master stopped reading {} bytes early", n);
        }
        Ok(Transfer::Transmitted)
    }
}

impl<T: Instance> SlaveBus for I2cSlaveBus<'_, T> {
    type Error = i2c_slave::Error;

    async fn exchange(
        &mut self,
        report: &[u8],
        inbound: &mut [u8],
    ) -> Result<Transfer, Self::Error> {
        match self.dev.listen(inbound).await? {
            Command::Read | Command::WriteRead(_) => self.respond(report).await,
            Command::Write(n) | Command::GeneralCall(n) => Ok(Transfer::Received(n)),
        }
    }
}

/// Build and run a keyboard half with one pulled-up input per key, published on an I2C slave at
/// [`SLAVE_ADDRESS`](crate::SLAVE_ADDRESS).
///
/// Keys are numbered in the order their pins are listed. The board crate must depend on
/// `cortex-m`, `cortex-m-rt` and `embassy-executor`.
///
/// # Example `main.rs`
///
/// ```rust
/// #![no_std]
/// #![no_main]
///
/// splitkey_builder::rp_run_half! {
///     i2c: I2C1, irq: I2C1_IRQ, scl: PIN_27, sda: PIN_26,
///     keys: [PIN_0, PIN_1, PIN_2, PIN_3],
/// }
/// ```
#[macro_export]
macro_rules! rp_run_half {
    (
        i2c: $i2c:ident, irq: $irq:ident, scl: $scl:ident, sda: $sda:ident,
        keys: [$($pin:ident),+ $(,)?] $(,)?
    ) => {
        use $crate::rp::{self, bind_interrupts, gpio::{Input, Pull}, peripherals};
        use $crate::{bus, clock::SystemClock, config::ScanConfig, publisher::Publisher, sampler::PinSampler, StaticCell};

        const NUM_KEYS: usize = [$(stringify!($pin)),+].len();
        const REPORT_LEN: usize = $crate::report_len(NUM_KEYS);

        bind_interrupts!(struct Irqs {
            $irq => rp::i2c::InterruptHandler<peripherals::$i2c>;
        });

        fn reset() {
            cortex_m::peripheral::SCB::sys_reset()
        }

        #[embassy_executor::main]
        async fn main(_spawner: embassy_executor::Spawner) -> ! {
            let p = rp::init(Default::default());
            $crate::recovery::handle_reset(Some(&reset));

            type Half = Publisher<
                PinSampler<Input<'static>, NUM_KEYS>,
                SystemClock,
                NUM_KEYS,
                REPORT_LEN,
            >;
            static PUBLISHER: StaticCell<Half> = StaticCell::new();

            let keys = [$(Input::new(p.$pin, Pull::Up)),+];
            let publisher = PUBLISHER.init(Publisher::new(
                PinSampler::new(keys),
                SystemClock,
                &ScanConfig::new(),
            ));

            let dev = rp::i2c_slave::I2cSlave::new(
                p.$i2c,
                p.$scl,
                p.$sda,
                Irqs,
                $crate::rp::I2cSlaveBus::<peripherals::$i2c>::config($crate::SLAVE_ADDRESS),
            );
            let mut slave = $crate::rp::I2cSlaveBus::new(dev);

            $crate::info!("serving {} keys at {:#x}", NUM_KEYS, $crate::SLAVE_ADDRESS);
            bus::serve(publisher, &mut slave).await
        }
    };
}
