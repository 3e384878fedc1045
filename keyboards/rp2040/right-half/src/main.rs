#![no_std]
#![no_main]

// Right half of the reference board: 24 switches, each on its own GPIO with the internal
// pull-up, and the link to the left half on I2C1.
//
// Keys 12-15 follow the second wiring revision, where key 15 moved from GPIO15 to GPIO19.
splitkey_builder::rp_run_half! {
    i2c: I2C1, irq: I2C1_IRQ, scl: PIN_27, sda: PIN_26,
    keys: [
        PIN_0, PIN_1, PIN_2, PIN_3,
        PIN_4, PIN_5, PIN_6, PIN_7,
        PIN_8, PIN_9, PIN_10, PIN_11,
        PIN_12, PIN_13, PIN_14, PIN_19,
        PIN_16, PIN_17, PIN_18, PIN_20,
        PIN_21, PIN_22, PIN_23, PIN_24,
    ],
}
