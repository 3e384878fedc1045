use super::*;

extern crate std;
use std::vec::Vec;

type State = KeyboardState<3>;

#[test]
fn all_released_is_all_ones() {
    assert_eq!(State::all_released().as_bytes(), &[0xff, 0xff, 0xff]);
    assert_eq!(State::default(), State::all_released());
    assert_eq!(State::CAPACITY, 24);
}

#[test]
fn bits_are_lsb_first_per_byte() {
    let mut state = State::all_released();

    assert!(state.set_pressed(5));
    assert!(!state.set_pressed(5));
    assert_eq!(state.as_bytes(), &[0xdf, 0xff, 0xff]);

    state.set_pressed(8);
    state.set_pressed(23);
    assert_eq!(state.as_bytes(), &[0xdf, 0xfe, 0x7f]);

    assert!(state.set_released(5));
    assert!(!state.set_released(5));
    assert_eq!(state.as_bytes(), &[0xff, 0xfe, 0x7f]);
}

#[test]
fn out_of_range_keys_are_ignored() {
    let mut state = State::all_released();

    assert!(!state.set_pressed(24));
    assert!(!state.set_released(100));
    assert!(!state.is_pressed(24));
    assert_eq!(state, State::all_released());
}

#[test]
fn release_all_resets_every_bit() {
    let mut state = State::from_bytes([0x00, 0x12, 0x80]);
    state.release_all();
    assert_eq!(state, State::all_released());
}

#[test]
fn pressed_keys() {
    let state = State::from_bytes([0b1111_1010, 0xff, 0b0111_1111]);

    assert!(state.is_pressed(0));
    assert!(!state.is_pressed(1));
    assert_eq!(state.pressed_keys().collect::<Vec<_>>(), [0, 2, 23]);
}

#[test]
fn changes_between_polls() {
    let previous = State::from_bytes([0xdf, 0xff, 0xff]);
    let now = State::from_bytes([0xff, 0xfd, 0xff]);

    assert_eq!(
        now.changes(&previous).collect::<Vec<_>>(),
        [
            KeyChange {
                key: 5,
                pressed: false
            },
            KeyChange {
                key: 9,
                pressed: true
            },
        ]
    );
    assert_eq!(now.changes(&now).count(), 0);
}
