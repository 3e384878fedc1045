extern crate std;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

use super::*;

use crate::bus_test_stub::{BusFault, RecordingTransport, ScriptedBus};
use crate::clock_test_stub::ManualClock;
use crate::config::{ScanConfig, NUM_KEYS, REPORT_LEN};
use crate::debounce::Rollover;
use crate::pin_test_stub::KeySwitches;

type Half = Publisher<KeySwitches<NUM_KEYS>, ManualClock, NUM_KEYS, REPORT_LEN>;

fn setup() -> (Half, KeySwitches<NUM_KEYS>, ManualClock) {
    let switches = KeySwitches::default();
    let clock = ManualClock::default();
    let config = ScanConfig::new().rollover(Rollover::Unlimited);
    let publisher = Publisher::new(switches.clone(), clock.clone(), &config);
    (publisher, switches, clock)
}

#[test]
fn serve_once_maps_transfers_to_events() {
    let (mut publisher, switches, clock) = setup();
    let mut bus = ScriptedBus::new([
        Ok(Transfer::Transmitted),
        Err(BusFault),
        Ok(Transfer::Received(2)),
    ]);
    let mut inbound = [0; INBOUND_LEN];
    publisher.on_event(BusEvent::Startup);

    block_on(async {
        switches.down(0);
        assert_eq!(
            serve_once(&mut publisher, &mut bus, &mut inbound).await,
            BusEvent::TransmitComplete
        );

        clock.set(30);
        switches.down(10);
        assert_eq!(
            serve_once(&mut publisher, &mut bus, &mut inbound).await,
            BusEvent::Error
        );

        assert_eq!(
            serve_once(&mut publisher, &mut bus, &mut inbound).await,
            BusEvent::ReceiveComplete
        );
    });

    assert_eq!(
        bus.served,
        [
            [0xff, 0xff, 0xff],
            [0xfe, 0xff, 0xff],
            [0xfe, 0xfb, 0xff]
        ]
    );
    assert_eq!(&inbound[..3], &[0xa5, 0xa5, 0]);
    assert_eq!(publisher.report().as_bytes(), &[0xfe, 0xfb, 0xff]);
}

#[test]
fn serve_seeds_before_first_read() {
    let (mut publisher, switches, _) = setup();
    let mut bus = ScriptedBus::new(core::iter::empty::<Result<Transfer, BusFault>>());
    switches.down(4);

    block_on(async {
        let serving = serve(&mut publisher, &mut bus);
        let _ = embassy_futures::select::select(serving, core::future::ready(())).await;
    });

    assert_eq!(bus.served, [[0xef, 0xff, 0xff]]);
}

#[test]
fn shared_half_refreshes_and_arms_as_one() {
    let (publisher, switches, clock) = setup();
    let half = SharedHalf::<CriticalSectionRawMutex, _, _, _, NUM_KEYS, REPORT_LEN>::new(
        publisher,
        RecordingTransport::default(),
    );

    half.notify(BusEvent::Startup).unwrap();
    switches.down(21);
    clock.set(2);
    half.notify(BusEvent::TransmitComplete).unwrap();

    assert_eq!(half.report().as_bytes(), &[0xff, 0xff, 0xdf]);
    half.with(|publisher, transport| {
        assert_eq!(transport.sent.len(), 2);
        assert_eq!(transport.last(), Some(&publisher.report().as_bytes()[..]));
    });
}

#[test]
fn shared_half_error_aborts_in_flight_transfer() {
    let (publisher, _, _) = setup();
    let half = SharedHalf::<NoopRawMutex, _, _, _, NUM_KEYS, REPORT_LEN>::new(
        publisher,
        RecordingTransport::default(),
    );

    half.notify(BusEvent::Startup).unwrap();
    half.notify(BusEvent::Error).unwrap();
    half.with(|_, transport| {
        assert_eq!(transport.aborts, 1);
        assert_eq!(transport.sent.len(), 2);
    });
}

#[test]
fn shared_half_rearms_listen() {
    let (publisher, _, _) = setup();
    let half = SharedHalf::<NoopRawMutex, _, _, _, NUM_KEYS, REPORT_LEN>::new(
        publisher,
        RecordingTransport {
            fail_next: true,
            ..Default::default()
        },
    );
    let mut inbound = [0xaa; INBOUND_LEN];

    assert_eq!(half.receive(&mut inbound), Err(BusFault));
    half.receive(&mut inbound).unwrap();

    assert_eq!(inbound, [0; INBOUND_LEN]);
    half.with(|_, transport| {
        assert_eq!(transport.receives, 1);
        assert!(transport.sent.is_empty());
    });
}

#[test]
fn transport_by_reference() {
    let (mut publisher, _, _) = setup();
    let mut transport = RecordingTransport::default();

    publisher
        .handle(BusEvent::Startup, &mut &mut transport)
        .unwrap();
    assert_eq!(transport.sent.len(), 1);
}
