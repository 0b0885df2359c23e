/*!
 * Control Tests
 * Capacity changes, space queries and reader caps
 */

use crate::common::{device, device_with_capacity};
use pretty_assertions::assert_eq;
use ringdev::control::codes;
use ringdev::{ControlCommand, ControlReply, DeviceError, OpenOptions};

#[test]
fn test_resize_below_minimum_keeps_state() {
    let dev = device();
    let session = dev.open(0, OpenOptions::read_write()).unwrap();
    session.write(b"abc").unwrap();

    let ctl = session.control();
    assert!(matches!(
        ctl.set_capacity(4),
        Err(DeviceError::InvalidArgument(_))
    ));
    assert_eq!(ctl.capacity(), 1024);
    assert_eq!(ctl.used_space(), 3);
    assert_eq!(session.read(8).unwrap(), b"abc");
}

#[test]
fn test_resize_discards_contents() {
    let dev = device();
    let session = dev.open(0, OpenOptions::read_write()).unwrap();
    session.write(b"abc").unwrap();

    let ctl = session.control();
    ctl.set_capacity(2048).unwrap();
    assert_eq!(ctl.capacity(), 2048);
    assert_eq!(ctl.used_space(), 0);
    assert_eq!(ctl.free_space(), 2047);

    session.set_nonblocking(true);
    assert!(matches!(session.read(8), Err(DeviceError::WouldBlock(_))));
}

#[test]
fn test_resize_to_minimum() {
    let dev = device();
    let ctl = dev.control(0).unwrap();
    ctl.set_capacity(5).unwrap();

    let session = dev.open(1, OpenOptions::read_write()).unwrap();
    assert_eq!(session.write(b"123456").unwrap(), 4);
    assert_eq!(ctl.free_space(), 0);
}

#[test]
fn test_resize_visible_from_every_endpoint() {
    let dev = device();
    dev.control(1).unwrap().set_capacity(64).unwrap();
    assert_eq!(dev.control(0).unwrap().capacity(), 64);
    assert_eq!(dev.stats().resizes, 1);
}

#[test]
fn test_negative_capacity_rejected() {
    let dev = device_with_capacity(32);
    let ctl = dev.control(0).unwrap();
    assert!(matches!(
        ctl.dispatch(ControlCommand::SetBufferSize(-8)),
        Err(DeviceError::InvalidArgument(_))
    ));
    assert_eq!(ctl.capacity(), 32);
}

#[test]
fn test_oversized_capacity_is_out_of_memory() {
    let dev = device_with_capacity(32);
    let ctl = dev.control(0).unwrap();
    assert!(matches!(
        ctl.dispatch(ControlCommand::SetBufferSize(i64::MAX)),
        Err(DeviceError::OutOfMemory { .. })
    ));
    assert_eq!(ctl.capacity(), 32);
}

#[test]
fn test_space_queries_track_transfers() {
    let dev = device_with_capacity(100);
    let session = dev.open(0, OpenOptions::read_write()).unwrap();
    let ctl = session.control();

    session.write(&[7u8; 40]).unwrap();
    assert_eq!(ctl.used_space(), 40);
    assert_eq!(ctl.free_space(), 59);

    session.read(15).unwrap();
    assert_eq!(ctl.used_space(), 25);
    assert_eq!(ctl.free_space(), 74);
}

#[test]
fn test_max_readers_per_endpoint() {
    let dev = device();
    let ep0 = dev.control(0).unwrap();
    let ep1 = dev.control(1).unwrap();

    ep0.set_max_readers(9).unwrap();
    assert_eq!(ep0.max_readers().unwrap(), 9);
    assert_eq!(ep1.max_readers().unwrap(), 1);
}

#[test]
fn test_dispatch_raw_codes() {
    let dev = device();
    let ctl = dev.control(0).unwrap();

    assert_eq!(
        ctl.dispatch_raw(codes::GET_BUFFER_SIZE, 0).unwrap(),
        ControlReply::Value(1024)
    );
    assert_eq!(
        ctl.dispatch_raw(codes::SET_MAX_READERS, 3).unwrap(),
        ControlReply::Done
    );
    assert_eq!(
        ctl.dispatch_raw(codes::GET_MAX_READERS, 0).unwrap().value(),
        Some(3)
    );
    assert_eq!(
        ctl.dispatch_raw(codes::SET_BUFFER_SIZE, 256).unwrap(),
        ControlReply::Done
    );
    assert_eq!(
        ctl.dispatch_raw(codes::GET_FREE_SPACE, 0).unwrap(),
        ControlReply::Value(255)
    );
    assert_eq!(
        ctl.dispatch_raw(codes::GET_USED_SPACE, 0).unwrap(),
        ControlReply::Value(0)
    );
}

#[test]
fn test_unknown_code_unsupported() {
    let dev = device();
    let ctl = dev.control(0).unwrap();
    assert_eq!(
        ctl.dispatch_raw(99, 0),
        Err(DeviceError::Unsupported { code: 99 })
    );
    assert_eq!(ctl.capacity(), 1024);
}

#[test]
fn test_control_on_unknown_endpoint() {
    let dev = device();
    assert!(matches!(
        dev.control(2),
        Err(DeviceError::NoSuchEndpoint { endpoint: 2, count: 2 })
    ));
}

#[test]
fn test_control_without_read_or_write_rights() {
    let dev = device();
    let writer = dev.open(0, OpenOptions::write_only()).unwrap();
    // Control needs no particular mode
    writer.control().set_max_readers(4).unwrap();
    assert_eq!(dev.endpoint_stats(0).unwrap().max_readers, 4);
}
