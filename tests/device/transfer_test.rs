/*!
 * Transfer Tests
 * Reads and writes through the shared buffer
 */

use crate::common::{device, device_with_capacity};
use pretty_assertions::assert_eq;
use ringdev::{DeviceError, Direction, Fault, OpenOptions, UserSource};
use std::io::{Read, Write};

#[test]
fn test_buffer_shared_across_endpoints() {
    let dev = device();
    let writer = dev.open(0, OpenOptions::read_write()).unwrap();
    let reader = dev.open(1, OpenOptions::read_write()).unwrap();

    assert_eq!(writer.write(b"hello").unwrap(), 5);
    assert_eq!(reader.read(5).unwrap(), b"hello");
}

#[test]
fn test_same_endpoint_reads_own_writes() {
    let dev = device();
    let session = dev.open(0, OpenOptions::read_write()).unwrap();

    session.write(b"loopback").unwrap();
    assert_eq!(session.read(64).unwrap(), b"loopback");
}

#[test]
fn test_default_capacity_reserves_one_slot() {
    let dev = device();
    let session = dev
        .open(0, OpenOptions::read_write().nonblocking(true))
        .unwrap();
    assert_eq!(dev.capacity(), 1024);

    for i in 0..1023u32 {
        assert_eq!(session.write(&[i as u8]).unwrap(), 1, "write {}", i);
    }

    assert_eq!(
        session.write(&[0xff]),
        Err(DeviceError::WouldBlock(Direction::Write))
    );
    assert_eq!(dev.used_space(), 1023);
    assert_eq!(dev.free_space(), 0);
}

#[test]
fn test_short_write() {
    let dev = device_with_capacity(8);
    let session = dev.open(0, OpenOptions::read_write()).unwrap();

    assert_eq!(session.write(b"0123456789").unwrap(), 7);
    assert_eq!(session.read(100).unwrap(), b"0123456");
}

#[test]
fn test_short_read() {
    let dev = device();
    let writer = dev.open(0, OpenOptions::write_only()).unwrap();
    let reader = dev.open(1, OpenOptions::read_only()).unwrap();

    writer.write(b"abc").unwrap();
    let mut buf = [0u8; 42];
    assert_eq!(reader.read_into(&mut buf[..]).unwrap(), 3);
    assert_eq!(&buf[..3], b"abc");
}

#[test]
fn test_write_order_preserved_across_wrap() {
    let dev = device_with_capacity(10);
    let writer = dev.open(0, OpenOptions::write_only()).unwrap();
    let reader = dev.open(1, OpenOptions::read_only()).unwrap();

    let mut expected = Vec::new();
    let mut received = Vec::new();
    for round in 0..20u8 {
        let chunk = [round, round.wrapping_add(1), round.wrapping_add(2)];
        assert_eq!(writer.write(&chunk).unwrap(), 3);
        expected.extend_from_slice(&chunk);
        received.extend(reader.read(2).unwrap());
        received.extend(reader.read(1).unwrap());
    }
    assert_eq!(received, expected);
    assert_eq!(dev.used_space(), 0);
}

#[test]
fn test_nonblocking_read_on_empty() {
    let dev = device();
    let session = dev
        .open(0, OpenOptions::read_write().nonblocking(true))
        .unwrap();

    assert_eq!(
        session.read(42),
        Err(DeviceError::WouldBlock(Direction::Read))
    );
}

#[test]
fn test_toggle_nonblocking() {
    let dev = device();
    let session = dev.open(0, OpenOptions::read_only()).unwrap();
    assert!(!session.is_nonblocking());

    session.set_nonblocking(true);
    assert!(matches!(
        session.read(1),
        Err(DeviceError::WouldBlock(_))
    ));
}

#[test]
fn test_mode_enforced_on_transfers() {
    let dev = device();
    let reader = dev.open(0, OpenOptions::read_only()).unwrap();
    let writer = dev.open(1, OpenOptions::write_only()).unwrap();

    assert_eq!(
        reader.write(b"x"),
        Err(DeviceError::BadDescriptor(Direction::Write))
    );
    assert_eq!(
        writer.read(1),
        Err(DeviceError::BadDescriptor(Direction::Read))
    );
    assert_eq!(dev.used_space(), 0);
}

struct UnmappedSource;

impl UserSource for UnmappedSource {
    fn len(&self) -> usize {
        32
    }

    fn copy_out(&self, offset: usize, dst: &mut [u8]) -> Result<(), Fault> {
        Err(Fault {
            offset,
            len: dst.len(),
        })
    }
}

#[test]
fn test_faulting_source_leaves_buffer_unchanged() {
    let dev = device();
    let session = dev.open(0, OpenOptions::read_write()).unwrap();
    session.write(b"keep").unwrap();

    assert!(matches!(
        session.write_from(&UnmappedSource),
        Err(DeviceError::Fault(_))
    ));
    assert_eq!(dev.used_space(), 4);
    assert_eq!(session.read(16).unwrap(), b"keep");
}

#[test]
fn test_io_traits() {
    let dev = device();
    let mut writer = dev.open(0, OpenOptions::write_only()).unwrap();
    let mut reader = dev
        .open(1, OpenOptions::read_only().nonblocking(true))
        .unwrap();

    Write::write_all(&mut writer, b"via std::io").unwrap();
    writer.flush().unwrap();

    let mut buf = [0u8; 11];
    reader.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"via std::io");

    let err = Read::read(&mut reader, &mut buf).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::WouldBlock);
}

#[test]
fn test_stats_track_transfers() {
    let dev = device();
    let session = dev.open(0, OpenOptions::read_write()).unwrap();
    session.write(b"12345").unwrap();
    session.read(3).unwrap();

    let stats = dev.stats();
    assert_eq!(stats.writes, 1);
    assert_eq!(stats.bytes_written, 5);
    assert_eq!(stats.reads, 1);
    assert_eq!(stats.bytes_read, 3);
}
