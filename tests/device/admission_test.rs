/*!
 * Admission Tests
 * Writer exclusivity and reader caps per endpoint
 */

use crate::common::device;
use pretty_assertions::assert_eq;
use ringdev::{AccessMode, DeviceError, EndpointStats, OpenOptions};

#[test]
fn test_second_writer_is_busy() {
    let dev = device();
    let _writer = dev.open(0, OpenOptions::write_only()).unwrap();

    assert_eq!(
        dev.open(0, OpenOptions::write_only()).unwrap_err(),
        DeviceError::Busy { endpoint: 0 }
    );
    // Other endpoint has its own writer slot
    assert!(dev.open(1, OpenOptions::write_only()).is_ok());
}

#[test]
fn test_default_reader_cap() {
    let dev = device();
    let _reader = dev.open(1, OpenOptions::read_only()).unwrap();

    assert_eq!(
        dev.open(1, OpenOptions::read_only()).unwrap_err(),
        DeviceError::TooManyReaders {
            endpoint: 1,
            readers: 1,
            max_readers: 1,
        }
    );
}

#[test]
fn test_raised_reader_cap() {
    let dev = device();
    dev.control(0).unwrap().set_max_readers(9).unwrap();

    let readers: Vec<_> = (0..9)
        .map(|_| dev.open(0, OpenOptions::read_only()).unwrap())
        .collect();
    assert_eq!(readers.len(), 9);

    assert!(matches!(
        dev.open(0, OpenOptions::read_only()),
        Err(DeviceError::TooManyReaders { readers: 9, .. })
    ));
}

#[test]
fn test_lowered_cap_keeps_existing_readers() {
    let dev = device();
    let ctl = dev.control(0).unwrap();
    ctl.set_max_readers(3).unwrap();
    let readers: Vec<_> = (0..3)
        .map(|_| dev.open(0, OpenOptions::read_only()).unwrap())
        .collect();

    ctl.set_max_readers(1).unwrap();
    assert_eq!(dev.endpoint_stats(0).unwrap().readers, 3);
    assert!(dev.open(0, OpenOptions::read_only()).is_err());

    drop(readers);
    assert!(dev.open(0, OpenOptions::read_only()).is_ok());
}

#[test]
fn test_zero_cap_rejects_readers_not_writers() {
    let dev = device();
    dev.control(1).unwrap().set_max_readers(0).unwrap();

    assert!(matches!(
        dev.open(1, OpenOptions::read_only()),
        Err(DeviceError::TooManyReaders { .. })
    ));
    assert!(dev.open(1, OpenOptions::write_only()).is_ok());
}

#[test]
fn test_close_returns_slot() {
    let dev = device();
    let writer = dev.open(0, OpenOptions::write_only()).unwrap();
    writer.close();
    assert!(dev.open(0, OpenOptions::write_only()).is_ok());
}

#[test]
fn test_drop_returns_slot() {
    let dev = device();
    {
        let _reader = dev.open(0, OpenOptions::read_only()).unwrap();
        assert_eq!(dev.endpoint_stats(0).unwrap().readers, 1);
    }
    assert_eq!(dev.endpoint_stats(0).unwrap().readers, 0);
    assert!(dev.open(0, OpenOptions::read_only()).is_ok());
}

#[test]
fn test_read_write_takes_both_slots() {
    let dev = device();
    let session = dev.open(0, OpenOptions::read_write()).unwrap();
    assert_eq!(session.mode(), AccessMode::ReadWrite);

    assert!(matches!(
        dev.open(0, OpenOptions::write_only()),
        Err(DeviceError::Busy { .. })
    ));
    assert!(matches!(
        dev.open(0, OpenOptions::read_only()),
        Err(DeviceError::TooManyReaders { .. })
    ));

    drop(session);
    assert_eq!(
        dev.endpoint_stats(0).unwrap(),
        EndpointStats {
            id: 0,
            readers: 0,
            writers: 0,
            max_readers: 1,
        }
    );
}

#[test]
fn test_read_write_reports_busy_first() {
    let dev = device();
    let _writer = dev.open(0, OpenOptions::write_only()).unwrap();
    let _reader = dev.open(0, OpenOptions::read_only()).unwrap();

    assert!(matches!(
        dev.open(0, OpenOptions::read_write()),
        Err(DeviceError::Busy { endpoint: 0 })
    ));
}

#[test]
fn test_failed_read_write_open_takes_nothing() {
    let dev = device();
    let _reader = dev.open(0, OpenOptions::read_only()).unwrap();

    assert!(matches!(
        dev.open(0, OpenOptions::read_write()),
        Err(DeviceError::TooManyReaders { .. })
    ));
    assert_eq!(dev.endpoint_stats(0).unwrap().writers, 0);
    assert!(dev.open(0, OpenOptions::write_only()).is_ok());
}

#[test]
fn test_open_without_mode_is_invalid() {
    let dev = device();
    assert!(matches!(
        dev.open(0, OpenOptions::new()),
        Err(DeviceError::InvalidArgument(_))
    ));
}

#[test]
fn test_open_unknown_endpoint() {
    let dev = device();
    assert!(matches!(
        dev.open(7, OpenOptions::read_only()),
        Err(DeviceError::NoSuchEndpoint { endpoint: 7, .. })
    ));
}

#[test]
fn test_denials_counted_in_stats() {
    let dev = device();
    let _writer = dev.open(0, OpenOptions::write_only()).unwrap();
    let _ = dev.open(0, OpenOptions::write_only());
    let _ = dev.open(0, OpenOptions::write_only());

    assert_eq!(dev.stats().admissions_denied, 2);
}

#[test]
fn test_endpoint_stats_listing() {
    let dev = device();
    let _writer = dev.open(1, OpenOptions::write_only()).unwrap();

    let stats = dev.all_endpoint_stats();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].writers, 0);
    assert_eq!(stats[1].writers, 1);
}
