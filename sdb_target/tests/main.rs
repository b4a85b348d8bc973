use std::io;

use aok::{OK, Void};
use sdb_target::{AtomicSerial, FlushErr, SerialSource};

#[test]
fn test_atomic_serial() -> Void {
  let serial = AtomicSerial::new(10);
  assert_eq!(serial.current(), 10);

  serial.advance(20);
  assert_eq!(serial.current(), 20);

  // Stale advance is a no-op / 过期推进为空操作
  serial.advance(5);
  assert_eq!(serial.current(), 20);
  OK
}

#[test]
fn test_flush_err_from_io() -> Void {
  fn write() -> Result<(), FlushErr> {
    Err(io::Error::other("disk full"))?;
    Ok(())
  }

  match write() {
    Err(FlushErr::Retry(e)) => assert_eq!(e.to_string(), "disk full"),
    other => panic!("expected Retry, got {other:?}"),
  }
  OK
}

#[test]
fn test_flush_err_display() -> Void {
  let retry = FlushErr::Retry(io::Error::other("eio"));
  assert_eq!(retry.to_string(), "retryable: eio");

  let fatal = FlushErr::Fatal("checksum mismatch".into());
  assert_eq!(fatal.to_string(), "fatal: checksum mismatch");
  OK
}
