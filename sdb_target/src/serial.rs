//! Serial number source / 序列号来源

use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

use sdb_base::SerialNum;

/// Current position of the write-ahead log
/// 预写日志的当前位置
pub trait SerialSource: Send + Sync {
  /// Non-decreasing across calls / 跨调用非递减
  fn current(&self) -> SerialNum;
}

/// In-memory serial counter / 内存序列号计数器
#[derive(Debug, Default)]
pub struct AtomicSerial(AtomicU64);

impl AtomicSerial {
  pub fn new(serial: SerialNum) -> Self {
    Self(AtomicU64::new(serial))
  }

  /// Advance past a committed write, stale values are no-ops
  /// 提交写入后推进，过期值为空操作
  #[inline]
  pub fn advance(&self, serial: SerialNum) {
    self.0.fetch_max(serial, Relaxed);
  }
}

impl SerialSource for AtomicSerial {
  #[inline]
  fn current(&self) -> SerialNum {
    self.0.load(Relaxed)
  }
}
