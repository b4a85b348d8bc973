//! Flush execution statistics / 刷盘执行统计

use crate::Sec;

/// Outcome of the most recent flush / 最近一次刷盘的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
  /// Never flushed / 尚未刷盘
  #[default]
  None,
  /// Completed / 成功完成
  Ok,
  /// Transient failure, eligible for retry / 暂时失败，可重试
  Retry,
  /// Fatal failure / 致命失败
  Fatal,
}

/// Summary of the most recent flush execution
/// 最近一次刷盘执行的摘要
#[derive(Debug, Clone, Copy, Default)]
pub struct FlushStats {
  /// Completion wall clock / 完成时的墙上时钟
  pub sec: Sec,
  /// Execution duration in milliseconds / 执行耗时（毫秒）
  pub duration_ms: u64,
  /// Bytes written to disk / 写入磁盘的字节数
  pub bytes_written: u64,
  /// Input bytes before compression / 压缩前的输入字节数
  pub bytes_in: u64,
  /// Outcome / 结果
  pub outcome: Outcome,
}

impl FlushStats {
  /// Compression ratio, 1.0 when either side is zero
  /// 压缩比，任一侧为零时为 1.0
  #[inline]
  pub fn compression_ratio(&self) -> f64 {
    if self.bytes_in == 0 || self.bytes_written == 0 {
      1.0
    } else {
      self.bytes_in as f64 / self.bytes_written as f64
    }
  }
}
