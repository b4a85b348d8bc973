//! Flush target contract / 刷盘目标契约

use sdb_base::{FlushStats, Gain, Sec, SerialNum};

use crate::{Result, Task};

/// A component whose in-memory state can be persisted
/// 内存状态可持久化的组件
///
/// Read methods have no side effects and may be called concurrently with
/// the target's own mutation; the implementation keeps them consistent.
/// They must not call back into the flush engine.
/// 读方法无副作用，可与目标自身的变更并发调用；实现自行保证一致性。
/// 它们不得回调刷盘引擎。
pub trait Target: Send + Sync {
  /// Stable identifier, immutable after construction / 稳定标识，构造后不变
  fn name(&self) -> &str;

  /// Estimated memory footprint change if flushed now
  /// 现在刷盘时的内存占用变化估算
  fn mem_gain(&self) -> Gain;

  /// Estimated disk footprint change / 磁盘占用变化估算
  fn disk_gain(&self) -> Gain;

  /// Last durable log position, non-decreasing / 最后持久位置，非递减
  fn flushed_serial(&self) -> SerialNum;

  /// Wall clock of last successful flush / 上次成功刷盘的墙上时钟
  fn last_flush_sec(&self) -> Sec;

  /// Wants priority regardless of cost ranking / 无视成本排序要求优先
  fn need_urgent(&self) -> bool;

  /// Estimated bytes the next flush writes / 下次刷盘预计写入的字节数
  fn bytes_to_write(&self) -> u64;

  /// Stats of the most recent execution / 最近一次执行的统计
  fn last_stats(&self) -> FlushStats;

  /// Capture a snapshot and return the task that persists it
  /// 捕获一致快照并返回持久化它的任务
  ///
  /// Cheap and synchronous, must not block on I/O. Err(Busy) if the
  /// previous task has not completed: callers serialize flushes per target.
  /// 廉价同步，不得阻塞 I/O。前一任务未完成时返回 Err(Busy)：
  /// 调用方须按目标串行化刷盘。
  fn init_flush(&self, current: SerialNum) -> Result<Box<dyn Task>>;
}
