//! Per-target job bookkeeping / 按目标的任务记账

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering::Relaxed};

/// Cumulative job counters, polled by metrics collection
/// 累积任务计数器，由指标采集轮询
///
/// Mutated only by the tracking decorator; at most one job is active per
/// target, enforced by the engine, not here.
/// 仅由跟踪装饰器修改；每目标至多一个活跃任务，由引擎而非此处保证。
#[derive(Debug, Default)]
pub struct JobTracker {
  active: AtomicU32,
  total: AtomicU64,
  duration_ms: AtomicU64,
}

/// Snapshot of tracker counters / 计数器快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStats {
  pub active: u32,
  pub total: u64,
  pub duration_ms: u64,
}

impl JobTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record job start / 记录任务开始
  pub fn job_started(&self) {
    self.active.fetch_add(1, Relaxed);
    self.total.fetch_add(1, Relaxed);
  }

  /// Record job end with elapsed time / 记录任务结束与耗时
  pub fn job_ended(&self, elapsed_ms: u64) {
    self.active.fetch_sub(1, Relaxed);
    self.duration_ms.fetch_add(elapsed_ms, Relaxed);
  }

  #[inline]
  pub fn active(&self) -> u32 {
    self.active.load(Relaxed)
  }

  #[inline]
  pub fn total(&self) -> u64 {
    self.total.load(Relaxed)
  }

  #[inline]
  pub fn duration_ms(&self) -> u64 {
    self.duration_ms.load(Relaxed)
  }

  /// Snapshot all counters / 快照所有计数器
  pub fn stats(&self) -> JobStats {
    JobStats {
      active: self.active(),
      total: self.total(),
      duration_ms: self.duration_ms(),
    }
  }
}
