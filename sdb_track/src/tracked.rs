//! Tracking decorator for flush targets / 刷盘目标的跟踪装饰器

use std::{sync::Arc, time::Instant};

use sdb_base::{FlushStats, Gain, Sec, SerialNum};
use sdb_target::{FlushErr, Result, Target, Task};

use crate::JobTracker;

/// Wraps a target so every flush job brackets the tracker
/// 包装目标，使每次刷盘任务都被跟踪器括住
///
/// Reads forward verbatim. The job starts when init_flush is entered and
/// ends when the returned task is dropped, so the active bracket covers
/// the real work regardless of how long the task waits to execute.
/// 读操作原样转发。任务在进入 init_flush 时开始，在返回的任务被 drop
/// 时结束，因此活跃区间覆盖真实工作，与任务等待执行多久无关。
pub struct Tracked {
  tracker: Arc<JobTracker>,
  target: Arc<dyn Target>,
}

impl Tracked {
  pub fn new(tracker: Arc<JobTracker>, target: Arc<dyn Target>) -> Self {
    Self { tracker, target }
  }

  #[inline]
  pub fn tracker(&self) -> &JobTracker {
    &self.tracker
  }

  #[inline]
  pub fn target(&self) -> &dyn Target {
    &*self.target
  }
}

/// Ends the job when dropped / drop 时结束任务
struct JobGuard {
  tracker: Arc<JobTracker>,
  start: Instant,
}

impl Drop for JobGuard {
  fn drop(&mut self) {
    self.tracker.job_ended(self.start.elapsed().as_millis() as u64);
  }
}

/// Task wrapper carrying the job guard / 携带任务守卫的任务包装
struct TrackedTask {
  inner: Box<dyn Task>,
  _guard: JobGuard,
}

impl Task for TrackedTask {
  fn serial(&self) -> SerialNum {
    self.inner.serial()
  }

  fn run(&mut self) -> std::result::Result<(), FlushErr> {
    self.inner.run()
  }
}

impl Target for Tracked {
  fn name(&self) -> &str {
    self.target.name()
  }

  fn mem_gain(&self) -> Gain {
    self.target.mem_gain()
  }

  fn disk_gain(&self) -> Gain {
    self.target.disk_gain()
  }

  fn flushed_serial(&self) -> SerialNum {
    self.target.flushed_serial()
  }

  fn last_flush_sec(&self) -> Sec {
    self.target.last_flush_sec()
  }

  fn need_urgent(&self) -> bool {
    self.target.need_urgent()
  }

  fn bytes_to_write(&self) -> u64 {
    self.target.bytes_to_write()
  }

  fn last_stats(&self) -> FlushStats {
    self.target.last_stats()
  }

  fn init_flush(&self, current: SerialNum) -> Result<Box<dyn Task>> {
    self.tracker.job_started();
    let guard = JobGuard {
      tracker: Arc::clone(&self.tracker),
      start: Instant::now(),
    };

    // Guard drop ends the job if the wrapped target refuses
    // 被包装目标拒绝时，守卫 drop 结束任务
    let inner = self.target.init_flush(current)?;

    Ok(Box::new(TrackedTask {
      inner,
      _guard: guard,
    }))
  }
}
