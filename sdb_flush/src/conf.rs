//! Engine configuration / 引擎配置

/// Flush engine configuration / 刷盘引擎配置
#[derive(Debug, Clone)]
pub struct Conf {
  /// Worker threads, bounds concurrent flushes / 工作线程数，限制并发刷盘
  pub workers: usize,
  /// Ticker interval in seconds / 定时器间隔（秒）
  pub tick_sec: u64,
}

impl Default for Conf {
  fn default() -> Self {
    Self {
      workers: 1,
      tick_sec: 10,
    }
  }
}
