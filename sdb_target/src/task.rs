//! Single-use flush task / 一次性刷盘任务

use std::io;

use sdb_base::SerialNum;
use thiserror::Error;

/// Execution failure of a flush task / 刷盘任务执行失败
#[derive(Debug, Error)]
pub enum FlushErr {
  /// Transient I/O failure, safe to retry on a later round
  /// 暂时性 I/O 失败，可在之后的轮次重试
  #[error("retryable: {0}")]
  Retry(#[from] io::Error),

  /// Corruption or invariant violation, must not be retried
  /// 数据损坏或不变式违规，不得重试
  #[error("fatal: {0}")]
  Fatal(String),
}

/// One execution of a flush at a fixed log position
/// 固定日志位置上的一次刷盘执行
///
/// Consumed exactly once by the dispatcher. run may block on disk I/O;
/// it is never invoked on the decision thread.
/// 由派发器只消费一次。run 可能阻塞在磁盘 I/O 上；绝不在决策线程上执行。
pub trait Task: Send {
  /// Position made durable once run succeeds / run 成功后变为持久的位置
  fn serial(&self) -> SerialNum;

  /// Perform the write / 执行写入
  fn run(&mut self) -> std::result::Result<(), FlushErr>;
}
