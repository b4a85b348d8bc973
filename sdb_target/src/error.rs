//! Flush contract errors / 刷盘契约错误

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// init_flush while the previous task is outstanding
  /// 前一任务未完成时调用 init_flush
  #[error("target {0}: flush already outstanding")]
  Busy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
