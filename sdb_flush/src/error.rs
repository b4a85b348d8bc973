//! Engine errors / 引擎错误

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Duplicate registration / 重复注册
  #[error("target {0} already registered")]
  Dup(String),

  /// Unknown target / 未知目标
  #[error("target {0} not registered")]
  NotFound(String),

  /// Unregister while a flush is in flight / 刷盘进行中注销
  #[error("target {0} busy: flush in flight")]
  Busy(String),

  /// Drain timed out, names still outstanding / 排空超时，仍未完成的名称
  #[error("drain timeout, outstanding: {}", .0.join(", "))]
  DrainTimeout(Vec<String>),
}

pub type Result<T> = std::result::Result<T, Error>;
