#![cfg_attr(docsrs, feature(doc_cfg))]

//! Shared leaf types for the sdb flush core
//! sdb 刷盘核心的共享基础类型

mod gain;
mod stat;

pub use gain::Gain;
pub use stat::{FlushStats, Outcome};

/// Transaction log position, monotonically increasing
/// 事务日志位置，单调递增
pub type SerialNum = u64;

/// Wall clock seconds since epoch / 纪元以来的墙上时钟秒
pub type Sec = u64;

/// Current wall clock seconds / 当前墙上时钟秒
#[inline]
pub fn now_sec() -> Sec {
  coarsetime::Clock::now_since_epoch().as_secs()
}
