#![cfg_attr(docsrs, feature(doc_cfg))]

//! Flush scheduling engine for the sdb search/storage core
//! sdb 搜索/存储核心的刷盘调度引擎
//!
//! Decides which in-memory state must be persisted, runs the work on a
//! bounded worker pool, and tracks durability via serial numbers tied
//! to the write-ahead log.
//! 决定哪些内存状态需要持久化，在有界工作线程池上执行，并通过绑定
//! 预写日志的序列号跟踪持久性。

mod conf;
mod engine;
mod error;
mod state;
mod strategy;
mod ticker;
mod worker;

pub use conf::Conf;
pub use engine::Engine;
pub use error::{Error, Result};
pub use state::State;
pub use strategy::{Candidate, MemFirst, SerialFirst, Strategy};
