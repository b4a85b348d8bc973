#![cfg_attr(docsrs, feature(doc_cfg))]

//! Flush contract: targets, tasks and serial sources
//! 刷盘契约：目标、任务与序列号来源

mod error;
mod serial;
mod target;
mod task;

pub use error::{Error, Result};
pub use serial::{AtomicSerial, SerialSource};
pub use target::Target;
pub use task::{FlushErr, Task};
