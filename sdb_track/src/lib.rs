#![cfg_attr(docsrs, feature(doc_cfg))]

//! Job tracking for flush targets
//! 刷盘目标的任务跟踪
//!
//! A target wrapped in [`Tracked`] reports job counts and durations
//! without depending on any tracking type itself.
//! 被 [`Tracked`] 包装的目标上报任务计数与耗时，自身无需依赖任何跟踪类型。

mod track;
mod tracked;

pub use track::{JobStats, JobTracker};
pub use tracked::Tracked;
