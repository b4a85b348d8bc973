//! Candidate ranking strategies / 候选排序策略

use std::cmp::Ordering;

use sdb_base::{Gain, Sec, SerialNum};

/// Per-round cost snapshot of one idle target
/// 单个空闲目标的本轮成本快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub name: String,
  pub mem: Gain,
  pub disk: Gain,
  pub urgent: bool,
  pub last_flush_sec: Sec,
  pub flushed: SerialNum,
  pub bytes_to_write: u64,
}

/// Pure, deterministic ordering of flush candidates
/// 纯函数式、确定性的刷盘候选排序
///
/// Identical input must yield identical output, names are unique.
/// 相同输入必须产出相同输出，名称唯一。
pub trait Strategy: Send + Sync {
  /// Most attractive first / 最优先的排最前
  fn order(&self, cands: Vec<Candidate>) -> Vec<Candidate>;
}

/// Urgent targets always lead, by largest memory gain then name
/// 紧急目标总是领先，按最大内存收益再按名称
fn cmp_urgent(a: &Candidate, b: &Candidate) -> Ordering {
  b.urgent
    .cmp(&a.urgent)
    .then_with(|| b.mem.diff().cmp(&a.mem.diff()))
    .then_with(|| a.name.cmp(&b.name))
}

/// Default policy: urgent first, then largest memory gain
/// 默认策略：紧急优先，其次按最大内存收益
///
/// Non-urgent ties break by oldest flush time, then name.
/// 非紧急平局按最旧刷盘时间，再按名称。
#[derive(Debug, Default)]
pub struct MemFirst;

impl Strategy for MemFirst {
  fn order(&self, mut cands: Vec<Candidate>) -> Vec<Candidate> {
    cands.sort_by(|a, b| {
      b.urgent
        .cmp(&a.urgent)
        .then_with(|| b.mem.diff().cmp(&a.mem.diff()))
        .then_with(|| {
          if a.urgent {
            a.name.cmp(&b.name)
          } else {
            a
              .last_flush_sec
              .cmp(&b.last_flush_sec)
              .then_with(|| a.name.cmp(&b.name))
          }
        })
    });
    cands
  }
}

/// Oldest data first: lowest flushed serial wins
/// 最旧数据优先：最低刷盘序列号优先
///
/// Keeps the write-ahead log prunable under steady load.
/// 在稳定负载下保持预写日志可裁剪。
#[derive(Debug, Default)]
pub struct SerialFirst;

impl Strategy for SerialFirst {
  fn order(&self, mut cands: Vec<Candidate>) -> Vec<Candidate> {
    cands.sort_by(|a, b| {
      if a.urgent || b.urgent {
        cmp_urgent(a, b)
      } else {
        a
          .flushed
          .cmp(&b.flushed)
          .then_with(|| a.name.cmp(&b.name))
      }
    });
    cands
  }
}
