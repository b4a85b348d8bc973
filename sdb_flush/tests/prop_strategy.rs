//! Property tests for strategy ordering / 策略排序属性测试

use proptest::prelude::*;
use sdb_base::Gain;
use sdb_flush::{Candidate, MemFirst, SerialFirst, Strategy as _};

/// Candidates with unique, index-derived names / 名称唯一、由下标派生的候选
fn arb_cands() -> impl Strategy<Value = Vec<Candidate>> {
  prop::collection::vec((0u64..1000, any::<bool>(), 0u64..100, 0u64..50), 0..20)
    .prop_map(|rows| {
      rows
        .into_iter()
        .enumerate()
        .map(|(i, (mem, urgent, last, flushed))| Candidate {
          name: format!("t{i:02}"),
          mem: Gain::new(mem, 0),
          disk: Gain::default(),
          urgent,
          last_flush_sec: last,
          flushed,
          bytes_to_write: mem,
        })
        .collect()
    })
    .prop_shuffle()
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(100))]

  /// Identical input yields identical output / 相同输入产出相同输出
  #[test]
  fn prop_order_deterministic(cands in arb_cands()) {
    prop_assert_eq!(MemFirst.order(cands.clone()), MemFirst.order(cands.clone()));
    prop_assert_eq!(SerialFirst.order(cands.clone()), SerialFirst.order(cands));
  }

  /// Input order never matters / 输入顺序无关紧要
  #[test]
  fn prop_order_permutation_invariant(cands in arb_cands()) {
    let mut reversed = cands.clone();
    reversed.reverse();
    prop_assert_eq!(MemFirst.order(cands.clone()), MemFirst.order(reversed.clone()));
    prop_assert_eq!(SerialFirst.order(cands), SerialFirst.order(reversed));
  }

  /// Every urgent candidate precedes every non-urgent one
  /// 每个紧急候选都排在所有非紧急候选之前
  #[test]
  fn prop_urgent_block_leads(cands in arb_cands()) {
    let ordered = MemFirst.order(cands);
    let first_plain = ordered.iter().position(|c| !c.urgent);
    if let Some(idx) = first_plain {
      prop_assert!(ordered[idx..].iter().all(|c| !c.urgent));
    }
  }

  /// Non-urgent tail is sorted by descending memory gain
  /// 非紧急尾部按内存收益降序排列
  #[test]
  fn prop_plain_gain_descending(cands in arb_cands()) {
    let ordered = MemFirst.order(cands);
    let plain: Vec<_> = ordered.iter().filter(|c| !c.urgent).collect();
    for pair in plain.windows(2) {
      prop_assert!(pair[0].mem.diff() >= pair[1].mem.diff());
    }
  }

  /// SerialFirst non-urgent tail is sorted by ascending flushed serial
  /// SerialFirst 非紧急尾部按已刷序列号升序排列
  #[test]
  fn prop_serial_ascending(cands in arb_cands()) {
    let ordered = SerialFirst.order(cands);
    let plain: Vec<_> = ordered.iter().filter(|c| !c.urgent).collect();
    for pair in plain.windows(2) {
      prop_assert!(pair[0].flushed <= pair[1].flushed);
    }
  }
}
