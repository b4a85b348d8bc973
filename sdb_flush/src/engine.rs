//! Flush engine orchestrator / 刷盘引擎编排器

use std::{
  collections::HashMap,
  sync::Arc,
  sync::mpsc::{self, Sender},
  time::Duration,
};

use parking_lot::{Condvar, Mutex};
use sdb_base::{FlushStats, Outcome, Sec, SerialNum, now_sec};
use sdb_target::{FlushErr, SerialSource, Target, Task};

use crate::{
  Candidate, Conf, Error, MemFirst, Result, State, Strategy,
  ticker::Ticker,
  worker::{Job, Worker},
};

/// Registry entry / 注册表条目
struct Entry {
  target: Arc<dyn Target>,
  state: State,
  /// Engine-authoritative durable position / 引擎权威的持久化位置
  flushed: SerialNum,
  last_flush_sec: Sec,
  /// Write estimate captured at selection / 选中时捕获的写入量估算
  est_bytes: u64,
  stats: FlushStats,
}

/// State behind the engine lock / 引擎锁内的状态
struct Inner {
  reg: HashMap<String, Entry>,
  txs: Vec<Sender<Job>>,
  /// Round-robin dispatch cursor / 轮询派发游标
  rr: usize,
}

/// Targets in flight: Selected or Flushing / 进行中的目标数
fn busy(inner: &Inner) -> usize {
  inner.reg.values().filter(|e| e.state.is_busy()).count()
}

/// Names still in flight, sorted / 仍在进行中的名称，已排序
fn outstanding(inner: &Inner) -> Vec<String> {
  let mut names: Vec<String> = inner
    .reg
    .iter()
    .filter(|(_, e)| e.state.is_busy())
    .map(|(n, _)| n.clone())
    .collect();
  names.sort_unstable();
  names
}

/// Shared between engine, workers and ticker
/// 引擎、工作线程与定时器共享
pub(crate) struct Shared {
  inner: Mutex<Inner>,
  idle: Condvar,
  serial: Arc<dyn SerialSource>,
  strategy: Box<dyn Strategy>,
  workers: usize,
}

impl Shared {
  /// One selection round, returns the dispatched count
  /// 一轮选择，返回派发数量
  pub(crate) fn tick(&self, reason: &str) -> usize {
    // One serial per round, shared by every task created in it
    // 每轮只读一次序列号，本轮创建的所有任务共享
    let serial = self.serial.current();

    // Snapshot idle targets under the lock, query them outside it
    // 锁内快照空闲目标，锁外查询它们
    let snaps: Vec<(String, Arc<dyn Target>, SerialNum, Sec)> = {
      let inner = self.inner.lock();
      if busy(&inner) >= self.workers {
        return 0;
      }
      inner
        .reg
        .iter()
        .filter(|(_, e)| e.state == State::Idle)
        .map(|(n, e)| (n.clone(), Arc::clone(&e.target), e.flushed, e.last_flush_sec))
        .collect()
    };

    let mut cands = Vec::with_capacity(snaps.len());
    for (name, target, flushed, last_flush_sec) in snaps {
      let urgent = target.need_urgent();

      // Already durable up to this round, nothing to persist
      // 本轮序列号之前已全部持久，无可刷内容
      if flushed >= serial && !urgent {
        continue;
      }

      cands.push(Candidate {
        name,
        mem: target.mem_gain(),
        disk: target.disk_gain(),
        urgent,
        last_flush_sec,
        flushed,
        bytes_to_write: target.bytes_to_write(),
      });
    }

    let ranked = self.strategy.order(cands);
    if ranked.is_empty() {
      return 0;
    }

    // Check-and-set under the lock: a target seen idle above may have
    // been taken by a concurrent round
    // 锁内检查并设置：上面看到的空闲目标可能已被并发轮次拿走
    let chosen = {
      let mut inner = self.inner.lock();
      let mut capacity = self.workers.saturating_sub(busy(&inner));
      let mut chosen = Vec::with_capacity(capacity.min(ranked.len()));

      for c in ranked {
        if capacity == 0 {
          break;
        }
        if let Some(e) = inner.reg.get_mut(&c.name)
          && e.state == State::Idle
        {
          e.state = State::Selected;
          e.est_bytes = c.bytes_to_write;
          capacity -= 1;
          chosen.push((c.name, Arc::clone(&e.target)));
        }
      }
      chosen
    };

    if chosen.is_empty() {
      return 0;
    }

    log::debug!(
      "{reason}: dispatch {} target(s) at serial {serial}",
      chosen.len()
    );

    let mut n = 0;
    for (name, target) in chosen {
      match target.init_flush(serial) {
        Ok(task) => {
          if self.dispatch(&name, task) {
            n += 1;
          }
        }
        Err(e) => {
          // Contract violated by us or the target; abort this
          // dispatch only, the rest of the round proceeds
          // 契约被破坏；仅中止本次派发，本轮其余照常
          log::error!("init_flush {name}: {e}");
          let mut inner = self.inner.lock();
          if let Some(entry) = inner.reg.get_mut(&name) {
            entry.state = State::Idle;
          }
          self.idle.notify_all();
        }
      }
    }
    n
  }

  /// Hand a task to a worker / 把任务交给工作线程
  fn dispatch(&self, name: &str, task: Box<dyn Task>) -> bool {
    let tx = {
      let mut inner = self.inner.lock();
      let entry = inner
        .reg
        .get_mut(name)
        .expect("selected target left the registry");
      entry.state = State::Flushing;

      let rr = inner.rr;
      inner.rr = (rr + 1) % inner.txs.len();
      inner.txs[rr].clone()
    };

    let job = Job::Run {
      name: name.to_string(),
      task,
    };
    if tx.send(job).is_err() {
      // Workers are gone, engine is shutting down
      // 工作线程已退出，引擎正在关闭
      log::warn!("flush dispatch failed: {name}");
      let mut inner = self.inner.lock();
      if let Some(e) = inner.reg.get_mut(name) {
        e.state = State::Idle;
      }
      self.idle.notify_all();
      return false;
    }
    true
  }

  /// Task completion, called from worker threads
  /// 任务完成，由工作线程调用
  pub(crate) fn finish(
    &self,
    name: &str,
    serial: SerialNum,
    result: std::result::Result<(), FlushErr>,
    elapsed_ms: u64,
  ) {
    let mut inner = self.inner.lock();
    let entry = inner
      .reg
      .get_mut(name)
      .expect("completion for unregistered target");
    assert_eq!(
      entry.state,
      State::Flushing,
      "completion for {name} in wrong state"
    );

    entry.stats.sec = now_sec();
    entry.stats.duration_ms = elapsed_ms;
    entry.stats.bytes_written = entry.est_bytes;

    match result {
      Ok(()) => {
        // Never decreases, a stale position is a no-op
        // 永不回退，过期位置为空操作
        entry.flushed = entry.flushed.max(serial);
        entry.last_flush_sec = now_sec();
        entry.stats.outcome = Outcome::Ok;
        entry.state = State::Idle;
      }
      Err(FlushErr::Retry(e)) => {
        log::warn!("flush {name}: retryable: {e}");
        entry.stats.outcome = Outcome::Retry;
        entry.state = State::Idle;
      }
      Err(FlushErr::Fatal(e)) => {
        log::error!("flush {name}: fatal, target disabled: {e}");
        entry.stats.outcome = Outcome::Fatal;
        entry.state = State::Terminal;
      }
    }

    self.idle.notify_all();
  }
}

/// Flush scheduling engine / 刷盘调度引擎
///
/// Owns the target registry, ranks candidates on tick or pressure
/// signal, executes tasks on a bounded worker pool, and tracks each
/// target's durable serial under one internal lock.
/// 拥有目标注册表，在 tick 或压力信号时排序候选，在有界工作线程池上
/// 执行任务，并在同一把内部锁下跟踪每个目标的持久序列号。
pub struct Engine {
  shared: Arc<Shared>,
  workers: Vec<Worker>,
  ticker: Option<Ticker>,
  conf: Conf,
}

impl Engine {
  /// Create with the default strategy / 用默认策略创建
  pub fn new(conf: Conf, serial: Arc<dyn SerialSource>) -> Self {
    Self::with_strategy(conf, serial, Box::new(MemFirst))
  }

  /// Create with a custom strategy / 用自定义策略创建
  pub fn with_strategy(
    conf: Conf,
    serial: Arc<dyn SerialSource>,
    strategy: Box<dyn Strategy>,
  ) -> Self {
    let n = conf.workers.max(1);

    let mut txs = Vec::with_capacity(n);
    let mut rxs = Vec::with_capacity(n);
    for _ in 0..n {
      let (tx, rx) = mpsc::channel();
      txs.push(tx);
      rxs.push(rx);
    }

    let shared = Arc::new(Shared {
      inner: Mutex::new(Inner {
        reg: HashMap::new(),
        txs,
        rr: 0,
      }),
      idle: Condvar::new(),
      serial,
      strategy,
      workers: n,
    });

    let workers = rxs
      .into_iter()
      .enumerate()
      .map(|(id, rx)| Worker::spawn(id, rx, Arc::clone(&shared)))
      .collect();

    Self {
      shared,
      workers,
      ticker: None,
      conf,
    }
  }

  /// Start the periodic ticker / 启动周期定时器
  pub fn start_ticker(&mut self) {
    if self.ticker.is_none() {
      self.ticker = Some(Ticker::spawn(
        Arc::clone(&self.shared),
        self.conf.tick_sec,
      ));
    }
  }

  /// Add a target to scheduling / 将目标加入调度
  pub fn register(&self, target: Arc<dyn Target>) -> Result<()> {
    let name = target.name().to_string();
    let flushed = target.flushed_serial();
    let last_flush_sec = target.last_flush_sec();

    let mut inner = self.shared.inner.lock();
    if inner.reg.contains_key(&name) {
      return Err(Error::Dup(name));
    }
    inner.reg.insert(
      name,
      Entry {
        target,
        state: State::Idle,
        flushed,
        last_flush_sec,
        est_bytes: 0,
        stats: FlushStats::default(),
      },
    );
    Ok(())
  }

  /// Remove a target from scheduling / 将目标移出调度
  ///
  /// Busy error while a flush is in flight; drain first.
  /// 刷盘进行中返回 Busy 错误；请先排空。
  pub fn unregister(&self, name: &str) -> Result<()> {
    let mut inner = self.shared.inner.lock();
    let entry = inner
      .reg
      .get(name)
      .ok_or_else(|| Error::NotFound(name.into()))?;
    if entry.state.is_busy() {
      return Err(Error::Busy(name.into()));
    }
    inner.reg.remove(name);
    Ok(())
  }

  /// One selection round / 一轮选择
  pub fn tick(&self) -> usize {
    self.shared.tick("tick")
  }

  /// Out-of-band round under resource pressure / 资源压力下的带外轮次
  pub fn on_pressure(&self) -> usize {
    self.shared.tick("pressure")
  }

  /// Block until nothing is selected or flushing
  /// 阻塞直到没有已选中或刷盘中的目标
  ///
  /// On timeout returns the names still outstanding; their flushes may
  /// still complete later.
  /// 超时返回仍未完成的名称；这些刷盘之后仍可能完成。
  pub fn wait_all_idle(&self, timeout: Duration) -> Result<()> {
    let mut inner = self.shared.inner.lock();
    let timed_out = self
      .shared
      .idle
      .wait_while_for(&mut inner, |i| busy(i) > 0, timeout)
      .timed_out();

    if timed_out {
      return Err(Error::DrainTimeout(outstanding(&inner)));
    }
    Ok(())
  }

  /// Durable position of one target / 单个目标的持久位置
  pub fn flushed_serial(&self, name: &str) -> Result<SerialNum> {
    let inner = self.shared.inner.lock();
    inner
      .reg
      .get(name)
      .map(|e| e.flushed)
      .ok_or_else(|| Error::NotFound(name.into()))
  }

  /// Minimum durable position across targets, prunes the log up to here
  /// 所有目标的最小持久位置，日志可裁剪到此处
  ///
  /// Current serial when nothing is registered.
  /// 无注册目标时为当前序列号。
  pub fn oldest_flushed(&self) -> SerialNum {
    let inner = self.shared.inner.lock();
    inner
      .reg
      .values()
      .map(|e| e.flushed)
      .min()
      .unwrap_or_else(|| self.shared.serial.current())
  }

  /// Scheduling state of one target / 单个目标的调度状态
  pub fn state(&self, name: &str) -> Result<State> {
    let inner = self.shared.inner.lock();
    inner
      .reg
      .get(name)
      .map(|e| e.state)
      .ok_or_else(|| Error::NotFound(name.into()))
  }

  /// Engine-side stats of the last flush / 引擎侧最近一次刷盘统计
  pub fn last_stats(&self, name: &str) -> Result<FlushStats> {
    let inner = self.shared.inner.lock();
    inner
      .reg
      .get(name)
      .map(|e| e.stats)
      .ok_or_else(|| Error::NotFound(name.into()))
  }

  /// Names of fatally failed targets, sorted / 致命失败的目标名称，已排序
  pub fn faulted(&self) -> Vec<String> {
    let inner = self.shared.inner.lock();
    let mut names: Vec<String> = inner
      .reg
      .iter()
      .filter(|(_, e)| e.state == State::Terminal)
      .map(|(n, _)| n.clone())
      .collect();
    names.sort_unstable();
    names
  }

  /// Stop ticker and workers; queued tasks still complete
  /// 停止定时器与工作线程；已入队任务仍会完成
  pub fn shutdown(&mut self) {
    self.ticker = None;

    {
      let inner = self.shared.inner.lock();
      for tx in &inner.txs {
        let _ = tx.send(Job::Shutdown);
      }
    }
    for w in &mut self.workers {
      w.join();
    }
  }
}

impl Drop for Engine {
  fn drop(&mut self) {
    self.shutdown();
  }
}
