//! Flush worker threads / 刷盘工作线程

use std::{sync::Arc, sync::mpsc::Receiver, thread::JoinHandle, time::Instant};

use sdb_target::Task;

use crate::engine::Shared;

/// Job sent to a worker / 发送给工作线程的任务
pub(crate) enum Job {
  /// Run a flush task for the named target / 为指定目标运行刷盘任务
  Run {
    name: String,
    task: Box<dyn Task>,
  },
  Shutdown,
}

/// Worker handle / 工作线程句柄
pub(crate) struct Worker {
  handle: Option<JoinHandle<()>>,
}

impl Worker {
  /// Spawn worker thread / 启动工作线程
  pub fn spawn(id: usize, rx: Receiver<Job>, shared: Arc<Shared>) -> Self {
    let handle = std::thread::spawn(move || worker_loop(id, rx, shared));
    Self {
      handle: Some(handle),
    }
  }

  /// Join after the shutdown message / 发送关闭消息后等待退出
  pub fn join(&mut self) {
    if let Some(h) = self.handle.take() {
      let _ = h.join();
    }
  }
}

/// Worker main loop / 工作线程主循环
fn worker_loop(id: usize, rx: Receiver<Job>, shared: Arc<Shared>) {
  loop {
    let job = match rx.recv() {
      Ok(j) => j,
      Err(_) => break,
    };

    match job {
      Job::Run { name, mut task } => {
        let serial = task.serial();
        let start = Instant::now();
        let result = task.run();
        let elapsed = start.elapsed().as_millis() as u64;

        // Release the snapshot before reporting completion
        // 上报完成前释放快照
        drop(task);
        shared.finish(&name, serial, result, elapsed);
      }
      Job::Shutdown => break,
    }
  }
  log::debug!("flush worker {id} stopped");
}
