//! Periodic tick thread / 周期性 tick 线程

use std::{
  sync::Arc,
  sync::mpsc::{self, RecvTimeoutError, Sender},
  thread::JoinHandle,
  time::Duration,
};

use crate::engine::Shared;

/// Background timer driving selection rounds
/// 驱动选择轮次的后台定时器
pub(crate) struct Ticker {
  stop: Sender<()>,
  handle: Option<JoinHandle<()>>,
}

impl Ticker {
  pub fn spawn(shared: Arc<Shared>, sec: u64) -> Self {
    let (stop, rx) = mpsc::channel::<()>();
    let dur = Duration::from_secs(sec);

    let handle = std::thread::spawn(move || {
      loop {
        match rx.recv_timeout(dur) {
          Err(RecvTimeoutError::Timeout) => {
            shared.tick("tick");
          }
          _ => break,
        }
      }
    });

    Self {
      stop,
      handle: Some(handle),
    }
  }
}

impl Drop for Ticker {
  fn drop(&mut self) {
    let _ = self.stop.send(());
    if let Some(h) = self.handle.take() {
      let _ = h.join();
    }
  }
}
