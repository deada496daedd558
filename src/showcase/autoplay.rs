//! Autoplay tick source for the testimonial carousel.
//!
//! A background thread sends one [`Tick`] per interval on a bounded channel.
//! The thread never touches carousel state; the runtime drains ticks and
//! feeds them through `update`. When the consumer falls behind, surplus
//! ticks are dropped rather than queued.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError, bounded};

use crate::core::errors::{FolioError, Result};

/// One autoplay period elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Running autoplay thread. Stopping (explicitly or by drop) joins it.
#[derive(Debug)]
pub struct AutoplayTimer {
    ticks: Receiver<Tick>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AutoplayTimer {
    /// Spawn the tick thread.
    pub fn start(interval: Duration) -> Result<Self> {
        let (tick_tx, ticks) = bounded(1);
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("folio-autoplay".to_string())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => match tick_tx.try_send(Tick) {
                            Ok(()) | Err(TrySendError::Full(_)) => {}
                            Err(TrySendError::Disconnected(_)) => break,
                        },
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|error| FolioError::Runtime {
                details: format!("failed to spawn autoplay thread: {error}"),
            })?;

        Ok(Self {
            ticks,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Receiver to select on alongside terminal events.
    #[must_use]
    pub const fn ticks(&self) -> &Receiver<Tick> {
        &self.ticks
    }

    /// Pending ticks, collapsed: `true` if at least one period elapsed.
    pub fn drain(&self) -> bool {
        let mut fired = false;
        while self.ticks.try_recv().is_ok() {
            fired = true;
        }
        fired
    }

    /// Whether the thread is still alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.try_send(());
        }
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            eprintln!("[FOLIO-RUNTIME] autoplay thread panicked");
        }
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
