//! Fixed-period driver for the [`Hider`].
//!
//! A single task on a dedicated runtime owns the ticker. Each tick runs on a
//! blocking thread and is awaited before the ticker is polled again, so ticks
//! never overlap; fires missed while a tick runs are skipped. Pause, resume
//! and stop requests are picked up between ticks.

use crate::core::hider::Hider;
use crate::error::{ExhideError, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Run,
    Pause,
    Stop,
}

pub struct Scheduler {
    control_tx: watch::Sender<Control>,
    ticks: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
    runtime: tokio::runtime::Runtime,
}

impl Scheduler {
    /// Spawn the tick loop. The first tick fires immediately.
    pub fn start(hider: Arc<Hider>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(ExhideError::scheduler("period must be greater than zero"));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .thread_name("exhide-scheduler")
            .build()?;

        let (control_tx, control_rx) = watch::channel(Control::Run);
        let ticks = Arc::new(AtomicU64::new(0));

        let handle = runtime.spawn(tick_loop(hider, period, control_rx, Arc::clone(&ticks)));

        log::debug!("Scheduler started with period {:?}", period);

        Ok(Self {
            control_tx,
            ticks,
            handle: Some(handle),
            runtime,
        })
    }

    pub fn pause(&self) {
        let _ = self.control_tx.send(Control::Pause);
    }

    pub fn resume(&self) {
        let _ = self.control_tx.send(Control::Run);
    }

    /// Number of ticks that ran to completion
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Stop the loop and wait for a tick in flight to finish. Returns the
    /// final tick count, including that tick.
    pub fn stop(mut self) -> Result<u64> {
        self.shutdown()?;
        Ok(self.ticks())
    }

    fn shutdown(&mut self) -> Result<()> {
        let _ = self.control_tx.send(Control::Stop);

        if let Some(handle) = self.handle.take() {
            self.runtime
                .block_on(handle)
                .map_err(|e| ExhideError::scheduler(format!("Tick loop failed: {}", e)))?;
            log::debug!("Scheduler stopped after {} ticks", self.ticks());
        }

        Ok(())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("{}", e);
        }
    }
}

async fn tick_loop(
    hider: Arc<Hider>,
    period: Duration,
    mut control: watch::Receiver<Control>,
    ticks: Arc<AtomicU64>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let state = *control.borrow();
                match state {
                    Control::Stop => break,
                    Control::Pause => continue,
                    Control::Run => {}
                }

                let hider = Arc::clone(&hider);
                match tokio::task::spawn_blocking(move || hider.tick()).await {
                    Ok(_) => {
                        ticks.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => log::error!("Tick aborted: {}", e),
                }
            }
            changed = control.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *control.borrow();
                match state {
                    Control::Stop => break,
                    Control::Pause => log::info!("Scheduler paused"),
                    Control::Run => log::info!("Scheduler resumed"),
                }
            }
        }
    }
}
