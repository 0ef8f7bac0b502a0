//! The rolling preview shown while the operator waits to stop the draw.
//!
//! The preview only displays names: the committed winners always come from a
//! separate call to [`crate::draw`] once the preview is stopped.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam::channel::{bounded, select, tick, Sender};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::*;
use crate::validate_winner_count;

#[derive(Debug, Default)]
struct PreviewState {
    cancelled: bool,
    ticks: u64,
    current: Vec<String>,
}

/// Handle on a running preview.
///
/// The callback runs on a worker thread, once per interval of the configured
/// speed. [`RollingPreview::stop`] (or dropping the handle) cancels the
/// preview: once it returns, the callback is never called again.
pub struct RollingPreview {
    state: Arc<Mutex<PreviewState>>,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl RollingPreview {
    /// Starts cycling through random selections of `count` names from `pool`.
    ///
    /// The first selection is made and passed to `on_tick` before this
    /// function returns.
    pub fn start<F>(
        pool: Vec<String>,
        count: usize,
        speed: RollingSpeed,
        seed: Option<u64>,
        mut on_tick: F,
    ) -> Result<RollingPreview, DrawError>
    where
        F: FnMut(&[String]) + Send + 'static,
    {
        validate_winner_count(count, pool.len())?;
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let first = crate::draw(&pool, count, &mut rng)?;
        on_tick(&first);
        let state = Arc::new(Mutex::new(PreviewState {
            cancelled: false,
            ticks: 1,
            current: first,
        }));

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticker = tick(speed.interval());
        let worker_state = state.clone();
        debug!(
            "start: preview of {} names out of {} every {:?}",
            count,
            pool.len(),
            speed.interval()
        );
        let worker = std::thread::spawn(move || loop {
            select! {
                recv(stop_rx) -> _ => break,
                recv(ticker) -> _ => {
                    let mut guard = match worker_state.lock() {
                        Ok(g) => g,
                        Err(_) => break,
                    };
                    // A stop may have been requested while this tick was
                    // waiting for the lock.
                    if guard.cancelled {
                        break;
                    }
                    match crate::draw(&pool, count, &mut rng) {
                        Ok(names) => {
                            on_tick(&names);
                            guard.current = names;
                            guard.ticks += 1;
                        }
                        Err(e) => {
                            warn!("preview: sampling failed: {}", e);
                            break;
                        }
                    }
                }
            }
        });

        Ok(RollingPreview {
            state,
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// The names displayed by the last tick.
    pub fn current(&self) -> Vec<String> {
        self.lock_state().current.clone()
    }

    /// How many selections have been displayed so far, including the first one.
    pub fn ticks(&self) -> u64 {
        self.lock_state().ticks
    }

    pub fn is_running(&self) -> bool {
        !self.lock_state().cancelled
    }

    /// Stops the preview and returns the names displayed last.
    ///
    /// Blocks until the worker thread is gone. Calling it again is a no-op.
    pub fn stop(&mut self) -> Vec<String> {
        {
            let mut guard = self.lock_state();
            guard.cancelled = true;
        }
        if let Some(tx) = self.stop_tx.take() {
            // The worker may already be gone, in which case nobody listens.
            let _ = tx.try_send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("stop: the preview callback panicked");
            }
        }
        self.current()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, PreviewState> {
        // A panicking callback poisons the lock; the state itself stays usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for RollingPreview {
    fn drop(&mut self) {
        self.stop();
    }
}
