//! Fixed-rate tick loop on a dedicated thread.
//!
//! The thread owns both the animation and its surface, so simulation state
//! is only ever touched from the tick thread. Callers reach in through
//! queued commands, drained at a single point before each tick; there is
//! never an overlapping or concurrent tick. `stop` is deterministic: after
//! it returns no further tick will run, and the animation and surface are
//! handed back.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use plexus_core::animation::Animation;
use plexus_core::error::AnimationError;
use plexus_core::surface::Surface;

/// Nominal tick rate for a background animation.
pub const DEFAULT_TICK_RATE_HZ: f64 = 60.0;

/// Accepted tick-rate range; out-of-range requests are clamped.
const MIN_TICK_RATE_HZ: f64 = 1.0;
const MAX_TICK_RATE_HZ: f64 = 240.0;

enum TickerCommand<A> {
    Mutate(Box<dyn FnOnce(&mut A) + Send>),
    Stop,
}

/// Handle to a running tick loop.
///
/// Dropping the handle stops the loop; state recovery needs an explicit
/// [`stop`](Ticker::stop).
pub struct Ticker<A, S>
where
    A: Animation + Send + 'static,
    S: Surface + Send + 'static,
{
    commands: Sender<TickerCommand<A>>,
    handle: Option<JoinHandle<(A, S)>>,
}

impl<A, S> Ticker<A, S>
where
    A: Animation + Send + 'static,
    S: Surface + Send + 'static,
{
    /// Spawns the tick thread and begins ticking `animation` against
    /// `surface` at `tick_rate_hz` (clamped to [1, 240]).
    pub fn start(animation: A, surface: S, tick_rate_hz: f64) -> Result<Self, AnimationError> {
        let rate = if tick_rate_hz.is_finite() {
            tick_rate_hz.clamp(MIN_TICK_RATE_HZ, MAX_TICK_RATE_HZ)
        } else {
            DEFAULT_TICK_RATE_HZ
        };
        let period = Duration::from_secs_f64(1.0 / rate);
        let (commands, inbox) = std::sync::mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("plexus-ticker".into())
            .spawn(move || run_loop(animation, surface, inbox, period))
            .map_err(|e| AnimationError::Io(format!("could not spawn tick thread: {e}")))?;
        Ok(Self {
            commands,
            handle: Some(handle),
        })
    }

    /// Queues a mutation of the animation, applied on the tick thread
    /// before the next tick.
    pub fn mutate(&self, f: impl FnOnce(&mut A) + Send + 'static) {
        // A send failure means the loop already exited; the mutation is moot.
        let _ = self.commands.send(TickerCommand::Mutate(Box::new(f)));
    }

    /// Stops the loop and returns the animation and surface.
    ///
    /// Safe to call repeatedly; later calls return `None`. After `stop`
    /// returns, no further tick will run.
    pub fn stop(&mut self) -> Option<(A, S)> {
        let handle = self.handle.take()?;
        let _ = self.commands.send(TickerCommand::Stop);
        handle.join().ok()
    }

    /// True until the first `stop`.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl<A, S> Drop for Ticker<A, S>
where
    A: Animation + Send + 'static,
    S: Surface + Send + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop<A: Animation, S: Surface>(
    mut animation: A,
    mut surface: S,
    inbox: Receiver<TickerCommand<A>>,
    period: Duration,
) -> (A, S) {
    log::debug!("tick loop started, period {period:?}");
    loop {
        let tick_start = Instant::now();

        // Drain all pending commands before the tick. A disconnected
        // channel means the handle was dropped; treat it as a stop.
        loop {
            match inbox.try_recv() {
                Ok(TickerCommand::Mutate(f)) => f(&mut animation),
                Ok(TickerCommand::Stop) | Err(TryRecvError::Disconnected) => {
                    log::debug!("tick loop stopped");
                    return (animation, surface);
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if let Err(e) = animation.tick(&mut surface) {
            // One lost frame; the loop keeps running.
            log::error!("tick failed: {e}");
        }

        let elapsed = tick_start.elapsed();
        if elapsed < period {
            spin_sleep::sleep(period - elapsed);
        } else {
            log::debug!("tick overran its period: {elapsed:?}");
        }
    }
}
