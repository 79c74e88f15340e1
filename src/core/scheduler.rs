//! Periodic note delivery for the practice loop.
//!
//! The scheduler is either idle or running exactly one timer thread. The timer waits on a
//! channel with a deadline; dropping the sending half wakes it immediately, which is how
//! `stop` cancels. `stop` joins the thread, so a note being delivered when `stop` is called
//! finishes first and nothing is delivered after `stop` returns.

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use crate::core::generator::NoteGenerator;
use crate::core::note::GeneratedNote;
use crate::core::tuning::FretRange;
use crate::error::{Result, TrainerError};

pub const MIN_INTERVAL_MS: u64 = 500;
pub const MAX_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_INTERVAL_MS: u64 = 2_000;

type NoteCallback = Arc<dyn Fn(GeneratedNote) + Send + Sync>;

/// Check that an interval is one the scheduler accepts.
pub fn validate_interval(interval_ms: u64) -> Result<Duration> {
    if (MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms) {
        Ok(Duration::from_millis(interval_ms))
    } else {
        Err(TrainerError::InvalidArgument(format!(
            "interval must be between {} and {} ms (got {})",
            MIN_INTERVAL_MS, MAX_INTERVAL_MS, interval_ms
        )))
    }
}

/// Clamp raw user input into the accepted interval range.
pub fn clamp_interval_ms(interval_ms: i64) -> u64 {
    interval_ms.clamp(MIN_INTERVAL_MS as i64, MAX_INTERVAL_MS as i64) as u64
}

/// Snapshot of the scheduler's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerState {
    pub is_active: bool,
    pub interval_ms: u64,
}

struct Timer {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl Timer {
    fn spawn<R>(
        interval: Duration,
        generator: Arc<Mutex<NoteGenerator<R>>>,
        on_note: NoteCallback,
    ) -> Result<Self>
    where
        R: Rng + Send + 'static,
    {
        // Nothing is ever sent; the receiver only observes the sender being dropped.
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let mut deadline = Instant::now() + interval;

        let thread = thread::Builder::new()
            .name("practice-timer".to_string())
            .spawn(move || loop {
                match stop_rx.recv_deadline(deadline) {
                    Err(RecvTimeoutError::Timeout) => {}
                    _ => break,
                }

                let next = match generator.lock() {
                    Ok(mut generator) => generator.next_note(),
                    Err(_) => {
                        log::error!("Note generator lock poisoned, stopping timer");
                        break;
                    }
                };

                match next {
                    Ok(note) => {
                        log::debug!("Tick: {} on string {} fret {}", note.display_name, note.string_index, note.fret_number);
                        on_note(note);
                    }
                    Err(e) => log::error!("Failed to generate note: {}", e),
                }

                // A slow callback skips the ticks it overran instead of bursting.
                deadline += interval;
                let now = Instant::now();
                while deadline <= now {
                    deadline += interval;
                }
            })?;

        Ok(Self { stop_tx, thread })
    }

    fn cancel(self) {
        let Timer { stop_tx, thread } = self;
        drop(stop_tx);
        if thread.join().is_err() {
            log::error!("Practice timer thread panicked");
        }
    }
}

/// Drives the practice loop: every interval, draws a note and hands it to the callback.
pub struct PracticeScheduler<R = StdRng> {
    generator: Arc<Mutex<NoteGenerator<R>>>,
    interval_ms: u64,
    on_note: Option<NoteCallback>,
    timer: Option<Timer>,
}

impl<R: Rng + Send + 'static> PracticeScheduler<R> {
    pub fn new(generator: NoteGenerator<R>) -> Self {
        Self {
            generator: Arc::new(Mutex::new(generator)),
            interval_ms: DEFAULT_INTERVAL_MS,
            on_note: None,
            timer: None,
        }
    }

    /// Begin delivering notes every `interval_ms`. The first note arrives after one interval.
    ///
    /// A running timer is replaced, never duplicated. An invalid interval leaves the
    /// scheduler exactly as it was.
    pub fn start<F>(&mut self, interval_ms: u64, on_note: F) -> Result<()>
    where
        F: Fn(GeneratedNote) + Send + Sync + 'static,
    {
        let interval = validate_interval(interval_ms)?;
        self.stop();

        let on_note: NoteCallback = Arc::new(on_note);
        self.timer = Some(Timer::spawn(interval, Arc::clone(&self.generator), Arc::clone(&on_note))?);
        self.on_note = Some(on_note);
        self.interval_ms = interval_ms;
        log::debug!("Practice started, interval {} ms", interval_ms);
        Ok(())
    }

    /// Cancel the timer. No note is delivered once this returns. Calling it while idle does nothing.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            log::debug!("Practice stopped");
        }
    }

    /// Change the interval. A running timer is re-armed so the next note comes one new
    /// interval from now; an idle scheduler just remembers the value.
    pub fn set_interval(&mut self, interval_ms: u64) -> Result<()> {
        let interval = validate_interval(interval_ms)?;
        self.interval_ms = interval_ms;

        if let Some(timer) = self.timer.take() {
            timer.cancel();
            if let Some(on_note) = &self.on_note {
                self.timer = Some(Timer::spawn(interval, Arc::clone(&self.generator), Arc::clone(on_note))?);
                log::debug!("Practice re-armed, interval {} ms", interval_ms);
            }
        }
        Ok(())
    }

    /// Start again with the last interval and callback, if there was one.
    pub fn resume(&mut self) -> Result<bool> {
        if self.is_running() {
            return Ok(true);
        }
        match self.on_note.clone() {
            Some(on_note) => {
                let interval = validate_interval(self.interval_ms)?;
                self.timer = Some(Timer::spawn(interval, Arc::clone(&self.generator), on_note)?);
                log::debug!("Practice resumed, interval {} ms", self.interval_ms);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Takes effect from the next tick.
    pub fn set_fret_range(&self, range: FretRange) {
        if let Ok(mut generator) = self.generator.lock() {
            generator.set_range(range);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn state(&self) -> SchedulerState {
        SchedulerState {
            is_active: self.is_running(),
            interval_ms: self.interval_ms,
        }
    }
}

impl<R> Drop for PracticeScheduler<R> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}
