//! Manual stopwatch for free runs.
//!
//! The host calls [`Stopwatch::tick`] once per second; the stopwatch only
//! counts ticks while running and never reads a clock itself.

use thiserror::Error;

use crate::metrics::pace::format_elapsed;

/// Stopwatch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopwatchStatus {
    /// Not started
    #[default]
    Idle,
    /// Counting
    Running,
    /// Counting suspended
    Paused,
    /// Stopped; elapsed time is final
    Finished,
}

/// Stopwatch state transition errors.
#[derive(Debug, Error, PartialEq)]
pub enum StopwatchError {
    #[error("Stopwatch already started")]
    AlreadyStarted,

    #[error("Stopwatch not running")]
    NotRunning,

    #[error("Stopwatch not paused")]
    NotPaused,
}

/// Tick-counting stopwatch.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    status: StopwatchStatus,
    elapsed_seconds: u32,
}

impl Stopwatch {
    /// Create an idle stopwatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from zero.
    pub fn start(&mut self) -> Result<(), StopwatchError> {
        if matches!(self.status, StopwatchStatus::Running | StopwatchStatus::Paused) {
            return Err(StopwatchError::AlreadyStarted);
        }

        self.status = StopwatchStatus::Running;
        self.elapsed_seconds = 0;
        tracing::debug!("Stopwatch started");
        Ok(())
    }

    /// Suspend counting.
    pub fn pause(&mut self) -> Result<(), StopwatchError> {
        if self.status != StopwatchStatus::Running {
            return Err(StopwatchError::NotRunning);
        }

        self.status = StopwatchStatus::Paused;
        Ok(())
    }

    /// Continue after a pause.
    pub fn resume(&mut self) -> Result<(), StopwatchError> {
        if self.status != StopwatchStatus::Paused {
            return Err(StopwatchError::NotPaused);
        }

        self.status = StopwatchStatus::Running;
        Ok(())
    }

    /// Advance by one second if running.
    pub fn tick(&mut self) {
        if self.status == StopwatchStatus::Running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
    }

    /// Stop and return the final elapsed seconds.
    pub fn finish(&mut self) -> Result<u32, StopwatchError> {
        if !matches!(self.status, StopwatchStatus::Running | StopwatchStatus::Paused) {
            return Err(StopwatchError::NotRunning);
        }

        self.status = StopwatchStatus::Finished;
        tracing::debug!("Stopwatch finished at {} s", self.elapsed_seconds);
        Ok(self.elapsed_seconds)
    }

    /// Back to idle at zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current status.
    pub fn status(&self) -> StopwatchStatus {
        self.status
    }

    /// Whether the stopwatch is counting.
    pub fn is_running(&self) -> bool {
        self.status == StopwatchStatus::Running
    }

    /// Seconds counted so far.
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Elapsed time as "MM:SS" or "H:MM:SS".
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}
