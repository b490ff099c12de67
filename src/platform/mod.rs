// src/platform/mod.rs

//! Delivery of actions to the scenario editor.
//!
//! A platform backend implements [`InputDriver`]. The drivers shipped here do
//! not touch the real pointer: [`LogDriver`] narrates a dry run and
//! [`RecordingDriver`] captures an action script.

use crate::editor::commands::Action;
use crate::error::{AutopaintError, Result};
use log::{debug, info};
use std::thread;
use std::time::Duration;

pub trait InputDriver {
    /// Delivers one action. Returns [`AutopaintError::Aborted`] when the
    /// operator has asked the run to stop.
    fn perform(&mut self, action: &Action) -> Result<()>;
}

/// Minimum delays that keep the editor's input queue from dropping events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// Pause after every click.
    pub click_delay: Duration,
    /// Pause after every elevation key press.
    pub key_delay: Duration,
}

impl Pacing {
    pub const DEFAULT_MIN_TIME: f64 = 0.05;
    pub const KEY_DELAY: Duration = Duration::from_millis(100);

    /// Pacing with `min_time` seconds between clicks.
    pub fn from_min_time(min_time: f64) -> Self {
        let seconds = if min_time.is_finite() { min_time.max(0.0) } else { 0.0 };
        Self {
            click_delay: Duration::from_secs_f64(seconds),
            key_delay: Self::KEY_DELAY,
        }
    }

    pub fn none() -> Self {
        Self {
            click_delay: Duration::ZERO,
            key_delay: Duration::ZERO,
        }
    }

    pub fn delay_after(&self, action: &Action) -> Duration {
        if action.is_click() {
            self.click_delay
        } else {
            self.key_delay
        }
    }

    pub fn wait_after(&self, action: &Action) {
        let delay = self.delay_after(action);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_min_time(Self::DEFAULT_MIN_TIME)
    }
}

/// Logs every action instead of performing it.
#[derive(Debug, Default)]
pub struct LogDriver {
    performed: usize,
}

impl LogDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn performed(&self) -> usize {
        self.performed
    }
}

impl InputDriver for LogDriver {
    fn perform(&mut self, action: &Action) -> Result<()> {
        self.performed += 1;
        debug!("[dry run #{}] {}", self.performed, action);
        if self.performed % 1000 == 0 {
            info!("Dry run: {} actions so far", self.performed);
        }
        Ok(())
    }
}

/// Captures actions in order. An optional limit simulates the operator
/// aborting after that many actions.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    actions: Vec<Action>,
    abort_after: Option<usize>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aborting_after(limit: usize) -> Self {
        Self {
            actions: Vec::new(),
            abort_after: Some(limit),
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

impl InputDriver for RecordingDriver {
    fn perform(&mut self, action: &Action) -> Result<()> {
        if self.abort_after.is_some_and(|limit| self.actions.len() >= limit) {
            return Err(AutopaintError::Aborted);
        }
        self.actions.push(action.clone());
        Ok(())
    }
}
