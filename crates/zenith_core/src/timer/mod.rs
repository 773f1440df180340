//! Focus session countdown machine.
//!
//! # Responsibility
//! - Track work/break mode, remaining seconds and the running flag.
//! - Flip mode and stop when a session runs out.
//!
//! # Invariants
//! - Manual mode switches and reset are unconditional: they stop the
//!   timer and restore the target mode's full duration.
//! - Completing a session never auto-continues into the next one.
//! - Progress is derived, never persisted.

/// Work session length in seconds.
pub const WORK_SESSION_SECS: u32 = 25 * 60;

/// Break session length in seconds.
pub const BREAK_SESSION_SECS: u32 = 5 * 60;

/// Countdown mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusMode {
    #[default]
    Work,
    Break,
}

impl FocusMode {
    /// Full duration of one session in this mode.
    pub fn duration_secs(self) -> u32 {
        match self {
            Self::Work => WORK_SESSION_SECS,
            Self::Break => BREAK_SESSION_SECS,
        }
    }
}

/// Two-state countdown timer driven by 1 Hz ticks.
#[derive(Debug)]
pub struct FocusTimer {
    mode: FocusMode,
    remaining_secs: u32,
    running: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    /// Creates a stopped timer in work mode at full duration.
    pub fn new() -> Self {
        Self {
            mode: FocusMode::Work,
            remaining_secs: WORK_SESSION_SECS,
            running: false,
        }
    }

    pub fn mode(&self) -> FocusMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the completed mode when this tick finished a session; at
    /// that point the timer has flipped to the other mode at full
    /// duration and stopped.
    pub fn tick(&mut self) -> Option<FocusMode> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }

        let completed = self.mode;
        self.mode = match self.mode {
            FocusMode::Work => FocusMode::Break,
            FocusMode::Break => FocusMode::Work,
        };
        self.remaining_secs = self.mode.duration_secs();
        self.running = false;
        Some(completed)
    }

    /// Starts or pauses the countdown.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stops and jumps to the given mode at full duration.
    pub fn switch_mode(&mut self, mode: FocusMode) {
        self.running = false;
        self.mode = mode;
        self.remaining_secs = mode.duration_secs();
    }

    /// Stops and restores the work session at full duration.
    pub fn reset(&mut self) {
        self.switch_mode(FocusMode::Work);
    }

    /// Fraction of the current session already elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.mode.duration_secs();
        f64::from(total - self.remaining_secs) / f64::from(total)
    }

    /// Remaining time rendered as `MM:SS`.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}
