//! Countdown timer shown on the landing page.
//!
//! [`Countdown`] is a plain state machine advanced by explicit ticks, so it
//! can be driven by a real clock ([`drive`]), by a browser interval, or by a
//! test loop. It never reads the time itself.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Interval between two countdown ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// Format a number of seconds as `MM:SS`, both parts zero-padded.
///
/// ```
/// # use masterclass_core::countdown::format_time;
/// assert_eq!(format_time(65), "01:05");
/// assert_eq!(format_time(0), "00:00");
/// ```
#[must_use]
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// A countdown that stays inert until activated, then counts down to zero
/// one tick at a time and stops there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    /// A stopped countdown showing the full duration.
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
        }
    }

    /// A stopped countdown of `minutes` minutes.
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(minutes.saturating_mul(60))
    }

    /// Start counting down from the full duration.
    ///
    /// Does nothing while already running. Activating a countdown that has
    /// finished starts it over. Returns whether this call started it.
    pub fn activate(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.remaining_secs = self.duration_secs;
        self.running = self.remaining_secs > 0;
        self.running
    }

    /// Advance by one second. Ignored unless running.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
        }
    }

    /// Seconds left on the clock.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining_secs
    }

    /// Full duration in seconds.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration_secs
    }

    /// Whether the countdown is currently ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the countdown has reached zero.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn display(&self) -> String {
        format_time(self.remaining_secs)
    }
}

/// Tick `countdown` once per [`TICK`] until it stops, publishing the
/// remaining seconds after every tick.
///
/// Returns early if every receiver has been dropped. Does not activate the
/// countdown; an inactive countdown is returned immediately.
pub async fn drive(mut countdown: Countdown, updates: watch::Sender<u32>) -> Countdown {
    let mut interval = tokio::time::interval(TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    while countdown.is_running() {
        interval.tick().await;
        countdown.tick();
        if updates.send(countdown.remaining()).is_err() {
            tracing::debug!(remaining = countdown.remaining(), "countdown receiver gone");
            break;
        }
    }

    countdown
}
