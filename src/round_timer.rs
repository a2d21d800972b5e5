use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROUND_MS: u64 = 60_000;
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub total_ms: u64,
    pub interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            total_ms: DEFAULT_ROUND_MS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl TimerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.interval_ms > self.total_ms {
            return Err(ConfigError::IntervalExceedsDuration {
                interval_ms: self.interval_ms,
                total_ms: self.total_ms,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Expired,
    Cancelled,
}

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Remaining(u64),
    /// Reached zero on this tick. Returned once per timer.
    Expired,
    /// Timer already expired or cancelled
    Ignored,
}

/// Countdown driven by an external tick source; owns no thread
#[derive(Debug, Clone)]
pub struct RoundTimer {
    config: TimerConfig,
    remaining_ms: u64,
    state: TimerState,
}

impl RoundTimer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            remaining_ms: config.total_ms,
            state: TimerState::Running,
        }
    }

    pub fn tick(&mut self) -> Tick {
        if self.state != TimerState::Running {
            return Tick::Ignored;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(self.config.interval_ms);
        tracing::trace!(remaining_ms = self.remaining_ms, "timer tick");

        if self.remaining_ms == 0 {
            self.state = TimerState::Expired;
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining_ms)
        }
    }

    pub fn cancel(&mut self) {
        if self.state != TimerState::Cancelled {
            tracing::trace!(state = ?self.state, "timer cancelled");
        }
        self.state = TimerState::Cancelled;
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(total_ms: u64, interval_ms: u64) -> RoundTimer {
        RoundTimer::new(TimerConfig {
            total_ms,
            interval_ms,
        })
    }

    #[test]
    fn test_new_timer_is_running_at_full_duration() {
        let t = timer(5_000, 1_000);
        assert_eq!(t.state(), TimerState::Running);
        assert_eq!(t.remaining_ms(), 5_000);
    }

    #[test]
    fn test_tick_counts_down() {
        let mut t = timer(3_000, 1_000);
        assert_eq!(t.tick(), Tick::Remaining(2_000));
        assert_eq!(t.tick(), Tick::Remaining(1_000));
        assert_eq!(t.tick(), Tick::Expired);
        assert_eq!(t.remaining_ms(), 0);
        assert_eq!(t.state(), TimerState::Expired);
    }

    #[test]
    fn test_expired_fires_once() {
        let mut t = timer(2_000, 1_000);
        let fired = (0..10).filter(|_| t.tick() == Tick::Expired).count();

        assert_eq!(fired, 1);
        assert_eq!(t.remaining_ms(), 0);
    }

    #[test]
    fn test_remaining_floors_at_zero() {
        let mut t = timer(2_500, 1_000);
        t.tick();
        t.tick();
        assert_eq!(t.tick(), Tick::Expired);
        assert_eq!(t.remaining_ms(), 0);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut t = timer(3_000, 1_000);
        t.tick();
        t.cancel();

        assert_eq!(t.tick(), Tick::Ignored);
        assert_eq!(t.remaining_ms(), 2_000);
        assert!(!t.is_running());
    }

    #[test]
    fn test_cancel_is_idempotent_and_safe_after_expiry() {
        let mut t = timer(1_000, 1_000);
        assert_eq!(t.tick(), Tick::Expired);

        t.cancel();
        t.cancel();
        assert_eq!(t.state(), TimerState::Cancelled);
        assert_eq!(t.tick(), Tick::Ignored);
    }

    #[test]
    fn test_validate() {
        assert!(TimerConfig::default().validate().is_ok());
        assert_eq!(
            timer(0, 1_000).config().validate(),
            Err(ConfigError::ZeroDuration)
        );
        assert_eq!(
            timer(1_000, 0).config().validate(),
            Err(ConfigError::ZeroInterval)
        );
        assert_eq!(
            timer(500, 1_000).config().validate(),
            Err(ConfigError::IntervalExceedsDuration {
                interval_ms: 1_000,
                total_ms: 500
            })
        );
    }
}
