//! Click Debounce Timers
//!
//! A [`CooldownTimer`] gates one button: it is `Armed` once a full
//! threshold has elapsed since it last fired (or since construction)
//! and `Cooling` otherwise. State is checked lazily against a caller-
//! supplied instant - there is no background timer thread, and the
//! timer only changes when the frame handler resets it.

use std::time::{Duration, Instant};

/// Debounce state at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    /// Threshold elapsed; the next action may fire
    Armed,
    /// Still inside the cooldown window
    Cooling,
}

/// Elapsed-time debounce for one button
#[derive(Debug, Clone, Copy)]
pub struct CooldownTimer {
    threshold: Duration,
    last: Instant,
}

impl CooldownTimer {
    /// A timer that first arms one threshold after now
    ///
    /// Seeding with the construction instant reproduces the observed
    /// startup behavior: no click can fire in the first threshold
    /// window after the program starts.
    pub fn new(threshold: Duration) -> Self {
        Self::starting_at(threshold, Instant::now())
    }

    /// A timer seeded with an explicit start instant
    pub fn starting_at(threshold: Duration, now: Instant) -> Self {
        Self {
            threshold,
            last: now,
        }
    }

    /// The debounce threshold
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// State at the given instant
    pub fn state(&self, now: Instant) -> CooldownState {
        if now.duration_since(self.last) >= self.threshold {
            CooldownState::Armed
        } else {
            CooldownState::Cooling
        }
    }

    /// Record a firing, starting a new cooldown window at `now`
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_cooling_until_threshold() {
        let t0 = Instant::now();
        let timer = CooldownTimer::starting_at(1000 * MS, t0);

        assert_eq!(timer.state(t0), CooldownState::Cooling);
        assert_eq!(timer.state(t0 + 500 * MS), CooldownState::Cooling);
        assert_eq!(timer.state(t0 + 999 * MS), CooldownState::Cooling);
        assert_eq!(timer.state(t0 + 1000 * MS), CooldownState::Armed);
    }

    #[test]
    fn test_reset_starts_new_window() {
        let t0 = Instant::now();
        let mut timer = CooldownTimer::starting_at(1000 * MS, t0);

        timer.reset(t0 + 1200 * MS);
        assert_eq!(timer.state(t0 + 1700 * MS), CooldownState::Cooling);
        assert_eq!(timer.state(t0 + 2200 * MS), CooldownState::Armed);
    }

    #[test]
    fn test_zero_threshold_always_armed() {
        let t0 = Instant::now();
        let timer = CooldownTimer::starting_at(Duration::ZERO, t0);
        assert_eq!(timer.state(t0), CooldownState::Armed);
    }

    #[test]
    fn test_earlier_instant_saturates() {
        // Instant::duration_since saturates, so a clock read taken just
        // before construction still reports Cooling rather than panicking
        let t0 = Instant::now() + 1000 * MS;
        let timer = CooldownTimer::starting_at(1000 * MS, t0);
        assert_eq!(timer.state(t0 - 500 * MS), CooldownState::Cooling);
    }
}
