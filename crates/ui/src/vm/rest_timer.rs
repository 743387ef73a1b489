use crate::vm::time_fmt::format_countdown;

pub const DEFAULT_REST_SECS: u32 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Running,
    Finished,
}

/// Client-local rest countdown, advanced one second per `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestTimer {
    duration_secs: u32,
    remaining_secs: u32,
    phase: TimerPhase,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SECS)
    }
}

impl RestTimer {
    #[must_use]
    pub const fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            phase: TimerPhase::Idle,
        }
    }

    /// Restart from the full duration, even if already running.
    pub fn start(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.phase = TimerPhase::Running;
    }

    /// `Finished` is reported by the tick that reaches zero; the timer is idle
    /// afterwards, so later ticks are ignored.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Idle;
            return TickOutcome::Finished;
        }
        TickOutcome::Running
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            TimerPhase::Running => TimerPhase::Paused,
            TimerPhase::Paused => TimerPhase::Running,
            TimerPhase::Idle => TimerPhase::Idle,
        };
    }

    pub fn stop(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.duration_secs;
    }

    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != TimerPhase::Idle
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn display(&self) -> String {
        format_countdown(self.remaining_secs)
    }

    /// Elapsed share of the duration, 0..=100.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        if self.duration_secs == 0 {
            return 100;
        }
        let elapsed = self.duration_secs - self.remaining_secs.min(self.duration_secs);
        elapsed * 100 / self.duration_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finishes_once_after_full_duration() {
        let mut timer = RestTimer::default();
        timer.start();
        assert_eq!(timer.display(), "01:30");

        let outcomes: Vec<_> = (0..DEFAULT_REST_SECS).map(|_| timer.tick()).collect();
        let finished = outcomes
            .iter()
            .filter(|o| **o == TickOutcome::Finished)
            .count();
        assert_eq!(finished, 1);
        assert_eq!(outcomes.last(), Some(&TickOutcome::Finished));
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert!(!timer.is_active());
    }

    #[test]
    fn paused_timer_ignores_ticks() {
        let mut timer = RestTimer::new(10);
        timer.start();
        timer.tick();
        timer.toggle_pause();
        assert_eq!(timer.phase(), TimerPhase::Paused);
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining_secs(), 9);

        timer.toggle_pause();
        assert_eq!(timer.tick(), TickOutcome::Running);
        assert_eq!(timer.remaining_secs(), 8);
        assert_eq!(timer.progress_percent(), 20);
    }

    #[test]
    fn idle_timer_ignores_ticks_and_pause() {
        let mut timer = RestTimer::default();
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        timer.toggle_pause();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.progress_percent(), 0);
    }

    #[test]
    fn stop_resets_and_start_restarts() {
        let mut timer = RestTimer::new(60);
        timer.start();
        for _ in 0..15 {
            timer.tick();
        }
        assert_eq!(timer.display(), "00:45");

        timer.start();
        assert_eq!(timer.remaining_secs(), 60);

        timer.stop();
        assert!(!timer.is_active());
        assert_eq!(timer.display(), "01:00");
    }
}
