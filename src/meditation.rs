//! The meditation countdown: a one-second-granularity timer driving a
//! timed session.
//!
//! The timer is purely tick-driven; the caller supplies the clock (the demo
//! binary uses a `crossbeam_channel::tick` source, tests use synthetic
//! ticks).

/// Outcome of advancing the countdown by one second
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Still counting down; render this `M:SS` display
    Remaining(String),
    /// The countdown reached zero. Yielded exactly once per session.
    Finished,
    /// The timer is not running
    Idle,
}

/// Remaining-seconds counter with an explicit running flag.
///
/// The flag is the single source of truth for session state; display text is
/// never consulted. The counter never goes negative.
#[derive(Debug, Default)]
pub struct MeditationTimer {
    remaining: u32,
    running: bool,
}

impl MeditationTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a countdown of `minutes`, returning the immediate display.
    ///
    /// Returns `None` without touching the countdown when a session is
    /// already running, so rapid double-starts cannot spawn a second
    /// decrement stream.
    pub fn start(&mut self, minutes: u32) -> Option<String> {
        if self.running {
            log::debug!("meditation already running, ignoring start");
            return None;
        }

        self.remaining = minutes * 60;
        self.running = true;
        Some(self.display())
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Finished
        } else {
            Tick::Remaining(self.display())
        }
    }

    /// Halt the countdown and clear the remaining count; idempotent
    pub fn stop(&mut self) {
        self.running = false;
        self.remaining = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining whole seconds
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Render the remaining time as `M:SS`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_minute_session() {
        let mut timer = MeditationTimer::new();

        assert_eq!(timer.start(1), Some("1:00".to_string()));
        assert_eq!(timer.tick(), Tick::Remaining("0:59".to_string()));

        for expected in (1..=58).rev() {
            assert_eq!(timer.tick(), Tick::Remaining(format!("0:{expected:02}")));
        }

        assert_eq!(timer.tick(), Tick::Finished);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_finished_is_yielded_exactly_once() {
        let mut timer = MeditationTimer::new();
        timer.start(1);

        let finishes = (0..120).filter(|_| timer.tick() == Tick::Finished).count();
        assert_eq!(finishes, 1);
    }

    #[test]
    fn test_double_start_keeps_a_single_decrement_stream() {
        let mut timer = MeditationTimer::new();

        assert!(timer.start(1).is_some());
        assert!(timer.start(1).is_none());

        // advance one simulated minute: exactly one finish, never a negative
        // count
        let mut finishes = 0;
        for _ in 0..60 {
            match timer.tick() {
                Tick::Finished => finishes += 1,
                Tick::Remaining(_) | Tick::Idle => {}
            }
        }
        assert_eq!(finishes, 1);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_stop_clears_and_is_idempotent() {
        let mut timer = MeditationTimer::new();
        timer.start(5);

        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0);

        timer.stop();
        assert_eq!(timer.tick(), Tick::Idle);
    }

    #[test]
    fn test_start_after_finish() {
        let mut timer = MeditationTimer::new();
        timer.start(1);
        for _ in 0..60 {
            timer.tick();
        }

        assert_eq!(timer.start(2), Some("2:00".to_string()));
        assert!(timer.is_running());
    }

    #[test]
    fn test_multi_minute_display() {
        let mut timer = MeditationTimer::new();
        assert_eq!(timer.start(10), Some("10:00".to_string()));
        assert_eq!(timer.tick(), Tick::Remaining("9:59".to_string()));
    }
}
