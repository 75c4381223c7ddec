use std::time::Duration;

/// What the pump should do on an interval tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpAction {
    /// Advance the engine normally.
    Advance,
    /// The tab was asleep; drop missed periodic work before advancing.
    SkipBacklog,
}

/// Tracks the gap between interval callbacks on the engine clock.
#[derive(Clone, Debug)]
pub struct Pump {
    step: Duration,
    max_catch_up_steps: u32,
    last: Option<Duration>,
}

impl Pump {
    pub fn new(step: Duration, max_catch_up_steps: u32) -> Self {
        Self {
            step,
            max_catch_up_steps,
            last: None,
        }
    }

    pub fn tick(&mut self, now: Duration) -> PumpAction {
        let gap = match self.last {
            Some(prev) => now.saturating_sub(prev),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        if gap > self.step * self.max_catch_up_steps {
            PumpAction::SkipBacklog
        } else {
            PumpAction::Advance
        }
    }

    /// Interval period in whole milliseconds, at least 1.
    pub fn interval_ms(&self) -> i32 {
        self.step.as_millis().clamp(1, i32::MAX as u128) as i32
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
