//! Single-threaded timer queue over a caller-supplied clock.
//!
//! The scheduler never reads a clock itself: hosts pass "now" as a
//! [`Duration`] since mount, which keeps every tick loop deterministic under
//! test. Due tasks are handed out one at a time by [`Scheduler::pop_due`] in
//! (due time, registration order), so each handler gets an exclusive mutation
//! window on the engine state before the next one runs.

use fnv::FnvHashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler is shut down")]
    ShutDown,
    #[error("repeating timers need a non-zero period")]
    ZeroPeriod,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TaskId,
    pub task: T,
    /// Scheduled time of this firing, which may be earlier than the `now` passed in.
    pub at: Duration,
}

#[derive(Clone, Debug)]
struct Timer<T> {
    task: T,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    timers: FnvHashMap<TaskId, Timer<T>>,
    next_id: u64,
    shut_down: bool,
    fired: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            timers: FnvHashMap::default(),
            next_id: 0,
            shut_down: false,
            fired: 0,
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeating timer, first firing one `period` after `now`.
    pub fn every(&mut self, task: T, period: Duration, now: Duration) -> Result<TaskId, SchedulerError> {
        if period.is_zero() {
            return Err(SchedulerError::ZeroPeriod);
        }
        self.insert(task, now + period, Some(period))
    }

    /// One-shot timer firing `delay` after `now`.
    pub fn after(&mut self, task: T, delay: Duration, now: Duration) -> Result<TaskId, SchedulerError> {
        self.insert(task, now + delay, None)
    }

    fn insert(&mut self, task: T, due: Duration, period: Option<Duration>) -> Result<TaskId, SchedulerError> {
        if self.shut_down {
            return Err(SchedulerError::ShutDown);
        }
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Timer { task, due, period });
        Ok(id)
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        n
    }

    /// Cancel everything and refuse further registrations.
    pub fn shutdown(&mut self) -> usize {
        self.shut_down = true;
        self.cancel_all()
    }

    /// Take the earliest timer due at or before `now`, re-arming it if it repeats.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<T>> {
        let (id, at) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, t.due))?;
        let task = match self.timers.get(&id)?.period {
            Some(period) => {
                let timer = self.timers.get_mut(&id)?;
                timer.due = at + period;
                timer.task.clone()
            }
            None => self.timers.remove(&id)?.task,
        };
        self.fired += 1;
        Some(Fired { id, task, at })
    }

    /// Drop missed repeats of periodic timers so each fires at most once more
    /// for the backlog. One-shot timers are left alone. Returns the number of
    /// firings skipped.
    pub fn skip_backlog(&mut self, now: Duration) -> u64 {
        let mut skipped = 0u64;
        for timer in self.timers.values_mut() {
            let Some(period) = timer.period else { continue };
            if timer.due >= now {
                continue;
            }
            let missed = ((now - timer.due).as_nanos() / period.as_nanos()).min(u32::MAX as u128) as u32;
            timer.due += period * missed;
            skipped += missed as u64;
        }
        skipped
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Total firings handed out since construction.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn drain(s: &mut Scheduler<&'static str>, now: Duration) -> Vec<(&'static str, u64)> {
        let mut out = Vec::new();
        while let Some(f) = s.pop_due(now) {
            out.push((f.task, f.at.as_millis() as u64));
        }
        out
    }

    #[test]
    fn fires_in_time_then_registration_order() {
        let mut s = Scheduler::new();
        s.every("fast", ms(16), ms(0)).unwrap();
        s.every("slow", ms(32), ms(0)).unwrap();
        s.after("once", ms(32), ms(0)).unwrap();
        assert_eq!(
            drain(&mut s, ms(40)),
            vec![("fast", 16), ("fast", 32), ("slow", 32), ("once", 32)]
        );
        assert_eq!(s.len(), 2);
        assert_eq!(s.next_due(), Some(ms(48)));
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut s = Scheduler::new();
        s.every("tick", ms(80), ms(0)).unwrap();
        assert!(s.pop_due(ms(79)).is_none());
        assert_eq!(s.fired_count(), 0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let id = s.after("settle", ms(100), ms(0)).unwrap();
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(drain(&mut s, ms(1000)).is_empty());
    }

    #[test]
    fn shutdown_refuses_new_timers() {
        let mut s = Scheduler::new();
        s.every("a", ms(10), ms(0)).unwrap();
        s.after("b", ms(10), ms(0)).unwrap();
        assert_eq!(s.shutdown(), 2);
        assert_eq!(s.every("c", ms(10), ms(0)), Err(SchedulerError::ShutDown));
        assert!(s.pop_due(ms(10_000)).is_none());
    }

    #[test]
    fn zero_period_is_refused() {
        let mut s: Scheduler<()> = Scheduler::new();
        assert_eq!(s.every((), Duration::ZERO, ms(0)), Err(SchedulerError::ZeroPeriod));
    }

    #[test]
    fn backlog_collapses_to_one_firing() {
        let mut s = Scheduler::new();
        s.every("physics", ms(16), ms(0)).unwrap();
        assert_eq!(s.skip_backlog(ms(1000)), 61);
        assert_eq!(drain(&mut s, ms(1000)), vec![("physics", 992)]);
    }
}
