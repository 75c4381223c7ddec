//! The companion engine: one instance owns pointer state, both populations,
//! the indicator variant and every timer that mutates them.
//!
//! Hosts feed it pointer events and a monotonic clock (`Duration` since
//! mount). Each entry point first runs every timer due up to the given time,
//! so ticks and pointer events are applied in timestamp order and each
//! handler runs to completion before the next.

use crate::ambient::FloatingElement;
use crate::config::CompanionConfig;
use crate::palette::Palette;
use crate::particles::{integrate, Particle, PhysicsParams};
use crate::pointer::{MotionState, PointerSample, PointerTracker, Transition};
use crate::population::{IdSource, Population};
use crate::scheduler::{Fired, Scheduler, TaskId};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Work items driven by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    RotateIcon,
    SpawnParticle,
    Integrate,
    SpawnAmbient,
    /// Still window elapsed since the last move.
    Settle,
    /// Hide timeout elapsed since the last move.
    Hide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Disabled,
    TornDown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanionStats {
    pub particles_spawned: u64,
    pub particles_expired: u64,
    pub particles_evicted: u64,
    pub floating_spawned: u64,
    pub floating_evicted: u64,
    pub icon_changes: u64,
    pub ticks: u64,
}

/// Read-only copy of everything the presentation layer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub pointer: PointerSample,
    pub motion: MotionState,
    pub dormant: bool,
    pub variant: usize,
    pub velocity: Vec2,
    pub particles: Vec<Particle>,
    pub floating: Vec<FloatingElement>,
    /// Engine time the snapshot was taken at.
    pub elapsed: Duration,
}

pub struct Companion<R = StdRng> {
    config: CompanionConfig,
    physics: PhysicsParams,
    palette: Palette,
    rng: R,
    tracker: PointerTracker,
    particles: Population<Particle>,
    floating: Population<FloatingElement>,
    ids: IdSource,
    variant: usize,
    dormant: bool,
    scheduler: Scheduler<Task>,
    icon_timer: Option<TaskId>,
    settle_timer: Option<TaskId>,
    hide_timer: Option<TaskId>,
    lifecycle: Lifecycle,
    clock: Duration,
    stats: CompanionStats,
}

impl Companion<StdRng> {
    pub fn new(config: CompanionConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: CompanionConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Companion<R> {
    /// Mount at engine time zero with an explicit random source.
    pub fn with_rng(config: CompanionConfig, rng: R) -> Self {
        let config = config.sanitized();
        let mut companion = Self {
            physics: PhysicsParams::default(),
            palette: Palette::default(),
            rng,
            tracker: PointerTracker::new(),
            particles: Population::new(config.max_particles),
            floating: Population::new(config.max_floating),
            ids: IdSource::default(),
            variant: 0,
            dormant: false,
            scheduler: Scheduler::new(),
            icon_timer: None,
            settle_timer: None,
            hide_timer: None,
            lifecycle: Lifecycle::Disabled,
            clock: Duration::ZERO,
            stats: CompanionStats::default(),
            config,
        };
        if companion.config.enabled {
            companion.lifecycle = Lifecycle::Running;
            companion.arm_loops(Duration::ZERO);
        }
        log::info!(
            "[companion] mounted enabled={} caps={}/{} step={:?}",
            companion.config.enabled,
            companion.config.max_particles,
            companion.config.max_floating,
            companion.config.physics_step
        );
        companion
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self.variant %= palette.len();
        self
    }

    // ---------------- Entry points ----------------

    pub fn pointer_move(&mut self, now: Duration, x: f32, y: f32) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        if !x.is_finite() || !y.is_finite() {
            log::debug!("[pointer] ignoring non-finite sample ({x}, {y})");
            return;
        }
        self.advance(now);
        let now = self.clock;
        let transition = self.tracker.on_move(PointerSample::new(x, y), now);
        self.dormant = false;

        self.cancel_timer(Slot::Settle);
        self.cancel_timer(Slot::Hide);
        self.settle_timer = self.arm_once(Task::Settle, self.config.still_window, now);
        self.hide_timer = self.arm_once(Task::Hide, self.config.hide_timeout, now);

        if transition == Transition::StartedMoving {
            self.rearm_icon(now);
        }
    }

    pub fn pointer_leave(&mut self, now: Duration) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.advance(now);
        let transition = self.tracker.on_leave();
        self.cancel_timer(Slot::Settle);
        self.cancel_timer(Slot::Hide);
        if transition == Transition::StoppedMoving {
            self.rearm_icon(self.clock);
        }
    }

    /// Run every timer due at or before `now`. Returns the number of ticks run.
    pub fn advance(&mut self, now: Duration) -> usize {
        if self.lifecycle == Lifecycle::TornDown {
            return 0;
        }
        let mut ran = 0;
        while let Some(fired) = self.scheduler.pop_due(now) {
            self.clock = self.clock.max(fired.at);
            self.run(fired);
            ran += 1;
        }
        self.clock = self.clock.max(now);
        self.stats.ticks += ran as u64;
        ran
    }

    /// Collapse missed periodic ticks after a long host stall.
    pub fn skip_backlog(&mut self, now: Duration) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let skipped = self.scheduler.skip_backlog(now);
        if skipped > 0 {
            log::debug!("[companion] skipped {skipped} missed ticks");
        }
    }

    pub fn set_enabled(&mut self, enabled: bool, now: Duration) {
        match (self.lifecycle, enabled) {
            (Lifecycle::Running, false) => {
                self.advance(now);
                let cancelled = self.scheduler.cancel_all();
                self.icon_timer = None;
                self.settle_timer = None;
                self.hide_timer = None;
                self.clear_state();
                self.lifecycle = Lifecycle::Disabled;
                log::info!("[companion] disabled, {cancelled} timers cancelled");
            }
            (Lifecycle::Disabled, true) => {
                self.clock = self.clock.max(now);
                self.lifecycle = Lifecycle::Running;
                self.arm_loops(self.clock);
                log::info!("[companion] enabled");
            }
            _ => {}
        }
        self.config.enabled = self.lifecycle == Lifecycle::Running;
    }

    /// Cancel every timer and drop all state. Nothing fires afterwards and
    /// every entry point becomes a no-op. Returns the number of timers cancelled.
    pub fn teardown(&mut self) -> usize {
        if self.lifecycle == Lifecycle::TornDown {
            return 0;
        }
        let cancelled = self.scheduler.shutdown();
        self.icon_timer = None;
        self.settle_timer = None;
        self.hide_timer = None;
        self.clear_state();
        self.lifecycle = Lifecycle::TornDown;
        log::info!("[companion] torn down, {cancelled} timers cancelled");
        cancelled
    }

    // ---------------- Queries ----------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pointer: self.tracker.sample(),
            motion: self.tracker.motion(),
            dormant: self.dormant,
            variant: self.variant,
            velocity: self.tracker.velocity(),
            particles: self.particles.to_vec(),
            floating: self.floating.to_vec(),
            elapsed: self.clock,
        }
    }

    pub fn motion(&self) -> MotionState {
        self.tracker.motion()
    }

    pub fn pointer(&self) -> PointerSample {
        self.tracker.sample()
    }

    pub fn speed(&self) -> f32 {
        self.tracker.speed()
    }

    pub fn variant(&self) -> usize {
        self.variant
    }

    pub fn is_dormant(&self) -> bool {
        self.dormant
    }

    pub fn particles(&self) -> &Population<Particle> {
        &self.particles
    }

    pub fn floating(&self) -> &Population<FloatingElement> {
        &self.floating
    }

    pub fn stats(&self) -> &CompanionStats {
        &self.stats
    }

    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    /// Latest engine time observed.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Timer firings handed out since mount, including ones after a re-enable.
    pub fn fired_count(&self) -> u64 {
        self.scheduler.fired_count()
    }

    // ---------------- Tick handlers ----------------

    fn run(&mut self, fired: Fired<Task>) {
        let at = fired.at;
        match fired.task {
            Task::RotateIcon => {
                self.icon_timer = None;
                self.variant = (self.variant + 1) % self.palette.len();
                self.stats.icon_changes += 1;
                self.rearm_icon(at);
            }
            Task::SpawnParticle => self.spawn_particle(at),
            Task::Integrate => {
                let expired = integrate(&mut self.particles, &self.physics);
                self.stats.particles_expired += expired as u64;
            }
            Task::SpawnAmbient => self.spawn_ambient(at),
            Task::Settle => {
                self.settle_timer = None;
                if self.tracker.settle(at, self.config.still_window) == Transition::StoppedMoving {
                    self.rearm_icon(at);
                }
            }
            Task::Hide => {
                self.hide_timer = None;
                self.dormant = true;
                log::debug!("[companion] dormant at {:?}", at);
            }
        }
    }

    fn spawn_particle(&mut self, at: Duration) {
        if !self.tracker.motion().is_visible {
            return;
        }
        let recent = self
            .tracker
            .since_last_move(at)
            .is_some_and(|d| d < self.config.spawn_recency);
        if !recent {
            return;
        }
        let id = self.ids.next_id();
        let origin = self.tracker.sample().to_vec2();
        let particle = Particle::spawn(&mut self.rng, id, origin, self.palette.len());
        self.stats.particles_spawned += 1;
        if let Some(evicted) = self.particles.push(particle) {
            self.stats.particles_evicted += 1;
            log::trace!("[particles] evicted {:?} life={:.2}", evicted.id, evicted.life);
        }
    }

    fn spawn_ambient(&mut self, at: Duration) {
        if !self.tracker.motion().is_idle() {
            return;
        }
        let id = self.ids.next_id();
        let anchor = self.tracker.sample().to_vec2();
        let element = FloatingElement::spawn(&mut self.rng, id, anchor, self.palette.len(), at);
        self.stats.floating_spawned += 1;
        if let Some(evicted) = self.floating.push(element) {
            self.stats.floating_evicted += 1;
            log::trace!("[floating] evicted {:?}", evicted.id);
        }
    }

    // ---------------- Timer plumbing ----------------

    fn arm_loops(&mut self, now: Duration) {
        let loops = [
            (Task::SpawnParticle, self.config.particle_spawn_period),
            (Task::Integrate, self.config.physics_step),
            (Task::SpawnAmbient, self.config.ambient_spawn_period),
        ];
        for (task, period) in loops {
            if let Err(e) = self.scheduler.every(task, period, now) {
                log::error!("[companion] could not arm {:?}: {}", task, e);
            }
        }
        self.rearm_icon(now);
    }

    /// Restart the icon timer with the period for the current motion state.
    fn rearm_icon(&mut self, now: Duration) {
        self.cancel_timer(Slot::Icon);
        let period = if self.tracker.motion().is_moving {
            self.config.icon_period_moving
        } else {
            self.config.icon_period_idle
        };
        self.icon_timer = self.arm_once(Task::RotateIcon, period, now);
    }

    fn arm_once(&mut self, task: Task, delay: Duration, now: Duration) -> Option<TaskId> {
        match self.scheduler.after(task, delay, now) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("[companion] could not arm {:?}: {}", task, e);
                None
            }
        }
    }

    fn cancel_timer(&mut self, slot: Slot) {
        let id = match slot {
            Slot::Icon => self.icon_timer.take(),
            Slot::Settle => self.settle_timer.take(),
            Slot::Hide => self.hide_timer.take(),
        };
        if let Some(id) = id {
            self.scheduler.cancel(id);
        }
    }

    fn clear_state(&mut self) {
        self.particles.clear();
        self.floating.clear();
        self.tracker.reset();
        self.dormant = false;
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Icon,
    Settle,
    Hide,
}
