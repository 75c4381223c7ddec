// Default timing, population and physics tuning for the companion engine.
// Periods are in milliseconds; distances in CSS pixels of the viewport.

// Motion classification
pub const STILL_WINDOW_MS: u64 = 100; // no move for this long -> idle
pub const SPAWN_RECENCY_MS: u64 = 500; // particle emitter still fires this long after the last move
pub const HIDE_TIMEOUT_MS: u64 = 3000; // no move for this long -> indicator goes dormant

// Tick loops
pub const PHYSICS_STEP_MS: u64 = 16; // ~60 fps integration step
pub const PARTICLE_SPAWN_PERIOD_MS: u64 = 80;
pub const AMBIENT_SPAWN_PERIOD_MS: u64 = 2000;
pub const ICON_PERIOD_MOVING_MS: u64 = 800;
pub const ICON_PERIOD_IDLE_MS: u64 = 3000;

// Anything shorter is clamped up to this (browsers clamp nested timers to 4 ms too)
pub const MIN_PERIOD_MS: u64 = 4;

// Population caps
pub const MAX_PARTICLES: usize = 16;
pub const MAX_FLOATING: usize = 5;
// Upper bound for configured caps
pub const MAX_POPULATION_CAP: usize = 1024;

// Particle emission
pub const PARTICLE_JITTER_PX: f32 = 10.0; // +/- around the pointer on each axis
pub const PARTICLE_SPEED_SPREAD: f32 = 1.0; // initial velocity drawn from +/- this per axis
pub const PARTICLE_UPWARD_BIAS: f32 = 1.0; // subtracted from the initial y velocity

// Particle physics, per step
pub const DRAG: f32 = 0.98;
pub const GRAVITY: f32 = 0.05;
pub const LIFE_DECAY_PER_STEP: f32 = 0.02;

// Ambient emission
pub const AMBIENT_RADIUS_PX: f32 = 100.0; // +/- around the last pointer position on each axis

// Pointer velocity is reported in px per 100 ms
pub const VELOCITY_SCALE: f32 = 100.0;

// Host pump: gaps longer than this many physics steps drop the timer backlog
pub const MAX_CATCH_UP_STEPS: u32 = 8;

// ---------------- Presentation ----------------

// Main indicator
pub const INDICATOR_RADIUS_PX: f32 = 20.0;
pub const INDICATOR_SCALE_MOVING: f32 = 1.2;
pub const INDICATOR_SCALE_IDLE: f32 = 1.0;
pub const INDICATOR_SPIN_MOVING_SEC: f32 = 1.0; // one full turn
pub const INDICATOR_SPIN_IDLE_SEC: f32 = 3.0;
pub const WOBBLE_X_MOVING: (f32, f32) = (3.0, 0.8); // (amplitude px, period sec)
pub const WOBBLE_Y_MOVING: (f32, f32) = (2.0, 0.6);
pub const WOBBLE_X_IDLE: (f32, f32) = (1.0, 2.0);
pub const WOBBLE_Y_IDLE: (f32, f32) = (1.0, 1.8);

// Rings around the indicator: (peak scale, period sec, base opacity)
pub const PULSE_RING_MOVING: (f32, f32, f32) = (2.5, 0.8, 0.6);
pub const PULSE_RING_IDLE: (f32, f32, f32) = (1.8, 2.0, 0.6);
pub const DASHED_RING_MOVING: (f32, f32, f32) = (3.2, 1.2, 0.4);
pub const DASHED_RING_IDLE: (f32, f32, f32) = (2.2, 3.0, 0.4);

// Safety zone: (turns per period, period sec, scale)
pub const SAFETY_ZONE_RADIUS_PX: f32 = 60.0;
pub const SAFETY_ZONE_MOVING: (f32, f32, f32) = (0.5, 4.0, 1.1);
pub const SAFETY_ZONE_IDLE: (f32, f32, f32) = (-1.0, 10.0, 1.0);

// Particles
pub const PARTICLE_RADIUS_PX: f32 = 6.0;
pub const PARTICLE_MIN_SCALE: f32 = 0.3; // scale at zero life
pub const PARTICLE_SPIN_SEC: f32 = 2.0;

// Floating ornaments
pub const FLOATING_RADIUS_PX: f32 = 12.0;
pub const FLOATING_ORBIT_X_PX: f32 = 20.0;
pub const FLOATING_ORBIT_Y_PX: f32 = 15.0;
pub const FLOATING_BASE_PERIOD_SEC: f32 = 4.0;
pub const FLOATING_PERIOD_STEP_SEC: f32 = 0.5; // added per list index
pub const FLOATING_SCALE_RANGE: (f32, f32) = (0.8, 1.2);
