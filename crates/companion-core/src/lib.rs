pub mod ambient;
pub mod config;
pub mod constants;
pub mod engine;
pub mod palette;
pub mod particles;
pub mod pointer;
pub mod population;
pub mod scene;
pub mod scheduler;

pub use ambient::FloatingElement;
pub use config::{CompanionConfig, ConfigError, OVERRIDE_KEYS};
pub use engine::{Companion, CompanionStats, Lifecycle, Snapshot, Task};
pub use palette::{Palette, SizeClass, Variant, VARIANTS};
pub use particles::{Particle, PhysicsParams};
pub use pointer::{MotionState, PointerSample};
pub use population::{ElementId, Population};
pub use scene::{compose, NodeKind, Scene, VisualNode};
pub use scheduler::{Scheduler, SchedulerError, TaskId};
