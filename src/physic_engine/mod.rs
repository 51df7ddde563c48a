pub mod types;
pub use self::types::{Color, SceneEvent, UpdateResult, Vec3};

pub mod particle;
pub use self::particle::Particle;

pub mod palette;
pub use self::palette::{HexColor, Palette};

pub mod field_kind;
pub use self::field_kind::{FieldKind, FieldShape};

pub mod particle_field;
pub use self::particle_field::{DirtyFlags, FieldProfile, ParticleField};

pub mod generator;
pub mod updater;

pub mod rocket;
pub use self::rocket::{RocketSequencer, RocketSettings};

pub mod robot;
pub use self::robot::RobotRig;

pub mod timers;
pub use self::timers::TimerQueue;
