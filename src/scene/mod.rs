pub mod r#trait;
pub use r#trait::SceneEngine;

pub mod config;
pub use self::config::SceneConfig;

pub mod viewport;
pub use self::viewport::DisplayClass;

pub mod camera;
pub use self::camera::{Camera, OrbitControls};

pub mod composer;
pub use self::composer::{ComposedScene, SceneComposer};

pub mod hero;
pub use self::hero::{HeroScene, Stage};
#[cfg(any(test, feature = "test_helpers"))]
pub use self::hero::HeroSceneTestHelpers;
