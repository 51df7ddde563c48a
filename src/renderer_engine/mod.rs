pub mod r#trait;
pub use r#trait::RendererEngine;

pub mod headless;
pub use self::headless::HeadlessRenderer;

pub mod types;
pub use self::types::{Attribute, FrameStats, FrameUniforms};
