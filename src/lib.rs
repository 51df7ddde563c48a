pub mod simulator;
pub use simulator::{SimulationReport, Simulator};
// Renderer engine
pub mod renderer_engine;
pub use renderer_engine::{HeadlessRenderer, RendererEngine};
// Physic engine (champs de particules, fusée, minuteurs)
pub mod physic_engine;
// Scène d'accueil
pub mod scene;
pub use scene::{HeroScene, SceneConfig, SceneEngine};
// Calques 2D
pub mod overlay;

// Profiler
pub mod profiler;
// Utilities
pub mod utils;
