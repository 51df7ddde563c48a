use crate::renderer_engine::types::FrameStats;
use crate::scene::SceneEngine;

pub trait RendererEngine {
    /// Consomme les drapeaux sales de la scène et ne ré-envoie que les
    /// attributs modifiés.
    fn render_frame<S: SceneEngine>(&mut self, scene: &mut S) -> FrameStats;
    fn close(&mut self);
}
