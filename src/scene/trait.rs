use glam::Vec2;

use crate::overlay::{CursorFollower, SparkleOverlay};
use crate::physic_engine::particle_field::ParticleField;
use crate::physic_engine::rocket::RocketSequencer;
use crate::physic_engine::robot::RobotRig;
use crate::physic_engine::types::UpdateResult;
use crate::scene::camera::Camera;
use crate::scene::config::SceneConfig;

/// 🔧 Trait `SceneEngine`
///
/// Interface commune entre la boucle de frames (`Simulator`), le renderer
/// et l'état animé de la scène. Un seul écrivain (`update`) puis un seul
/// lecteur (le rendu) par frame.
pub trait SceneEngine {
    /// Mémorise la largeur courante du viewport. La composition n'est
    /// décidée qu'au montage : elle n'est pas réévaluée ici.
    fn set_viewport_width(&mut self, width: f32);

    /// Avance la scène de `dt` secondes.
    /// Retourne un `UpdateResult` contenant les événements de la frame.
    fn update(&mut self, dt: f32) -> UpdateResult<'_>;

    /// Démontage : annule les minuteurs en attente, plus aucune mise à jour.
    fn close(&mut self) {} // Par défaut, fait rien.

    /// Recompose la scène. Retourne `true` si la disposition des champs a changé.
    fn reload_config(&mut self, config: &SceneConfig) -> bool;

    fn get_config(&self) -> &SceneConfig;

    /// Vrai une fois l'écran de chargement levé
    fn is_live(&self) -> bool;

    /// Temps écoulé depuis l'apparition de la scène (`None` pendant le chargement)
    fn scene_time(&self) -> Option<f32>;

    fn fields(&self) -> &[ParticleField];

    /// Accès mutable pour que le renderer consomme les drapeaux sales
    fn fields_mut(&mut self) -> &mut [ParticleField];

    fn camera(&self) -> &Camera;

    fn rocket(&self) -> Option<&RocketSequencer> {
        None
    }

    fn robot(&self) -> Option<&RobotRig> {
        None
    }

    fn sparkle_overlay(&self) -> Option<&SparkleOverlay> {
        None
    }

    fn cursor(&self) -> Option<&CursorFollower> {
        None
    }

    /// Déplacement du pointeur (coordonnées client, px)
    fn pointer_moved(&mut self, _client: Vec2, _viewport: Vec2) {}
}
