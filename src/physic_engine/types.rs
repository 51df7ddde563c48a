pub use glam::{Vec3, Vec3 as Color};

// ------------------------
// SceneEvent
// ------------------------
/// Événements produits pendant une frame, consommés par le `Simulator`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// Fin de l'écran de chargement : la scène devient visible et son horloge démarre.
    LoadingDismissed,
    /// La fusée vient de passer à l'état `Flying`.
    RocketLaunched { at: f32 },
    /// La fusée a atteint `progress == 1`.
    RocketCompleted { at: f32 },
}

// ------------------------
// UpdateResult
// ------------------------
pub struct UpdateResult<'a> {
    /// Temps de scène (secondes) après la mise à jour, `None` pendant le chargement
    pub scene_time: Option<f32>,
    pub events: &'a [SceneEvent],
}
