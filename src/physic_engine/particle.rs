use crate::physic_engine::types::{Color, Vec3};

/// Un point animé d'un `ParticleField`.
///
/// `base_color` / `base_size` sont les valeurs tirées à la création,
/// `color` / `size` les valeurs courantes envoyées au renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec3,
    /// Déplacement par frame (pas par seconde)
    pub vel: Vec3,
    pub base_color: Color,
    pub color: Color,
    pub base_size: f32,
    pub size: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            base_color: Color::ONE,
            color: Color::ONE,
            base_size: 0.1,
            size: 0.1,
        }
    }
}

impl Particle {
    pub fn new(pos: Vec3, vel: Vec3, color: Color, size: f32) -> Self {
        Self {
            pos,
            vel,
            base_color: color,
            color,
            base_size: size,
            size,
        }
    }
}
