use bytemuck::{Pod, Zeroable};

/// Uniformes partagés par tous les champs pour une frame.
///
/// # Layout mémoire GPU
///
/// | Champ             | Type     | Octets |
/// |-------------------|----------|--------|
/// | `camera_position` | `vec3`   | 12     |
/// | `fov`             | `float`  | 4      |
/// | `fog_color`       | `vec3`   | 12     |
/// | `fog_near`        | `float`  | 4      |
/// | `fog_far`         | `float`  | 4      |
/// | `scene_time`      | `float`  | 4      |
/// | `rocket_progress` | `float`  | 4      |
/// | `_pad`            | `float`  | 4      |
///
/// **Stride total** : `12 × f32 = 48 octets`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub camera_position: [f32; 3],
    pub fov: f32,
    pub fog_color: [f32; 3],
    /// 0 avec `fog_far` à 0 : brouillard désactivé
    pub fog_near: f32,
    pub fog_far: f32,
    pub scene_time: f32,
    pub rocket_progress: f32,
    pub _pad: f32,
}

/// Attribut de sommet par particule, stocké dans son propre buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Color,
    Size,
}

impl Attribute {
    /// Nombre de `f32` par particule
    pub fn components(&self) -> usize {
        match self {
            Attribute::Position | Attribute::Color => 3,
            Attribute::Size => 1,
        }
    }
}

/// Statistiques d'une frame rendue
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub particles_drawn: usize,
    /// Attributs réellement ré-envoyés (un par buffer)
    pub attribute_uploads: usize,
    pub bytes_uploaded: usize,
    pub trail_markers_visible: usize,
    pub sparkles_lit: usize,
}
