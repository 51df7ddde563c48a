use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::physic_engine::palette::Palette;

/// Profils de mouvement supportés par le moteur et le renderer
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Particules flottantes dans une sphère (dérive lente vers le haut)
    #[default]
    Floating = 0,
    /// Colonne de feu (monte en chauffant vers le blanc)
    Fire = 1,
    /// Paillettes dorées scintillantes sur un champ plat
    Sparkling = 2,
}

impl FieldKind {
    /// Palette par défaut pour ce type de champ
    pub fn default_palette(&self) -> Palette {
        match self {
            FieldKind::Floating => Palette::ai_theme(),
            FieldKind::Fire => Palette::heat(),
            FieldKind::Sparkling => Palette::gold(),
        }
    }

    /// Volume englobant par défaut. Le rayon n'est utilisé que par les champs sphériques.
    pub fn default_shape(&self, radius: f32) -> FieldShape {
        match self {
            FieldKind::Floating => FieldShape::Sphere { radius },
            FieldKind::Fire => FieldShape::Column {
                half_width: 1.0,
                bottom: -8.0,
                top: 8.0,
                spawn_height: 2.0,
            },
            FieldKind::Sparkling => FieldShape::Box {
                half_extents: glam::Vec3::new(25.0, 15.0, 10.0),
            },
        }
    }

    /// Vrai si la couleur/taille oscillent à chaque frame
    pub fn twinkles(&self) -> bool {
        matches!(self, FieldKind::Sparkling)
    }

    /// Retourne une description lisible du type de champ
    pub fn description(&self) -> &'static str {
        match self {
            FieldKind::Floating => "Floating particles",
            FieldKind::Fire => "Fire particles",
            FieldKind::Sparkling => "Sparkling gold particles",
        }
    }
}

/// Volume englobant d'un champ : borne haute (recyclage), borne basse
/// (réapparition) et bornes latérales (ré-échantillonnage d'un seul axe).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape {
    /// Sphère de rayon `radius` centrée à l'origine
    Sphere { radius: f32 },
    /// Pavé centré à l'origine
    Box { half_extents: glam::Vec3 },
    /// Colonne verticale : naissance dans `[bottom, bottom + spawn_height)`
    Column {
        half_width: f32,
        bottom: f32,
        top: f32,
        spawn_height: f32,
    },
}

impl FieldShape {
    pub fn upper_bound(&self) -> f32 {
        match *self {
            FieldShape::Sphere { radius } => radius,
            FieldShape::Box { half_extents } => half_extents.y,
            FieldShape::Column { top, .. } => top,
        }
    }

    pub fn lower_bound(&self) -> f32 {
        match *self {
            FieldShape::Sphere { radius } => -radius,
            FieldShape::Box { half_extents } => -half_extents.y,
            FieldShape::Column { bottom, .. } => bottom,
        }
    }

    /// Limites |x| et |z| au-delà desquelles l'axe est ré-échantillonné
    pub fn lateral_limits(&self) -> (f32, f32) {
        match *self {
            FieldShape::Sphere { radius } => (radius, radius),
            FieldShape::Box { half_extents } => (half_extents.x, half_extents.z),
            // la colonne n'a pas de borne latérale : seule la hauteur recycle
            FieldShape::Column { .. } => (f32::INFINITY, f32::INFINITY),
        }
    }

    /// Largeurs totales (x, z) des tirages uniformes centrés `(u - 0.5) * w`
    /// utilisés lors d'un recyclage. La sphère ne réutilise que la moitié
    /// centrale de son diamètre.
    pub fn respawn_spans(&self) -> (f32, f32) {
        match *self {
            FieldShape::Sphere { radius } => (radius, radius),
            FieldShape::Box { half_extents } => (half_extents.x * 2.0, half_extents.z * 2.0),
            FieldShape::Column { half_width, .. } => (half_width * 2.0, half_width * 2.0),
        }
    }

    #[inline]
    pub fn respawn_x(&self, rng: &mut impl Rng) -> f32 {
        centered(rng, self.respawn_spans().0)
    }

    #[inline]
    pub fn respawn_z(&self, rng: &mut impl Rng) -> f32 {
        centered(rng, self.respawn_spans().1)
    }
}

/// Tirage uniforme dans `[-span/2, span/2)`
#[inline(always)]
pub(crate) fn centered(rng: &mut impl Rng, span: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * span
}
