#[cfg(debug_assertions)]
use log::debug;
use itertools::{Itertools, MinMaxResult};
use std::ops::BitOrAssign;

use crate::physic_engine::field_kind::{FieldKind, FieldShape};
use crate::physic_engine::palette::Palette;
use crate::physic_engine::particle::Particle;

/// Marqueurs "à ré-uploader" par attribut.
///
/// Le renderer garde des buffers persistants côté GPU : il ne recopie
/// un attribut que si le drapeau correspondant est levé, puis le consomme
/// avec [`ParticleField::take_dirty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub position: bool,
    pub color: bool,
    pub size: bool,
}

impl DirtyFlags {
    pub const NONE: Self = Self {
        position: false,
        color: false,
        size: false,
    };
    pub const ALL: Self = Self {
        position: true,
        color: true,
        size: true,
    };

    pub fn any(&self) -> bool {
        self.position || self.color || self.size
    }
}

impl BitOrAssign for DirtyFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.position |= rhs.position;
        self.color |= rhs.color;
        self.size |= rhs.size;
    }
}

/// Profil de mouvement partagé par toutes les particules d'un champ
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProfile {
    pub kind: FieldKind,
    pub shape: FieldShape,
    /// Multiplicateur appliqué au temps écoulé (dérive sinusoïdale, scintillement)
    pub speed: f32,
    pub palette: Palette,
}

impl FieldProfile {
    /// Profil par défaut d'un type de champ (forme et palette par défaut)
    pub fn new(kind: FieldKind, radius: f32, speed: f32) -> Self {
        Self {
            kind,
            shape: kind.default_shape(radius),
            speed,
            palette: kind.default_palette(),
        }
    }
}

/// Collection de taille fixe de particules partageant un profil.
///
/// Le buffer de particules est possédé par le champ ; il n'est modifié que
/// par [`ParticleField::update`] (voir `updater.rs`).
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub(crate) profile: FieldProfile,
    pub(crate) particles: Vec<Particle>,
    pub(crate) dirty: DirtyFlags,
    pub(crate) recycled_last_frame: usize,
}

impl ParticleField {
    pub fn new(profile: FieldProfile, particles: Vec<Particle>) -> Self {
        #[cfg(debug_assertions)]
        debug!(
            "ParticleField initialized: {} × {}",
            particles.len(),
            profile.kind.description()
        );

        Self {
            profile,
            particles,
            // tout est à envoyer au premier rendu
            dirty: DirtyFlags::ALL,
            recycled_last_frame: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn kind(&self) -> FieldKind {
        self.profile.kind
    }

    pub fn profile(&self) -> &FieldProfile {
        &self.profile
    }

    pub fn shape(&self) -> &FieldShape {
        &self.profile.shape
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Accès mutable direct : tous les attributs sont marqués sales.
    /// La taille du slice reste fixe (pas d'ajout/suppression).
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        self.dirty = DirtyFlags::ALL;
        &mut self.particles
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Retourne les drapeaux courants et les remet à zéro
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::replace(&mut self.dirty, DirtyFlags::NONE)
    }

    /// Nombre de particules recyclées lors de la dernière mise à jour
    pub fn recycled_last_frame(&self) -> usize {
        self.recycled_last_frame
    }

    /// Hauteurs min/max actuelles du champ (`None` si vide)
    pub fn vertical_extent(&self) -> Option<(f32, f32)> {
        match self.particles.iter().map(|p| p.pos.y).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(y) => Some((y, y)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn field_with_heights(heights: &[f32]) -> ParticleField {
        let particles = heights
            .iter()
            .map(|&y| Particle::new(Vec3::new(0.0, y, 0.0), Vec3::ZERO, Vec3::ONE, 0.1))
            .collect();
        ParticleField::new(FieldProfile::new(FieldKind::Floating, 10.0, 1.0), particles)
    }

    #[test]
    fn test_new_field_is_fully_dirty_then_clean_after_take() {
        let mut field = field_with_heights(&[0.0, 1.0]);
        assert_eq!(field.take_dirty(), DirtyFlags::ALL);
        assert_eq!(field.dirty(), DirtyFlags::NONE);
        assert!(!field.dirty().any());
    }

    #[test]
    fn test_particles_mut_marks_dirty() {
        let mut field = field_with_heights(&[0.0]);
        field.take_dirty();
        field.particles_mut()[0].pos.y = 3.0;
        assert_eq!(field.dirty(), DirtyFlags::ALL);
    }

    #[test]
    fn test_vertical_extent() {
        assert_eq!(field_with_heights(&[]).vertical_extent(), None);
        assert_eq!(field_with_heights(&[2.0]).vertical_extent(), Some((2.0, 2.0)));
        assert_eq!(
            field_with_heights(&[2.0, -4.0, 1.0]).vertical_extent(),
            Some((-4.0, 2.0))
        );
    }

    #[test]
    fn test_dirty_flags_merge() {
        let mut flags = DirtyFlags {
            position: true,
            ..DirtyFlags::NONE
        };
        flags |= DirtyFlags {
            size: true,
            ..DirtyFlags::NONE
        };
        assert!(flags.position && flags.size && !flags.color);
    }
}
