//! Génération des champs de particules.
//!
//! Chaque particule est tirée indépendamment (position, vitesse, couleur,
//! taille) ; pour une même graine, le résultat est déterministe.

use rand::Rng;
use std::f32::consts::TAU;

use crate::physic_engine::field_kind::{centered, FieldKind, FieldShape};
use crate::physic_engine::particle::Particle;
use crate::physic_engine::particle_field::{FieldProfile, ParticleField};
use crate::physic_engine::types::Vec3;

/// Plage des tailles tirées pour les champs qui les utilisent
pub const SIZE_RANGE: std::ops::Range<f32> = 0.1..0.4;
/// Taille fixe des particules flottantes
pub const FLOATING_SIZE: f32 = 0.1;

/// Construit un champ de `count` particules selon `profile`.
pub fn generate_field(profile: FieldProfile, count: usize, rng: &mut impl Rng) -> ParticleField {
    let particles = (0..count).map(|_| spawn_particle(&profile, rng)).collect();
    ParticleField::new(profile, particles)
}

/// Raccourci : champ flottant sphérique de rayon `radius`
pub fn floating_field(count: usize, radius: f32, speed: f32, rng: &mut impl Rng) -> ParticleField {
    generate_field(FieldProfile::new(FieldKind::Floating, radius, speed), count, rng)
}

/// Raccourci : colonne de feu
pub fn fire_field(count: usize, speed: f32, rng: &mut impl Rng) -> ParticleField {
    generate_field(FieldProfile::new(FieldKind::Fire, 0.0, speed), count, rng)
}

/// Raccourci : paillettes dorées
pub fn sparkling_field(count: usize, speed: f32, rng: &mut impl Rng) -> ParticleField {
    generate_field(FieldProfile::new(FieldKind::Sparkling, 0.0, speed), count, rng)
}

/// Tire une particule initiale pour ce profil
pub fn spawn_particle(profile: &FieldProfile, rng: &mut impl Rng) -> Particle {
    let pos = sample_position(&profile.shape, rng);
    let vel = sample_velocity(profile.kind, rng);
    let color = profile.palette.sample(rng);
    let size = match profile.kind {
        FieldKind::Floating => FLOATING_SIZE,
        FieldKind::Fire | FieldKind::Sparkling => rng.random_range(SIZE_RANGE),
    };
    Particle::new(pos, vel, color, size)
}

/// Position initiale uniforme dans le volume englobant
pub fn sample_position(shape: &FieldShape, rng: &mut impl Rng) -> Vec3 {
    match *shape {
        FieldShape::Sphere { radius } => sample_in_sphere(rng, radius),
        FieldShape::Box { half_extents } => sample_in_box(rng, half_extents),
        FieldShape::Column {
            half_width,
            bottom,
            spawn_height,
            ..
        } => Vec3::new(
            centered(rng, half_width * 2.0),
            bottom + rng.random::<f32>() * spawn_height,
            centered(rng, half_width * 2.0),
        ),
    }
}

/// Échantillonnage en coordonnées sphériques : azimut uniforme,
/// angle polaire par `acos(u)` avec `u ∈ [-1, 1]`, rayon uniforme dans `[0, radius]`.
pub fn sample_in_sphere(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let theta = rng.random::<f32>() * TAU;
    let phi = (rng.random::<f32>() * 2.0 - 1.0).acos();
    let r = rng.random::<f32>() * radius;

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

pub fn sample_in_box(rng: &mut impl Rng, half_extents: Vec3) -> Vec3 {
    Vec3::new(
        centered(rng, half_extents.x * 2.0),
        centered(rng, half_extents.y * 2.0),
        centered(rng, half_extents.z * 2.0),
    )
}

/// Vitesse par frame, composante verticale biaisée vers le haut
pub fn sample_velocity(kind: FieldKind, rng: &mut impl Rng) -> Vec3 {
    match kind {
        FieldKind::Floating => Vec3::new(
            centered(rng, 0.02),
            rng.random::<f32>() * 0.02 + 0.01,
            centered(rng, 0.02),
        ),
        FieldKind::Sparkling => Vec3::new(
            centered(rng, 0.01),
            rng.random::<f32>() * 0.015 + 0.005,
            centered(rng, 0.01),
        ),
        // le feu est secoué à chaque frame, pas de vitesse propre
        FieldKind::Fire => Vec3::ZERO,
    }
}
