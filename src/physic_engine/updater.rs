//! Mise à jour par frame des champs de particules.
//!
//! Appelée une fois par frame rendue avec le temps de scène `t` (secondes,
//! croissant). Pas de simulation physique : vitesse constante + petite
//! perturbation sinusoïdale dépendant du temps et de l'indice, puis
//! recyclage des particules sorties du volume.

use rand::Rng;

use crate::physic_engine::field_kind::{FieldKind, FieldShape};
use crate::physic_engine::particle::Particle;
use crate::physic_engine::particle_field::{DirtyFlags, ParticleField};

/// Facteur de scintillement dans [0, 1], déphasé par indice
#[inline(always)]
pub fn twinkle_factor(ts: f32, index: usize) -> f32 {
    0.5 + 0.5 * (5.0 * ts + index as f32 * 0.1).sin()
}

/// Échelle de couleur : dans [0.3, 1.0]
#[inline(always)]
pub fn twinkle_color_scale(twinkle: f32) -> f32 {
    0.3 + 0.7 * twinkle
}

/// Échelle de taille : dans [0.5, 2.0]
#[inline(always)]
pub fn twinkle_size_scale(twinkle: f32) -> f32 {
    0.5 + 1.5 * twinkle
}

/// Hauteur normalisée du feu : 0 en bas de la colonne, 1 en haut
#[inline(always)]
pub fn fire_height(y: f32, bottom: f32, top: f32) -> f32 {
    (y - bottom) / (top - bottom)
}

impl ParticleField {
    /// Fait avancer toutes les particules d'une frame.
    ///
    /// Effets : positions (et couleurs/tailles selon le type) modifiées en
    /// place, drapeaux sales levés pour les attributs touchés.
    pub fn update(&mut self, t: f32, rng: &mut impl Rng) {
        let ts = t * self.profile.speed;
        let shape = self.profile.shape;

        let (recycled, touched) = match self.profile.kind {
            FieldKind::Floating => (
                update_floating(&mut self.particles, ts, &shape, rng),
                DirtyFlags {
                    position: true,
                    ..DirtyFlags::NONE
                },
            ),
            FieldKind::Sparkling => (
                update_sparkling(&mut self.particles, ts, &shape, rng),
                DirtyFlags::ALL,
            ),
            FieldKind::Fire => (
                update_fire(&mut self.particles, &shape, rng),
                DirtyFlags {
                    position: true,
                    color: true,
                    size: false,
                },
            ),
        };

        self.recycled_last_frame = recycled;
        self.dirty |= touched;
    }
}

fn update_floating(
    particles: &mut [Particle],
    ts: f32,
    shape: &FieldShape,
    rng: &mut impl Rng,
) -> usize {
    let mut recycled = 0;
    for (i, p) in particles.iter_mut().enumerate() {
        let phase = ts + i as f32 * 0.1;
        p.pos.x += p.vel.x + phase.sin() * 0.001;
        p.pos.y += p.vel.y + phase.cos() * 0.001;
        p.pos.z += p.vel.z;

        recycled += recycle(p, shape, rng) as usize;
    }
    recycled
}

fn update_sparkling(
    particles: &mut [Particle],
    ts: f32,
    shape: &FieldShape,
    rng: &mut impl Rng,
) -> usize {
    let mut recycled = 0;
    for (i, p) in particles.iter_mut().enumerate() {
        let fi = i as f32;
        p.pos.x += p.vel.x + (ts + fi * 0.01).sin() * 0.002;
        p.pos.y += p.vel.y + (ts + fi * 0.015).cos() * 0.001;
        p.pos.z += p.vel.z + (ts + fi * 0.02).sin() * 0.001;

        let twinkle = twinkle_factor(ts, i);
        p.color = p.base_color * twinkle_color_scale(twinkle);
        p.size = p.base_size * twinkle_size_scale(twinkle);

        recycled += recycle(p, shape, rng) as usize;
    }
    recycled
}

fn update_fire(particles: &mut [Particle], shape: &FieldShape, rng: &mut impl Rng) -> usize {
    let (bottom, top) = (shape.lower_bound(), shape.upper_bound());
    let mut recycled = 0;
    for p in particles.iter_mut() {
        // montée avec un peu d'aléa
        p.pos.x += (rng.random::<f32>() - 0.5) * 0.02;
        p.pos.y += 0.05 + rng.random::<f32>() * 0.03;
        p.pos.z += (rng.random::<f32>() - 0.5) * 0.02;

        // vire au jaune/blanc en montant
        let height = fire_height(p.pos.y, bottom, top);
        p.color.y = (height + 0.3).clamp(0.0, 1.0);
        p.color.z = height.clamp(0.0, 0.8);

        if recycle(p, shape, rng) {
            p.color.y = rng.random::<f32>() * 0.3;
            p.color.z = rng.random::<f32>() * 0.1;
            recycled += 1;
        }
    }
    recycled
}

/// Recyclage (pas de rebond) : au-dessus de la borne haute la particule
/// réapparaît à la borne basse ; hors borne latérale seul l'axe fautif est
/// ré-échantillonné. Retourne `true` si la particule a été renvoyée en bas.
#[inline(always)]
fn recycle(p: &mut Particle, shape: &FieldShape, rng: &mut impl Rng) -> bool {
    let mut recycled = false;
    if p.pos.y > shape.upper_bound() {
        p.pos.x = shape.respawn_x(rng);
        p.pos.y = shape.lower_bound();
        p.pos.z = shape.respawn_z(rng);
        recycled = true;
    }

    let (limit_x, limit_z) = shape.lateral_limits();
    if p.pos.x.abs() > limit_x {
        p.pos.x = shape.respawn_x(rng);
    }
    if p.pos.z.abs() > limit_z {
        p.pos.z = shape.respawn_z(rng);
    }
    recycled
}
