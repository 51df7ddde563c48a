use log::{debug, info};

use crate::physic_engine::particle_field::{DirtyFlags, ParticleField};
use crate::renderer_engine::types::{Attribute, FrameStats, FrameUniforms};
use crate::renderer_engine::RendererEngine;
use crate::scene::SceneEngine;

/// Copie "côté GPU" d'un attribut : un buffer de `f32` contigus.
#[derive(Debug, Default, Clone)]
pub struct AttributeBuffer {
    data: Vec<f32>,
    uploads: u64,
}

impl AttributeBuffer {
    fn upload(&mut self, staging: &[f32]) -> usize {
        self.data.clear();
        self.data.extend_from_slice(staging);
        self.uploads += 1;
        bytemuck::cast_slice::<f32, u8>(staging).len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

/// Buffers d'un champ : un par attribut, ré-envoyés indépendamment.
#[derive(Debug, Default, Clone)]
pub struct FieldBuffers {
    positions: AttributeBuffer,
    colors: AttributeBuffer,
    sizes: AttributeBuffer,
    staging: Vec<f32>,
    particle_count: usize,
}

impl FieldBuffers {
    pub fn attribute(&self, attribute: Attribute) -> &AttributeBuffer {
        match attribute {
            Attribute::Position => &self.positions,
            Attribute::Color => &self.colors,
            Attribute::Size => &self.sizes,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Remplit le staging avec l'attribut demandé puis l'envoie.
    /// Retourne le nombre d'octets transférés.
    fn sync_attribute(&mut self, field: &ParticleField, attribute: Attribute) -> usize {
        self.staging.clear();
        self.staging
            .reserve(field.len() * attribute.components());
        for p in field.particles() {
            match attribute {
                Attribute::Position => self.staging.extend_from_slice(&p.pos.to_array()),
                Attribute::Color => self.staging.extend_from_slice(&p.color.to_array()),
                Attribute::Size => self.staging.push(p.size),
            }
        }
        let target = match attribute {
            Attribute::Position => &mut self.positions,
            Attribute::Color => &mut self.colors,
            Attribute::Size => &mut self.sizes,
        };
        target.upload(&self.staging)
    }

    fn sync(&mut self, field: &mut ParticleField, stats: &mut FrameStats) {
        let mut dirty = field.take_dirty();
        // buffers à réallouer : tout renvoyer
        if self.particle_count != field.len() {
            self.particle_count = field.len();
            dirty |= DirtyFlags::ALL;
        }
        let pending = [
            (Attribute::Position, dirty.position),
            (Attribute::Color, dirty.color),
            (Attribute::Size, dirty.size),
        ];
        for (attribute, is_dirty) in pending {
            if is_dirty {
                stats.bytes_uploaded += self.sync_attribute(field, attribute);
                stats.attribute_uploads += 1;
            }
        }
    }
}

/// Renderer sans contexte graphique : tient à jour une copie des buffers
/// par champ et des uniformes de frame, pour le pilote en ligne de commande
/// et les tests.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    buffers: Vec<FieldBuffers>,
    uniforms: FrameUniforms,
    uniforms_bytes: Vec<u8>,
    frames: u64,
    total_bytes: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffers(&self) -> &[FieldBuffers] {
        &self.buffers
    }

    pub fn uniforms(&self) -> &FrameUniforms {
        &self.uniforms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn total_bytes_uploaded(&self) -> usize {
        self.total_bytes
    }

    fn compute_uniforms<S: SceneEngine>(scene: &S) -> FrameUniforms {
        let camera = scene.camera();
        let (fog_color, fog_near, fog_far) = scene
            .get_config()
            .fog
            .map(|fog| (fog.color.rgb().to_array(), fog.near, fog.far))
            .unwrap_or_default();
        FrameUniforms {
            camera_position: camera.position.to_array(),
            fov: camera.fov,
            fog_color,
            fog_near,
            fog_far,
            scene_time: scene.scene_time().unwrap_or(0.0),
            rocket_progress: scene
                .rocket()
                .filter(|r| r.is_flying())
                .map(|r| r.progress())
                .unwrap_or(0.0),
            _pad: 0.0,
        }
    }
}

impl RendererEngine for HeadlessRenderer {
    fn render_frame<S: SceneEngine>(&mut self, scene: &mut S) -> FrameStats {
        let mut stats = FrameStats::default();

        // écran de chargement : aucun buffer n'est touché
        let Some(t) = scene.scene_time() else {
            return stats;
        };

        let fields = scene.fields_mut();
        if self.buffers.len() != fields.len() {
            debug!(
                "Resizing field buffers: {} -> {}",
                self.buffers.len(),
                fields.len()
            );
            self.buffers.resize_with(fields.len(), FieldBuffers::default);
        }
        for (buffers, field) in self.buffers.iter_mut().zip(fields.iter_mut()) {
            buffers.sync(field, &mut stats);
            stats.particles_drawn += field.len();
        }

        self.uniforms = Self::compute_uniforms(scene);
        self.uniforms_bytes.clear();
        self.uniforms_bytes
            .extend_from_slice(bytemuck::bytes_of(&self.uniforms));
        stats.bytes_uploaded += self.uniforms_bytes.len();

        stats.trail_markers_visible = scene
            .rocket()
            .map(|r| r.trail().iter().filter(|m| m.visible).count())
            .unwrap_or(0);
        stats.sparkles_lit = scene
            .sparkle_overlay()
            .map(|o| o.lit_count(t, 0.5))
            .unwrap_or(0);

        self.frames += 1;
        self.total_bytes += stats.bytes_uploaded;
        stats
    }

    fn close(&mut self) {
        info!(
            "HeadlessRenderer closed after {} frames, {:.2} KB uploaded",
            self.frames,
            self.total_bytes as f64 / 1024.0
        );
        self.buffers.clear();
    }
}
