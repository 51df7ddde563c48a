use log::info;
use rand::Rng;

use crate::physic_engine::field_kind::FieldKind;
use crate::physic_engine::generator::generate_field;
use crate::physic_engine::particle_field::{FieldProfile, ParticleField};
use crate::physic_engine::rocket::RocketSequencer;
use crate::physic_engine::robot::RobotRig;
use crate::scene::camera::{Camera, OrbitControls};
use crate::scene::config::{FieldLayer, FogSettings, LightSettings, SceneConfig};
use crate::scene::viewport::DisplayClass;

/// Paramètres effectifs d'un calque après adaptation à l'affichage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerPlan {
    pub kind: FieldKind,
    pub count: usize,
    pub radius: f32,
    pub speed: f32,
}

impl LayerPlan {
    /// `None` si le calque est ignoré pour cette classe d'affichage
    pub fn resolve(layer: &FieldLayer, display: DisplayClass) -> Option<Self> {
        let (count, speed) = match display {
            DisplayClass::Standard => (layer.count, layer.speed),
            DisplayClass::Constrained if layer.optional => return None,
            DisplayClass::Constrained => (
                (layer.count as f32 * layer.constrained_multiplier).round() as usize,
                layer.constrained_speed.unwrap_or(layer.speed),
            ),
        };
        Some(Self {
            kind: layer.kind,
            count: count.max(layer.min_count),
            radius: layer.radius,
            speed,
        })
    }
}

/// Description complète et prête à animer de la scène d'accueil
#[derive(Debug, Clone)]
pub struct ComposedScene {
    pub display: DisplayClass,
    pub viewport_width: f32,
    pub camera: Camera,
    pub controls: Option<OrbitControls>,
    pub lights: Vec<LightSettings>,
    pub fog: Option<FogSettings>,
    pub fields: Vec<ParticleField>,
    pub rocket: Option<RocketSequencer>,
    pub robot: Option<RobotRig>,
}

impl ComposedScene {
    pub fn total_particles(&self) -> usize {
        self.fields.iter().map(|f| f.len()).sum()
    }
}

/// Assemble champs, caméra, lumières et brouillard, une seule fois au montage.
pub struct SceneComposer;

impl SceneComposer {
    /// Plan des calques retenus pour une classe d'affichage
    pub fn plan(config: &SceneConfig, display: DisplayClass) -> Vec<LayerPlan> {
        config
            .layers
            .iter()
            .filter_map(|layer| LayerPlan::resolve(layer, display))
            .collect()
    }

    pub fn compose(config: &SceneConfig, viewport_width: f32, rng: &mut impl Rng) -> ComposedScene {
        let display = DisplayClass::classify(viewport_width, config.constrained_breakpoint);

        let fields: Vec<ParticleField> = Self::plan(config, display)
            .into_iter()
            .map(|plan| {
                generate_field(
                    FieldProfile::new(plan.kind, plan.radius, plan.speed),
                    plan.count,
                    rng,
                )
            })
            .collect();

        let camera = Camera::from(&config.camera);
        let controls = config.orbit.enabled.then(|| {
            let speed = if display.is_constrained() {
                config.orbit.constrained_auto_rotate_speed
            } else {
                config.orbit.auto_rotate_speed
            };
            OrbitControls::new(config.orbit, speed, &camera)
        });

        let scene = ComposedScene {
            display,
            viewport_width,
            camera,
            controls,
            lights: config.lights.clone(),
            fog: config.fog,
            fields,
            rocket: config.rocket.clone().map(RocketSequencer::new),
            robot: config.robot.map(RobotRig::new),
        };

        info!(
            "🎬 Scene composed for {:.0}px ({:?}): {} layers, {} particles",
            viewport_width,
            display,
            scene.fields.len(),
            scene.total_particles()
        );
        scene
    }
}
