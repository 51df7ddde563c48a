use hero_fx::physic_engine::particle_field::ParticleField;
use hero_fx::physic_engine::types::{SceneEvent, UpdateResult};
use hero_fx::renderer_engine::{FrameStats, RendererEngine};
use hero_fx::scene::camera::Camera;
use hero_fx::scene::config::{CameraSettings, SceneConfig};
use hero_fx::scene::SceneEngine;
use std::cell::RefCell;
use std::rc::Rc;

pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Config déterministe : graine fixe, reste par défaut
#[allow(dead_code)]
pub fn seeded_config(seed: u64) -> SceneConfig {
    SceneConfig {
        seed: Some(seed),
        ..SceneConfig::default()
    }
}

/// Avance une scène de `seconds` à 60 Hz, en collectant les événements
#[allow(dead_code)]
pub fn run_for<S: SceneEngine>(scene: &mut S, seconds: f32) -> Vec<SceneEvent> {
    let dt = 1.0 / 60.0;
    let frames = (seconds / dt).round() as usize;
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend_from_slice(scene.update(dt).events);
    }
    events
}

#[allow(dead_code)]
pub struct LoggingRenderer {
    pub log: CallLog,
}

impl LoggingRenderer {
    #[allow(dead_code)]
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl RendererEngine for LoggingRenderer {
    fn render_frame<S: SceneEngine>(&mut self, scene: &mut S) -> FrameStats {
        self.log.borrow_mut().push("renderer.render_frame".into());
        FrameStats {
            particles_drawn: scene.fields().iter().map(|f| f.len()).sum(),
            ..FrameStats::default()
        }
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("renderer.close".into());
    }
}

/// Scène minimale : pas de champ, un événement scripté par frame
#[allow(dead_code)]
pub struct LoggingScene {
    pub log: CallLog,
    pub config: SceneConfig,
    pub camera: Camera,
    pub fields: Vec<ParticleField>,
    pub script: Vec<Vec<SceneEvent>>,
    frame: usize,
    current: Vec<SceneEvent>,
}

impl LoggingScene {
    #[allow(dead_code)]
    pub fn new(log: CallLog, script: Vec<Vec<SceneEvent>>) -> Self {
        Self {
            log,
            config: SceneConfig::default(),
            camera: Camera::from(&CameraSettings::default()),
            fields: Vec::new(),
            script,
            frame: 0,
            current: Vec::new(),
        }
    }
}

impl SceneEngine for LoggingScene {
    fn set_viewport_width(&mut self, _width: f32) {
        self.log.borrow_mut().push("scene.set_viewport_width".into());
    }

    fn update(&mut self, _dt: f32) -> UpdateResult<'_> {
        self.log.borrow_mut().push("scene.update".into());
        self.current = self.script.get(self.frame).cloned().unwrap_or_default();
        self.frame += 1;
        UpdateResult {
            scene_time: Some(self.frame as f32),
            events: &self.current,
        }
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("scene.close".into());
    }

    fn reload_config(&mut self, config: &SceneConfig) -> bool {
        self.log.borrow_mut().push("scene.reload_config".into());
        self.config = config.clone();
        false
    }

    fn get_config(&self) -> &SceneConfig {
        &self.config
    }

    fn is_live(&self) -> bool {
        true
    }

    fn scene_time(&self) -> Option<f32> {
        Some(self.frame as f32)
    }

    fn fields(&self) -> &[ParticleField] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [ParticleField] {
        &mut self.fields
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }
}
