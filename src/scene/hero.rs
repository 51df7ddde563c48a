use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::overlay::{CursorFollower, SparkleOverlay};
use crate::physic_engine::particle_field::ParticleField;
use crate::physic_engine::rocket::RocketSequencer;
use crate::physic_engine::robot::RobotRig;
use crate::physic_engine::timers::{TimerId, TimerQueue};
use crate::physic_engine::types::{SceneEvent, UpdateResult};
use crate::scene::camera::Camera;
use crate::scene::composer::{ComposedScene, SceneComposer};
use crate::scene::config::SceneConfig;
use crate::scene::SceneEngine;

/// Étapes de vie de la scène
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Écran de chargement : rien n'est animé
    Loading,
    Live,
    /// Démontée : minuteurs annulés, plus de mise à jour
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    DismissLoading,
    LaunchRocket,
}

/// Scène d'accueil : possède tous les champs, la fusée, les minuteurs et
/// l'horloge. Seul écrivain de l'état animé.
#[derive(Debug)]
pub struct HeroScene {
    config: SceneConfig,
    rng: StdRng,

    /// Largeur utilisée lors de la composition
    mounted_width: f32,
    /// Dernière largeur connue (non appliquée avant un remontage)
    viewport_width: f32,

    scene: ComposedScene,
    overlay: SparkleOverlay,
    cursor: CursorFollower,

    timers: TimerQueue<TimerEvent>,
    rocket_timer: Option<TimerId>,
    stage: Stage,

    /// Temps hôte depuis le montage (`f64` : cumulé sans borne)
    clock: f64,
    /// Valeur de `clock` au moment où la scène est devenue visible
    live_since: Option<f64>,
    events: Vec<SceneEvent>,
}

impl HeroScene {
    pub fn new(config: &SceneConfig, viewport_width: f32) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let scene = SceneComposer::compose(config, viewport_width, &mut rng);
        let overlay = SparkleOverlay::generate(&config.sparkles, &mut rng);

        let mut timers = TimerQueue::new();
        timers.schedule(0.0, config.loading_delay, TimerEvent::DismissLoading);

        Self {
            config: config.clone(),
            rng,
            mounted_width: viewport_width,
            viewport_width,
            scene,
            overlay,
            cursor: CursorFollower::default(),
            timers,
            rocket_timer: None,
            stage: Stage::Loading,
            clock: 0.0,
            live_since: None,
            events: Vec::with_capacity(4),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn composed(&self) -> &ComposedScene {
        &self.scene
    }

    pub fn mounted_width(&self) -> f32 {
        self.mounted_width
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Temps relatif passé aux animations : seule conversion en `f32`
    fn scene_time_at(&self, clock: f64) -> Option<f32> {
        self.live_since.map(|since| (clock - since) as f32)
    }

    fn schedule_rocket(&mut self, delay: f32) {
        if self.scene.rocket.is_none() {
            return;
        }
        if let Some(previous) = self.rocket_timer.take() {
            self.timers.cancel(previous);
        }
        self.rocket_timer = Some(
            self.timers
                .schedule(self.clock, delay, TimerEvent::LaunchRocket),
        );
    }

    fn go_live(&mut self) {
        self.stage = Stage::Live;
        self.live_since = Some(self.clock);
        self.events.push(SceneEvent::LoadingDismissed);
        info!("✨ Loading dismissed at {:.2}s, scene is live", self.clock);

        if let Some(delay) = self.scene.rocket.as_ref().map(|r| r.settings().initial_delay) {
            self.schedule_rocket(delay);
        }
    }

    fn launch_rocket(&mut self) {
        self.rocket_timer = None;
        let at = self.scene_time_at(self.clock).unwrap_or(0.0);
        if let Some(rocket) = self.scene.rocket.as_mut() {
            if rocket.activate() {
                debug!("🚀 Rocket flight #{} launched", rocket.activations());
                self.events.push(SceneEvent::RocketLaunched { at });
            }
        }
    }

    fn handle_timers(&mut self) {
        for event in self.timers.poll(self.clock) {
            match event {
                TimerEvent::DismissLoading => self.go_live(),
                TimerEvent::LaunchRocket => self.launch_rocket(),
            }
        }
    }

    fn animate(&mut self, dt: f32, t: f32) {
        for field in self.scene.fields.iter_mut() {
            field.update(t, &mut self.rng);
        }

        if let Some(controls) = self.scene.controls.as_mut() {
            controls.update(dt, &mut self.scene.camera);
        }

        if let Some(robot) = self.scene.robot.as_mut() {
            robot.update(t);
        }

        let completed = self.scene.rocket.as_mut().and_then(|r| r.update(t));
        if let Some(done) = completed {
            debug!("🚀 Rocket flight #{} completed", done.activation);
            self.events.push(SceneEvent::RocketCompleted { at: done.at });
            if let Some(cooldown) = self.scene.rocket.as_ref().map(|r| r.settings().cooldown) {
                self.schedule_rocket(cooldown);
            }
        }
    }

    fn step(&mut self, dt: f32) -> UpdateResult<'_> {
        self.events.clear();

        if self.stage != Stage::Closed {
            self.clock += f64::from(dt.max(0.0));
            self.handle_timers();

            // rien à animer tant que la scène n'est pas montée
            if let Some(t) = self.scene_time_at(self.clock) {
                self.animate(dt, t);
            }
        }

        UpdateResult {
            scene_time: self.scene_time_at(self.clock),
            events: &self.events,
        }
    }

    fn recompose(&mut self, config: &SceneConfig) -> bool {
        let old_layout: Vec<(_, usize)> =
            self.scene.fields.iter().map(|f| (f.kind(), f.len())).collect();

        self.config = config.clone();
        // un rechargement équivaut à un remontage : la largeur courante est reclassée
        self.mounted_width = self.viewport_width;
        self.scene = SceneComposer::compose(config, self.mounted_width, &mut self.rng);
        self.overlay = SparkleOverlay::generate(&config.sparkles, &mut self.rng);

        if let Some(id) = self.rocket_timer.take() {
            self.timers.cancel(id);
        }
        if self.stage == Stage::Live {
            if let Some(delay) = self.scene.rocket.as_ref().map(|r| r.settings().initial_delay) {
                self.schedule_rocket(delay);
            }
        }

        let new_layout: Vec<(_, usize)> =
            self.scene.fields.iter().map(|f| (f.kind(), f.len())).collect();
        let changed = old_layout != new_layout;
        if changed {
            info!(
                "Scene layout changed on reload: {} -> {} layers",
                old_layout.len(),
                new_layout.len()
            );
        }
        changed
    }
}

// ==================================
// Trait SceneEngine
// ==================================
impl SceneEngine for HeroScene {
    fn set_viewport_width(&mut self, width: f32) {
        if width != self.viewport_width {
            debug!(
                "Viewport width {} -> {} (scene stays composed for {})",
                self.viewport_width, width, self.mounted_width
            );
        }
        self.viewport_width = width;
    }

    fn update(&mut self, dt: f32) -> UpdateResult<'_> {
        self.step(dt)
    }

    fn close(&mut self) {
        self.timers.cancel_all();
        self.rocket_timer = None;
        if let Some(rocket) = self.scene.rocket.as_mut() {
            rocket.deactivate();
        }
        self.stage = Stage::Closed;
        debug!("HeroScene closed, pending timers cancelled.");
    }

    fn reload_config(&mut self, config: &SceneConfig) -> bool {
        self.recompose(config)
    }

    fn get_config(&self) -> &SceneConfig {
        &self.config
    }

    fn is_live(&self) -> bool {
        self.stage == Stage::Live
    }

    fn scene_time(&self) -> Option<f32> {
        self.scene_time_at(self.clock)
    }

    fn fields(&self) -> &[ParticleField] {
        &self.scene.fields
    }

    fn fields_mut(&mut self) -> &mut [ParticleField] {
        &mut self.scene.fields
    }

    fn camera(&self) -> &Camera {
        &self.scene.camera
    }

    fn rocket(&self) -> Option<&RocketSequencer> {
        self.scene.rocket.as_ref()
    }

    fn robot(&self) -> Option<&RobotRig> {
        self.scene.robot.as_ref()
    }

    fn sparkle_overlay(&self) -> Option<&SparkleOverlay> {
        Some(&self.overlay)
    }

    fn cursor(&self) -> Option<&CursorFollower> {
        Some(&self.cursor)
    }

    fn pointer_moved(&mut self, client: Vec2, viewport: Vec2) {
        self.cursor.pointer_moved(client, viewport);
    }
}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait HeroSceneTestHelpers {
    /// Lève immédiatement l'écran de chargement
    fn force_live(&mut self);
    /// Déclenche le minuteur de la fusée à la prochaine frame
    fn force_next_launch(&mut self);
}

#[cfg(any(test, feature = "test_helpers"))]
impl HeroSceneTestHelpers for HeroScene {
    fn force_live(&mut self) {
        if self.stage == Stage::Loading {
            self.timers.cancel_all();
            self.go_live();
        }
    }

    fn force_next_launch(&mut self) {
        self.schedule_rocket(0.0);
    }
}
