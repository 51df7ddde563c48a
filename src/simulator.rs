use anyhow::{bail, Result};
use log::{debug, info};

use crate::physic_engine::types::{SceneEvent, UpdateResult};
use crate::renderer_engine::{FrameStats, RendererEngine};
use crate::scene::config::SceneConfig;
use crate::scene::SceneEngine;
use crate::{log_metrics_and_fps, profiler::Profiler};

/// Bilan d'une exécution
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationReport {
    pub frames: u64,
    pub loading_dismissed_at: Option<f64>,
    pub rocket_launches: usize,
    pub rocket_completions: usize,
    pub bytes_uploaded: usize,
}

impl SimulationReport {
    fn record(&mut self, clock: f64, events: &[SceneEvent]) {
        for event in events {
            match event {
                SceneEvent::LoadingDismissed => self.loading_dismissed_at = Some(clock),
                SceneEvent::RocketLaunched { .. } => self.rocket_launches += 1,
                SceneEvent::RocketCompleted { .. } => self.rocket_completions += 1,
            }
        }
    }
}

/// Boucle de frames : une mise à jour de la scène puis un rendu, dans cet ordre.
pub struct Simulator<R, S>
where
    R: RendererEngine,
    S: SceneEngine,
{
    renderer_engine: R,
    scene_engine: S,

    clock: f64,
    report: SimulationReport,
    profiler: Profiler,
    /// Intervalle entre deux logs de métriques (secondes simulées)
    log_every: f64,
    last_log: f64,
}

impl<R, S> Simulator<R, S>
where
    R: RendererEngine,
    S: SceneEngine,
{
    pub fn new(renderer_engine: R, scene_engine: S) -> Self {
        Self {
            renderer_engine,
            scene_engine,
            clock: 0.0,
            report: SimulationReport::default(),
            profiler: Profiler::new(200),
            log_every: 5.0,
            last_log: 0.0,
        }
    }

    /// Avance d'une frame de `dt` secondes.
    pub fn step(&mut self, dt: f32) -> FrameStats {
        let _frame_guard = self.profiler.frame();
        self.clock += f64::from(dt);

        let scene = &mut self.scene_engine;
        let clock = self.clock;
        let report = &mut self.report;
        self.profiler.profile_block("scene update", || {
            let update_result = scene.update(dt);
            Self::log_scene_events(clock, &update_result);
            report.record(clock, update_result.events);
        });

        let renderer = &mut self.renderer_engine;
        let scene = &mut self.scene_engine;
        let stats = self
            .profiler
            .profile_block("render frame", || renderer.render_frame(scene));

        self.profiler
            .record_metric("particles drawn", stats.particles_drawn);
        self.profiler
            .record_metric("attribute uploads", stats.attribute_uploads);
        self.report.frames += 1;
        self.report.bytes_uploaded += stats.bytes_uploaded;

        if self.clock - self.last_log >= self.log_every {
            self.last_log = self.clock;
            log_metrics_and_fps!(&self.profiler);
            self.log_field_extents();
        }

        stats
    }

    /// Exécute `frames` frames à pas fixe.
    pub fn run(&mut self, frames: u64, dt: f32) -> Result<SimulationReport> {
        if !dt.is_finite() || dt <= 0.0 {
            bail!("Invalid frame step: {dt}");
        }
        info!("▶️ Running {} frames at {:.1} Hz", frames, 1.0 / dt);
        for _ in 0..frames {
            self.step(dt);
        }
        Ok(self.report)
    }

    fn log_scene_events(clock: f64, update_result: &UpdateResult) {
        for event in update_result.events {
            match event {
                SceneEvent::LoadingDismissed => info!("[{clock:6.2}s] scene visible"),
                SceneEvent::RocketLaunched { at } => {
                    info!("[{clock:6.2}s] 🚀 rocket launched (scene t={at:.2})")
                }
                SceneEvent::RocketCompleted { at } => {
                    info!("[{clock:6.2}s] rocket flight completed (scene t={at:.2})")
                }
            }
        }
    }

    fn log_field_extents(&self) {
        for (i, field) in self.scene_engine.fields().iter().enumerate() {
            if let Some((low, high)) = field.vertical_extent() {
                debug!(
                    "layer {i} ({:?}, {} particles): y in [{low:.2}, {high:.2}], {} recycled",
                    field.kind(),
                    field.len(),
                    field.recycled_last_frame()
                );
            }
        }
    }

    pub fn reload_config(&mut self, config: &SceneConfig) {
        let changed = self.scene_engine.reload_config(config);
        info!("Scene config reloaded (layout changed: {changed})");
    }

    pub fn close(&mut self) {
        debug!("Closing simulator after {} frames", self.report.frames);
        self.scene_engine.close();
        self.renderer_engine.close();
    }

    pub fn report(&self) -> &SimulationReport {
        &self.report
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    pub fn renderer_engine(&self) -> &R {
        &self.renderer_engine
    }

    pub fn scene_engine(&self) -> &S {
        &self.scene_engine
    }

    pub fn scene_engine_mut(&mut self) -> &mut S {
        &mut self.scene_engine
    }
}
