#[cfg(debug_assertions)]
use log::debug;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::physic_engine::types::Vec3;

/// Paramètres du passage de la fusée.
///
/// Construits via `RocketSettingsBuilder` ou chargés depuis la config TOML.
#[derive(Clone, Builder, Debug, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", build_fn(error = "anyhow::Error"))]
#[serde(default)]
pub struct RocketSettings {
    /// Durée d'un passage (secondes)
    #[builder(default = "8.0")]
    pub duration: f32,

    /// Point de départ (x, y), en bas à gauche
    #[builder(default = "[-15.0, -10.0]")]
    pub start: [f32; 2],

    /// Point d'arrivée (x, y), en haut à droite
    #[builder(default = "[15.0, 10.0]")]
    pub end: [f32; 2],

    /// Amplitude de l'oscillation latérale (y)
    #[builder(default = "0.5")]
    pub wobble: f32,

    /// Amplitude de l'oscillation en profondeur (z)
    #[builder(default = "0.3")]
    pub depth_wobble: f32,

    /// Gain d'échelle sur tout le vol : `scale = 1 + growth * progress`
    #[builder(default = "0.8")]
    pub scale_growth: f32,

    /// Nombre de marqueurs de traînée
    #[builder(default = "10")]
    pub trail_len: usize,

    /// Retard de progression entre deux marqueurs consécutifs
    #[builder(default = "0.05")]
    pub trail_lag: f32,

    /// Délai avant le premier passage, après l'apparition de la scène (secondes)
    #[builder(default = "2.0")]
    pub initial_delay: f32,

    /// Délai entre la fin d'un passage et le suivant (secondes)
    #[builder(default = "10.0")]
    pub cooldown: f32,
}

impl Default for RocketSettings {
    fn default() -> Self {
        RocketSettingsBuilder::default()
            .build()
            .expect("all rocket settings have defaults")
    }
}

impl RocketSettings {
    fn start_vec(&self) -> Vec3 {
        Vec3::new(self.start[0], self.start[1], 0.0)
    }

    fn delta_vec(&self) -> Vec3 {
        Vec3::new(self.end[0] - self.start[0], self.end[1] - self.start[1], 0.0)
    }

    /// Cap de la trajectoire (radians, autour de z)
    pub fn heading(&self) -> f32 {
        let d = self.delta_vec();
        d.y.atan2(d.x)
    }
}

/// Courbe d'accélération/décélération cubique, `[0, 1] → [0, 1]`
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// État brut du séquenceur
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RocketState {
    pub active: bool,
    pub start_time: Option<f32>,
    pub progress: f32,
}

/// Transformation courante du corps de la fusée
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketPose {
    pub position: Vec3,
    /// Angles d'Euler (x, y, z) en radians
    pub rotation: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrailMarker {
    pub visible: bool,
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

/// Notification de fin de passage (une seule par activation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketCompleted {
    pub at: f32,
    pub activation: u64,
}

/// Séquenceur à deux états (Idle / Flying) pour le passage de la fusée.
#[derive(Debug, Clone)]
pub struct RocketSequencer {
    settings: RocketSettings,
    state: RocketState,
    pose: RocketPose,
    trail: Vec<TrailMarker>,
    activations: u64,
}

impl RocketSequencer {
    pub fn new(settings: RocketSettings) -> Self {
        let trail = vec![TrailMarker::default(); settings.trail_len];
        let pose = RocketPose {
            position: settings.start_vec(),
            rotation: Vec3::new(0.0, 0.0, settings.heading()),
            scale: 1.0,
        };
        Self {
            settings,
            state: RocketState::default(),
            pose,
            trail,
            activations: 0,
        }
    }

    pub fn settings(&self) -> &RocketSettings {
        &self.settings
    }

    pub fn state(&self) -> RocketState {
        self.state
    }

    pub fn is_flying(&self) -> bool {
        self.state.active
    }

    pub fn progress(&self) -> f32 {
        self.state.progress
    }

    pub fn pose(&self) -> &RocketPose {
        &self.pose
    }

    pub fn trail(&self) -> &[TrailMarker] {
        &self.trail
    }

    /// Nombre d'activations depuis la création
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Idle → Flying. Sans effet (retourne `false`) si déjà en vol.
    pub fn activate(&mut self) -> bool {
        if self.state.active {
            return false;
        }
        self.state = RocketState {
            active: true,
            start_time: None,
            progress: 0.0,
        };
        self.trail.iter_mut().for_each(|m| m.visible = false);
        self.activations += 1;
        true
    }

    /// Masque la séquence : arrêt immédiat, sans notification de fin
    pub fn deactivate(&mut self) {
        self.state.active = false;
        self.state.start_time = None;
        self.trail.iter_mut().for_each(|m| m.visible = false);
    }

    /// Avance la séquence au temps de scène `t`.
    ///
    /// La première frame en vol mémorise `t` comme instant de départ.
    /// Retourne `Some` exactement une fois par activation, quand la
    /// progression atteint 1 ; le séquenceur repasse alors en Idle.
    pub fn update(&mut self, t: f32) -> Option<RocketCompleted> {
        if !self.state.active {
            return None;
        }

        let start = *self.state.start_time.get_or_insert(t);
        let elapsed = (t - start).max(0.0);
        let raw = if self.settings.duration > 0.0 {
            (elapsed / self.settings.duration).min(1.0)
        } else {
            1.0
        };
        // jamais de retour en arrière pendant un vol
        let progress = raw.max(self.state.progress);
        self.state.progress = progress;

        self.update_pose(progress, elapsed);
        self.update_trail(progress);

        if progress >= 1.0 {
            #[cfg(debug_assertions)]
            debug!(
                "Rocket flight #{} completed at t = {:.3}",
                self.activations, t
            );
            self.state.active = false;
            self.state.start_time = None;
            return Some(RocketCompleted {
                at: t,
                activation: self.activations,
            });
        }
        None
    }

    #[inline(always)]
    fn update_pose(&mut self, progress: f32, elapsed: f32) {
        let s = &self.settings;
        let eased = ease_in_out_cubic(progress);
        let start = s.start_vec();
        let delta = s.delta_vec();

        let mut position = start + delta * eased;
        position.y += (progress * PI * 3.0).sin() * s.wobble;
        position.z = (progress * PI * 2.0).sin() * s.depth_wobble;

        self.pose = RocketPose {
            position,
            rotation: Vec3::new(
                (elapsed * 3.0).sin() * 0.2,
                0.0,
                s.heading() + (elapsed * 5.0).sin() * 0.1,
            ),
            scale: 1.0 + progress * s.scale_growth,
        };
    }

    /// Les marqueurs suivent la trajectoire linéaire (non lissée) avec un
    /// retard fixe par rang, et s'estompent/rétrécissent avec le rang.
    #[inline(always)]
    fn update_trail(&mut self, progress: f32) {
        let start = self.settings.start_vec();
        let delta = self.settings.delta_vec();
        let lag = self.settings.trail_lag;
        let z = self.pose.position.z;

        for (k, marker) in self.trail.iter_mut().enumerate() {
            let fk = k as f32;
            let trail_progress = progress - fk * lag;
            if trail_progress > 0.0 {
                let mut position = start + delta * trail_progress;
                position.z = z;
                *marker = TrailMarker {
                    visible: true,
                    position,
                    scale: 0.3 * (1.0 - fk * 0.1),
                    opacity: (0.6 - fk * 0.1).max(0.0),
                };
            } else {
                marker.visible = false;
            }
        }
    }
}
