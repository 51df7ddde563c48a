use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use crate::overlay::sparkles::SparkleOverlaySettings;
use crate::physic_engine::field_kind::FieldKind;
use crate::physic_engine::palette::{parse_hex_color, HexColor};
use crate::physic_engine::rocket::{RocketSettings, RocketSettingsBuilder};
use crate::physic_engine::robot::RobotSettings;

/// Un calque de particules de la scène
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLayer {
    pub kind: FieldKind,
    pub count: usize,
    /// Rayon de la sphère englobante (champs flottants uniquement)
    #[serde(default)]
    pub radius: f32,
    pub speed: f32,
    /// Multiplicateur du nombre de particules sur petit écran
    #[serde(default = "default_multiplier")]
    pub constrained_multiplier: f32,
    /// Vitesse sur petit écran (sinon `speed`)
    #[serde(default)]
    pub constrained_speed: Option<f32>,
    /// Nombre minimal de particules après réduction
    #[serde(default)]
    pub min_count: usize,
    /// Calque coûteux, ignoré sur petit écran
    #[serde(default)]
    pub optional: bool,
}

fn default_multiplier() -> f32 {
    1.0
}

impl FieldLayer {
    pub fn new(kind: FieldKind, count: usize, radius: f32, speed: f32) -> Self {
        Self {
            kind,
            count,
            radius,
            speed,
            constrained_multiplier: 1.0,
            constrained_speed: None,
            min_count: 0,
            optional: false,
        }
    }

    fn constrained(mut self, multiplier: f32, speed: f32) -> Self {
        self.constrained_multiplier = multiplier;
        self.constrained_speed = Some(speed);
        self
    }

    fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    fn min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub enabled: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub constrained_auto_rotate_speed: f32,
    /// Bande d'angle polaire autorisée (radians, mesuré depuis +y)
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_pan: false,
            enable_zoom: false,
            enable_rotate: true,
            auto_rotate: true,
            auto_rotate_speed: 1.2,
            constrained_auto_rotate_speed: 0.25,
            min_polar_angle: FRAC_PI_3,
            max_polar_angle: FRAC_PI_2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightSettings {
    Ambient {
        intensity: f32,
        color: HexColor,
    },
    Directional {
        position: [f32; 3],
        intensity: f32,
        color: HexColor,
        #[serde(default)]
        cast_shadow: bool,
        #[serde(default)]
        shadow_map_size: u32,
    },
    Point {
        position: [f32; 3],
        intensity: f32,
        color: HexColor,
    },
    Spot {
        position: [f32; 3],
        angle: f32,
        penumbra: f32,
        intensity: f32,
        color: HexColor,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogSettings {
    pub color: HexColor,
    pub near: f32,
    pub far: f32,
}

/// Configuration complète de la scène d'accueil (chargée depuis TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Largeur (px logiques) en dessous de laquelle l'écran est "contraint"
    pub constrained_breakpoint: f32,
    /// Durée de l'écran de chargement (secondes)
    pub loading_delay: f32,
    /// Graine du générateur ; `None` : graine système
    pub seed: Option<u64>,
    pub camera: CameraSettings,
    pub orbit: OrbitSettings,
    pub fog: Option<FogSettings>,
    pub rocket: Option<RocketSettings>,
    pub robot: Option<RobotSettings>,
    pub sparkles: SparkleOverlaySettings,
    pub lights: Vec<LightSettings>,
    pub layers: Vec<FieldLayer>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            constrained_breakpoint: 768.0,
            loading_delay: 3.0,
            seed: None,
            camera: CameraSettings::default(),
            orbit: OrbitSettings::default(),
            fog: Some(FogSettings {
                color: hex("#0a0a0a"),
                near: 20.0,
                far: 60.0,
            }),
            rocket: RocketSettingsBuilder::default().duration(4.0).build().ok(),
            robot: None,
            sparkles: SparkleOverlaySettings::default(),
            lights: default_lights(),
            layers: default_layers(),
        }
    }
}

impl SceneConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Couleurs littérales des valeurs par défaut (toujours valides)
fn hex(s: &str) -> HexColor {
    HexColor(parse_hex_color(s).unwrap_or(glam::Vec3::ONE))
}

fn default_lights() -> Vec<LightSettings> {
    vec![
        LightSettings::Ambient {
            intensity: 0.8,
            color: hex("#4fc3f7"),
        },
        LightSettings::Directional {
            position: [3.0, 3.0, 3.0],
            intensity: 2.0,
            color: hex("#ffffff"),
            cast_shadow: true,
            shadow_map_size: 1024,
        },
        LightSettings::Point {
            position: [-3.0, -3.0, 3.0],
            intensity: 1.2,
            color: hex("#ff6b35"),
        },
        LightSettings::Spot {
            position: [0.0, 8.0, 3.0],
            angle: 0.6,
            penumbra: 1.0,
            intensity: 1.8,
            color: hex("#00ff88"),
        },
        LightSettings::Point {
            position: [2.0, 2.0, 2.0],
            intensity: 1.0,
            color: hex("#00ffff"),
        },
    ]
}

fn default_layers() -> Vec<FieldLayer> {
    use FieldKind::*;
    vec![
        FieldLayer::new(Floating, 196, 30.0, 0.3).constrained(0.5, 0.15),
        FieldLayer::new(Floating, 147, 25.0, 0.2).constrained(0.45, 0.12),
        FieldLayer::new(Fire, 159, 10.0, 0.6).constrained(0.5, 0.35),
        FieldLayer::new(Fire, 127, 15.0, 0.5).constrained(0.5, 0.32),
        FieldLayer::new(Fire, 95, 20.0, 0.4).optional(),
        FieldLayer::new(Fire, 64, 25.0, 0.3).optional(),
        FieldLayer::new(Sparkling, 245, 0.0, 0.3)
            .constrained(0.35, 0.25)
            .min_count(24),
        FieldLayer::new(Sparkling, 196, 0.0, 0.4).optional(),
        FieldLayer::new(Sparkling, 147, 0.0, 0.2).optional(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_config() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.layers.len(), 9);
        assert_eq!(cfg.lights.len(), 5);
        assert_eq!(cfg.constrained_breakpoint, 768.0);
        assert_eq!(cfg.rocket.as_ref().map(|r| r.duration), Some(4.0));
        assert!(cfg.robot.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: SceneConfig = toml::from_str(
            r#"
            loading_delay = 0.5

            [[layers]]
            kind = "floating"
            count = 200
            radius = 15.0
            speed = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.loading_delay, 0.5);
        assert_eq!(cfg.layers.len(), 1);
        assert_eq!(cfg.layers[0].constrained_multiplier, 1.0);
        assert!(!cfg.layers[0].optional);
        assert_eq!(cfg.camera, CameraSettings::default());
    }

    #[test]
    fn test_light_tagged_enum() {
        let cfg: SceneConfig = toml::from_str(
            r##"
            [[lights]]
            type = "point"
            position = [1.0, 2.0, 3.0]
            intensity = 1.5
            color = "#ff0000"
            "##,
        )
        .unwrap();
        match cfg.lights[0] {
            LightSettings::Point {
                intensity, color, ..
            } => {
                assert_eq!(intensity, 1.5);
                assert_eq!(color.rgb(), glam::Vec3::new(1.0, 0.0, 0.0));
            }
            other => panic!("unexpected light {:?}", other),
        }
    }

    #[test]
    fn test_invalid_hex_color_is_rejected() {
        let res: Result<SceneConfig, _> = toml::from_str(
            r##"
            [fog]
            color = "#zzzzzz"
            near = 1.0
            far = 2.0
            "##,
        );
        assert!(res.is_err());
    }
}
