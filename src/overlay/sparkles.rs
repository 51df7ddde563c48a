//! Paillettes plein écran (calque 2D au-dessus de la page).
//!
//! Chaque paillette a une position en pourcentage de l'écran, une couleur
//! tirée uniformément dans la palette, et une pulsation cyclique qui ne
//! démarre qu'après son délai.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::physic_engine::palette::{parse_hex_color, HexColor, Palette};
use crate::physic_engine::types::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleOverlaySettings {
    pub enabled: bool,
    pub count: usize,
    /// Délai de départ tiré dans `[0, max_delay)` secondes
    pub max_delay: f32,
    /// Durée d'un cycle tirée dans `[min_duration, min_duration + duration_spread)`
    pub min_duration: f32,
    pub duration_spread: f32,
    pub colors: Vec<HexColor>,
}

impl Default for SparkleOverlaySettings {
    fn default() -> Self {
        let colors = ["#FFD700", "#FFA500", "#FF6B35", "#FF4500", "#DC143C", "#B22222"]
            .iter()
            .filter_map(|c| parse_hex_color(c).ok().map(HexColor))
            .collect();
        Self {
            enabled: true,
            count: 245,
            max_delay: 3.0,
            min_duration: 2.0,
            duration_spread: 2.0,
            colors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    /// Position horizontale, en % de la largeur
    pub left: f32,
    /// Position verticale, en % de la hauteur
    pub top: f32,
    pub color: Color,
    pub delay: f32,
    pub duration: f32,
}

impl Sparkle {
    /// Phase dans [0, 1) du cycle en cours, `None` avant le délai
    pub fn phase(&self, t: f32) -> Option<f32> {
        if t < self.delay || self.duration <= 0.0 {
            return None;
        }
        Some(((t - self.delay) / self.duration).fract())
    }

    /// Intensité dans [0, 1] : 0 → 1 → 0 sur chaque cycle
    pub fn intensity(&self, t: f32) -> f32 {
        self.phase(t).map(|p| (PI * p).sin()).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SparkleOverlay {
    sparkles: Vec<Sparkle>,
}

impl SparkleOverlay {
    pub fn generate(settings: &SparkleOverlaySettings, rng: &mut impl Rng) -> Self {
        if !settings.enabled {
            return Self::default();
        }
        let palette = Palette::uniform(settings.colors.iter().map(HexColor::rgb));
        let sparkles = (0..settings.count)
            .map(|_| Sparkle {
                left: rng.random::<f32>() * 100.0,
                top: rng.random::<f32>() * 100.0,
                color: palette.sample(rng),
                delay: rng.random::<f32>() * settings.max_delay,
                duration: settings.min_duration + rng.random::<f32>() * settings.duration_spread,
            })
            .collect();
        Self { sparkles }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Nombre de paillettes dont l'intensité dépasse `threshold` à l'instant `t`
    pub fn lit_count(&self, t: f32, threshold: f32) -> usize {
        self.sparkles
            .iter()
            .filter(|s| s.intensity(t) > threshold)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generated_sparkles_respect_ranges() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let settings = SparkleOverlaySettings::default();
        let overlay = SparkleOverlay::generate(&settings, &mut rng);
        assert_eq!(overlay.len(), 245);
        let palette: Vec<Color> = settings.colors.iter().map(|c| c.rgb()).collect();
        for s in overlay.sparkles() {
            assert!((0.0..100.0).contains(&s.left));
            assert!((0.0..100.0).contains(&s.top));
            assert!((0.0..3.0).contains(&s.delay));
            assert!((2.0..4.0).contains(&s.duration));
            assert!(palette.contains(&s.color));
        }
    }

    #[test]
    fn test_intensity_is_dark_before_delay_and_pulses_after() {
        let s = Sparkle {
            left: 0.0,
            top: 0.0,
            color: Color::ONE,
            delay: 1.0,
            duration: 2.0,
        };
        assert_eq!(s.intensity(0.5), 0.0);
        assert!((s.intensity(2.0) - 1.0).abs() < 1e-6);
        assert!(s.intensity(2.9) < s.intensity(2.0));
        assert!((s.intensity(4.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_disabled_overlay_is_empty() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let settings = SparkleOverlaySettings {
            enabled: false,
            ..SparkleOverlaySettings::default()
        };
        assert!(SparkleOverlay::generate(&settings, &mut rng).is_empty());
    }
}
