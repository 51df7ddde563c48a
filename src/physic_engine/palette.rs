//! Palettes de couleurs des champs de particules.
//!
//! - `Weighted` : choix pondéré parmi quelques teintes (thème "IA", or...)
//! - `Heat` : dégradé rouge → jaune paramétré par une "chaleur" aléatoire

use anyhow::{anyhow, Context};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::physic_engine::types::Color;

/// Une teinte et son poids relatif dans une palette pondérée
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub color: Color,
    pub weight: f32,
}

impl Swatch {
    pub const fn new(r: f32, g: f32, b: f32, weight: f32) -> Self {
        Self {
            color: Color::new(r, g, b),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    /// Choix par seau pondéré, les poids n'ont pas besoin de sommer à 1
    Weighted(Vec<Swatch>),
    /// Rouge constant, vert et bleu proportionnels à la chaleur tirée dans [0, 1)
    Heat { green: f32, blue: f32 },
}

impl Palette {
    /// Cyan 40%, orange 30%, vert 30%
    pub fn ai_theme() -> Self {
        Palette::Weighted(vec![
            Swatch::new(0.0, 1.0, 1.0, 0.4),
            Swatch::new(1.0, 0.4, 0.0, 0.3),
            Swatch::new(0.0, 1.0, 0.3, 0.3),
        ])
    }

    /// Or pur, or orangé, jaune vif, étincelle blanche
    pub fn gold() -> Self {
        Palette::Weighted(vec![
            Swatch::new(1.0, 0.84, 0.0, 0.3),
            Swatch::new(1.0, 0.6, 0.0, 0.3),
            Swatch::new(1.0, 1.0, 0.2, 0.2),
            Swatch::new(1.0, 1.0, 1.0, 0.2),
        ])
    }

    pub fn heat() -> Self {
        Palette::Heat {
            green: 0.8,
            blue: 0.2,
        }
    }

    /// Palette uniforme : chaque teinte a le même poids.
    pub fn uniform(colors: impl IntoIterator<Item = Color>) -> Self {
        Palette::Weighted(
            colors
                .into_iter()
                .map(|color| Swatch { color, weight: 1.0 })
                .collect(),
        )
    }

    pub fn total_weight(&self) -> f32 {
        match self {
            Palette::Weighted(swatches) => swatches.iter().map(|s| s.weight).sum(),
            Palette::Heat { .. } => 1.0,
        }
    }

    /// Tire une couleur. Toutes les composantes sont dans [0, 1].
    pub fn sample(&self, rng: &mut impl Rng) -> Color {
        match self {
            Palette::Weighted(swatches) => {
                let total = self.total_weight();
                if swatches.is_empty() || total <= 0.0 {
                    return Color::ONE;
                }
                let target = rng.random_range(0.0..total);
                let mut current = 0.0;
                for swatch in swatches {
                    current += swatch.weight;
                    if target < current {
                        return swatch.color;
                    }
                }
                // arrondi flottant : on retombe sur la dernière teinte
                swatches[swatches.len() - 1].color
            }
            Palette::Heat { green, blue } => {
                let heat: f32 = rng.random();
                Color::new(1.0, heat * green, heat * blue).clamp(Color::ZERO, Color::ONE)
            }
        }
    }
}

/// Parse une couleur `#RRGGBB` (ou `RRGGBB`) en composantes normalisées.
pub fn parse_hex_color(hex: &str) -> anyhow::Result<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(anyhow!("invalid hex color '{}': expected #RRGGBB", hex));
    }
    let channel = |range: std::ops::Range<usize>| -> anyhow::Result<f32> {
        let v = u8::from_str_radix(&digits[range], 16)
            .with_context(|| format!("invalid hex color '{}'", hex))?;
        Ok(v as f32 / 255.0)
    };
    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Couleur sérialisée en `#rrggbb` dans les fichiers de configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Color);

impl HexColor {
    pub fn rgb(&self) -> Color {
        self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex_color(&value).map(HexColor)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            to_u8(self.0.x),
            to_u8(self.0.y),
            to_u8(self.0.z)
        )
    }
}
