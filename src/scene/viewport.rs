/// Classe d'affichage, décidée une seule fois au montage de la scène
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayClass {
    /// Petit écran : moins de particules, rotation plus lente, calques optionnels ignorés
    Constrained,
    Standard,
}

impl DisplayClass {
    /// Largeur ≤ `breakpoint` (px logiques) : écran contraint
    pub fn classify(viewport_width: f32, breakpoint: f32) -> Self {
        if viewport_width <= breakpoint {
            DisplayClass::Constrained
        } else {
            DisplayClass::Standard
        }
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, DisplayClass::Constrained)
    }
}
