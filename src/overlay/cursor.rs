use glam::Vec2;

/// Pointeur écran → coordonnées normalisées (`[-1, 1]`, y vers le haut)
pub fn pointer_to_ndc(client: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        client.x / viewport.x * 2.0 - 1.0,
        -(client.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Halo qui suit le pointeur, centré sur lui
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFollower {
    size: f32,
    /// Coin haut-gauche du halo (px)
    position: Vec2,
    pointer_ndc: Vec2,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl CursorFollower {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            position: Vec2::ZERO,
            pointer_ndc: Vec2::ZERO,
        }
    }

    pub fn pointer_moved(&mut self, client: Vec2, viewport: Vec2) {
        self.position = client - Vec2::splat(self.size / 2.0);
        self.pointer_ndc = pointer_to_ndc(client, viewport);
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer_ndc
    }
}
