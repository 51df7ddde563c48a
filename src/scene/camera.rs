use std::f32::consts::TAU;

use crate::physic_engine::types::Vec3;
use crate::scene::config::{CameraSettings, OrbitSettings};

/// Caméra perspective
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Champ de vision vertical (degrés)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl From<&CameraSettings> for Camera {
    fn from(s: &CameraSettings) -> Self {
        Self {
            position: Vec3::from_array(s.position),
            target: Vec3::ZERO,
            fov: s.fov,
            near: s.near,
            far: s.far,
        }
    }
}

/// Contrôle orbital : la caméra tourne autour de sa cible, angle polaire
/// limité à une bande ; rotation/pan/zoom activables séparément.
///
/// Conventions sphériques : polaire mesuré depuis +y, azimut autour de y
/// depuis +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub settings: OrbitSettings,
    /// Vitesse effective (dépend de la classe d'affichage)
    pub auto_rotate_speed: f32,
    radius: f32,
    polar: f32,
    azimuth: f32,
}

impl OrbitControls {
    pub fn new(settings: OrbitSettings, auto_rotate_speed: f32, camera: &Camera) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        let (polar, azimuth) = if radius > 0.0 {
            ((offset.y / radius).clamp(-1.0, 1.0).acos(), offset.x.atan2(offset.z))
        } else {
            (settings.max_polar_angle, 0.0)
        };

        let mut controls = Self {
            settings,
            auto_rotate_speed,
            radius,
            polar,
            azimuth,
        };
        controls.clamp_polar();
        controls
    }

    pub fn polar_angle(&self) -> f32 {
        self.polar
    }

    pub fn azimuth_angle(&self) -> f32 {
        self.azimuth
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Avance la rotation automatique de `2π/60 · speed` radians par seconde
    /// puis replace la caméra sur son orbite.
    pub fn update(&mut self, dt: f32, camera: &mut Camera) {
        if self.settings.enable_rotate && self.settings.auto_rotate {
            self.azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
            self.azimuth = self.azimuth.rem_euclid(TAU);
        }
        self.clamp_polar();
        self.apply(camera);
    }

    /// Rotation manuelle (glisser) ; ignorée si la rotation est désactivée
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32, camera: &mut Camera) {
        if !self.settings.enable_rotate {
            return;
        }
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(TAU);
        self.polar += delta_polar;
        self.clamp_polar();
        self.apply(camera);
    }

    /// Zoom multiplicatif sur la distance ; ignoré si désactivé
    pub fn zoom(&mut self, factor: f32, camera: &mut Camera) {
        if !self.settings.enable_zoom || factor <= 0.0 {
            return;
        }
        self.radius *= factor;
        self.apply(camera);
    }

    /// Translation de la cible ; ignorée si désactivée
    pub fn pan(&mut self, offset: Vec3, camera: &mut Camera) {
        if !self.settings.enable_pan {
            return;
        }
        camera.target += offset;
        self.apply(camera);
    }

    fn clamp_polar(&mut self) {
        let (min, max) = (self.settings.min_polar_angle, self.settings.max_polar_angle);
        self.polar = self.polar.clamp(min.min(max), max.max(min));
    }

    fn apply(&self, camera: &mut Camera) {
        let sin_polar = self.polar.sin();
        camera.position = camera.target
            + Vec3::new(
                self.radius * sin_polar * self.azimuth.sin(),
                self.radius * self.polar.cos(),
                self.radius * sin_polar * self.azimuth.cos(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    fn default_camera() -> Camera {
        Camera::from(&CameraSettings::default())
    }

    #[test]
    fn test_initial_spherical_coordinates() {
        let camera = default_camera();
        let controls = OrbitControls::new(OrbitSettings::default(), 1.2, &camera);
        assert!((controls.distance() - 10.0).abs() < 1e-5);
        assert!((controls.polar_angle() - FRAC_PI_2).abs() < 1e-5);
        assert!(controls.azimuth_angle().abs() < 1e-5);
    }

    #[test]
    fn test_auto_rotate_keeps_distance_and_advances() {
        let mut camera = default_camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), 1.2, &camera);
        let before = camera.position;
        for _ in 0..60 {
            controls.update(1.0 / 60.0, &mut camera);
        }
        assert!((camera.position.length() - 10.0).abs() < 1e-3);
        assert!(camera.position.distance(before) > 0.1);
        // 1 s à 1.2 → 2π/60·1.2 rad
        let expected = (-(TAU / 60.0) * 1.2).rem_euclid(TAU);
        assert!((controls.azimuth_angle() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_polar_is_clamped_to_band() {
        let mut camera = default_camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), 0.0, &camera);
        controls.rotate(0.0, -3.0, &mut camera);
        assert!((controls.polar_angle() - FRAC_PI_3).abs() < 1e-6);
        controls.rotate(0.0, 3.0, &mut camera);
        assert!((controls.polar_angle() - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_zoom_and_pan_are_ignored() {
        let mut camera = default_camera();
        let mut controls = OrbitControls::new(OrbitSettings::default(), 0.0, &camera);
        let before = camera;
        controls.zoom(0.5, &mut camera);
        controls.pan(Vec3::X, &mut camera);
        assert_eq!(camera, before);
    }
}
