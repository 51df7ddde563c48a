use serde::{Deserialize, Serialize};

use crate::physic_engine::types::Vec3;

/// Calque optionnel : robot animé au repos (flottement, tête, bras, jambes, yeux).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    pub position: [f32; 3],
    pub scale: f32,
    pub animation_speed: f32,
}

impl Default for RobotSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            scale: 1.0,
            animation_speed: 1.0,
        }
    }
}

/// Pose articulaire du robot à un instant donné (angles en radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RobotPose {
    pub body_position: Vec3,
    pub body_yaw: f32,
    pub head_pitch: f32,
    pub head_yaw: f32,
    pub left_arm_roll: f32,
    pub right_arm_roll: f32,
    pub left_leg_pitch: f32,
    pub right_leg_pitch: f32,
    /// Intensité émissive des yeux, dans [0.3, 0.6]
    pub eye_glow: f32,
}

#[derive(Debug, Clone)]
pub struct RobotRig {
    settings: RobotSettings,
    pose: RobotPose,
}

impl RobotRig {
    pub fn new(settings: RobotSettings) -> Self {
        let mut rig = Self {
            settings,
            pose: RobotPose::default(),
        };
        rig.update(0.0);
        rig
    }

    pub fn settings(&self) -> &RobotSettings {
        &self.settings
    }

    pub fn pose(&self) -> &RobotPose {
        &self.pose
    }

    pub fn update(&mut self, t: f32) {
        let t = t * self.settings.animation_speed;
        let [x, y, z] = self.settings.position;
        let arms = (t * 0.7).sin() * 0.3;
        let legs = (t * 0.4).sin() * 0.1;
        let blink = (t * 2.0).sin() * 0.5 + 0.5;

        self.pose = RobotPose {
            body_position: Vec3::new(x, y + (t * 0.5).sin() * 0.1, z),
            body_yaw: (t * 0.3).sin() * 0.1,
            head_pitch: (t * 0.8).sin() * 0.1,
            head_yaw: (t * 0.6).sin() * 0.15,
            left_arm_roll: arms,
            right_arm_roll: -arms,
            left_leg_pitch: legs,
            right_leg_pitch: -legs,
            eye_glow: 0.3 + blink * 0.3,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limbs_are_mirrored() {
        let mut rig = RobotRig::new(RobotSettings::default());
        for step in 0..100 {
            rig.update(step as f32 * 0.1);
            let pose = rig.pose();
            assert_eq!(pose.left_arm_roll, -pose.right_arm_roll);
            assert_eq!(pose.left_leg_pitch, -pose.right_leg_pitch);
            assert!(pose.eye_glow >= 0.3 - 1e-6 && pose.eye_glow <= 0.6 + 1e-6);
            assert!((pose.body_position.y - 0.0).abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn test_rest_pose_at_zero() {
        let rig = RobotRig::new(RobotSettings {
            position: [1.0, 2.0, 3.0],
            ..RobotSettings::default()
        });
        assert_eq!(rig.pose().body_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rig.pose().body_yaw, 0.0);
        assert!((rig.pose().eye_glow - 0.45).abs() < 1e-6);
    }
}
