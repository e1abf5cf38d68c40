use bevy::{
    math::EulerRot,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{curve::FloatCurve, trajectory::BoneTrajectory};

bitflags! {
    /// Selects which per-axis channels [`extract_bone_curves`] fills in
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CurveChannels: u8 {
        const POS_X = 0x80;
        const POS_Y = 0x40;
        const POS_Z = 0x20;
        const ROT_X = 0x08;
        const ROT_Y = 0x04;
        const ROT_Z = 0x02;

        const POSITION = Self::POS_X.bits() | Self::POS_Y.bits() | Self::POS_Z.bits();
        const ROTATION = Self::ROT_X.bits() | Self::ROT_Y.bits() | Self::ROT_Z.bits();
        const ALL = Self::POSITION.bits() | Self::ROTATION.bits();
    }
}

/// Which bone gets exported and which channel groups to include
#[derive(Debug, Reflect, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[reflect(Default)]
pub struct BoneCurveConfig {
    pub bone: String,
    pub position: bool,
    pub rotation: bool,
}

impl Default for BoneCurveConfig {
    fn default() -> Self {
        Self {
            bone: "LeftHand".to_string(),
            position: true,
            rotation: true,
        }
    }
}

impl BoneCurveConfig {
    pub fn channels(&self) -> CurveChannels {
        let mut channels = CurveChannels::empty();
        if self.position {
            channels |= CurveChannels::POSITION;
        }
        if self.rotation {
            channels |= CurveChannels::ROTATION;
        }
        channels
    }
}

/// Per-axis float curves extracted from a bone track.
///
/// Translation values are raw component-space units; rotation values are
/// euler angles in degrees, XYZ order.
#[derive(Debug, Reflect, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneCurveSet {
    pub translation: [FloatCurve; 3],
    pub rotation: [FloatCurve; 3],
}

impl BoneCurveSet {
    /// Export names for the translation and rotation curve groups
    pub fn curve_names(clip_name: &str, bone_name: &str) -> (String, String) {
        (
            format!("{clip_name}_{bone_name}_Translation"),
            format!("{clip_name}_{bone_name}_Rotation"),
        )
    }
}

/// Extracts raw per-axis channels from a trajectory.
///
/// Every stored frame is keyed, the duplicated loop frame included. Channels
/// outside the mask come back empty.
pub fn extract_bone_curves(trajectory: &BoneTrajectory, channels: CurveChannels) -> BoneCurveSet {
    const POS_FLAGS: [CurveChannels; 3] = [
        CurveChannels::POS_X,
        CurveChannels::POS_Y,
        CurveChannels::POS_Z,
    ];
    const ROT_FLAGS: [CurveChannels; 3] = [
        CurveChannels::ROT_X,
        CurveChannels::ROT_Y,
        CurveChannels::ROT_Z,
    ];

    let mut curves = BoneCurveSet::default();
    for frame in 0..trajectory.frame_count() {
        let time = trajectory.time_at(frame);
        let translation = trajectory.positions()[frame].to_array();
        let (rot_x, rot_y, rot_z) = trajectory.rotations()[frame].to_euler(EulerRot::XYZ);
        let euler = [
            rot_x.to_degrees(),
            rot_y.to_degrees(),
            rot_z.to_degrees(),
        ];

        for axis in 0..3 {
            if channels.contains(POS_FLAGS[axis]) {
                curves.translation[axis].add_key(time, translation[axis]);
            }
            if channels.contains(ROT_FLAGS[axis]) {
                curves.rotation[axis].add_key(time, euler[axis]);
            }
        }
    }
    curves
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::{Quat, Vec3};
    use std::f32::consts::FRAC_PI_4;

    fn test_trajectory() -> BoneTrajectory {
        BoneTrajectory::new(
            vec![
                Vec3::new(1.0, 2.0, 3.0),
                Vec3::new(4.0, 5.0, 6.0),
                Vec3::new(1.0, 2.0, 3.0),
            ],
            vec![
                Quat::IDENTITY,
                Quat::from_rotation_y(FRAC_PI_4),
                Quat::IDENTITY,
            ],
            vec![0.0, 0.1, 0.2],
        )
    }

    #[test]
    fn config_booleans_map_to_channel_groups() {
        let config = BoneCurveConfig::default();
        assert_eq!(config.channels(), CurveChannels::ALL);

        let position_only = BoneCurveConfig {
            rotation: false,
            ..Default::default()
        };
        assert_eq!(position_only.channels(), CurveChannels::POSITION);

        let nothing = BoneCurveConfig {
            position: false,
            rotation: false,
            ..Default::default()
        };
        assert!(nothing.channels().is_empty());
    }

    #[test]
    fn all_frames_are_keyed_including_the_loop_frame() {
        let curves = extract_bone_curves(&test_trajectory(), CurveChannels::ALL);

        for axis in 0..3 {
            assert_eq!(curves.translation[axis].len(), 3);
            assert_eq!(curves.rotation[axis].len(), 3);
        }
        assert_eq!(curves.translation[0].sample(0.1), 4.0);
        assert_eq!(curves.translation[2].sample(0.0), 3.0);
    }

    #[test]
    fn masked_out_channels_stay_empty() {
        let curves = extract_bone_curves(
            &test_trajectory(),
            CurveChannels::POS_X | CurveChannels::ROT_Y,
        );

        assert_eq!(curves.translation[0].len(), 3);
        assert!(curves.translation[1].is_empty());
        assert!(curves.translation[2].is_empty());
        assert!(curves.rotation[0].is_empty());
        assert_eq!(curves.rotation[1].len(), 3);
        assert!(curves.rotation[2].is_empty());
    }

    #[test]
    fn rotation_channels_are_euler_degrees() {
        let curves = extract_bone_curves(&test_trajectory(), CurveChannels::ROTATION);
        assert!((curves.rotation[1].sample(0.1) - 45.0).abs() < 1e-3);
        assert!(curves.rotation[1].sample(0.0).abs() < 1e-3);
    }

    #[test]
    fn curve_names_follow_the_export_convention() {
        let (translation, rotation) = BoneCurveSet::curve_names("Rifle_1P_Walk_F", "LeftHand");
        assert_eq!(translation, "Rifle_1P_Walk_F_LeftHand_Translation");
        assert_eq!(rotation, "Rifle_1P_Walk_F_LeftHand_Rotation");
    }
}
