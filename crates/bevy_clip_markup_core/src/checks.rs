use bevy::{
    log::debug,
    math::Vec3,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use serde::{Deserialize, Serialize};

use crate::trajectory::{BoneTrajectory, TrajectorySource};

/// Which clip validations run, and the anchor bone they run against
#[derive(Debug, Reflect, Clone, Serialize, Deserialize)]
#[reflect(Default)]
pub struct ClipCheckConfig {
    /// Bone expected to sit at the component-space origin on the boundary
    /// frames
    pub anchor_bone: String,
    pub check_anchor_origin: bool,
    pub check_single_frame: bool,
    /// Per-component tolerance of the origin test
    pub eps: f32,
}

impl Default for ClipCheckConfig {
    fn default() -> Self {
        Self {
            anchor_bone: "Camera_Root".to_string(),
            check_anchor_origin: true,
            check_single_frame: true,
            eps: 1e-10,
        }
    }
}

/// Boundary frame named by a [`ClipFinding`]
#[derive(Debug, Reflect, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipEnd {
    Start,
    End,
}

/// A failed clip validation
#[derive(Debug, Reflect, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClipFinding {
    /// The anchor bone is away from the origin on a boundary frame
    AnchorOffOrigin { end: ClipEnd, position: Vec3 },
    /// The clip stores a single frame
    SingleFrame,
}

fn near_origin(position: Vec3, eps: f32) -> bool {
    position.x.abs() <= eps && position.y.abs() <= eps && position.z.abs() <= eps
}

/// Checks that a trajectory starts and ends at the component-space origin.
///
/// The start frame is tested first; a failing start shadows the end test.
pub fn check_anchor_at_origin(trajectory: &BoneTrajectory, eps: f32) -> Option<ClipFinding> {
    let first = *trajectory.positions().first()?;
    let last = *trajectory.positions().last()?;
    if !near_origin(first, eps) {
        Some(ClipFinding::AnchorOffOrigin {
            end: ClipEnd::Start,
            position: first,
        })
    } else if !near_origin(last, eps) {
        Some(ClipFinding::AnchorOffOrigin {
            end: ClipEnd::End,
            position: last,
        })
    } else {
        None
    }
}

/// Flags clips that store a single frame
pub fn check_single_frame(source: &impl TrajectorySource) -> Option<ClipFinding> {
    (source.frame_count() == 1).then_some(ClipFinding::SingleFrame)
}

/// Runs the enabled validations against a clip.
///
/// A clip without the anchor bone skips the origin test.
pub fn run_clip_checks(
    source: &impl TrajectorySource,
    config: &ClipCheckConfig,
) -> Vec<ClipFinding> {
    let mut findings = Vec::new();
    if config.check_anchor_origin {
        match source.resolve_trajectory(&config.anchor_bone, true) {
            Ok(trajectory) => findings.extend(check_anchor_at_origin(&trajectory, config.eps)),
            Err(err) => debug!("Skipping anchor origin check: {err}"),
        }
    }
    if config.check_single_frame {
        findings.extend(check_single_frame(source));
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{TrajectoryError, TrajectoryResult};
    use bevy::math::Quat;

    struct SingleBoneSource {
        bone: &'static str,
        trajectory: BoneTrajectory,
    }

    impl TrajectorySource for SingleBoneSource {
        fn frame_count(&self) -> usize {
            self.trajectory.frame_count()
        }

        fn resolve_trajectory(
            &self,
            bone_name: &str,
            _component_space: bool,
        ) -> TrajectoryResult<BoneTrajectory> {
            if bone_name == self.bone {
                Ok(self.trajectory.clone())
            } else {
                Err(TrajectoryError::BoneNotFound(bone_name.to_string()))
            }
        }
    }

    fn trajectory_from_positions(positions: Vec<Vec3>) -> BoneTrajectory {
        let frames = positions.len();
        let times = (0..frames).map(|i| i as f32 * 0.1).collect();
        BoneTrajectory::new(positions, vec![Quat::IDENTITY; frames], times)
    }

    #[test]
    fn anchored_clip_passes() {
        let trajectory =
            trajectory_from_positions(vec![Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO]);
        assert_eq!(check_anchor_at_origin(&trajectory, 1e-10), None);
    }

    #[test]
    fn off_origin_start_shadows_end() {
        let trajectory = trajectory_from_positions(vec![
            Vec3::new(0.2, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.3, 0.0),
        ]);
        assert_eq!(
            check_anchor_at_origin(&trajectory, 1e-10),
            Some(ClipFinding::AnchorOffOrigin {
                end: ClipEnd::Start,
                position: Vec3::new(0.2, 0.0, 0.0),
            })
        );
    }

    #[test]
    fn off_origin_end_is_reported() {
        let trajectory =
            trajectory_from_positions(vec![Vec3::ZERO, Vec3::ZERO, Vec3::new(0.0, 0.0, -0.5)]);
        assert_eq!(
            check_anchor_at_origin(&trajectory, 1e-10),
            Some(ClipFinding::AnchorOffOrigin {
                end: ClipEnd::End,
                position: Vec3::new(0.0, 0.0, -0.5),
            })
        );
    }

    #[test]
    fn exact_zero_is_within_tolerance() {
        let trajectory = trajectory_from_positions(vec![Vec3::ZERO, Vec3::ZERO]);
        assert_eq!(check_anchor_at_origin(&trajectory, 1e-10), None);
    }

    #[test]
    fn single_frame_clip_is_flagged() {
        let source = SingleBoneSource {
            bone: "Camera_Root",
            trajectory: trajectory_from_positions(vec![Vec3::ZERO]),
        };

        let findings = run_clip_checks(&source, &ClipCheckConfig::default());
        assert_eq!(findings, vec![ClipFinding::SingleFrame]);
    }

    #[test]
    fn missing_anchor_bone_skips_origin_check() {
        let source = SingleBoneSource {
            bone: "Hips",
            trajectory: trajectory_from_positions(vec![Vec3::ONE, Vec3::ONE]),
        };

        let findings = run_clip_checks(&source, &ClipCheckConfig::default());
        assert_eq!(findings, vec![]);
    }

    #[test]
    fn disabled_checks_produce_no_findings() {
        let source = SingleBoneSource {
            bone: "Camera_Root",
            trajectory: trajectory_from_positions(vec![Vec3::ONE]),
        };
        let config = ClipCheckConfig {
            check_anchor_origin: false,
            check_single_frame: false,
            ..Default::default()
        };

        assert_eq!(run_clip_checks(&source, &config), vec![]);
    }
}
