//! Local-minimum detection on a bone trajectory.

use bevy::{
    log::debug,
    math::{EulerRot, Vec3},
};

use crate::trajectory::BoneTrajectory;

use super::{DebugCurves, Foot, FootstepMarker};

/// Maps a source-space position into the analysis frame.
///
/// Source clips store bone keys with height along -Y; analysis wants a Z-up
/// frame. Y and Z swap, and the new Z flips sign.
pub fn to_analysis_space(position: Vec3) -> Vec3 {
    Vec3::new(position.x, position.z, -position.y)
}

fn analysis_positions(trajectory: &BoneTrajectory) -> Vec<Vec3> {
    trajectory
        .positions()
        .iter()
        .map(|position| to_analysis_space(*position))
        .collect()
}

/// Finds the circular local minima of the trajectory's analysis-space
/// height.
///
/// The last stored frame duplicates the first on looping clips and is
/// dropped before the scan; neighbors wrap around the remaining frames. A
/// dip only counts when it clears both neighbors by `eps`. The marker's
/// foot comes from the lateral motion into the dip: a decreasing X plants
/// the right foot.
pub fn detect_markers(trajectory: &BoneTrajectory, eps: f32) -> Vec<FootstepMarker> {
    let mut positions = analysis_positions(trajectory);
    positions.pop();

    let n = positions.len();
    let mut markers = Vec::new();
    for i in 0..n {
        let prev = positions[(i + n - 1) % n];
        let curr = positions[i];
        let next = positions[(i + 1) % n];
        if curr.z + eps <= prev.z && curr.z + eps <= next.z {
            markers.push(FootstepMarker {
                height: curr.z,
                foot: if prev.x > curr.x { Foot::Right } else { Foot::Left },
                frame: i,
            });
        }
    }
    markers
}

/// Captures the probe curves inspected when hand-checking a clip: lateral
/// position, height and Y rotation over every stored frame.
pub fn build_debug_curves(trajectory: &BoneTrajectory) -> DebugCurves {
    let positions = analysis_positions(trajectory);

    let mut curves = DebugCurves::default();
    let mut pos_avg = Vec3::ZERO;
    let mut rot_y_avg = 0.0;
    for (frame, position) in positions.iter().enumerate() {
        let time = trajectory.time_at(frame);
        curves.pos_x.add_key(time, position.x);
        curves.pos_z.add_key(time, position.z);

        let (_, rot_y, _) = trajectory.rotations()[frame].to_euler(EulerRot::XYZ);
        curves.rot_y.add_key(time, rot_y.to_degrees());

        pos_avg += *position;
        rot_y_avg += rot_y.to_degrees();
    }

    if !positions.is_empty() {
        pos_avg /= positions.len() as f32;
        rot_y_avg /= positions.len() as f32;
    }
    debug!(
        "Probed {} frames, lateral average {}, rotation average {}",
        positions.len(),
        pos_avg.x,
        rot_y_avg
    );

    curves
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;

    fn trajectory_from_heights(heights: &[f32]) -> BoneTrajectory {
        trajectory_from_analysis(
            &(0..heights.len()).map(|i| i as f32).collect::<Vec<_>>(),
            heights,
        )
    }

    /// Stored frames from trimmed analysis samples, loop frame re-appended
    fn trajectory_from_analysis(xs: &[f32], heights: &[f32]) -> BoneTrajectory {
        let frames = xs.len() + 1;
        let positions = (0..frames)
            .map(|i| {
                let j = i % xs.len();
                Vec3::new(xs[j], -heights[j], 0.0)
            })
            .collect();
        let times = (0..frames).map(|i| i as f32 / 30.0).collect();
        BoneTrajectory::new(positions, vec![Quat::IDENTITY; frames], times)
    }

    #[test]
    fn analysis_space_swaps_and_flips() {
        let mapped = to_analysis_space(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mapped, Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn dips_become_markers() {
        let trajectory = trajectory_from_heights(&[5.0, 5.0, 1.0, 5.0, 5.0, 1.0, 5.0, 5.0]);
        let markers = detect_markers(&trajectory, 1e-6);

        let frames: Vec<usize> = markers.iter().map(|marker| marker.frame).collect();
        assert_eq!(frames, vec![2, 5]);
        assert_eq!(markers[0].height, 1.0);
    }

    #[test]
    fn rotating_the_clip_rotates_the_markers() {
        let trajectory = trajectory_from_heights(&[5.0, 1.0, 5.0, 5.0, 1.0, 5.0, 5.0, 5.0]);
        let markers = detect_markers(&trajectory, 1e-6);

        // Same samples as dips_become_markers, rotated left by one frame
        let frames: Vec<usize> = markers.iter().map(|marker| marker.frame).collect();
        assert_eq!(frames, vec![1, 4]);
    }

    #[test]
    fn neighbors_wrap_around_the_loop() {
        let trajectory = trajectory_from_heights(&[1.0, 5.0, 5.0, 5.0, 5.0]);
        let markers = detect_markers(&trajectory, 1e-6);

        // Frame 0's previous neighbor is the last trimmed frame
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].frame, 0);
    }

    #[test]
    fn lateral_motion_sets_the_foot() {
        let heights = [5.0, 5.0, 1.0, 5.0, 5.0, 5.0];

        let advancing: Vec<f32> = (0..6).map(|i| i as f32).collect();
        let markers = detect_markers(&trajectory_from_analysis(&advancing, &heights), 1e-6);
        assert_eq!(markers[0].foot, Foot::Left);

        let retreating: Vec<f32> = (0..6).map(|i| -(i as f32)).collect();
        let markers = detect_markers(&trajectory_from_analysis(&retreating, &heights), 1e-6);
        assert_eq!(markers[0].foot, Foot::Right);
    }

    #[test]
    fn shallow_dips_inside_eps_are_ignored() {
        let trajectory = trajectory_from_heights(&[1.0, 1.0 - 5e-7, 1.0, 1.0, 1.0]);
        assert!(detect_markers(&trajectory, 1e-6).is_empty());

        let trajectory = trajectory_from_heights(&[1.0, 1.0 - 2e-6, 1.0, 1.0, 1.0]);
        assert_eq!(detect_markers(&trajectory, 1e-6).len(), 1);
    }

    #[test]
    fn flat_and_degenerate_clips_have_no_markers() {
        assert!(detect_markers(&trajectory_from_heights(&[3.0; 8]), 1e-6).is_empty());

        let single = BoneTrajectory::new(
            vec![Vec3::ZERO],
            vec![Quat::IDENTITY],
            vec![0.0],
        );
        assert!(detect_markers(&single, 1e-6).is_empty());
    }

    #[test]
    fn debug_curves_key_every_stored_frame() {
        let trajectory = trajectory_from_heights(&[5.0, 5.0, 1.0, 5.0]);
        let curves = build_debug_curves(&trajectory);

        assert_eq!(curves.pos_x.len(), 5);
        assert_eq!(curves.pos_z.len(), 5);
        assert_eq!(curves.rot_y.len(), 5);
        assert_eq!(curves.pos_z.sample(2.0 / 30.0), 1.0);
    }

    #[test]
    fn rotation_probe_reports_degrees() {
        let quarter = Quat::from_euler(EulerRot::XYZ, 0.0, std::f32::consts::FRAC_PI_4, 0.0);
        let trajectory = BoneTrajectory::new(
            vec![Vec3::ZERO; 2],
            vec![quarter; 2],
            vec![0.0, 1.0 / 30.0],
        );

        let curves = build_debug_curves(&trajectory);
        assert!((curves.rot_y.sample(0.0) - 45.0).abs() < 1e-3);
    }
}
