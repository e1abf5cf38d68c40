//! Phase normalization and step-curve emission.

use crate::{curve::FloatCurve, trajectory::BoneTrajectory};

use super::FootstepMarker;

/// Centers the markers around the midpoint of the first stride.
///
/// Frame arithmetic is integer and truncating. When the second marker sits
/// at or before the first, its frame is lifted by one loop before the
/// midpoint is taken; shifted frames that go negative wrap back onto the
/// loop.
pub fn apply_phase_shift(markers: &mut [FootstepMarker], trimmed_len: usize) {
    if markers.is_empty() {
        return;
    }
    let n = trimmed_len as i32;
    let frame0 = markers[0].frame as i32;
    let mut frame1 = markers[1 % markers.len()].frame as i32;
    if frame1 <= frame0 {
        frame1 += n;
    }
    let frame_mid = frame0 + (frame1 - frame0) / 2;
    let offset = (frame_mid - frame1) / 2;

    for marker in markers.iter_mut() {
        let mut frame = marker.frame as i32 + offset;
        if frame < 0 {
            frame += n;
        }
        marker.frame = frame as usize;
    }
}

/// Emits the alternating step curve for a phase-shifted marker pair.
///
/// Markers are walked in frame order. Each contributes a plant key and an
/// opposite-signed release key `epsilon_time` later; plants alternate
/// starting from the left foot's sign.
pub fn build_step_curve(
    markers: &[FootstepMarker],
    trajectory: &BoneTrajectory,
    epsilon_time: f32,
) -> FloatCurve {
    let mut order: Vec<usize> = (0..markers.len()).collect();
    order.sort_by_key(|&i| markers[i].frame);

    let mut curve = FloatCurve::default();
    let mut step = -1.0;
    for &i in &order {
        let time = trajectory.time_at(markers[i].frame);
        curve.add_key(time, step);
        curve.add_key(time + epsilon_time, -step);
        step = -step;
    }
    curve
}

/// Best-effort curve for a clip where only a single marker survived.
///
/// There is no second plant to phase against, so the marker keeps its own
/// time and its detected side.
pub fn single_marker_curve(
    marker: &FootstepMarker,
    trajectory: &BoneTrajectory,
    epsilon_time: f32,
) -> FloatCurve {
    let time = trajectory.time_at(marker.frame);
    let sign = marker.foot.sign();

    let mut curve = FloatCurve::default();
    curve.add_key(time, sign);
    curve.add_key(time + epsilon_time, -sign);
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footstep::Foot;
    use bevy::math::{Quat, Vec3};

    fn markers_at(frames: &[usize]) -> Vec<FootstepMarker> {
        frames
            .iter()
            .map(|&frame| FootstepMarker {
                height: 0.0,
                foot: Foot::Left,
                frame,
            })
            .collect()
    }

    fn timeline(frames: usize) -> BoneTrajectory {
        BoneTrajectory::new(
            vec![Vec3::ZERO; frames],
            vec![Quat::IDENTITY; frames],
            (0..frames).map(|i| i as f32 / 30.0).collect(),
        )
    }

    #[test]
    fn markers_center_on_the_first_stride() {
        let mut markers = markers_at(&[6, 18]);
        apply_phase_shift(&mut markers, 24);

        let frames: Vec<usize> = markers.iter().map(|marker| marker.frame).collect();
        assert_eq!(frames, vec![3, 15]);
    }

    #[test]
    fn negative_shifts_wrap_onto_the_loop() {
        let mut markers = markers_at(&[2, 20]);
        apply_phase_shift(&mut markers, 24);

        // Offset is -4: frame 2 wraps to 22, frame 20 lands on 16
        let frames: Vec<usize> = markers.iter().map(|marker| marker.frame).collect();
        assert_eq!(frames, vec![22, 16]);
    }

    #[test]
    fn lone_marker_pairs_with_itself() {
        let mut markers = markers_at(&[10]);
        apply_phase_shift(&mut markers, 24);

        // One marker strides a whole loop, so the shift is a quarter loop
        assert_eq!(markers[0].frame, 4);
    }

    #[test]
    fn step_curve_alternates_in_frame_order() {
        let markers = markers_at(&[22, 16]);
        let curve = build_step_curve(&markers, &timeline(25), 1e-3);

        assert_eq!(curve.len(), 4);
        let values: Vec<f32> = curve.iter().map(|key| key.value).collect();
        assert_eq!(values, vec![-1.0, 1.0, 1.0, -1.0]);
        assert!((curve.keys[0].time - 16.0 / 30.0).abs() < 1e-6);
        assert!((curve.keys[2].time - 22.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn release_keys_trail_by_epsilon_time() {
        let markers = markers_at(&[3, 15]);
        let curve = build_step_curve(&markers, &timeline(25), 1e-3);

        assert!((curve.keys[1].time - (3.0 / 30.0 + 1e-3)).abs() < 1e-6);
        assert!((curve.keys[3].time - (15.0 / 30.0 + 1e-3)).abs() < 1e-6);
    }

    #[test]
    fn single_marker_keeps_its_detected_side() {
        let marker = FootstepMarker {
            height: 0.0,
            foot: Foot::Right,
            frame: 2,
        };
        let curve = single_marker_curve(&marker, &timeline(10), 1e-3);

        assert_eq!(curve.len(), 2);
        assert_eq!(curve.keys[0].value, 1.0);
        assert_eq!(curve.keys[1].value, -1.0);
        assert!((curve.keys[0].time - 2.0 / 30.0).abs() < 1e-6);
    }
}
