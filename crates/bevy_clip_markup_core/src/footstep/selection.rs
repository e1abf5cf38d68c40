//! Scoring and selection of footstep candidate bones.

use bevy::log::{debug, warn};
use indexmap::IndexMap;

use crate::trajectory::{BoneTrajectory, TrajectorySource};

use super::{DebugCurves, FootstepConfig, FootstepMarker, detector};

/// Penalty separating odd marker counts from even ones
pub const ODD_COUNT_PENALTY: f32 = 10000.0;

/// Outcome of probing every candidate bone of a clip
pub(super) struct CandidateSelection {
    /// Lowest-penalty candidate that produced markers
    pub best: Option<BestCandidate>,
    /// Whether any candidate bone existed at all
    pub any_bone_resolved: bool,
    /// Probe curves per candidate, captured when debug is on
    pub diagnostics: Option<IndexMap<String, DebugCurves>>,
}

pub(super) struct BestCandidate {
    pub bone: String,
    pub markers: Vec<FootstepMarker>,
    pub trajectory: BoneTrajectory,
}

/// Probes each candidate bone in order and keeps the one with the lowest
/// penalty. Ties keep the earlier candidate. Bones missing from the clip
/// are skipped with a warning.
pub(super) fn select_candidate(
    source: &impl TrajectorySource,
    config: &FootstepConfig,
) -> CandidateSelection {
    let mut best: Option<BestCandidate> = None;
    let mut min_penalty = f32::INFINITY;
    let mut any_bone_resolved = false;
    let mut diagnostics = config.debug.then(IndexMap::new);

    for bone in &config.candidate_bones {
        let trajectory = match source.resolve_trajectory(bone, true) {
            Ok(trajectory) => trajectory,
            Err(err) => {
                warn!("Skipping footstep candidate {bone:?}: {err}");
                continue;
            }
        };
        any_bone_resolved = true;

        if let Some(diagnostics) = diagnostics.as_mut() {
            diagnostics.insert(bone.clone(), detector::build_debug_curves(&trajectory));
        }

        let markers = detector::detect_markers(&trajectory, config.eps);
        if markers.is_empty() {
            continue;
        }

        let penalty = candidate_penalty(&markers, trajectory.trimmed_len());
        debug!("Footstep penalty for candidate {bone:?}: {penalty}");

        if penalty < min_penalty {
            min_penalty = penalty;
            best = Some(BestCandidate {
                bone: bone.clone(),
                markers,
                trajectory,
            });
        }
    }

    CandidateSelection {
        best,
        any_bone_resolved,
        diagnostics,
    }
}

/// Mean squared deviation of the circular marker gaps from a uniform
/// stride. Lower values mean a steadier gait.
pub fn stride_variance(markers: &[FootstepMarker], trimmed_len: usize) -> f32 {
    let average = trimmed_len as f32 / markers.len() as f32;
    let mut variance = 0.0;
    for i in 0..markers.len() {
        let curr = markers[i].frame;
        let next = markers[(i + 1) % markers.len()].frame;
        let stride = ((next + trimmed_len - curr) % trimmed_len) as f32;
        variance += (stride - average) * (stride - average);
    }
    variance / markers.len() as f32
}

/// Candidate score: odd marker counts take a large fixed penalty on top of
/// the stride variance.
pub fn candidate_penalty(markers: &[FootstepMarker], trimmed_len: usize) -> f32 {
    ODD_COUNT_PENALTY * (markers.len() % 2) as f32 + stride_variance(markers, trimmed_len)
}

/// Drops the marker whose removal leaves the most uniform stride, keeping
/// the first such marker on ties.
pub fn discard_extra_marker(markers: &mut Vec<FootstepMarker>, trimmed_len: usize) {
    let mut best_index = 0;
    let mut min_variance = f32::INFINITY;
    for i in 0..markers.len() {
        let mut remaining = markers.clone();
        remaining.remove(i);
        let variance = stride_variance(&remaining, trimmed_len);
        if variance < min_variance {
            min_variance = variance;
            best_index = i;
        }
    }
    markers.remove(best_index);
}

/// Tests whether the marker heights repeat with period two when sorted,
/// the signature of a clip that packs several gait loops.
pub fn has_loop_signature(markers: &[FootstepMarker], eps: f32) -> bool {
    let mut order: Vec<usize> = (0..markers.len()).collect();
    order.sort_by(|&i, &j| markers[i].height.total_cmp(&markers[j].height));
    (0..order.len()).all(|i| {
        let a = markers[order[i]].height;
        let b = markers[order[(i + 2) % order.len()]].height;
        (a - b).abs() <= eps
    })
}
