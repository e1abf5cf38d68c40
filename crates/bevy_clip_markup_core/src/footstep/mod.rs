//! Footstep extraction from bone trajectories.
//!
//! A footstep shows up as a local minimum in the height of a tracked bone.
//! The extractor scans a configured list of candidate bones, scores the
//! marker set found on each, corrects the winner and emits an alternating
//! step curve centered on the gait phase.

use bevy::{
    log::warn,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    curve::FloatCurve,
    trajectory::TrajectorySource,
};

pub mod detector;
pub mod phase;
pub mod selection;

/// Which foot a marker plants
#[derive(Debug, Reflect, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    /// Signed curve value for this foot
    pub fn sign(self) -> f32 {
        match self {
            Foot::Left => -1.0,
            Foot::Right => 1.0,
        }
    }
}

/// A candidate foot plant: a local minimum in the analysis-space height of a
/// probe bone
#[derive(Debug, Reflect, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootstepMarker {
    /// Analysis-space height at the minimum
    pub height: f32,
    pub foot: Foot,
    /// Frame index into the trimmed trajectory
    pub frame: usize,
}

/// Settings for [`extract_footsteps`]
#[derive(Debug, Reflect, Clone, Serialize, Deserialize)]
#[reflect(Default)]
pub struct FootstepConfig {
    /// Bones tried as footstep probes, in order of preference
    pub candidate_bones: Vec<String>,
    /// Name consumers should attach the emitted step curve under
    pub curve_name: String,
    /// Also capture per-bone probe curves
    pub debug: bool,
    /// Tolerance of the local-minimum and loop-signature tests
    pub eps: f32,
    /// Gap between a plant key and its release key
    pub epsilon_time: f32,
}

impl Default for FootstepConfig {
    fn default() -> Self {
        Self {
            candidate_bones: vec!["LeftHand".to_string(), "RightHand".to_string()],
            curve_name: "Footsteps_Curve".to_string(),
            debug: false,
            eps: 1e-6,
            epsilon_time: 1e-3,
        }
    }
}

/// Outcome classification of a footstep extraction.
///
/// Anything except [`Ok`](ExtractionStatus::Ok) leaves the clip for manual
/// review; none of these abort batch processing.
#[derive(Debug, Reflect, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStatus {
    /// An alternating pair of plants was emitted
    Ok,
    /// No local minima found on any candidate bone
    NoFootstepDetected,
    /// A single marker survived; events are emitted best-effort
    SingleMarkAmbiguous,
    /// More than two markers survived correction
    TooManyLocalMinima,
    /// Both markers plant the same foot
    OrientationConflict,
    /// No candidate bone exists in the clip
    BoneNotFound,
}

/// Per-axis probe curves captured from a candidate bone while scanning for
/// markers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugCurves {
    /// Analysis-space X position per frame
    pub pos_x: FloatCurve,
    /// Analysis-space height per frame
    pub pos_z: FloatCurve,
    /// Euler Y rotation per frame, in degrees
    pub rot_y: FloatCurve,
}

/// Everything produced by [`extract_footsteps`] for one clip
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub status: ExtractionStatus,
    /// Step curve: the planted foot's sign at each plant, flipped
    /// `epsilon_time` later
    pub events: FloatCurve,
    /// Candidate bone the markers came from
    pub chosen_bone: Option<String>,
    /// Probe curves per candidate bone, present when debug capture is on
    pub diagnostics: Option<IndexMap<String, DebugCurves>>,
}

impl ExtractionResult {
    fn empty(status: ExtractionStatus) -> Self {
        Self {
            status,
            events: FloatCurve::default(),
            chosen_bone: None,
            diagnostics: None,
        }
    }
}

/// Scans the candidate bones of a clip and emits a footstep curve.
///
/// The extraction is pure: the same source and config always produce the
/// same result, and the source is never mutated.
pub fn extract_footsteps(
    source: &impl TrajectorySource,
    config: &FootstepConfig,
) -> ExtractionResult {
    let selection = selection::select_candidate(source, config);

    let Some(best) = selection.best else {
        let status = if selection.any_bone_resolved {
            warn!("No footstep detected on any candidate bone, skipping");
            ExtractionStatus::NoFootstepDetected
        } else {
            warn!("None of the candidate bones exist in the clip");
            ExtractionStatus::BoneNotFound
        };
        return ExtractionResult {
            diagnostics: selection.diagnostics,
            ..ExtractionResult::empty(status)
        };
    };

    let mut markers = best.markers;
    let trimmed_len = best.trajectory.trimmed_len();

    if markers.len() > 1 && markers.len() % 2 == 1 {
        selection::discard_extra_marker(&mut markers, trimmed_len);
    }

    let (status, events) = if markers.len() == 1 {
        warn!(
            "Only one footstep mark on bone {:?}, check the clip manually",
            best.bone
        );
        let events = phase::single_marker_curve(&markers[0], &best.trajectory, config.epsilon_time);
        (ExtractionStatus::SingleMarkAmbiguous, events)
    } else if markers.len() > 2 {
        if selection::has_loop_signature(&markers, config.eps) {
            warn!(
                "Footstep marks on bone {:?} may contain potential loops",
                best.bone
            );
        } else {
            warn!(
                "Height of bone {:?} contains more than two local minima, clip needs manual markup",
                best.bone
            );
        }
        (ExtractionStatus::TooManyLocalMinima, FloatCurve::default())
    } else if markers[0].foot == markers[1].foot {
        warn!(
            "Footstep marks on bone {:?} are on the same side, check the clip manually",
            best.bone
        );
        (ExtractionStatus::OrientationConflict, FloatCurve::default())
    } else {
        phase::apply_phase_shift(&mut markers, trimmed_len);
        let events = phase::build_step_curve(&markers, &best.trajectory, config.epsilon_time);
        (ExtractionStatus::Ok, events)
    };

    ExtractionResult {
        status,
        events,
        chosen_bone: Some(best.bone),
        diagnostics: selection.diagnostics,
    }
}
