//! Batch markup over many clips.
//!
//! Every operation here walks its clips sequentially and keeps going past
//! failures: a clip the extractor cannot mark cleanly is reported with its
//! advisory status, never aborting the rest of the batch. Items are
//! independent pure calls, so callers are free to shard a large batch
//! across threads themselves.

use bevy::log::warn;
use bevy_clip_markup_core::{
    bone_curves::{BoneCurveConfig, BoneCurveSet, extract_bone_curves},
    checks::{ClipCheckConfig, ClipFinding, run_clip_checks},
    curve::FloatCurve,
    footstep::{ExtractionResult, ExtractionStatus, FootstepConfig, extract_footsteps},
    trajectory::TrajectorySource,
};

use crate::clip::SampledClip;

/// Footstep markup produced for one clip
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupReport {
    pub clip: String,
    pub result: ExtractionResult,
    /// `(name, curve)` pairs to attach to the clip: the step curve under
    /// the configured name, plus per-bone probe curves when debug capture
    /// is on
    pub curves: Vec<(String, FloatCurve)>,
}

/// Validation findings for one clip
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub clip: String,
    pub findings: Vec<ClipFinding>,
}

/// Channel curves of one bone of one clip
#[derive(Debug, Clone, PartialEq)]
pub struct BoneCurvesReport {
    pub clip: String,
    pub bone: String,
    pub curves: BoneCurveSet,
}

/// Marks footsteps on each clip in turn
pub fn mark_footsteps_batch<'a>(
    clips: impl IntoIterator<Item = (&'a str, &'a SampledClip)>,
    config: &FootstepConfig,
) -> Vec<MarkupReport> {
    clips
        .into_iter()
        .map(|(name, clip)| {
            let result = extract_footsteps(clip, config);
            if result.status != ExtractionStatus::Ok {
                warn!("Clip {name:?} may not be suitable for footstep recognition");
            }

            let mut curves = Vec::new();
            if !result.events.is_empty() {
                curves.push((config.curve_name.clone(), result.events.clone()));
            }
            if let Some(diagnostics) = &result.diagnostics {
                for (bone, probe) in diagnostics {
                    curves.push((format!("{bone}_PosX_Curve"), probe.pos_x.clone()));
                    curves.push((format!("{bone}_PosZ_Curve"), probe.pos_z.clone()));
                    curves.push((format!("{bone}_RotY_Curve"), probe.rot_y.clone()));
                }
            }

            MarkupReport {
                clip: name.to_string(),
                result,
                curves,
            }
        })
        .collect()
}

/// Runs the boundary validations over each clip, reporting only the clips
/// with findings
pub fn check_clips_batch<'a>(
    clips: impl IntoIterator<Item = (&'a str, &'a SampledClip)>,
    config: &ClipCheckConfig,
) -> Vec<CheckReport> {
    clips
        .into_iter()
        .filter_map(|(name, clip)| {
            let findings = run_clip_checks(clip, config);
            if findings.is_empty() {
                None
            } else {
                Some(CheckReport {
                    clip: name.to_string(),
                    findings,
                })
            }
        })
        .collect()
}

/// Extracts the configured bone's channel curves from each clip.
///
/// Clips without the bone are logged and skipped.
pub fn extract_bone_curves_batch<'a>(
    clips: impl IntoIterator<Item = (&'a str, &'a SampledClip)>,
    config: &BoneCurveConfig,
) -> Vec<BoneCurvesReport> {
    let channels = config.channels();
    clips
        .into_iter()
        .filter_map(|(name, clip)| {
            let trajectory = match clip.resolve_trajectory(&config.bone, false) {
                Ok(trajectory) => trajectory,
                Err(err) => {
                    warn!("Skipping clip {name:?}: {err}");
                    return None;
                }
            };
            Some(BoneCurvesReport {
                clip: name.to_string(),
                bone: config.bone.clone(),
                curves: extract_bone_curves(&trajectory, channels),
            })
        })
        .collect()
}
