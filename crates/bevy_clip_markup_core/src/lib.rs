//! # Bevy Clip Markup Core
//!
//! Engine-independent analysis behind
//! [`bevy_clip_markup`](https://crates.io/crates/bevy_clip_markup): given
//! sampled bone trajectories, this crate detects footsteps, validates clip
//! boundaries and extracts per-bone float curves.
//!
//! The entry point is [`extract_footsteps`], which probes a list of
//! candidate bones for the local height minima a foot plant leaves behind,
//! scores each bone by how evenly its minima are spaced, and emits an
//! alternating step curve for the winner:
//!
//! ```ignore
//! let config = FootstepConfig::default();
//! let result = extract_footsteps(&clip, &config);
//! if result.status == ExtractionStatus::Ok {
//!     // result.events holds keys such as (0.1, -1.0), (0.101, 1.0), ...
//! }
//! ```
//!
//! Everything here is pure: functions take a [`TrajectorySource`]
//! implementation and a config, and return plain values. The companion
//! crate wires these into Bevy assets and batch commands.
//!
//! The remaining modules cover the rest of a markup pipeline:
//! - [`checks`] flags clips whose anchor bone drifts off the origin and
//!   clips collapsed to a single frame.
//! - [`bone_curves`] lifts raw bone translation and rotation channels into
//!   float curves for inspection.
//! - [`name_filter`] holds the keyword rules used to pick which clips of a
//!   library are worth processing.
//!
//! [`extract_footsteps`]: crate::footstep::extract_footsteps
//! [`TrajectorySource`]: crate::trajectory::TrajectorySource
//! [`checks`]: crate::checks
//! [`bone_curves`]: crate::bone_curves
//! [`name_filter`]: crate::name_filter

pub mod bone_curves;
pub mod checks;
pub mod curve;
pub mod errors;
pub mod footstep;
pub mod name_filter;
pub mod trajectory;

pub mod prelude {
    pub use super::bone_curves::{
        BoneCurveConfig, BoneCurveSet, CurveChannels, extract_bone_curves,
    };
    pub use super::checks::{ClipCheckConfig, ClipEnd, ClipFinding, run_clip_checks};
    pub use super::curve::{CurveKey, FloatCurve};
    pub use super::errors::{TrajectoryError, TrajectoryResult};
    pub use super::footstep::{
        DebugCurves, ExtractionResult, ExtractionStatus, Foot, FootstepConfig, FootstepMarker,
        extract_footsteps,
    };
    pub use super::name_filter::{NameFilterKind, NameRule, NameRuleSet};
    pub use super::trajectory::{BoneTrajectory, TrajectorySource};
}
