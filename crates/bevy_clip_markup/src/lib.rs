//! # Bevy Clip Markup
//!
//! **Bevy Clip Markup** marks up sampled animation clips for
//! [Bevy](https://bevyengine.org/): it detects footsteps from bone
//! trajectories, validates clip boundaries and extracts per-bone float
//! curves, in single calls or over whole clip libraries.
//!
//! ## Introduction
//!
//! The library revolves around one asset:
//! - [`SampledClip`], defined in `*.clip.ron` files. A sampled clip holds
//!   per-bone position and rotation keys over a shared frame timeline,
//!   with parent names forming the bone hierarchy. Bones that never move
//!   may store a single static key. For example:
//!   ```ron
//!   (
//!       frame_times: [0.0, 0.033, 0.066],
//!       bones: {
//!           "Camera_Root": (),
//!           "LeftHand": (
//!               parent: Some("Camera_Root"),
//!               positions: [(0.0, -1.2, 0.4), (0.1, -1.1, 0.4), (0.2, -1.2, 0.4)],
//!               rotations: [(0.0, 0.0, 0.0, 1.0), (0.0, 0.0, 0.0, 1.0), (0.0, 0.0, 0.0, 1.0)],
//!           ),
//!       },
//!   )
//!   ```
//!   Add [`ClipMarkupPlugin`] to the app to register the asset and its
//!   loader.
//!
//! On top of the asset, three groups of operations are provided:
//! - **Footstep markup**: [`extract_footsteps`] finds the frames where a
//!   probe bone plants, and [`mark_footsteps_batch`] runs it over many
//!   clips, reporting an advisory status per clip instead of stopping at
//!   the first awkward one.
//! - **Boundary validation**: [`check_clips_batch`] flags clips whose
//!   anchor bone drifts off the origin on the boundary frames, and clips
//!   collapsed to a single frame.
//! - **Curve extraction**: [`extract_bone_curves_batch`] lifts a bone's
//!   raw translation and rotation channels into float curves.
//!
//! Clip libraries are usually narrowed down first with
//! [`build_clip_list`], which applies keyword rules to clip names and
//! saves the survivors as a RON list for later runs.
//!
//! [`SampledClip`]: crate::clip::SampledClip
//! [`ClipMarkupPlugin`]: crate::plugin::ClipMarkupPlugin
//! [`extract_footsteps`]: bevy_clip_markup_core::footstep::extract_footsteps
//! [`mark_footsteps_batch`]: crate::batch::mark_footsteps_batch
//! [`check_clips_batch`]: crate::batch::check_clips_batch
//! [`extract_bone_curves_batch`]: crate::batch::extract_bone_curves_batch
//! [`build_clip_list`]: crate::clip_list::build_clip_list

pub mod batch;
pub mod clip;
pub mod clip_list;
pub mod errors;
pub mod plugin;

pub mod prelude {
    pub use super::batch::{
        BoneCurvesReport, CheckReport, MarkupReport, check_clips_batch,
        extract_bone_curves_batch, mark_footsteps_batch,
    };
    pub use super::clip::{BoneTrack, SampledClip, loader::SampledClipLoader};
    pub use super::clip_list::{ClipList, build_clip_list, load_clip_list, save_clip_list};
    pub use super::errors::ClipLoaderError;
    pub use super::plugin::ClipMarkupPlugin;
    pub use bevy_clip_markup_core::prelude::*;
}
