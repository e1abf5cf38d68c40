use bevy::{
    app::{App, Plugin},
    asset::AssetApp,
};

use bevy_clip_markup_core::{
    bone_curves::{BoneCurveConfig, BoneCurveSet},
    checks::{ClipCheckConfig, ClipEnd, ClipFinding},
    curve::{CurveKey, FloatCurve},
    footstep::{ExtractionStatus, Foot, FootstepConfig, FootstepMarker},
    name_filter::{NameFilterKind, NameRule, NameRuleSet},
    trajectory::BoneTrajectory,
};

use crate::{
    clip::{BoneTrack, SampledClip, loader::SampledClipLoader},
    clip_list::ClipList,
};

/// Adds clip markup support to an app.
///
/// Registers the [`SampledClip`] asset and the reflectable markup types.
/// There are no systems: extraction and validation are on-demand calls.
#[derive(Default)]
pub struct ClipMarkupPlugin;

impl Plugin for ClipMarkupPlugin {
    fn build(&self, app: &mut App) {
        self.register_assets(app);
        self.register_types(app);
    }
}

impl ClipMarkupPlugin {
    /// Registers asset types and their loaders
    fn register_assets(&self, app: &mut App) {
        app.init_asset::<SampledClip>()
            .init_asset_loader::<SampledClipLoader>()
            .register_asset_reflect::<SampledClip>();
    }

    /// Reflect registrations for the non-asset types
    fn register_types(&self, app: &mut App) {
        app //
            .register_type::<BoneTrack>()
            .register_type::<BoneTrajectory>()
            .register_type::<CurveKey>()
            .register_type::<FloatCurve>()
            .register_type::<Foot>()
            .register_type::<FootstepMarker>()
            .register_type::<FootstepConfig>()
            .register_type::<ExtractionStatus>()
            .register_type::<ClipCheckConfig>()
            .register_type::<ClipEnd>()
            .register_type::<ClipFinding>()
            .register_type::<BoneCurveConfig>()
            .register_type::<BoneCurveSet>()
            .register_type::<NameFilterKind>()
            .register_type::<NameRule>()
            .register_type::<NameRuleSet>()
            .register_type::<ClipList>();
    }
}
