//! Sampled animation clips: per-bone key tracks over a shared frame
//! timeline.

use bevy::{
    asset::Asset,
    math::{Quat, Vec3},
    platform::collections::HashMap,
    reflect::Reflect,
};
use bevy_clip_markup_core::{
    errors::{TrajectoryError, TrajectoryResult},
    trajectory::{BoneTrajectory, TrajectorySource},
};

pub mod loader;

/// Keys of one bone in its parent's space.
///
/// A track stores either one key per clip frame or a single key for a
/// channel that never moves. An empty channel reads as identity.
#[derive(Debug, Reflect, Clone, Default)]
pub struct BoneTrack {
    /// Name of the parent bone, `None` at the root
    pub parent: Option<String>,
    pub positions: Vec<Vec3>,
    pub rotations: Vec<Quat>,
}

/// An animation clip baked down to per-frame bone keys.
///
/// Looping clips repeat their first frame at the end; the analysis passes
/// trim it off themselves. Loaded from `*.clip.ron` files by
/// [`loader::SampledClipLoader`].
#[derive(Asset, Reflect, Debug, Clone, Default)]
pub struct SampledClip {
    bones: HashMap<String, BoneTrack>,
    frame_times: Vec<f32>,
}

impl SampledClip {
    /// Builds a clip from bone tracks.
    ///
    /// Every track must hold one key per frame time, or a single static
    /// key. Parent chains must terminate at a bone without a parent. The
    /// asset loader validates both for clips loaded from files.
    pub fn from_tracks(
        bones: impl IntoIterator<Item = (String, BoneTrack)>,
        frame_times: Vec<f32>,
    ) -> Self {
        Self {
            bones: bones.into_iter().collect(),
            frame_times,
        }
    }

    /// Time of the last stored frame
    pub fn duration(&self) -> f32 {
        self.frame_times.last().copied().unwrap_or(0.0)
    }

    pub fn frame_times(&self) -> &[f32] {
        &self.frame_times
    }

    pub fn bone_names(&self) -> impl Iterator<Item = &str> {
        self.bones.keys().map(|name| name.as_str())
    }

    pub fn contains_bone(&self, bone_name: &str) -> bool {
        self.bones.contains_key(bone_name)
    }
}

fn key_at<T: Copy>(keys: &[T], frame: usize, identity: T) -> T {
    match keys {
        [] => identity,
        [only] => *only,
        keys => keys[frame],
    }
}

impl TrajectorySource for SampledClip {
    fn frame_count(&self) -> usize {
        self.frame_times.len()
    }

    /// Resolves the named bone's keys, broadcasting static tracks over the
    /// whole timeline. In component space the result folds in every
    /// ancestor up to and including the root.
    fn resolve_trajectory(
        &self,
        bone_name: &str,
        component_space: bool,
    ) -> TrajectoryResult<BoneTrajectory> {
        let track = self
            .bones
            .get(bone_name)
            .ok_or_else(|| TrajectoryError::BoneNotFound(bone_name.to_string()))?;

        let frames = self.frame_times.len();
        let mut positions: Vec<Vec3> = (0..frames)
            .map(|frame| key_at(&track.positions, frame, Vec3::ZERO))
            .collect();
        let mut rotations: Vec<Quat> = (0..frames)
            .map(|frame| key_at(&track.rotations, frame, Quat::IDENTITY))
            .collect();

        if component_space {
            let mut current = bone_name;
            let mut parent_name = track.parent.as_deref();
            let mut depth = 0;
            while let Some(ancestor_name) = parent_name {
                depth += 1;
                if depth > self.bones.len() {
                    panic!("Parent chain of bone {bone_name:?} does not terminate");
                }
                let Some(ancestor) = self.bones.get(ancestor_name) else {
                    return Err(TrajectoryError::UnknownParent {
                        bone: current.to_string(),
                        parent: ancestor_name.to_string(),
                    });
                };
                for frame in 0..frames {
                    let ancestor_position = key_at(&ancestor.positions, frame, Vec3::ZERO);
                    let ancestor_rotation = key_at(&ancestor.rotations, frame, Quat::IDENTITY);
                    positions[frame] = ancestor_position + ancestor_rotation * positions[frame];
                    rotations[frame] = ancestor_rotation * rotations[frame];
                }
                current = ancestor_name;
                parent_name = ancestor.parent.as_deref();
            }
        }

        Ok(BoneTrajectory::new(
            positions,
            rotations,
            self.frame_times.clone(),
        ))
    }
}
