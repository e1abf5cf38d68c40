use bevy::{
    math::{Quat, Vec3},
    reflect::Reflect,
};

use crate::errors::TrajectoryResult;

/// Per-frame samples of a single bone together with the shared frame
/// timestamps.
///
/// Looping clips store the first frame again as the last frame. Analysis
/// passes work on the range with that duplicate trimmed off.
#[derive(Debug, Reflect, Clone, Default)]
pub struct BoneTrajectory {
    positions: Vec<Vec3>,
    rotations: Vec<Quat>,
    frame_times: Vec<f32>,
}

impl BoneTrajectory {
    /// Creates a trajectory from parallel per-frame arrays.
    ///
    /// Panics if the arrays differ in length.
    pub fn new(positions: Vec<Vec3>, rotations: Vec<Quat>, frame_times: Vec<f32>) -> Self {
        if positions.len() != frame_times.len() || rotations.len() != frame_times.len() {
            panic!(
                "Trajectory arrays must have matching lengths (got {} positions, {} rotations, {} frame times)",
                positions.len(),
                rotations.len(),
                frame_times.len()
            );
        }
        Self {
            positions,
            rotations,
            frame_times,
        }
    }

    /// Number of stored frames, including the duplicated loop frame
    pub fn frame_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of frames once the duplicated loop frame is trimmed off
    pub fn trimmed_len(&self) -> usize {
        self.frame_count().saturating_sub(1)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn rotations(&self) -> &[Quat] {
        &self.rotations
    }

    pub fn frame_times(&self) -> &[f32] {
        &self.frame_times
    }

    /// Timestamp of the given frame index
    pub fn time_at(&self, frame: usize) -> f32 {
        self.frame_times[frame]
    }
}

/// A source of sampled per-bone animation data
pub trait TrajectorySource {
    /// Number of frames stored per bone track, including the duplicated loop
    /// frame
    fn frame_count(&self) -> usize;

    /// Resolves the per-frame trajectory of the named bone.
    ///
    /// When `component_space` is set, each frame's transform is the bone's
    /// local transform composed with the local transforms of all its
    /// ancestors. Otherwise the bone's own track is returned as stored.
    fn resolve_trajectory(
        &self,
        bone_name: &str,
        component_space: bool,
    ) -> TrajectoryResult<BoneTrajectory>;
}
