use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    math::{Quat, Vec3},
    platform::collections::HashMap,
    reflect::TypePath,
};
use serde::{Deserialize, Serialize};

use super::{BoneTrack, SampledClip};
use crate::errors::ClipLoaderError;

/// On-disk form of one bone track
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct BoneTrackSerial {
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub positions: Vec<Vec3>,
    #[serde(default)]
    pub rotations: Vec<Quat>,
}

/// On-disk form of a sampled clip
#[derive(Serialize, Deserialize, Clone)]
pub struct SampledClipSerial {
    pub frame_times: Vec<f32>,
    pub bones: HashMap<String, BoneTrackSerial>,
}

#[derive(Default, TypePath)]
pub struct SampledClipLoader;

impl AssetLoader for SampledClipLoader {
    type Asset = SampledClip;
    type Settings = ();
    type Error = ClipLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).await?;
        let serial: SampledClipSerial = ron::de::from_bytes(&bytes)?;
        build_clip(serial)
    }

    fn extensions(&self) -> &[&str] {
        &["clip.ron"]
    }
}

/// Validates a serial clip and builds the asset.
///
/// Tracks must store one key per frame or a single static key, parents
/// must exist and parent chains must terminate, and frame times must
/// strictly increase.
pub fn build_clip(serial: SampledClipSerial) -> Result<SampledClip, ClipLoaderError> {
    if serial.frame_times.is_empty() {
        return Err(ClipLoaderError::EmptyClip);
    }
    if !serial.frame_times.is_sorted_by(|a, b| a < b) {
        return Err(ClipLoaderError::NonMonotonicTimes);
    }

    let frames = serial.frame_times.len();
    for (bone, track) in &serial.bones {
        for keys in [track.positions.len(), track.rotations.len()] {
            if keys > 1 && keys != frames {
                return Err(ClipLoaderError::TrackLengthMismatch {
                    bone: bone.clone(),
                    expected: frames,
                    found: keys,
                });
            }
        }
        if let Some(parent) = &track.parent
            && !serial.bones.contains_key(parent)
        {
            return Err(ClipLoaderError::UnknownParent {
                bone: bone.clone(),
                parent: parent.clone(),
            });
        }
    }

    for bone in serial.bones.keys() {
        let mut parent = serial.bones[bone].parent.as_deref();
        let mut depth = 0;
        while let Some(ancestor) = parent {
            depth += 1;
            if depth > serial.bones.len() {
                return Err(ClipLoaderError::ParentCycle(bone.clone()));
            }
            parent = serial.bones[ancestor].parent.as_deref();
        }
    }

    Ok(SampledClip::from_tracks(
        serial.bones.into_iter().map(|(name, track)| {
            (
                name,
                BoneTrack {
                    parent: track.parent,
                    positions: track.positions,
                    rotations: track.rotations,
                },
            )
        }),
        serial.frame_times,
    ))
}
