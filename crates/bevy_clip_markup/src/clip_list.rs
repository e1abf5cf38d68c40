//! Clip lists: the subset of a clip library selected for batch markup.

use std::path::Path;

use bevy::reflect::Reflect;
use bevy_clip_markup_core::name_filter::NameRuleSet;
use serde::{Deserialize, Serialize};

use crate::errors::ClipLoaderError;

/// Names of the clips selected for batch processing, stored on disk as RON
#[derive(Debug, Reflect, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipList {
    pub clips: Vec<String>,
}

/// Keeps the names passing every rule of the set, sorted so repeated runs
/// produce identical lists.
pub fn build_clip_list(
    names: impl IntoIterator<Item = impl Into<String>>,
    rules: &NameRuleSet,
) -> ClipList {
    let mut clips: Vec<String> = names
        .into_iter()
        .map(Into::into)
        .filter(|name| rules.matches(name))
        .collect();
    clips.sort();
    ClipList { clips }
}

pub fn save_clip_list(list: &ClipList, path: impl AsRef<Path>) -> Result<(), ClipLoaderError> {
    ron::ser::to_writer_pretty(
        std::fs::File::create(path)?,
        list,
        ron::ser::PrettyConfig::default(),
    )?;
    Ok(())
}

pub fn load_clip_list(path: impl AsRef<Path>) -> Result<ClipList, ClipLoaderError> {
    let text = std::fs::read_to_string(path)?;
    Ok(ron::de::from_str(&text)?)
}
