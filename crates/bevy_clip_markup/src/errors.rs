use thiserror::Error;

/// Possible errors when loading or saving markup assets
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClipLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not serialize RON: {0}")]
    RonSer(#[from] ron::Error),
    #[error("Clip stores no frames")]
    EmptyClip,
    #[error("Track of bone {bone:?} stores {found} keys, expected 1 or {expected}")]
    TrackLengthMismatch {
        bone: String,
        expected: usize,
        found: usize,
    },
    #[error("Bone {bone:?} references parent {parent:?}, which is not in the clip")]
    UnknownParent { bone: String, parent: String },
    #[error("Parent chain of bone {0:?} does not terminate")]
    ParentCycle(String),
    #[error("Frame times of the clip are not strictly increasing")]
    NonMonotonicTimes,
}
