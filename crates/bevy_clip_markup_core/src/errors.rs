use thiserror::Error;

/// Possible errors when resolving bone data out of a clip source
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrajectoryError {
    #[error("Bone {0:?} is not present in the clip")]
    BoneNotFound(String),
    #[error("Bone {bone:?} references parent {parent:?}, which is not present in the clip")]
    UnknownParent { bone: String, parent: String },
}

pub type TrajectoryResult<T> = Result<T, TrajectoryError>;
