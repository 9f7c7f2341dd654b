use thiserror::Error;

/// Failures surfaced to the debug log or the full-page error state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("fetch of \"{path}\" failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("\"{path}\" answered with status {status}")]
    HttpStatus { path: String, status: u16 },
    #[error("malformed model manifest: {0}")]
    Manifest(String),
    #[error("graphics capability missing: {0}")]
    Capability(String),
    #[error("camera bookmark: {0}")]
    Bookmark(String),
    #[error("field {name} is not a number: {value:?}")]
    Field { name: String, value: String },
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Rejected camera writes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera is owned by {owner:?}, write from {writer:?} refused")]
    NotOwner {
        owner: crate::rig::CameraOwner,
        writer: crate::rig::CameraOwner,
    },
}

pub type Result<T, E = SceneError> = std::result::Result<T, E>;
