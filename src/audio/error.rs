use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to initialize audio manager: {0}")]
    Init(String),

    #[error("failed to load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("failed to play audio: {0}")]
    Play(String),

    #[error("no track loaded")]
    NothingLoaded,
}
