use thiserror::Error;

use crate::audio::AudioError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("audio output unavailable: {0}")]
    Audio(#[from] AudioError),

    #[error("window error: {0}")]
    Ui(#[from] eframe::Error),
}
