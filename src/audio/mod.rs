mod audio;
mod error;

pub use audio::{AudioOutput, KiraOutput};
pub use error::AudioError;
