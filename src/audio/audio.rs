use std::path::Path;
use kira::{
    AudioManager, AudioManagerSettings, DefaultBackend,
    sound::static_sound::{StaticSoundData, StaticSoundHandle},
    Tween,
};

use super::AudioError;

/// The process-wide audio sink. Holds at most one loaded track.
pub trait AudioOutput {
    /// Replaces whatever is loaded, halting it first.
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    /// Starts the loaded track from the beginning.
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// Linear level in `[0, 1]`.
    fn set_volume(&mut self, level: f32);
}

pub fn linear_to_db(level: f32) -> f32 {
    if level > 0.0 {
        (20.0 * level.log10()).max(-80.0)
    } else {
        -80.0
    }
}

pub struct KiraOutput {
    manager: AudioManager<DefaultBackend>,
    loaded: Option<StaticSoundData>,
    handle: Option<StaticSoundHandle>,
    volume_db: f32,
}

impl KiraOutput {
    pub fn new() -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Init(format!("{:?}", e)))?;

        Ok(Self {
            manager,
            loaded: None,
            handle: None,
            volume_db: 0.0,
        })
    }

    fn halt(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            let _ = handle.stop(Tween::default());
        }
    }
}

impl AudioOutput for KiraOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        self.halt();
        self.loaded = None;

        let sound_data = StaticSoundData::from_file(path).map_err(|e| AudioError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        log::debug!(
            "loaded {} ({:.1}s)",
            path.display(),
            sound_data.duration().as_secs_f64()
        );
        self.loaded = Some(sound_data);
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.halt();
        let sound_data = self.loaded.clone().ok_or(AudioError::NothingLoaded)?;

        let mut handle = self
            .manager
            .play(sound_data)
            .map_err(|e| AudioError::Play(e.to_string()))?;

        let _ = handle.set_volume(self.volume_db, Tween::default());
        self.handle = Some(handle);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(handle) = &mut self.handle {
            let _ = handle.pause(Tween::default());
        }
    }

    fn resume(&mut self) {
        if let Some(handle) = &mut self.handle {
            let _ = handle.resume(Tween::default());
        }
    }

    fn stop(&mut self) {
        self.halt();
    }

    fn set_volume(&mut self, level: f32) {
        self.volume_db = linear_to_db(level);

        if let Some(handle) = &mut self.handle {
            let _ = handle.set_volume(self.volume_db, Tween::default());
        }
    }
}
