use std::path::{Path, PathBuf};

use crate::audio::{AudioError, AudioOutput};
use crate::config::Settings;

use super::metadata::{LoftyTagReader, MetadataCache, TagReader, TrackMetadata};
use super::playlist::Playlist;

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    /// Label for the play/pause button.
    pub fn transport_glyph(self) -> &'static str {
        match self {
            PlaybackState::Playing => "⏸",
            PlaybackState::Stopped | PlaybackState::Paused => "▶",
        }
    }
}

/// Playlist, metadata and transport for the music panel.
///
/// Every operation runs to completion on the caller's thread. Failures while
/// reading tags or starting a track are logged and leave the player in its
/// previous state.
pub struct Player<A, R = LoftyTagReader> {
    audio: A,
    playlist: Playlist,
    metadata: MetadataCache<R>,
    state: PlaybackState,
    current: Option<usize>,
    volume: f32,
    displayed: Option<PathBuf>,
}

impl<A: AudioOutput, R: TagReader> Player<A, R> {
    pub fn new(mut audio: A, reader: R, settings: &Settings) -> Self {
        audio.set_volume(settings.initial_volume);
        Self {
            audio,
            playlist: Playlist::new(),
            metadata: MetadataCache::new(reader, settings.art_size),
            state: PlaybackState::Stopped,
            current: None,
            volume: settings.initial_volume,
            displayed: None,
        }
    }

    pub fn add_tracks<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let was_empty = self.playlist.is_empty();
        let added = self.playlist.extend(paths);
        if added == 0 {
            return;
        }
        log::info!("added {} track(s), {} total", added, self.playlist.len());

        if was_empty {
            self.select_track(0);
        }
    }

    /// Changes the selection and shows its metadata. Playback is untouched.
    pub fn select_track(&mut self, index: usize) {
        if self.playlist.select(index) {
            self.refresh_display(index);
        }
    }

    pub fn toggle_playback(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let index = match self.playlist.selected() {
            Some(index) => index,
            None => {
                self.playlist.select(0);
                0
            }
        };

        match self.state {
            PlaybackState::Stopped => self.start(index),
            PlaybackState::Playing => {
                self.audio.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.audio.resume();
                self.state = PlaybackState::Playing;
            }
        }
    }

    pub fn stop(&mut self) {
        self.audio.stop();
        self.state = PlaybackState::Stopped;
        self.current = None;
    }

    pub fn set_volume(&mut self, level: f32) {
        self.volume = level;
        self.audio.set_volume(level);
    }

    pub fn extract_metadata(&mut self, path: &Path) -> &TrackMetadata {
        self.metadata.extract(path)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the track the transport is on, if playing or paused.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// The track whose metadata is on screen.
    pub fn displayed(&self) -> Option<(&Path, &TrackMetadata)> {
        let path = self.displayed.as_deref()?;
        self.metadata.get(path).map(|m| (path, m))
    }

    #[cfg(test)]
    pub(crate) fn audio(&self) -> &A {
        &self.audio
    }

    fn start(&mut self, index: usize) {
        let Some(path) = self.playlist.get(index).map(Path::to_path_buf) else {
            return;
        };

        match self.load_and_play(&path) {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                self.current = Some(index);
                self.refresh_display(index);
            }
            Err(e) => log::warn!("{}", e),
        }
    }

    fn load_and_play(&mut self, path: &Path) -> Result<(), AudioError> {
        self.audio.load(path)?;
        self.audio.play()
    }

    fn refresh_display(&mut self, index: usize) {
        let Some(path) = self.playlist.get(index).map(Path::to_path_buf) else {
            return;
        };
        self.extract_metadata(&path);
        self.displayed = Some(path);
    }
}
