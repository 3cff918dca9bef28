/// Fixed application settings. Nothing here is read from disk or the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub title: &'static str,
    pub window_size: [f32; 2],
    /// Edge length in pixels of the square artwork area.
    pub art_size: u32,
    pub initial_volume: f32,
    pub audio_extensions: &'static [&'static str],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "RPS Game + Music Player",
            window_size: [400.0, 600.0],
            art_size: 150,
            initial_volume: 0.5,
            audio_extensions: &["mp3", "wav", "ogg", "flac"],
        }
    }
}
