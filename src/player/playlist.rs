use std::path::{Path, PathBuf};

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Append-only list of track paths in insertion order, with a single selection.
/// Duplicates are kept.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    selected: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many paths were appended.
    pub fn extend<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let before = self.tracks.len();
        self.tracks.extend(paths);
        self.tracks.len() - before
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.tracks.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.tracks.iter().map(PathBuf::as_path)
    }

    pub fn display_names(&self) -> Vec<String> {
        self.iter().map(display_name).collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Ignores out of range indices.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }
}
