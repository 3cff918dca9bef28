use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use lofty::picture::PictureType;
use lofty::prelude::{Accessor, TaggedFileExt};
use thiserror::Error;

use super::playlist::display_name;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Cover art, already scaled to the display size.
pub type Artwork = image::RgbaImage;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unreadable tags: {0}")]
    Tags(#[from] lofty::error::LoftyError),

    #[error("undecodable artwork: {0}")]
    Artwork(#[from] image::ImageError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork: Option<Artwork>,
}

impl TrackMetadata {
    pub fn fallback(path: &Path) -> Self {
        Self {
            title: display_name(path),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            artwork: None,
        }
    }
}

/// Tag fields as stored in the file. `None` means the key is absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork: Option<Vec<u8>>,
}

pub trait TagReader {
    fn read_tags(&self, path: &Path) -> Result<RawTags, MetadataError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

/// Present keys are taken verbatim, even when blank.
fn tag_value(value: Option<Cow<'_, str>>) -> Option<String> {
    value.map(Cow::into_owned)
}

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> Result<RawTags, MetadataError> {
        let tagged = lofty::read_from_path(path)?;

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Ok(RawTags::default());
        };

        let artwork = tag
            .pictures()
            .iter()
            .find(|p| p.pic_type() == PictureType::CoverFront)
            .or_else(|| tagged.tags().iter().flat_map(|t| t.pictures().iter()).next())
            .map(|p| p.data().to_vec());

        Ok(RawTags {
            title: tag_value(tag.title()),
            artist: tag_value(tag.artist()),
            album: tag_value(tag.album()),
            artwork,
        })
    }
}

pub fn decode_artwork(bytes: &[u8], size: u32) -> Result<Artwork, MetadataError> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8())
}

/// Path keyed metadata store. Entries are computed once and never evicted.
pub struct MetadataCache<R> {
    reader: R,
    art_size: u32,
    entries: HashMap<PathBuf, TrackMetadata>,
}

impl<R: TagReader> MetadataCache<R> {
    pub fn new(reader: R, art_size: u32) -> Self {
        Self {
            reader,
            art_size,
            entries: HashMap::new(),
        }
    }

    pub fn extract(&mut self, path: &Path) -> &TrackMetadata {
        if !self.entries.contains_key(path) {
            let metadata = match self.read(path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    log::warn!("Error extracting metadata from {}: {}", path.display(), e);
                    TrackMetadata::fallback(path)
                }
            };
            self.entries.insert(path.to_path_buf(), metadata);
        }
        &self.entries[path]
    }

    pub fn get(&self, path: &Path) -> Option<&TrackMetadata> {
        self.entries.get(path)
    }

    // A bad picture fails the whole record, tags included.
    fn read(&self, path: &Path) -> Result<TrackMetadata, MetadataError> {
        let tags = self.reader.read_tags(path)?;
        let mut metadata = TrackMetadata::fallback(path);

        if let Some(title) = tags.title {
            metadata.title = title;
        }
        if let Some(artist) = tags.artist {
            metadata.artist = artist;
        }
        if let Some(album) = tags.album {
            metadata.album = album;
        }
        if let Some(bytes) = tags.artwork {
            metadata.artwork = Some(decode_artwork(&bytes, self.art_size)?);
        }

        Ok(metadata)
    }
}
