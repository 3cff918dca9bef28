mod metadata;
mod player;
mod playlist;

#[cfg(test)]
mod tests;

pub use metadata::{Artwork, LoftyTagReader};
pub use player::{PlaybackState, Player};
