mod game;

pub use game::{Choice, Game};
