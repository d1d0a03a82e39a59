mod song;

pub use song::{difficulty_for_chord_count, load_songs, Song};
