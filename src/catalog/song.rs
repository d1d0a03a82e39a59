use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::theory::Theory;

/// A song as it arrives from a catalog file. Chord text is kept raw;
/// the engine canonicalizes it at its own boundary.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Song {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub chords: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<f64>,
}

impl Song {
    /// The song's distinct chords in canonical form. Chord strings
    /// that fail the grammar are skipped; they never poison the song.
    pub fn canonical_chords(&self, theory: &Theory) -> BTreeSet<String> {
        self.chords
            .iter()
            .filter_map(|raw| theory.normalize(raw))
            .collect()
    }
}

/// Loads a JSON array of songs.
pub fn load_songs(path: &Path) -> Result<Vec<Song>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read song catalog: {:?}", path))?;
    let songs: Vec<Song> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse song catalog: {:?}", path))?;
    info!("Loaded {} songs from {:?}", songs.len(), path);
    Ok(songs)
}

/// Difficulty estimate for songs that ship without one, from the
/// distinct chord count: up to 4 chords is beginner territory, up to
/// 6 intermediate, anything beyond that advanced.
pub fn difficulty_for_chord_count(distinct_chords: usize) -> f64 {
    if distinct_chords <= 4 {
        1.0
    } else if distinct_chords <= 6 {
        2.0
    } else {
        3.0
    }
}
