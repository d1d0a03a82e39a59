//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use fretwise_engine::Song;

pub fn make_song(id: &str, chords: &[&str]) -> Song {
    Song {
        id: id.to_string(),
        title: None,
        artist: None,
        genre: None,
        tags: vec![],
        chords: chords.iter().map(|c| c.to_string()).collect(),
        difficulty: None,
    }
}

pub fn make_rated_song(id: &str, chords: &[&str], difficulty: f64) -> Song {
    Song {
        difficulty: Some(difficulty),
        ..make_song(id, chords)
    }
}

pub fn make_genre_song(id: &str, chords: &[&str], genre: &str, difficulty: f64) -> Song {
    Song {
        genre: Some(genre.to_string()),
        ..make_rated_song(id, chords, difficulty)
    }
}

/// A small campfire-repertoire catalog used by the flow tests.
pub fn campfire_catalog_json() -> &'static str {
    r#"
    [
        { "id": "horse",   "title": "A Horse With No Name", "genre": "Rock", "difficulty": 1,
          "chords": ["Em", "G", "C", "D"] },
        { "id": "knock",   "title": "Knockin' On Heaven's Door", "genre": "Folk", "difficulty": 1,
          "chords": ["G", "D", "Am"] },
        { "id": "wonder",  "title": "Wonderwall", "genre": "Rock", "difficulty": 2,
          "chords": ["Em7", "G", "Dsus4", "A7sus4", "C", "D"] },
        { "id": "stand",   "title": "Stand By Me", "genre": "Rock", "difficulty": 1,
          "chords": ["G", "C", "Am", "D"] },
        { "id": "mad",     "title": "Mad World", "genre": "Rock", "difficulty": 2,
          "chords": ["Em", "C", "G", "D"] },
        { "id": "hey",     "title": "Hey There Delilah", "genre": "Pop", "difficulty": 2,
          "chords": ["F", "C", "Am", "G"] },
        { "id": "riptide", "title": "Riptide", "genre": "Pop", "difficulty": 1,
          "chords": ["Am", "G", "C", "F"] }
    ]
    "#
}
