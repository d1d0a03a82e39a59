//! Fretwise chord engine
//!
//! Guitar chord theory as a library: a closed chord-symbol grammar
//! with sharp-spelled canonical forms, a vocabulary generator,
//! moveable-shape fretboard diagrams, and a deterministic
//! "which chord should I learn next" recommendation engine over a
//! song catalog.
//!
//! All scoring and parsing is pure; persistence and timestamps live
//! behind [`recommend::RecommendationStore`] and the stateful entry
//! point.

pub mod catalog;
pub mod config;
pub mod diagrams;
pub mod recommend;
pub mod theory;

// Re-export commonly used types for convenience
pub use catalog::Song;
pub use diagrams::{ChordDiagram, ShapeLibrary};
pub use recommend::{RecommendationOutcome, RecommendationStore};
pub use theory::{ChordSymbol, Theory};
