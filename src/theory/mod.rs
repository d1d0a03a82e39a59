mod pitch;
mod suffix;
mod symbol;
mod vocabulary;

pub use pitch::{semitones_up, Root};
pub use suffix::{SUFFIXES, SUFFIX_SYNONYMS};
pub use symbol::{ChordSymbol, ParseChordError, Theory};
