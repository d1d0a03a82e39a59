/// The closed chord suffix vocabulary, canonical tokens only.
/// Bare major is the empty token.
///
/// Membership in this list is what makes a chord symbol valid;
/// anything outside it is rejected by the grammar rather than
/// guessed at.
pub const SUFFIXES: &[&str] = &[
    "", "m", "5", "6", "m6", "7", "maj7", "m7", "m7b5", "dim", "dim7", "aug", "sus2", "sus4",
    "7sus4", "add9", "9", "m9", "maj9", "11", "13", "7b9", "7#9",
];

/// Alternative suffix spellings folded to their canonical token.
/// Folding matches the whole suffix fragment, never a prefix of it,
/// so "maj7" is untouched by the "maj" entry.
pub const SUFFIX_SYNONYMS: &[(&str, &str)] = &[
    ("maj", ""),
    ("M", ""),
    ("min", "m"),
    ("-", "m"),
    ("M7", "maj7"),
    ("Δ", "maj7"),
    ("Δ7", "maj7"),
    ("min7", "m7"),
    ("-7", "m7"),
    ("min9", "m9"),
    ("M9", "maj9"),
    ("°", "dim"),
    ("o", "dim"),
    ("+", "aug"),
    ("sus", "sus4"),
    ("dom7", "7"),
];
