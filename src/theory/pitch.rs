use std::fmt;

/// The twelve chromatic pitch classes, spelled with sharps.
///
/// Canonical chord text always uses these spellings. Flat spellings
/// (Db, Eb, Gb, Ab, Bb) and the theoretical ones (B#, Cb, E#, Fb) are
/// accepted on input and folded to their sharp equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Root {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Root {
    /// All roots in ascending chromatic order, starting from C.
    pub const ALL: [Root; 12] = [
        Root::C,
        Root::CSharp,
        Root::D,
        Root::DSharp,
        Root::E,
        Root::F,
        Root::FSharp,
        Root::G,
        Root::GSharp,
        Root::A,
        Root::ASharp,
        Root::B,
    ];

    /// Pitch class on the 12-entry chromatic ring, C = 0.
    pub fn pc(self) -> u8 {
        match self {
            Root::C => 0,
            Root::CSharp => 1,
            Root::D => 2,
            Root::DSharp => 3,
            Root::E => 4,
            Root::F => 5,
            Root::FSharp => 6,
            Root::G => 7,
            Root::GSharp => 8,
            Root::A => 9,
            Root::ASharp => 10,
            Root::B => 11,
        }
    }

    /// Inverse of [`Root::pc`], wrapping any integer onto the ring.
    pub fn from_pc(pc: i32) -> Root {
        Root::ALL[pc.rem_euclid(12) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Root::C => "C",
            Root::CSharp => "C#",
            Root::D => "D",
            Root::DSharp => "D#",
            Root::E => "E",
            Root::F => "F",
            Root::FSharp => "F#",
            Root::G => "G",
            Root::GSharp => "G#",
            Root::A => "A",
            Root::ASharp => "A#",
            Root::B => "B",
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semitone distance upwards from one pitch class to another,
/// always in 0..12.
pub fn semitones_up(from_pc: u8, to_pc: u8) -> u8 {
    (to_pc as i16 - from_pc as i16).rem_euclid(12) as u8
}

/// Accepted root spellings, two-character entries first so that
/// prefix matching is longest-match: "C#m7" must bind "C#", never
/// "C" + "#m7".
const ROOT_ALIASES: &[(&str, Root)] = &[
    ("C#", Root::CSharp),
    ("Db", Root::CSharp),
    ("D#", Root::DSharp),
    ("Eb", Root::DSharp),
    ("F#", Root::FSharp),
    ("Gb", Root::FSharp),
    ("G#", Root::GSharp),
    ("Ab", Root::GSharp),
    ("A#", Root::ASharp),
    ("Bb", Root::ASharp),
    ("B#", Root::C),
    ("E#", Root::F),
    ("Cb", Root::B),
    ("Fb", Root::E),
    ("C", Root::C),
    ("D", Root::D),
    ("E", Root::E),
    ("F", Root::F),
    ("G", Root::G),
    ("A", Root::A),
    ("B", Root::B),
];

/// Matches the longest root spelling at the start of `text`.
/// Returns the root and the number of bytes consumed.
pub(crate) fn match_root(text: &str) -> Option<(Root, usize)> {
    ROOT_ALIASES
        .iter()
        .find(|(alias, _)| text.starts_with(alias))
        .map(|(alias, root)| (*root, alias.len()))
}

/// Parses a root spelling that must cover the whole of `text`.
pub(crate) fn parse_root(text: &str) -> Option<Root> {
    match match_root(text) {
        Some((root, consumed)) if consumed == text.len() => Some(root),
        _ => None,
    }
}
