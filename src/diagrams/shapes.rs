use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::BTreeMap;

/// Strings covered by a barre, inclusive, 0 = low E.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BarreSpan {
    pub from_string: u8,
    pub to_string: u8,
}

/// A moveable chord template following the CAGED convention.
///
/// `frets` are offsets from the shape's root position (-1 = muted);
/// the string at `root_string` always sits at offset 0 and sounds the
/// root, so sliding the whole shape up N frets transposes the chord
/// by N semitones. A declared barre always lies on offset 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChordShape {
    pub name: &'static str,
    pub root_string: u8,
    pub frets: [i8; 6],
    pub fingers: [u8; 6],
    pub barre: Option<BarreSpan>,
}

const fn shape(
    name: &'static str,
    root_string: u8,
    frets: [i8; 6],
    fingers: [u8; 6],
    barre: Option<BarreSpan>,
) -> ChordShape {
    ChordShape {
        name,
        root_string,
        frets,
        fingers,
        barre,
    }
}

const fn barre(from_string: u8, to_string: u8) -> Option<BarreSpan> {
    Some(BarreSpan {
        from_string,
        to_string,
    })
}

/// Builtin moveable shapes keyed by canonical suffix token.
///
/// Most suffixes carry an E-shape (root on string 0) and an A-shape
/// (root on string 1); the colour chords use whichever single grip
/// keeps every offset non-negative, some of them rooted on the D
/// string.
pub const BUILTIN_SHAPES: &[(&str, &[ChordShape])] = &[
    (
        "",
        &[
            shape("E-shape", 0, [0, 2, 2, 1, 0, 0], [1, 3, 4, 2, 1, 1], barre(0, 5)),
            shape("A-shape", 1, [-1, 0, 2, 2, 2, 0], [0, 1, 3, 3, 3, 1], barre(1, 5)),
        ],
    ),
    (
        "m",
        &[
            shape("E-shape", 0, [0, 2, 2, 0, 0, 0], [1, 3, 4, 1, 1, 1], barre(0, 5)),
            shape("A-shape", 1, [-1, 0, 2, 2, 1, 0], [0, 1, 3, 4, 2, 1], barre(1, 5)),
        ],
    ),
    (
        "5",
        &[
            shape("E-shape", 0, [0, 2, 2, -1, -1, -1], [1, 3, 4, 0, 0, 0], None),
            shape("A-shape", 1, [-1, 0, 2, 2, -1, -1], [0, 1, 3, 4, 0, 0], None),
        ],
    ),
    (
        "6",
        &[shape("A-shape", 1, [-1, 0, 2, 2, 2, 2], [0, 1, 3, 3, 3, 3], barre(1, 5))],
    ),
    (
        "m6",
        &[shape("E-shape", 0, [0, 2, 2, 0, 2, 0], [1, 2, 3, 1, 4, 1], barre(0, 5))],
    ),
    (
        "7",
        &[
            shape("E-shape", 0, [0, 2, 0, 1, 0, 0], [1, 3, 1, 2, 1, 1], barre(0, 5)),
            shape("A-shape", 1, [-1, 0, 2, 0, 2, 0], [0, 1, 3, 1, 4, 1], barre(1, 5)),
        ],
    ),
    (
        "maj7",
        &[
            shape("E-shape", 0, [0, 2, 1, 1, 0, 0], [1, 4, 2, 3, 1, 1], barre(0, 5)),
            shape("A-shape", 1, [-1, 0, 2, 1, 2, 0], [0, 1, 3, 2, 4, 1], barre(1, 5)),
        ],
    ),
    (
        "m7",
        &[
            shape("E-shape", 0, [0, 2, 0, 0, 0, 0], [1, 3, 1, 1, 1, 1], barre(0, 5)),
            shape("A-shape", 1, [-1, 0, 2, 0, 1, 0], [0, 1, 3, 1, 2, 1], barre(1, 5)),
        ],
    ),
    (
        "m7b5",
        &[shape("A-shape", 1, [-1, 0, 1, 0, 1, -1], [0, 1, 3, 2, 4, 0], None)],
    ),
    (
        "dim",
        &[shape("A-shape", 1, [-1, 0, 1, 2, 1, -1], [0, 1, 2, 4, 3, 0], None)],
    ),
    (
        "dim7",
        &[shape("D-shape", 2, [-1, -1, 0, 1, 0, 1], [0, 0, 1, 3, 2, 4], None)],
    ),
    (
        "aug",
        &[shape("D-shape", 2, [-1, -1, 0, 3, 3, 2], [0, 0, 1, 3, 4, 2], None)],
    ),
    (
        "sus2",
        &[shape("A-shape", 1, [-1, 0, 2, 2, 0, 0], [0, 1, 3, 4, 1, 1], barre(1, 5))],
    ),
    (
        "sus4",
        &[
            shape("E-shape", 0, [0, 2, 2, 2, 0, 0], [1, 2, 3, 4, 1, 1], barre(0, 5)),
            shape("A-shape", 1, [-1, 0, 2, 2, 3, 0], [0, 1, 2, 3, 4, 1], barre(1, 5)),
        ],
    ),
    (
        "7sus4",
        &[
            shape("E-shape", 0, [0, 2, 0, 2, 0, 0], [1, 3, 1, 4, 1, 1], barre(0, 5)),
            shape("A-shape", 1, [-1, 0, 2, 0, 3, 0], [0, 1, 3, 1, 4, 1], barre(1, 5)),
        ],
    ),
    (
        "add9",
        &[shape("A-shape", 1, [-1, 0, 2, 4, 2, -1], [0, 1, 2, 4, 3, 0], None)],
    ),
    (
        "9",
        &[shape("E-shape", 0, [0, 2, 0, 1, 0, 2], [1, 3, 1, 2, 1, 4], barre(0, 5))],
    ),
    (
        "m9",
        &[shape("E-shape", 0, [0, 2, 0, 0, 0, 2], [1, 3, 1, 1, 1, 4], barre(0, 5))],
    ),
    (
        "maj9",
        &[shape("A-shape", 1, [-1, 0, 2, 1, 0, 0], [0, 1, 3, 2, 1, 1], barre(1, 5))],
    ),
];

/// Shape templates keyed by suffix. Immutable once built; the builtin
/// library is shared, custom ones can be injected alongside a custom
/// [`crate::theory::Theory`].
#[derive(Clone, Debug, Default)]
pub struct ShapeLibrary {
    shapes: BTreeMap<String, Vec<ChordShape>>,
}

lazy_static! {
    static ref BUILTIN_LIBRARY: ShapeLibrary = ShapeLibrary::new(
        BUILTIN_SHAPES
            .iter()
            .map(|(suffix, shapes)| (suffix.to_string(), shapes.to_vec())),
    );
}

impl ShapeLibrary {
    pub fn new<I>(entries: I) -> ShapeLibrary
    where
        I: IntoIterator<Item = (String, Vec<ChordShape>)>,
    {
        ShapeLibrary {
            shapes: entries.into_iter().collect(),
        }
    }

    /// The process-wide default shape tables.
    pub fn builtin() -> &'static ShapeLibrary {
        &BUILTIN_LIBRARY
    }

    /// The registered templates for a canonical suffix token, `None`
    /// for suffixes that have no diagrams.
    pub fn shapes_for(&self, suffix: &str) -> Option<&[ChordShape]> {
        self.shapes
            .get(suffix)
            .map(|shapes| shapes.as_slice())
            .filter(|shapes| !shapes.is_empty())
    }

    /// Suffix tokens that can be rendered, in lexicographic order.
    pub fn supported_suffixes(&self) -> impl Iterator<Item = &str> {
        self.shapes
            .iter()
            .filter(|(_, shapes)| !shapes.is_empty())
            .map(|(suffix, _)| suffix.as_str())
    }
}
