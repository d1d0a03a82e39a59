use serde::Serialize;
use tracing::debug;

use crate::theory::{semitones_up, ChordSymbol, Theory};

use super::shapes::{ChordShape, ShapeLibrary};

/// Open-string pitch classes in standard tuning, low E to high e.
pub const STANDARD_TUNING_PCS: [u8; 6] = [4, 9, 2, 7, 11, 4];

/// Realized shapes whose lowest fretted position lies above this are
/// re-based so the diagram window starts at `base_fret`.
const OPEN_POSITION_MAX_FRET: i8 = 4;

/// A barre in a realized diagram, at a displayed fret number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Barre {
    pub fret: u8,
    pub from_string: u8,
    pub to_string: u8,
}

/// A display-ready fretboard diagram.
///
/// `frets` follow chart conventions: -1 muted, 0 open, otherwise a
/// fret number counted from `base_fret` (absolute when `base_fret`
/// is 1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChordDiagram {
    pub label: String,
    pub voicing: &'static str,
    pub frets: [i8; 6],
    pub fingers: [u8; 6],
    pub base_fret: u8,
    pub barres: Vec<Barre>,
}

impl ShapeLibrary {
    /// Realizes every registered shape for the symbol's suffix.
    ///
    /// Returns `None` when the suffix has no shape templates; that is
    /// the "not generatable" outcome, not an error. A slash bass does
    /// not change the grip, only the label.
    pub fn diagrams(&self, symbol: &ChordSymbol) -> Option<Vec<ChordDiagram>> {
        let shapes = match self.shapes_for(&symbol.suffix) {
            Some(shapes) => shapes,
            None => {
                debug!(
                    "No shape templates registered for suffix '{}'",
                    symbol.suffix
                );
                return None;
            }
        };
        Some(shapes.iter().map(|shape| realize(shape, symbol)).collect())
    }

    /// Parses `raw` and realizes its diagrams; invalid chord text
    /// yields `None` just like an unsupported suffix.
    pub fn diagrams_for(&self, theory: &Theory, raw: &str) -> Option<Vec<ChordDiagram>> {
        let symbol = theory.parse(raw).ok()?;
        self.diagrams(&symbol)
    }
}

fn realize(shape: &ChordShape, symbol: &ChordSymbol) -> ChordDiagram {
    let open_pc = STANDARD_TUNING_PCS[shape.root_string as usize];
    let offset = semitones_up(open_pc, symbol.root.pc()) as i8;

    let absolute = shape.frets.map(|fret| if fret < 0 { -1 } else { fret + offset });

    // Lowest fretted (non-open) position decides the display window.
    let min_fretted = absolute.iter().copied().filter(|fret| *fret > 0).min();
    let (base_fret, frets) = match min_fretted {
        Some(min) if min > OPEN_POSITION_MAX_FRET => (
            min as u8,
            absolute.map(|fret| if fret < 0 { -1 } else { fret - (min - 1) }),
        ),
        _ => (1, absolute),
    };

    // At the open position the barre strings ring open, so the barre
    // only exists once the shape has moved up the neck.
    let barres = match shape.barre {
        Some(span) if offset != 0 => vec![Barre {
            fret: frets[shape.root_string as usize] as u8,
            from_string: span.from_string,
            to_string: span.to_string,
        }],
        _ => Vec::new(),
    };

    ChordDiagram {
        label: symbol.canonical(),
        voicing: shape.name,
        frets,
        fingers: shape.fingers,
        base_fret,
        barres,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::Root;

    fn diagrams(raw: &str) -> Vec<ChordDiagram> {
        ShapeLibrary::builtin()
            .diagrams_for(Theory::builtin(), raw)
            .unwrap_or_else(|| panic!("'{}' should be generatable", raw))
    }

    fn e_shape(raw: &str) -> ChordDiagram {
        diagrams(raw)
            .into_iter()
            .find(|d| d.voicing == "E-shape")
            .unwrap_or_else(|| panic!("'{}' has no E-shape", raw))
    }

    fn a_shape(raw: &str) -> ChordDiagram {
        diagrams(raw)
            .into_iter()
            .find(|d| d.voicing == "A-shape")
            .unwrap_or_else(|| panic!("'{}' has no A-shape", raw))
    }

    // ===== Offsets =====

    #[test]
    fn open_e_major_realizes_at_offset_zero() {
        let diagram = e_shape("E");
        assert_eq!(diagram.frets, [0, 2, 2, 1, 0, 0]);
        assert_eq!(diagram.base_fret, 1);
        assert!(diagram.barres.is_empty());
    }

    #[test]
    fn g_major_sits_three_frets_up_the_e_shape() {
        let diagram = e_shape("G");
        assert_eq!(diagram.frets, [3, 5, 5, 4, 3, 3]);
        assert_eq!(diagram.base_fret, 1);
        assert_eq!(
            diagram.barres,
            vec![Barre {
                fret: 3,
                from_string: 0,
                to_string: 5
            }]
        );
    }

    #[test]
    fn b_major_uses_the_a_shape_at_the_second_fret() {
        let diagram = a_shape("B");
        assert_eq!(diagram.frets, [-1, 2, 4, 4, 4, 2]);
        assert_eq!(diagram.base_fret, 1);
        assert_eq!(
            diagram.barres,
            vec![Barre {
                fret: 2,
                from_string: 1,
                to_string: 5
            }]
        );
    }

    #[test]
    fn muted_strings_stay_muted_at_any_offset() {
        assert_eq!(a_shape("A5").frets, [-1, 0, 2, 2, -1, -1]);
        assert_eq!(a_shape("D#5").frets, [-1, 1, 3, 3, -1, -1]);

        let dim7 = diagrams("Fdim7");
        assert_eq!(dim7[0].frets, [-1, -1, 3, 4, 3, 4]);

        // Re-basing must not drag muted strings into the window.
        let add9 = diagrams("Gadd9");
        assert_eq!(add9[0].base_fret, 10);
        assert_eq!(add9[0].frets, [-1, 1, 3, 5, 3, -1]);
    }

    // ===== Re-basing =====

    #[test]
    fn high_positions_rebase_to_a_compact_window() {
        // D# on the A-shape sits at fret 6: x-6-8-8-8-6.
        let diagram = a_shape("D#");
        assert_eq!(diagram.base_fret, 6);
        assert_eq!(diagram.frets, [-1, 1, 3, 3, 3, 1]);
        assert_eq!(
            diagram.barres,
            vec![Barre {
                fret: 1,
                from_string: 1,
                to_string: 5
            }]
        );
    }

    #[test]
    fn rebase_preserves_absolute_positions() {
        let diagram = a_shape("D#");
        let absolute: Vec<i8> = diagram
            .frets
            .iter()
            .map(|f| {
                if *f < 0 {
                    -1
                } else {
                    f + (diagram.base_fret as i8 - 1)
                }
            })
            .collect();
        assert_eq!(absolute, vec![-1, 6, 8, 8, 8, 6]);
    }

    #[test]
    fn positions_at_the_threshold_stay_absolute() {
        // G# major on the E-shape starts at fret 4, inside the open window.
        let diagram = e_shape("G#");
        assert_eq!(diagram.base_fret, 1);
        assert_eq!(diagram.frets, [4, 6, 6, 5, 4, 4]);
    }

    // ===== Barre rule =====

    #[test]
    fn open_position_suppresses_the_declared_barre() {
        assert!(e_shape("E").barres.is_empty());
        assert!(a_shape("A").barres.is_empty());
        assert!(e_shape("Em7").barres.is_empty());
    }

    #[test]
    fn shapes_without_a_barre_never_annotate_one() {
        for diagram in diagrams("Bdim") {
            assert!(diagram.barres.is_empty());
        }
        for diagram in diagrams("F#5") {
            assert!(diagram.barres.is_empty());
        }
    }

    // ===== Not generatable =====

    #[test]
    fn unsupported_suffixes_are_not_generatable() {
        let library = ShapeLibrary::builtin();
        let theory = Theory::builtin();
        for raw in ["C11", "G13", "A7b9", "E7#9"] {
            assert!(theory.is_valid(raw), "'{}' should parse", raw);
            assert_eq!(library.diagrams_for(theory, raw), None);
        }
    }

    #[test]
    fn invalid_text_is_not_generatable() {
        let library = ShapeLibrary::builtin();
        assert_eq!(library.diagrams_for(Theory::builtin(), "Hmaj7"), None);
        assert_eq!(library.diagrams_for(Theory::builtin(), ""), None);
    }

    // ===== Labels =====

    #[test]
    fn labels_carry_the_canonical_symbol() {
        let diagram = a_shape("Bbm");
        assert_eq!(diagram.label, "A#m");
        let slash = ShapeLibrary::builtin()
            .diagrams_for(Theory::builtin(), "C/G")
            .unwrap();
        assert!(slash.iter().all(|d| d.label == "C/G"));
    }

    #[test]
    fn every_root_is_generatable_for_supported_suffixes() {
        let library = ShapeLibrary::builtin();
        let suffixes: Vec<String> = library
            .supported_suffixes()
            .map(|s| s.to_string())
            .collect();
        for root in Root::ALL {
            for suffix in &suffixes {
                let raw = format!("{}{}", root, suffix);
                let diagrams = library
                    .diagrams_for(Theory::builtin(), &raw)
                    .unwrap_or_else(|| panic!("'{}' should be generatable", raw));
                assert!(!diagrams.is_empty());
            }
        }
    }
}
