mod generator;
mod shapes;

pub use generator::{Barre, ChordDiagram, STANDARD_TUNING_PCS};
pub use shapes::{BarreSpan, ChordShape, ShapeLibrary, BUILTIN_SHAPES};
