// src/annotation/mod.rs

// Kontur-Bearbeitung für Annotation-Strukturen: Stift- und Pinselstriche
// werden über den Boolean-Merge mit der aktiven Kontur verrechnet.
pub mod brush;
pub mod config;
pub mod editor;
pub mod error;
pub mod ids;
pub mod stroke;
pub mod structure;

pub use brush::{brush_path, brush_stamp};
pub use config::EditorConfig;
pub use editor::{ContourEditor, EditOutcome};
pub use error::{EditError, EditResult};
pub use ids::{ContourId, SliceIndex, StructureId, StructureIdAllocator};
pub use stroke::StrokeBuffer;
pub use structure::{Color, Structure, StructureRecord};
