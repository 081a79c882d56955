// src/math/geometry/polygon/mod.rs

// Deklaration der Untermodule für Polygon-spezifische Funktionalität
pub mod core; // Enthält die Polygon-Struktur selbst
pub mod operations; // Schnitt, Containment, Crossover-Bereinigung, Boolean-Merge
pub mod properties; // Enthält den PolygonProperties-Trait

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Polygon-Elemente
pub use self::core::Polygon;
pub use self::properties::{Orientation, PolygonProperties};

pub use self::operations::{
    boolean::{BooleanOperation, BooleanOperations, MergeError, MergeResult, PolygonBoolean},
    containment::point_in_polygon,
    crossover::{has_inline_crossover, remove_inline_crossover},
    intersection::segment_intersection,
};
