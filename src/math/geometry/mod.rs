// src/math/geometry/mod.rs

pub mod polygon;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen,
// falls man nicht das gesamte `math::prelude` importieren möchte.
pub use self::polygon::{
    BooleanOperation, BooleanOperations, MergeError, MergeResult, Orientation, Polygon,
    PolygonBoolean, PolygonProperties,
};
