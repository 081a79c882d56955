// src/math/geometry/polygon/operations/boolean/error.rs
use thiserror::Error;

/// Fehler des Kontur-Merges. Keiner davon ist für die Editiersitzung fatal:
/// die bearbeitete Kontur bleibt unverändert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Null oder eine ungerade Anzahl von Schnittpunkten.
    #[error("Infeasible crossing count: {count} (must be even and non-zero)")]
    InfeasibleCrossing { count: usize },

    /// Kein Gegenstück mit passenden Endpunkten beim direkten Zusammensetzen.
    #[error("No joint fragment connects crossings {start_id} and {end_id}")]
    JoinNotFound { start_id: usize, end_id: usize },

    /// Auch die Fallback-Suche hat keine geschlossene Schleife gefunden.
    #[error("No closed hull candidate found among {fragments} fragments")]
    NoHullCandidate { fragments: usize },

    /// Ergebnis mit weniger als 3 Vertices oder ohne Fläche.
    #[error("Merged polygon is degenerate ({vertices} vertices)")]
    DegenerateResult { vertices: usize },

    /// Verletzte interne Invariante.
    #[error("Unexpected geometry fault: {operation}")]
    UnexpectedGeometryFault { operation: String },

    /// `merge` ohne erfolgreiches `initialize`.
    #[error("Merge requested before a successful initialization")]
    NotInitialized,

    #[error("Input polygon {side} has {actual} vertices, at least 3 required")]
    InsufficientVertices { side: char, actual: usize },

    #[error("Unknown boolean operation '{0}' (expected 'union' or 'diff')")]
    UnknownOperation(String),
}

pub type MergeResult<T> = Result<T, MergeError>;
