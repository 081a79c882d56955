// src/annotation/error.rs

use super::ids::{ContourId, SliceIndex};
use crate::math::error::MathError;
use crate::math::geometry::polygon::operations::boolean::MergeError;
use thiserror::Error;

/// Fehler beim Editieren von Konturen.
///
/// Ein fehlgeschlagener Merge (`Merge`) lässt die bestehende Kontur
/// unverändert, die Sitzung kann normal weiterlaufen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Editing is not active")]
    NotEditable,

    #[error("Contour {contour} does not exist on slice {slice}")]
    UnknownContour {
        slice: SliceIndex,
        contour: ContourId,
    },

    #[error("Stroke has {points} points, more than 2 are required")]
    StrokeTooShort { points: usize },

    #[error("Invalid structure record: {message}")]
    InvalidRecord { message: String },

    #[error("Contour merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("Geometry error: {0}")]
    Math(#[from] MathError),
}

pub type EditResult<T> = Result<T, EditError>;
