// src/annotation/config.rs

use crate::math::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};

/// Konfiguration der Kontur-Bearbeitung (Stift und Pinsel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Mindestabstand eines neuen Strichpunktes zu allen bisherigen Punkten.
    pub point_tolerance: f64,
    /// Mindestabstand zwischen zwei Pinselabdrücken.
    pub center_tolerance: f64,
    /// Ergebnisse mit kleinerer achsenparalleler Bounding-Box-Fläche löschen die Kontur.
    pub min_area: f64,
    /// Radius des Pinsels.
    pub brush_size: f64,
    pub min_brush_size: f64,
    pub max_brush_size: f64,
    /// Schrittweite für `increase_brush_size` / `decrease_brush_size`.
    pub brush_step: f64,
    /// z-Versatz neu registrierter Konturen (nur Zeichenreihenfolge).
    pub z_depth: f64,
    /// Selbstüberschneidungen eines Stiftstrichs vor dem Merge entfernen.
    pub simplify_strokes: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            point_tolerance: 0.1,
            center_tolerance: 0.1,
            min_area: 0.1,
            brush_size: 3.0,
            min_brush_size: 0.1,
            max_brush_size: 50.0,
            brush_step: 0.5,
            z_depth: 0.0001,
            simplify_strokes: true,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point_tolerance(mut self, tolerance: f64) -> Self {
        self.point_tolerance = tolerance;
        self
    }

    pub fn with_center_tolerance(mut self, tolerance: f64) -> Self {
        self.center_tolerance = tolerance;
        self
    }

    pub fn with_min_area(mut self, area: f64) -> Self {
        self.min_area = area;
        self
    }

    pub fn with_brush_size(mut self, size: f64) -> Self {
        self.brush_size = size;
        self
    }

    pub fn with_brush_limits(mut self, min: f64, max: f64) -> Self {
        self.min_brush_size = min;
        self.max_brush_size = max;
        self
    }

    pub fn with_brush_step(mut self, step: f64) -> Self {
        self.brush_step = step;
        self
    }

    pub fn with_z_depth(mut self, z_depth: f64) -> Self {
        self.z_depth = z_depth;
        self
    }

    pub fn with_stroke_simplification(mut self, enabled: bool) -> Self {
        self.simplify_strokes = enabled;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        let finite = [
            self.point_tolerance,
            self.center_tolerance,
            self.min_area,
            self.brush_size,
            self.min_brush_size,
            self.max_brush_size,
            self.brush_step,
            self.z_depth,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidConfiguration {
                message: "Editor configuration values must be finite.".to_string(),
            });
        }
        if self.point_tolerance < 0.0 || self.center_tolerance < 0.0 || self.min_area < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Tolerances and minimum area must not be negative.".to_string(),
            });
        }
        if self.min_brush_size <= 0.0 || self.min_brush_size > self.max_brush_size {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Brush size limits must satisfy 0 < min <= max, got {}..{}.",
                    self.min_brush_size, self.max_brush_size
                ),
            });
        }
        if !(self.min_brush_size..=self.max_brush_size).contains(&self.brush_size) {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Brush size {} outside of {}..{}.",
                    self.brush_size, self.min_brush_size, self.max_brush_size
                ),
            });
        }
        if self.brush_step <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Brush step must be greater than 0.".to_string(),
            });
        }
        Ok(())
    }
}
