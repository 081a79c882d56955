// src/annotation/stroke.rs

use crate::math::geometry::polygon::operations::crossover::remove_inline_crossover;
use crate::math::types::Point;
use tracing::debug;

/// Zwischenspeicher für den gerade gezeichneten Strich.
#[derive(Debug, Clone, Default)]
pub struct StrokeBuffer {
    points: Vec<Point>,
    center: Option<Point>,
}

impl StrokeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen Punkt hinzu, sofern er von allen bisherigen Punkten
    /// mindestens `tolerance` entfernt ist. Gibt zurück, ob er übernommen wurde.
    pub fn add_point(&mut self, point: Point, tolerance: f64) -> bool {
        // Neueste Punkte zuerst: dort liegt ein Treffer am wahrscheinlichsten
        if self
            .points
            .iter()
            .rev()
            .any(|existing| existing.distance_to(point) < tolerance)
        {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ein Strich braucht mehr als 2 Punkte, um eine Fläche zu umschließen.
    pub fn has_valid_length(&self) -> bool {
        self.points.len() > 2
    }

    /// Entfernt Selbstüberschneidungen des Strichs.
    pub fn simplify(&mut self) {
        if self.points.len() < 4 {
            return;
        }
        let before = self.points.len();
        self.points = remove_inline_crossover(&self.points);
        if self.points.len() != before {
            debug!("Stroke simplified from {} to {} points", before, self.points.len());
        }
    }

    /// Letzter Pinselmittelpunkt.
    pub fn center(&self) -> Option<Point> {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = Some(center);
    }

    /// Ist `point` weit genug vom letzten Pinselmittelpunkt entfernt?
    /// Ohne vorherigen Mittelpunkt immer `true`.
    pub fn has_valid_center_distance(&self, point: Point, tolerance: f64) -> bool {
        self.center
            .is_none_or(|center| center.distance_to(point) >= tolerance)
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.center = None;
    }

    /// Gibt die Punkte heraus und leert den Puffer.
    pub fn take_points(&mut self) -> Vec<Point> {
        self.center = None;
        std::mem::take(&mut self.points)
    }
}
