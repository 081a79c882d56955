// src/math/geometry/polygon/core.rs

use crate::math::{error::*, types::Bounds2D, types::Point, utils::ring::next_index};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geschlossene Kontur als Sequenz von Vertices.
///
/// Der Ring ist implizit geschlossen: der letzte Vertex ist mit dem ersten
/// verbunden, ein doppelter Schlusspunkt wird nicht gespeichert. Die
/// Umlaufrichtung ist nicht normalisiert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Erstellt ein Polygon aus mindestens 3 endlichen Vertices.
    /// Ein expliziter Schlusspunkt (letzter == erster) wird entfernt.
    pub fn new(mut vertices: Vec<Point>) -> MathResult<Self> {
        if vertices.len() > 3 {
            if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
                if first.coincides_with(last) {
                    vertices.pop();
                }
            }
        }

        if vertices.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }

        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(MathError::NonFiniteCoordinate { index });
        }

        Ok(Self { vertices })
    }

    /// Gibt einen Slice der Vertices zurück.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    /// Anzahl der Vertices (ohne Schlusspunkt).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Alle Kanten einschließlich der Schlusskante.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[next_index(i, n)]))
    }

    /// Berechnet die Bounding Box des Polygons.
    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.vertices.iter().copied())
    }

    /// Arithmetischer Mittelpunkt der Vertices (nicht der Flächenschwerpunkt).
    pub fn centroid(&self) -> Point {
        let n = self.vertices.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
        Point::new(sx / n, sy / n)
    }

    /// Kehrt die Umlaufrichtung um.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Gleicher Ring, evtl. mit anderem Startvertex (gleiche Richtung, exakte Koordinaten).
    pub fn same_cycle_as(&self, other: &Polygon) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        (0..n).any(|offset| {
            (0..n).all(|k| {
                self.vertices[k].coincides_with(&other.vertices[(k + offset) % n])
            })
        })
    }

    /// Konvertierung für Konsumenten aus dem `geo`-Ökosystem (z.B. Rasterisierung).
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: Vec<geo::Coord<f64>> =
            self.vertices.iter().copied().map(geo::Coord::from).collect();
        geo::Polygon::new(geo::LineString::new(exterior), vec![])
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = MathError;

    fn try_from(vertices: Vec<Point>) -> MathResult<Self> {
        Polygon::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon[{} vertices:", self.vertices.len())?;
        for v in &self.vertices {
            write!(f, " ({:.3}, {:.3})", v.x, v.y)?;
        }
        write!(f, "]")
    }
}
