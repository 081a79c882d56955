// src/math/geometry/polygon/properties.rs

use crate::math::geometry::polygon::core::Polygon;
use crate::math::geometry::polygon::operations::containment::point_in_polygon;
use crate::math::types::Point;

/// Trait für geometrische Eigenschaften geschlossener Konturen.
pub trait PolygonProperties {
    /// Vorzeichenbehaftete Fläche (Shoelace). Positiv für Gegenuhrzeigersinn.
    fn signed_area(&self) -> f64;

    /// Fläche des Polygons (Betrag der Shoelace-Formel).
    fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Umfang einschließlich der Schlusskante.
    fn perimeter(&self) -> f64;

    /// Ray-Casting Test, siehe [`point_in_polygon`].
    fn contains_point(&self, point: Point) -> bool;

    /// Orientierung anhand des Vorzeichens der Fläche.
    fn orientation(&self) -> Orientation;

    /// Liegen alle Vertices auf einer Geraden (keine Fläche)?
    fn is_degenerate(&self) -> bool;
}

/// Gibt die Orientierung eines Polygons an.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear, // Alle Punkte liegen auf einer Linie
}

impl PolygonProperties for Polygon {
    fn signed_area(&self) -> f64 {
        signed_area(self.vertices())
    }

    fn perimeter(&self) -> f64 {
        self.edges().map(|(p1, p2)| p1.distance_to(p2)).sum()
    }

    fn contains_point(&self, point: Point) -> bool {
        point_in_polygon(point, self.vertices())
    }

    fn orientation(&self) -> Orientation {
        let area = self.signed_area();
        if area > 0.0 {
            Orientation::CounterClockwise
        } else if area < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    fn is_degenerate(&self) -> bool {
        is_collinear(self.vertices())
    }
}

/// Shoelace-Formel über einen implizit geschlossenen Ring.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let twice_area: f64 = (0..n)
        .map(|i| {
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            p1.x * p2.y - p2.x * p1.y
        })
        .sum();

    twice_area * 0.5
}

/// `true`, wenn alle Punkte exakt auf einer Geraden liegen (oder zusammenfallen).
pub fn is_collinear(points: &[Point]) -> bool {
    let Some(&origin) = points.first() else {
        return true;
    };
    let Some(&direction) = points.iter().find(|p| !p.coincides_with(&origin)) else {
        return true;
    };

    points.iter().all(|p| direction.cross(origin, *p) == 0.0)
}
