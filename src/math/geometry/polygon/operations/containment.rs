// src/math/geometry/polygon/operations/containment.rs

use crate::math::types::Point;

/// Even-Odd Ray-Casting: liegt `point` innerhalb des (implizit geschlossenen) Rings?
///
/// Für Punkte exakt auf dem Rand ist das Ergebnis nicht symmetrisch
/// (`y <= max` aber `y > min`, `x <= xinters`). Die Fragment-Paritäten im
/// Merge hängen an genau diesem Verhalten, es darf nicht "korrigiert" werden.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut p1 = polygon[0];

    for i in 0..=n {
        let p2 = polygon[i % n];
        if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
            // p1.y == p2.y kann hier nicht auftreten (y > min und y <= max)
            let crosses = if p1.x == p2.x {
                true
            } else {
                let xinters = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
                x <= xinters
            };
            if crosses {
                inside = !inside;
            }
        }
        p1 = p2;
    }

    inside
}
