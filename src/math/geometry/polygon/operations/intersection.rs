// src/math/geometry/polygon/operations/intersection.rs

use crate::math::types::Point;

/// Nenner der parametrischen Geradenform für die Segmente p1-p2 und p3-p4.
fn denominator(p1: Point, p2: Point, p3: Point, p4: Point) -> f64 {
    (p2.x - p1.x) * (p4.y - p3.y) - (p2.y - p1.y) * (p4.x - p3.x)
}

/// Prüft, ob die Segmente p1-p2 und p3-p4 parallel (oder kollinear) sind.
/// Der Nenner wird exakt mit Null verglichen.
pub fn segments_parallel(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    denominator(p1, p2, p3, p4) == 0.0
}

/// Schnittpunkt der Segmente A = p1-p2 und B = p3-p4.
///
/// Beide Parameter müssen im halboffenen Intervall `[0, 1)` liegen: ein
/// Schnitt genau im Endpunkt eines Segments wird nur dem Segment gezählt,
/// das dort beginnt. So wird ein Schnitt in einem gemeinsamen Vertex zweier
/// aufeinanderfolgender Kanten nicht doppelt gefunden.
///
/// Der Punkt übernimmt die z-Tiefe von `p1`.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let d = denominator(p1, p2, p3, p4);
    if d == 0.0 {
        return None; // Parallel oder kollinear
    }

    let u = ((p3.x - p1.x) * (p4.y - p3.y) - (p3.y - p1.y) * (p4.x - p3.x)) / d;
    let v = ((p3.x - p1.x) * (p2.y - p1.y) - (p3.y - p1.y) * (p2.x - p1.x)) / d;

    if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
        return None;
    }

    Some(Point::with_z(
        p1.x + u * (p2.x - p1.x),
        p1.y + u * (p2.y - p1.y),
        p1.z,
    ))
}
