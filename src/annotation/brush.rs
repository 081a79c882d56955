// src/annotation/brush.rs

use crate::math::types::Point;
use crate::math::utils::constants::{PI, TAU};

/// Mindest- und Höchstzahl der Ecken eines Pinselabdrucks.
const MIN_SIDES: usize = 10;
const MAX_SIDES: usize = 30;

/// Größter Abstand zwischen zwei interpolierten Pinselmittelpunkten.
const PATH_SPACING: f64 = 5.0;
/// Höchstens so viele Abdrücke pro Mausbewegung.
const MAX_PATH_STAMPS: usize = 5;

/// Anzahl der Ecken für einen Pinsel mit Radius `size`: etwa der halbe
/// Umfang, begrenzt auf 10..=30.
pub fn brush_sides(size: f64) -> usize {
    let sides = (size * PI).floor();
    if sides.is_nan() || sides < MIN_SIDES as f64 {
        MIN_SIDES
    } else if sides > MAX_SIDES as f64 {
        MAX_SIDES
    } else {
        sides as usize
    }
}

/// Regelmäßiges Polygon mit Radius `size` um `center`, gegen den
/// Uhrzeigersinn, erster Vertex auf der positiven x-Achse.
pub fn brush_stamp(center: Point, size: f64) -> Vec<Point> {
    let sides = brush_sides(size);
    (0..sides)
        .map(|k| {
            let angle = TAU * k as f64 / sides as f64;
            Point::with_z(
                center.x + size * angle.cos(),
                center.y + size * angle.sin(),
                center.z,
            )
        })
        .collect()
}

/// Zwischenmittelpunkte von `prev` nach `point` (ohne `prev`, mit `point`).
///
/// Je angefangene 5 Einheiten ein Abdruck, höchstens 5. Bei
/// unverändertem Punkt ist das Ergebnis leer.
pub fn brush_path(prev: Point, point: Point) -> Vec<Point> {
    let distance = prev.distance_to(point);
    let steps = ((distance / PATH_SPACING).ceil() as usize).min(MAX_PATH_STAMPS);

    (1..=steps)
        .map(|k| prev + (point - prev) * (k as f64 / steps as f64))
        .collect()
}
