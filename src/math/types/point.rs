// src/math/types/point.rs
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Ein Konturpunkt in der Bildebene.
///
/// `z` ist nur ein Zeichen-Offset für die Darstellungsreihenfolge und fließt
/// in keine geometrische Berechnung ein.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Exakte Gleichheit der Lage in der Ebene (ohne Toleranz, `z` wird ignoriert).
    pub fn coincides_with(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// z-Komponente des Kreuzprodukts (self - origin) x (other - origin).
    pub fn cross(&self, origin: Point, other: Point) -> f64 {
        (self.x - origin.x) * (other.y - origin.y) - (self.y - origin.y) * (other.x - origin.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::with_z(self.x + rhs.x, self.y + rhs.y, self.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::with_z(self.x - rhs.x, self.y - rhs.y, self.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::with_z(self.x * factor, self.y * factor, self.z)
    }
}

// Conversion traits
impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::with_z(x, y, z)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::Coord { x: p.x, y: p.y }
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

/// Baut eine Punktliste aus (x, y)-Tupeln.
pub fn points_from_xy(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}
