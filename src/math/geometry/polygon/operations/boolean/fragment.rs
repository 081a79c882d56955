// src/math/geometry/polygon/operations/boolean/fragment.rs

use crate::math::types::Point;
use std::borrow::Cow;

/// Ein Schnittpunkt einer Kante von A mit einer Kante von B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingRecord {
    /// Fortlaufende Nummer in Fundreihenfolge.
    pub cp_idx: usize,
    pub point: Point,
    /// Index des Punktes in der verlängerten Vertex-Liste von A.
    pub i: usize,
    /// Index des Punktes in der verlängerten Vertex-Liste von B.
    pub j: usize,
}

impl CrossingRecord {
    pub(crate) fn new(cp_idx: usize, point: Point) -> Self {
        Self {
            cp_idx,
            point,
            i: 0,
            j: 0,
        }
    }

    /// Vertex-Index im angegebenen Polygon.
    pub fn index_in(&self, side: Side) -> usize {
        match side {
            Side::A => self.i,
            Side::B => self.j,
        }
    }

    pub(crate) fn set_index_in(&mut self, side: Side, index: usize) {
        match side {
            Side::A => self.i = index,
            Side::B => self.j = index,
        }
    }
}

/// Welches der beiden Eingabepolygone gemeint ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Die bestehende Kontur.
    A,
    /// Der neue Strich.
    B,
}

/// Zusammenhängendes Stück eines Polygons von einem Schnittpunkt zum nächsten
/// (beide Endpunkte enthalten).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub points: Vec<Point>,
    /// Liegt das Stück innerhalb des jeweils anderen Polygons?
    pub is_inside: bool,
    /// `cp_idx` des Anfangspunktes.
    pub start_id: usize,
    /// `cp_idx` des Endpunktes.
    pub end_id: usize,
}

impl Fragment {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Der Punkt, der zur Innen/Außen-Bestimmung getestet wird.
    pub fn probe_point(&self) -> Option<Point> {
        self.points.get(self.points.len() / 2).copied()
    }

    /// Verbindet das Fragment die beiden Schnittpunkte (in beliebiger Richtung)?
    pub fn joins(&self, a: usize, b: usize) -> bool {
        (self.start_id == a && self.end_id == b) || (self.start_id == b && self.end_id == a)
    }

    /// Punkte in der Richtung `from` -> andere Seite. Läuft das Fragment
    /// bereits so, wird nicht kopiert.
    pub fn points_from(&self, from: usize) -> Cow<'_, [Point]> {
        if self.start_id == from {
            Cow::Borrowed(&self.points)
        } else {
            Cow::Owned(self.points.iter().rev().copied().collect())
        }
    }

    /// Alle Punkte bis auf den letzten (der Anfang des nächsten Stücks).
    pub fn open_points(&self) -> &[Point] {
        match self.points.split_last() {
            Some((_, head)) => head,
            None => &[],
        }
    }
}
