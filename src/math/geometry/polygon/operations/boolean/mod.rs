// src/math/geometry/polygon/operations/boolean/mod.rs

pub mod error;
pub mod fragment;
pub mod fragmentation;
pub mod stitching;

pub use error::{MergeError, MergeResult};
pub use fragment::{CrossingRecord, Fragment, Side};
pub use fragmentation::FragmentCycles;

use crate::math::geometry::polygon::core::Polygon;
use crate::math::geometry::polygon::properties::is_collinear;
use crate::math::types::Point;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Boolean-Operationstypen für das Zusammenführen einer Kontur mit einem neuen Strich
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperation {
    /// Union (A ∪ B)
    Union,
    /// Difference (A - B)
    Difference,
}

impl FromStr for BooleanOperation {
    type Err = MergeError;

    fn from_str(s: &str) -> MergeResult<Self> {
        match s {
            "union" => Ok(BooleanOperation::Union),
            "diff" => Ok(BooleanOperation::Difference),
            other => Err(MergeError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for BooleanOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOperation::Union => write!(f, "union"),
            BooleanOperation::Difference => write!(f, "diff"),
        }
    }
}

/// Boolean-Engine für zwei geschlossene Konturen: A (bestehend) und B (neu gezeichnet).
///
/// Zweistufig: [`initialize`](Self::initialize) sucht die Schnittpunkte und
/// zerlegt beide Konturen in Fragmente, [`merge`](Self::merge) setzt aus den
/// Fragmenten das Ergebnis zusammen. Die Eingaben werden kopiert und nie
/// verändert.
#[derive(Debug, Clone)]
pub struct PolygonBoolean {
    polygon_a: Vec<Point>,
    polygon_b: Vec<Point>,
    cycles: Option<FragmentCycles>,
}

impl PolygonBoolean {
    pub fn new(polygon_a: &[Point], polygon_b: &[Point]) -> Self {
        Self {
            polygon_a: polygon_a.to_vec(),
            polygon_b: polygon_b.to_vec(),
            cycles: None,
        }
    }

    /// Sucht die Schnittpunkte und baut die Fragment-Zyklen.
    ///
    /// Gibt die Anzahl der Schnittpunkte zurück. Bei null oder ungerader
    /// Anzahl schlägt die Initialisierung fehl und `merge` darf nicht
    /// aufgerufen werden. Ein erneuter Aufruf nach Erfolg ist ein No-op.
    pub fn initialize(&mut self) -> MergeResult<usize> {
        if let Some(cycles) = &self.cycles {
            return Ok(cycles.crossings.len());
        }

        for (side, polygon) in [('A', &self.polygon_a), ('B', &self.polygon_b)] {
            if polygon.len() < 3 {
                return Err(MergeError::InsufficientVertices {
                    side,
                    actual: polygon.len(),
                });
            }
        }

        let (polygon_a, polygon_b, cycles) =
            fragmentation::fragment_polygons(&self.polygon_a, &self.polygon_b)?;
        let count = cycles.crossings.len();

        self.polygon_a = polygon_a;
        self.polygon_b = polygon_b;
        self.cycles = Some(cycles);
        Ok(count)
    }

    pub fn is_initialized(&self) -> bool {
        self.cycles.is_some()
    }

    /// Vertex-Liste von A (nach `initialize` mit eingefügten Schnittpunkten).
    pub fn polygon_a(&self) -> &[Point] {
        &self.polygon_a
    }

    /// Vertex-Liste von B (nach `initialize` mit eingefügten Schnittpunkten).
    pub fn polygon_b(&self) -> &[Point] {
        &self.polygon_b
    }

    pub fn crossings(&self) -> Option<&[CrossingRecord]> {
        self.cycles.as_ref().map(|c| c.crossings.as_slice())
    }

    pub fn fragments(&self, side: Side) -> Option<&[Fragment]> {
        self.cycles.as_ref().map(|c| match side {
            Side::A => c.fragments_a.as_slice(),
            Side::B => c.fragments_b.as_slice(),
        })
    }

    /// Führt die Boolean-Operation durch.
    ///
    /// Das Ergebnis enthält keinen doppelten Schlusspunkt. Scheitert das
    /// direkte Zusammensetzen, wird die größte einzeln schließbare Schleife
    /// genommen.
    pub fn merge(&self, operation: BooleanOperation) -> MergeResult<Polygon> {
        let cycles = self.cycles.as_ref().ok_or(MergeError::NotInitialized)?;

        let kept_a = stitching::select_fragments_a(&cycles.fragments_a);
        let kept_b = stitching::select_fragments_b(&cycles.fragments_b, operation);

        let merged = match stitching::find_outer_line(&kept_a, &kept_b) {
            Ok(merged) => merged,
            Err(err) => {
                debug!("{} stitching fell back to largest hull: {}", operation, err);
                stitching::find_largest_hull(&kept_a, &kept_b).inspect_err(|err| {
                    warn!("{} merge found no closed boundary: {}", operation, err)
                })?
            }
        };

        if merged.len() < 3 || is_collinear(&merged) {
            return Err(MergeError::DegenerateResult {
                vertices: merged.len(),
            });
        }

        let vertices = merged.len();
        Polygon::new(merged).map_err(|_| MergeError::DegenerateResult { vertices })
    }
}

/// Vereinfachte API für die beiden Merge-Operationen
pub struct BooleanOperations;

impl BooleanOperations {
    /// Initialisiert und führt die Operation in einem Schritt aus.
    pub fn execute(
        polygon_a: &[Point],
        polygon_b: &[Point],
        operation: BooleanOperation,
    ) -> MergeResult<Polygon> {
        let mut engine = PolygonBoolean::new(polygon_a, polygon_b);
        engine.initialize()?;
        engine.merge(operation)
    }

    /// Union von zwei Konturen
    pub fn union(polygon_a: &[Point], polygon_b: &[Point]) -> MergeResult<Polygon> {
        Self::execute(polygon_a, polygon_b, BooleanOperation::Union)
    }

    /// A minus B
    pub fn difference(polygon_a: &[Point], polygon_b: &[Point]) -> MergeResult<Polygon> {
        Self::execute(polygon_a, polygon_b, BooleanOperation::Difference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::PolygonProperties;
    use crate::math::geometry::polygon::operations::containment::point_in_polygon;
    use crate::math::types::points_from_xy;
    use approx::assert_relative_eq;
    use geo::Area;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
        points_from_xy(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn inside_or_on(point: Point, polygon: &Polygon) -> bool {
        polygon.contains_point(point)
            || polygon.vertices().iter().any(|v| v.coincides_with(&point))
            || polygon.edges().any(|(p1, p2)| {
                p1.cross(point, p2) == 0.0
                    && point.x >= p1.x.min(p2.x)
                    && point.x <= p1.x.max(p2.x)
                    && point.y >= p1.y.min(p2.y)
                    && point.y <= p1.y.max(p2.y)
            })
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("union".parse::<BooleanOperation>().unwrap(), BooleanOperation::Union);
        assert_eq!("diff".parse::<BooleanOperation>().unwrap(), BooleanOperation::Difference);
        assert_eq!(
            "xor".parse::<BooleanOperation>().unwrap_err(),
            MergeError::UnknownOperation("xor".to_string())
        );
        assert_eq!(BooleanOperation::Difference.to_string(), "diff");
    }

    #[test]
    fn test_overlapping_squares_union() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);

        let mut engine = PolygonBoolean::new(&a, &b);
        assert_eq!(engine.initialize().unwrap(), 2);

        let merged = engine.merge(BooleanOperation::Union).unwrap();
        // 6 unbedeckte Ecken + 2 Schnittpunkte
        assert_eq!(merged.len(), 8);
        assert_relative_eq!(merged.area(), 28.0);
        assert_relative_eq!(merged.to_geo().unsigned_area(), 28.0);

        // Kept-Fragment-Punkte minus ein doppelter Endpunkt pro Fragment
        let kept: usize = stitching::select_fragments_a(engine.fragments(Side::A).unwrap())
            .iter()
            .chain(
                stitching::select_fragments_b(
                    engine.fragments(Side::B).unwrap(),
                    BooleanOperation::Union,
                )
                .iter(),
            )
            .map(|f| f.len())
            .sum();
        assert_eq!(merged.len(), kept - 2);
    }

    #[test]
    fn test_union_contains_outside_vertices() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);
        let merged = BooleanOperations::union(&a, &b).unwrap();

        for v in a.iter().filter(|v| !point_in_polygon(**v, &b)) {
            assert!(inside_or_on(*v, &merged), "{:?} lost from union", v);
        }
        for v in b.iter().filter(|v| !point_in_polygon(**v, &a)) {
            assert!(inside_or_on(*v, &merged), "{:?} lost from union", v);
        }
    }

    #[test]
    fn test_overlapping_squares_difference() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);
        let merged = BooleanOperations::difference(&a, &b).unwrap();

        assert_eq!(merged.len(), 6);
        assert_relative_eq!(merged.area(), 12.0);
        assert!(!merged.contains_point(Point::new(3.0, 3.0)));
        assert!(merged.contains_point(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_difference_bite_from_edge() {
        // B liegt in A und berührt den oberen Rand in zwei Punkten: ein Biss von oben
        let a = square(0.0, 0.0, 10.0);
        let b = points_from_xy(&[(4.0, 6.0), (6.0, 6.0), (6.0, 12.0), (4.0, 12.0)]);
        let merged = BooleanOperations::difference(&a, &b).unwrap();

        assert_relative_eq!(merged.area(), 100.0 - 8.0);
        assert!(!merged.contains_point(Point::new(5.0, 8.0)));
        assert!(merged.contains_point(Point::new(2.0, 8.0)));
        assert!(merged.contains_point(Point::new(8.0, 8.0)));
        assert!(merged.contains_point(Point::new(5.0, 3.0)));
    }

    #[test]
    fn test_difference_inner_notch_touching_edge() {
        // B liegt ganz in A und berührt den oberen Rand in zwei Punkten; das
        // tiefe Fragment hat mehr Vertices und wird als innen klassifiziert
        let a = square(0.0, 0.0, 10.0);
        let b = points_from_xy(&[(4.0, 10.0), (4.0, 6.0), (6.0, 6.0), (6.0, 10.0), (5.0, 9.5)]);

        let mut engine = PolygonBoolean::new(&a, &b);
        assert_eq!(engine.initialize().unwrap(), 2);
        let merged = engine.merge(BooleanOperation::Difference).unwrap();

        assert_eq!(merged.len(), 8);
        assert_relative_eq!(merged.area(), 92.0);
        assert!(!merged.contains_point(Point::new(5.0, 7.0)));
        assert!(merged.contains_point(Point::new(2.0, 8.0)));
        assert!(merged.contains_point(Point::new(8.0, 8.0)));
    }

    #[test]
    fn test_difference_inner_dart_equal_fragments() {
        // Beide Fragmente von B haben drei Punkte; bei Gleichstand bestimmt das
        // erste die Parität. Ausgeschnitten wird hier nur das flache Dreieck am Rand.
        let a = square(0.0, 0.0, 10.0);
        let b = points_from_xy(&[(4.0, 10.0), (5.0, 5.0), (6.0, 10.0), (5.0, 9.0)]);

        let mut engine = PolygonBoolean::new(&a, &b);
        assert_eq!(engine.initialize().unwrap(), 2);
        let fragments = engine.fragments(Side::B).unwrap();
        assert!(fragments.iter().all(|f| f.len() == 3));

        let merged = engine.merge(BooleanOperation::Difference).unwrap();
        assert_eq!(merged.len(), 7);
        assert_relative_eq!(merged.area(), 99.0);
        assert!(merged.contains_point(Point::new(5.0, 7.0)));
        assert!(!merged.contains_point(Point::new(5.0, 9.8)));
    }

    #[test]
    fn test_union_with_four_crossings() {
        // Kreuzform: horizontaler und vertikaler Balken
        let horizontal = points_from_xy(&[(0.0, 2.0), (8.0, 2.0), (8.0, 4.0), (0.0, 4.0)]);
        let vertical = points_from_xy(&[(3.0, 0.0), (5.0, 0.0), (5.0, 6.0), (3.0, 6.0)]);

        let mut engine = PolygonBoolean::new(&horizontal, &vertical);
        assert_eq!(engine.initialize().unwrap(), 4);

        let merged = engine.merge(BooleanOperation::Union).unwrap();
        assert_eq!(merged.len(), 12);
        assert_relative_eq!(merged.area(), 16.0 + 12.0 - 4.0);
    }

    #[test]
    fn test_difference_splits_into_largest_piece() {
        // Ein vertikaler Balken zerschneidet den horizontalen: zwei Reststücke,
        // zurück kommt nur das mit den meisten Vertices (rechts, mit Zwischenpunkt)
        let horizontal = points_from_xy(&[
            (0.0, 2.0),
            (10.0, 2.0),
            (10.0, 3.0),
            (10.0, 4.0),
            (0.0, 4.0),
        ]);
        let vertical = points_from_xy(&[(3.0, 0.0), (5.0, 0.0), (5.0, 6.0), (3.0, 6.0)]);

        let merged = BooleanOperations::difference(&horizontal, &vertical).unwrap();
        assert_eq!(merged.len(), 5);
        assert_relative_eq!(merged.area(), 10.0);
        assert!(merged.contains_point(Point::new(7.0, 3.0)));
        assert!(!merged.contains_point(Point::new(1.0, 3.0)));
    }

    #[test]
    fn test_disjoint_polygons() {
        let a = square(0.0, 0.0, 4.0);
        let far = square(100.0, 100.0, 4.0);

        let mut engine = PolygonBoolean::new(&a, &far);
        assert_eq!(
            engine.initialize().unwrap_err(),
            MergeError::InfeasibleCrossing { count: 0 }
        );
        assert!(!engine.is_initialized());
        assert_eq!(
            engine.merge(BooleanOperation::Union).unwrap_err(),
            MergeError::NotInitialized
        );
    }

    #[test]
    fn test_nested_polygons_have_no_crossings() {
        let a = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 2.0);
        assert_eq!(
            BooleanOperations::union(&a, &inner).unwrap_err(),
            MergeError::InfeasibleCrossing { count: 0 }
        );
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);
        let mut engine = PolygonBoolean::new(&a, &b);
        engine.initialize().unwrap();

        assert_eq!(a, square(0.0, 0.0, 4.0));
        assert_eq!(engine.polygon_a().len(), 6);
        assert_eq!(engine.polygon_b().len(), 6);
        assert_eq!(engine.crossings().unwrap().len(), 2);

        // Mehrfaches Mergen liefert dasselbe Ergebnis
        let first = engine.merge(BooleanOperation::Difference).unwrap();
        let second = engine.merge(BooleanOperation::Difference).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.initialize().unwrap(), 2);
    }

    #[test]
    fn test_coincident_stroke_has_no_effect() {
        // Gemeinsame Vertices liegen immer auf einem Segmentende: kein Schnitt,
        // der Aufrufer behält die unveränderte Kontur
        let a = square(0.0, 0.0, 4.0);
        let shifted: Vec<Point> = a.iter().cycle().skip(2).take(4).copied().collect();
        assert!(
            Polygon::new(shifted.clone())
                .unwrap()
                .same_cycle_as(&Polygon::new(a.clone()).unwrap())
        );
        for b in [a.clone(), shifted] {
            assert_eq!(
                PolygonBoolean::new(&a, &b).initialize().unwrap_err(),
                MergeError::InfeasibleCrossing { count: 0 }
            );
        }
    }

    #[test]
    fn test_too_few_vertices() {
        let a = square(0.0, 0.0, 4.0);
        let line = points_from_xy(&[(1.0, -1.0), (1.0, 5.0)]);
        assert_eq!(
            PolygonBoolean::new(&a, &line).initialize().unwrap_err(),
            MergeError::InsufficientVertices { side: 'B', actual: 2 }
        );
    }

    #[test]
    fn test_merge_winding_independent() {
        let a = square(0.0, 0.0, 4.0);
        let b: Vec<Point> = square(2.0, 2.0, 4.0).into_iter().rev().collect();
        let merged = BooleanOperations::union(&a, &b).unwrap();
        assert_relative_eq!(merged.area(), 28.0);
    }
}
