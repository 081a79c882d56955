// src/math/geometry/polygon/operations/boolean/fragmentation.rs

use super::error::{MergeError, MergeResult};
use super::fragment::{CrossingRecord, Fragment, Side};
use crate::math::geometry::polygon::operations::{
    containment::point_in_polygon, intersection::segment_intersection,
};
use crate::math::types::{Bounds2D, Point};
use crate::math::utils::ring::{next_index, shift_index};
use tracing::debug;

/// Ergebnis der Schnittpunktsuche: beide Vertex-Listen mit eingefügten
/// Schnittpunkten und die Schnittpunkte in Fundreihenfolge.
#[derive(Debug, Clone)]
pub struct CrossingSet {
    pub polygon_a: Vec<Point>,
    pub polygon_b: Vec<Point>,
    pub crossings: Vec<CrossingRecord>,
}

/// Die beiden Fragment-Zyklen eines initialisierten Merges.
#[derive(Debug, Clone)]
pub struct FragmentCycles {
    pub crossings: Vec<CrossingRecord>,
    pub fragments_a: Vec<Fragment>,
    pub fragments_b: Vec<Fragment>,
}

/// Sucht alle Kantenschnitte zwischen A und B und fügt sie als neue Vertices
/// in (Kopien von) beide Listen ein.
///
/// Ein Schnittpunkt, der exakt auf dem Startvertex seiner Kante liegt, wird
/// nicht erneut eingefügt. Mehrere Schnitte auf derselben Kante werden nach
/// ihrem Abstand zum Startvertex einsortiert.
pub fn find_crossings(polygon_a: &[Point], polygon_b: &[Point]) -> CrossingSet {
    let mut new_a = polygon_a.to_vec();
    let mut new_b = polygon_b.to_vec();
    let mut crossings = Vec::new();

    let disjoint = match (
        Bounds2D::from_points_iter(polygon_a.iter().copied()),
        Bounds2D::from_points_iter(polygon_b.iter().copied()),
    ) {
        (Some(bounds_a), Some(bounds_b)) => !bounds_a.intersects(&bounds_b),
        _ => true,
    };

    if disjoint {
        return CrossingSet {
            polygon_a: new_a,
            polygon_b: new_b,
            crossings,
        };
    }

    let (n_a, n_b) = (polygon_a.len(), polygon_b.len());
    let mut inserted_a: Vec<(usize, f64)> = Vec::new();
    let mut inserted_b: Vec<(usize, f64)> = Vec::new();

    for i in 0..n_a {
        let p1 = polygon_a[i];
        let p2 = polygon_a[next_index(i, n_a)];

        for j in 0..n_b {
            let p3 = polygon_b[j];
            let p4 = polygon_b[next_index(j, n_b)];

            let Some(cross_point) = segment_intersection(p1, p2, p3, p4) else {
                continue;
            };

            if !cross_point.coincides_with(&p1) {
                let offset = p1.distance_to(cross_point);
                let at = insertion_index(&inserted_a, i, offset);
                inserted_a.push((i, offset));
                new_a.insert(at, cross_point);
            }

            if !cross_point.coincides_with(&p3) {
                let offset = p3.distance_to(cross_point);
                let at = insertion_index(&inserted_b, j, offset);
                inserted_b.push((j, offset));
                new_b.insert(at, cross_point);
            }

            crossings.push(CrossingRecord::new(crossings.len(), cross_point));
        }
    }

    CrossingSet {
        polygon_a: new_a,
        polygon_b: new_b,
        crossings,
    }
}

/// Position in der verlängerten Liste für einen neuen Punkt auf Kante `edge`
/// im Abstand `offset` vom Startvertex: hinter allen bisher eingefügten
/// Punkten auf früheren Kanten und auf derselben Kante näher am Startvertex.
fn insertion_index(inserted: &[(usize, f64)], edge: usize, offset: f64) -> usize {
    let before = inserted
        .iter()
        .filter(|&&(e, d)| e < edge || (e == edge && d < offset))
        .count();
    edge + 1 + before
}

/// Ermittelt die Indizes aller Schnittpunkte in beiden verlängerten Listen
/// (erster exakter Treffer).
pub fn locate_crossings(set: &mut CrossingSet) -> MergeResult<()> {
    for crossing in set.crossings.iter_mut() {
        for (side, polygon) in [(Side::A, &set.polygon_a), (Side::B, &set.polygon_b)] {
            let index = polygon
                .iter()
                .position(|p| p.coincides_with(&crossing.point))
                .ok_or_else(|| MergeError::UnexpectedGeometryFault {
                    operation: format!(
                        "crossing {} at ({}, {}) missing from polygon {:?}",
                        crossing.cp_idx, crossing.point.x, crossing.point.y, side
                    ),
                })?;
            crossing.set_index_in(side, index);
        }
    }
    Ok(())
}

/// Vollständige Fragmentierung: Schnittpunkte finden, Anzahl prüfen,
/// beide Listen in Fragment-Zyklen zerlegen.
///
/// Gibt die verlängerten Vertex-Listen zusammen mit den Zyklen zurück.
pub fn fragment_polygons(
    polygon_a: &[Point],
    polygon_b: &[Point],
) -> MergeResult<(Vec<Point>, Vec<Point>, FragmentCycles)> {
    let mut set = find_crossings(polygon_a, polygon_b);
    let count = set.crossings.len();
    debug!(
        "Found {} crossings between polygons of {} and {} vertices",
        count,
        polygon_a.len(),
        polygon_b.len()
    );

    if count == 0 || count % 2 != 0 {
        return Err(MergeError::InfeasibleCrossing { count });
    }

    locate_crossings(&mut set)?;

    let CrossingSet {
        polygon_a,
        polygon_b,
        mut crossings,
    } = set;

    let fragments_a = divide_fragments(&polygon_a, &mut crossings, Side::A, &polygon_b)?;
    let fragments_b = divide_fragments(&polygon_b, &mut crossings, Side::B, &polygon_a)?;

    Ok((
        polygon_a,
        polygon_b,
        FragmentCycles {
            crossings,
            fragments_a,
            fragments_b,
        },
    ))
}

/// Zerlegt eine Vertex-Liste an den Schnittpunkten in einen Zyklus von Fragmenten.
///
/// Die Liste wird vorher so rotiert, dass der letzte Schnittpunkt auf dem
/// letzten Vertex liegt; kein Fragment läuft dann über das Listenende. Die
/// Indizes in `crossings` werden dabei auf die rotierte Liste umgerechnet.
pub fn divide_fragments(
    points: &[Point],
    crossings: &mut [CrossingRecord],
    side: Side,
    counterpart: &[Point],
) -> MergeResult<Vec<Fragment>> {
    let n = points.len();
    let count = crossings.len();
    if count == 0 || n == 0 {
        return Err(MergeError::InfeasibleCrossing { count });
    }

    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by_key(|&k| crossings[k].index_in(side));

    let last = crossings[order[count - 1]].index_in(side);
    let shift = (n - 1).checked_sub(last).ok_or_else(|| {
        MergeError::UnexpectedGeometryFault {
            operation: format!("crossing index {} out of range for {} vertices", last, n),
        }
    })?;

    let mut rotated = points.to_vec();
    if shift > 0 {
        rotated.rotate_right(shift);
        for crossing in crossings.iter_mut() {
            let index = crossing.index_in(side);
            crossing.set_index_in(side, shift_index(index, shift, n));
        }
    }

    let mut fragments = Vec::with_capacity(count);
    for (k, &current) in order.iter().enumerate() {
        let previous = &crossings[order[(k + count - 1) % count]];
        let current = &crossings[current];

        let start = (previous.index_in(side) + 1) % n;
        let end = current.index_in(side);

        let mut fragment_points = Vec::with_capacity(end.saturating_sub(start) + 2);
        fragment_points.push(previous.point);
        if start <= end {
            fragment_points.extend_from_slice(&rotated[start..=end]);
        }

        fragments.push(Fragment {
            points: fragment_points,
            is_inside: false,
            start_id: previous.cp_idx,
            end_id: current.cp_idx,
        });
    }

    assign_parity(&mut fragments, counterpart)?;
    Ok(fragments)
}

/// Setzt `is_inside` für den ganzen Zyklus: das längste Fragment wird per
/// Point-in-Polygon getestet (sein Mittelpunkt liegt am wenigsten
/// wahrscheinlich auf dem Rand), danach wechselt der Wert von Fragment zu
/// Fragment.
fn assign_parity(fragments: &mut [Fragment], counterpart: &[Point]) -> MergeResult<()> {
    let count = fragments.len();
    let longest = fragments
        .iter()
        .enumerate()
        .fold(0, |best, (k, f)| if f.len() > fragments[best].len() { k } else { best });

    let probe = fragments[longest].probe_point().ok_or_else(|| {
        MergeError::UnexpectedGeometryFault {
            operation: "empty fragment cannot be classified".to_string(),
        }
    })?;

    let mut inside = point_in_polygon(probe, counterpart);
    for step in 0..count {
        fragments[(longest + step) % count].is_inside = inside;
        inside = !inside;
    }
    Ok(())
}
