// src/math/geometry/polygon/operations/boolean/stitching.rs

use super::BooleanOperation;
use super::error::{MergeError, MergeResult};
use super::fragment::Fragment;
use crate::math::types::Point;

/// Jedes zweite Fragment, beginnend bei Position 0 oder 1.
fn every_other(fragments: &[Fragment], skip_first: bool) -> Vec<&Fragment> {
    fragments
        .iter()
        .skip(usize::from(skip_first))
        .step_by(2)
        .collect()
}

/// Fragmente von A, die im Ergebnis bleiben: immer die außerhalb von B.
pub fn select_fragments_a(fragments: &[Fragment]) -> Vec<&Fragment> {
    let first_inside = fragments.first().is_some_and(|f| f.is_inside);
    every_other(fragments, first_inside)
}

/// Fragmente von B, die im Ergebnis bleiben.
///
/// Union: die außerhalb von A. Differenz: die innerhalb von A, sie bilden
/// den neuen Rand der ausgeschnittenen Fläche.
pub fn select_fragments_b(
    fragments: &[Fragment],
    operation: BooleanOperation,
) -> Vec<&Fragment> {
    let first_inside = fragments.first().is_some_and(|f| f.is_inside);
    match operation {
        BooleanOperation::Union => every_other(fragments, first_inside),
        BooleanOperation::Difference => every_other(fragments, !first_inside),
    }
}

/// Das erste Fragment, das die Schnittpunkte `from` und `to` verbindet.
pub fn find_joint_fragment<'a>(
    fragments: &[&'a Fragment],
    from: usize,
    to: usize,
) -> Option<&'a Fragment> {
    fragments.iter().copied().find(|f| f.joins(from, to))
}

/// Hängt `fragment` ohne seinen letzten Punkt an, ausgerichtet ab `from`.
fn append_oriented(merged: &mut Vec<Point>, fragment: &Fragment, from: usize) {
    let oriented = fragment.points_from(from);
    let open = oriented.len().saturating_sub(1);
    merged.extend_from_slice(&oriented[..open]);
}

/// Direktes Zusammensetzen: B-Fragmente in Zyklusreihenfolge, dazwischen
/// jeweils das A-Fragment, das das Ende des einen mit dem Anfang des
/// nächsten B-Fragments verbindet.
pub fn find_outer_line(kept_a: &[&Fragment], kept_b: &[&Fragment]) -> MergeResult<Vec<Point>> {
    let n = kept_b.len();
    if n == 0 {
        return Err(MergeError::UnexpectedGeometryFault {
            operation: "no fragments selected from the new contour".to_string(),
        });
    }

    let mut merged = Vec::new();
    for (k, fragment) in kept_b.iter().enumerate() {
        let next = kept_b[(k + 1) % n];
        let joint = find_joint_fragment(kept_a, fragment.end_id, next.start_id).ok_or(
            MergeError::JoinNotFound {
                start_id: fragment.end_id,
                end_id: next.start_id,
            },
        )?;

        merged.extend_from_slice(fragment.open_points());
        append_oriented(&mut merged, joint, fragment.end_id);
    }

    Ok(merged)
}

/// Fallback: jedes B-Fragment einzeln mit dem A-Fragment schließen, das
/// seine beiden Enden verbindet, und die Schleife mit den meisten Vertices
/// nehmen.
pub fn find_largest_hull(kept_a: &[&Fragment], kept_b: &[&Fragment]) -> MergeResult<Vec<Point>> {
    let mut largest: Option<Vec<Point>> = None;

    for fragment in kept_b {
        let Some(joint) = find_joint_fragment(kept_a, fragment.end_id, fragment.start_id) else {
            continue;
        };

        let mut candidate = fragment.open_points().to_vec();
        append_oriented(&mut candidate, joint, fragment.end_id);

        // Bei Gleichstand gewinnt der zuerst gefundene Kandidat
        if largest.as_ref().is_none_or(|best| candidate.len() > best.len()) {
            largest = Some(candidate);
        }
    }

    largest.ok_or(MergeError::NoHullCandidate {
        fragments: kept_b.len(),
    })
}
