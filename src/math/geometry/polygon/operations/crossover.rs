// src/math/geometry/polygon/operations/crossover.rs

use super::intersection::segment_intersection;
use crate::math::types::Point;
use crate::math::utils::ring::next_index;
use tracing::debug;

/// Entfernt Selbstüberschneidungen eines geschlossenen Strichs (z.B. aus
/// einem zittrigen Freihand-Strich), sodass eine einzige geschlossene Fläche
/// übrig bleibt.
///
/// Sobald sich zwei nicht benachbarte Kanten `i` und `j` schneiden, werden die
/// Vertices zwischen ihnen (`i+1..=j`) gelöscht und die Suche beginnt von vorn.
/// Das ist eine lokale Reparatur: kreuzt ein Strich sich mehrfach, können
/// große Schleifen verloren gehen.
pub fn remove_inline_crossover(points: &[Point]) -> Vec<Point> {
    let mut cleaned = points.to_vec();

    while let Some((i, j)) = find_inline_crossover(&cleaned) {
        debug!(
            "Removing inline crossover between edges {} and {} ({} vertices dropped)",
            i,
            j,
            j - i
        );
        cleaned.drain(i + 1..=j);
    }

    cleaned
}

/// Prüft, ob der Ring eine Selbstüberschneidung zwischen nicht benachbarten Kanten hat.
pub fn has_inline_crossover(points: &[Point]) -> bool {
    find_inline_crossover(points).is_some()
}

/// Erstes Kantenpaar (i, j) mit i < j, das sich schneidet.
fn find_inline_crossover(points: &[Point]) -> Option<(usize, usize)> {
    let n = points.len();

    for i in 0..n.saturating_sub(1) {
        let p1 = points[i];
        let p2 = points[i + 1];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue; // Über die Schlusskante benachbart
            }
            let p3 = points[j];
            let p4 = points[next_index(j, n)];

            if segment_intersection(p1, p2, p3, p4).is_some() {
                return Some((i, j));
            }
        }
    }

    None
}
