// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const PI: f64 = std::f64::consts::PI;
    pub const TAU: f64 = std::f64::consts::TAU;
}

/// Zyklische Indexrechnung auf Vertex-Listen geschlossener Polygone.
pub mod ring {
    /// Index des Nachfolgers in einem geschlossenen Ring der Länge `len`.
    pub fn next_index(index: usize, len: usize) -> usize {
        if index + 1 == len { 0 } else { index + 1 }
    }

    /// Verschiebt `index` um `shift` Positionen nach rechts (modulo `len`).
    pub fn shift_index(index: usize, shift: usize, len: usize) -> usize {
        (index + shift) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_index_wraps() {
        assert_eq!(ring::next_index(0, 4), 1);
        assert_eq!(ring::next_index(3, 4), 0);
    }

    #[test]
    fn test_shift_index() {
        assert_eq!(ring::shift_index(4, 1, 6), 5);
        assert_eq!(ring::shift_index(5, 1, 6), 0);
        assert_eq!(ring::shift_index(2, 0, 6), 2);
    }
}
