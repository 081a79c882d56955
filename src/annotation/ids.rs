// src/annotation/ids.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Eindeutige Nummer einer Struktur (Annotation-Instanz).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureId(pub u64);

/// Nummer einer Kontur innerhalb einer Struktur. Dieselbe Nummer kann auf
/// mehreren Schichten vorkommen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContourId(pub u32);

/// Index der Bildschicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceIndex(pub u32);

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SliceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vergibt fortlaufende Struktur-Ids, beginnend bei 1.
#[derive(Debug, Clone)]
pub struct StructureIdAllocator {
    next: u64,
}

impl Default for StructureIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl StructureIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> StructureId {
        let id = StructureId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Merkt sich eine extern vergebene Id (z.B. aus einer geladenen Datei),
    /// damit sie nicht erneut vergeben wird.
    pub fn observe(&mut self, id: StructureId) {
        self.next = self.next.max(id.0.saturating_add(1));
    }
}
