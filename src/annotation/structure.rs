// src/annotation/structure.rs

use super::error::{EditError, EditResult};
use super::ids::{ContourId, SliceIndex, StructureId, StructureIdAllocator};
use crate::math::types::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// RGB-Farbe mit Komponenten in 0..=1.
pub type Color = [f64; 3];

/// Eine Annotation-Instanz (z.B. ein Organ) mit beliebig vielen Konturen
/// pro Schicht.
///
/// Konturen werden über (Schicht, Kontur-Id) adressiert. Eine Kontur-Id steht
/// für dieselbe logische Kontur über mehrere Schichten hinweg; bearbeitet wird
/// immer die aktive Kontur.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    id: StructureId,
    pub class_name: String,
    pub name: String,
    pub color: Color,
    contours: BTreeMap<(SliceIndex, ContourId), Vec<Point>>,
    contour_indices: Vec<ContourId>,
    active_contour: ContourId,
}

/// Serialisierbare Form einer [`Structure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRecord {
    pub idx: u64,
    pub class_name: String,
    pub name: String,
    pub color: Color,
    /// Schicht -> Kontur-Id -> Punkte.
    pub contours: BTreeMap<u32, BTreeMap<u32, Vec<Point>>>,
    pub contour_indices: Vec<u32>,
}

impl Structure {
    pub fn new(
        id: StructureId,
        class_name: impl Into<String>,
        name: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            id,
            class_name: class_name.into(),
            name: name.into(),
            color,
            contours: BTreeMap::new(),
            contour_indices: vec![ContourId(0)],
            active_contour: ContourId(0),
        }
    }

    pub fn id(&self) -> StructureId {
        self.id
    }

    pub fn active_contour(&self) -> ContourId {
        self.active_contour
    }

    pub fn contour_indices(&self) -> &[ContourId] {
        &self.contour_indices
    }

    /// Setzt die Punkte der aktiven Kontur auf `slice` (ersetzt eine vorhandene).
    pub fn register_contour(&mut self, slice: SliceIndex, points: Vec<Point>) {
        self.register_contour_at(slice, self.active_contour, points);
    }

    pub fn register_contour_at(
        &mut self,
        slice: SliceIndex,
        contour: ContourId,
        points: Vec<Point>,
    ) {
        self.contours.insert((slice, contour), points);
    }

    /// Punkte einer bestimmten Kontur.
    pub fn contour(&self, slice: SliceIndex, contour: ContourId) -> Option<&[Point]> {
        self.contours.get(&(slice, contour)).map(Vec::as_slice)
    }

    /// Punkte der aktiven Kontur auf `slice`.
    pub fn points(&self, slice: SliceIndex) -> Option<&[Point]> {
        self.contour(slice, self.active_contour)
    }

    /// Alle Konturen auf `slice`, nach Kontur-Id sortiert.
    pub fn all_points(&self, slice: SliceIndex) -> Vec<(ContourId, &[Point])> {
        self.contours
            .range((slice, ContourId(u32::MIN))..=(slice, ContourId(u32::MAX)))
            .map(|(&(_, contour), points)| (contour, points.as_slice()))
            .collect()
    }

    /// Entfernt die aktive Kontur auf `slice`.
    pub fn remove_contour(&mut self, slice: SliceIndex) -> Option<Vec<Point>> {
        self.contours.remove(&(slice, self.active_contour))
    }

    /// `true`, wenn die Kontur-Id auf keiner Schicht Punkte hat.
    pub fn is_empty_contour(&self, contour: ContourId) -> bool {
        !self.contours.keys().any(|&(_, id)| id == contour)
    }

    pub fn is_empty(&self) -> bool {
        self.contours.values().all(Vec::is_empty)
    }

    /// Legt eine neue Kontur-Id an und aktiviert sie. Ist die zuletzt
    /// angelegte Id noch leer, wird stattdessen diese aktiviert.
    pub fn add_contour_index(&mut self) -> ContourId {
        if let Some(&last) = self.contour_indices.last() {
            if self.is_empty_contour(last) {
                self.active_contour = last;
                return last;
            }
        }

        let next = self
            .contour_indices
            .iter()
            .max()
            .map_or(ContourId(0), |max| ContourId(max.0 + 1));
        self.contour_indices.push(next);
        self.active_contour = next;
        next
    }

    pub fn set_active_contour(&mut self, contour: ContourId) -> bool {
        if self.contour_indices.contains(&contour) {
            self.active_contour = contour;
            true
        } else {
            false
        }
    }

    /// Aktiviert die nächste Kontur-Id (zyklisch).
    pub fn next_contour(&mut self) -> ContourId {
        let n = self.contour_indices.len();
        let current = self
            .contour_indices
            .iter()
            .position(|&id| id == self.active_contour)
            .unwrap_or(0);
        self.active_contour = self.contour_indices[(current + 1) % n];
        self.active_contour
    }

    /// Löscht die aktive Kontur auf allen Schichten und aktiviert die
    /// kleinste verbleibende Id. Die letzte Id wird nie gelöscht.
    pub fn delete_active_contour(&mut self) -> bool {
        if self.contour_indices.len() <= 1 {
            return false;
        }

        let active = self.active_contour;
        self.contours.retain(|&(_, id), _| id != active);
        self.contour_indices.retain(|&id| id != active);
        if let Some(&smallest) = self.contour_indices.iter().min() {
            self.active_contour = smallest;
        }
        true
    }

    pub fn to_record(&self) -> StructureRecord {
        let mut contours: BTreeMap<u32, BTreeMap<u32, Vec<Point>>> = BTreeMap::new();
        for (&(slice, contour), points) in &self.contours {
            contours
                .entry(slice.0)
                .or_default()
                .insert(contour.0, points.clone());
        }

        StructureRecord {
            idx: self.id.0,
            class_name: self.class_name.clone(),
            name: self.name.clone(),
            color: self.color,
            contours,
            contour_indices: self.contour_indices.iter().map(|id| id.0).collect(),
        }
    }

    /// Baut eine Struktur aus einem Record. Die gespeicherte Id wird
    /// übernommen und im `allocator` reserviert.
    pub fn from_record(
        record: StructureRecord,
        allocator: &mut StructureIdAllocator,
    ) -> EditResult<Self> {
        if record.idx == u64::MAX {
            return Err(EditError::InvalidRecord {
                message: format!("structure id {} is out of range", record.idx),
            });
        }

        let contour_indices: Vec<ContourId> =
            record.contour_indices.iter().copied().map(ContourId).collect();
        let Some(&first) = contour_indices.first() else {
            return Err(EditError::InvalidRecord {
                message: format!("structure {} has no contour indices", record.idx),
            });
        };

        let mut contours = BTreeMap::new();
        for (slice, by_contour) in record.contours {
            for (contour, points) in by_contour {
                if !record.contour_indices.contains(&contour) {
                    return Err(EditError::InvalidRecord {
                        message: format!(
                            "contour {} on slice {} is not listed in contour_indices",
                            contour, slice
                        ),
                    });
                }
                contours.insert((SliceIndex(slice), ContourId(contour)), points);
            }
        }

        let id = StructureId(record.idx);
        allocator.observe(id);

        Ok(Self {
            id,
            class_name: record.class_name,
            name: record.name,
            color: record.color,
            contours,
            contour_indices,
            active_contour: first,
        })
    }
}
