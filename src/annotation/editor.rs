// src/annotation/editor.rs

use super::brush::{brush_path, brush_stamp};
use super::config::EditorConfig;
use super::error::{EditError, EditResult};
use super::ids::{ContourId, SliceIndex};
use super::stroke::StrokeBuffer;
use super::structure::Structure;
use crate::math::error::MathResult;
use crate::math::geometry::polygon::operations::boolean::{BooleanOperation, PolygonBoolean};
use crate::math::geometry::polygon::operations::containment::point_in_polygon;
use crate::math::types::Point;
use tracing::{debug, info};

/// Was eine Editieraktion mit der aktiven Kontur gemacht hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Es gab noch keine Kontur, der Strich wurde direkt übernommen.
    Created,
    /// Die Kontur wurde durch das Merge-Ergebnis ersetzt.
    Merged {
        operation: BooleanOperation,
        vertices: usize,
    },
    /// Das Ergebnis war zu klein, die Kontur wurde gelöscht.
    Removed,
    /// Der Pinselabdruck lag zu nah am vorherigen.
    Skipped,
    /// Der Merge ist fehlgeschlagen, die Kontur ist unverändert.
    Unchanged,
}

/// Zustand eines laufenden Pinselstrichs.
#[derive(Debug, Clone, Default)]
struct BrushState {
    /// Beim ersten Abdruck festgelegt, gilt bis `end_brush`.
    mode: Option<BooleanOperation>,
    prev: Option<Point>,
    stamps: StrokeBuffer,
}

/// Bearbeitet die Konturen von Strukturen auf der aktuellen Schicht.
///
/// Stift: ein geschlossener Strich wird mit der aktiven Kontur vereinigt,
/// wenn er innerhalb beginnt, sonst von ihr abgezogen. Pinsel: jeder
/// Abdruck ist ein kleiner Strich, die Operation wird beim ersten Abdruck
/// gewählt und bleibt für den ganzen Strich gleich.
#[derive(Debug, Clone)]
pub struct ContourEditor {
    config: EditorConfig,
    editable: bool,
    slice: SliceIndex,
    brush: BrushState,
}

impl ContourEditor {
    pub fn new(config: EditorConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            editable: false,
            slice: SliceIndex(0),
            brush: BrushState::default(),
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn activate(&mut self) {
        self.editable = true;
    }

    /// Beendet die Bearbeitung; ein laufender Pinselstrich wird verworfen.
    pub fn deactivate(&mut self) {
        self.editable = false;
        self.brush = BrushState::default();
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn slice(&self) -> SliceIndex {
        self.slice
    }

    pub fn set_slice(&mut self, slice: SliceIndex) {
        self.slice = slice;
    }

    fn ensure_editable(&self) -> EditResult<()> {
        if self.editable {
            Ok(())
        } else {
            Err(EditError::NotEditable)
        }
    }

    /// Fügt einen Punkt zum Stiftstrich hinzu (mit Punkt-Toleranz).
    pub fn add_stroke_point(&self, stroke: &mut StrokeBuffer, point: Point) -> EditResult<bool> {
        self.ensure_editable()?;
        Ok(stroke.add_point(point, self.config.point_tolerance))
    }

    /// Schließt einen Stiftstrich ab und verrechnet ihn mit der aktiven Kontur.
    ///
    /// Der Puffer ist danach immer leer, auch bei Fehlern.
    pub fn finish_pen_stroke(
        &self,
        structure: &mut Structure,
        stroke: &mut StrokeBuffer,
    ) -> EditResult<EditOutcome> {
        self.ensure_editable()?;

        if self.config.simplify_strokes {
            stroke.simplify();
        }
        if !stroke.has_valid_length() {
            let points = stroke.len();
            stroke.reset();
            return Err(EditError::StrokeTooShort { points });
        }

        let points = stroke.take_points();
        let Some(existing) = structure.points(self.slice) else {
            structure.register_contour(self.slice, self.layered(points));
            info!(
                "Structure {}: created contour {} on slice {}",
                structure.id(),
                structure.active_contour(),
                self.slice
            );
            return Ok(EditOutcome::Created);
        };

        let operation = if point_in_polygon(points[0], existing) {
            BooleanOperation::Union
        } else {
            BooleanOperation::Difference
        };
        self.merge_into(structure, operation, &points)
    }

    /// Ein einzelner Pinselabdruck bei `center`.
    pub fn apply_brush(
        &mut self,
        structure: &mut Structure,
        center: Point,
    ) -> EditResult<EditOutcome> {
        self.ensure_editable()?;

        if !self
            .brush
            .stamps
            .has_valid_center_distance(center, self.config.center_tolerance)
        {
            return Ok(EditOutcome::Skipped);
        }
        self.brush.stamps.set_center(center);

        let stamp = brush_stamp(center, self.config.brush_size);
        let Some(existing) = structure.points(self.slice) else {
            structure.register_contour(self.slice, self.layered(stamp));
            self.brush.mode.get_or_insert(BooleanOperation::Union);
            return Ok(EditOutcome::Created);
        };

        let operation = *self.brush.mode.get_or_insert_with(|| {
            if point_in_polygon(center, existing) {
                BooleanOperation::Union
            } else {
                BooleanOperation::Difference
            }
        });
        self.merge_into(structure, operation, &stamp)
    }

    /// Pinselbewegung nach `point`: stempelt entlang der Strecke vom letzten
    /// Punkt. Einzelne fehlgeschlagene Abdrücke brechen den Strich nicht ab.
    pub fn brush_to(
        &mut self,
        structure: &mut Structure,
        point: Point,
    ) -> EditResult<Vec<EditOutcome>> {
        self.ensure_editable()?;

        let centers = match self.brush.prev.replace(point) {
            None => vec![point],
            Some(prev) => brush_path(prev, point),
        };

        let mut outcomes = Vec::with_capacity(centers.len());
        for center in centers {
            let outcome = match self.apply_brush(structure, center) {
                Err(EditError::Merge(err)) => {
                    debug!(
                        "Brush stamp at ({}, {}) left contour unchanged: {}",
                        center.x, center.y, err
                    );
                    EditOutcome::Unchanged
                }
                other => other?,
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Letzte Bewegung und Ende des Pinselstrichs; gibt den Modus wieder frei.
    pub fn end_brush(
        &mut self,
        structure: &mut Structure,
        point: Point,
    ) -> EditResult<Vec<EditOutcome>> {
        let outcomes = self.brush_to(structure, point);
        self.brush = BrushState::default();
        outcomes
    }

    /// Der für den laufenden Pinselstrich festgelegte Modus.
    pub fn brush_mode(&self) -> Option<BooleanOperation> {
        self.brush.mode
    }

    pub fn increase_brush_size(&mut self) -> f64 {
        let size = self.config.brush_size;
        if size < self.config.max_brush_size {
            self.config.brush_size =
                (size + self.config.brush_step).min(self.config.max_brush_size);
        }
        self.config.brush_size
    }

    pub fn decrease_brush_size(&mut self) -> f64 {
        let size = self.config.brush_size;
        if size > self.config.min_brush_size {
            self.config.brush_size =
                (size - self.config.brush_step).max(self.config.min_brush_size);
        }
        self.config.brush_size
    }

    /// Die erste Struktur (Index) und Kontur, deren Kontur auf der aktuellen
    /// Schicht `point` enthält.
    pub fn structure_at(
        &self,
        structures: &[Structure],
        point: Point,
    ) -> EditResult<Option<(usize, ContourId)>> {
        self.ensure_editable()?;

        Ok(structures.iter().enumerate().find_map(|(index, structure)| {
            structure
                .all_points(self.slice)
                .into_iter()
                .find(|(_, points)| point_in_polygon(point, points))
                .map(|(contour, _)| (index, contour))
        }))
    }

    /// Merge der aktiven Kontur mit `stroke`. Bei einem Fehler bleibt die
    /// Kontur unverändert.
    fn merge_into(
        &self,
        structure: &mut Structure,
        operation: BooleanOperation,
        stroke: &[Point],
    ) -> EditResult<EditOutcome> {
        let existing = structure
            .points(self.slice)
            .ok_or(EditError::UnknownContour {
                slice: self.slice,
                contour: structure.active_contour(),
            })?;

        let mut engine = PolygonBoolean::new(existing, stroke);
        engine.initialize()?;
        let merged = engine.merge(operation)?;

        let area = merged.bounds().map_or(0.0, |bounds| bounds.area());
        if area > self.config.min_area {
            let vertices = merged.len();
            structure.register_contour(self.slice, self.layered(merged.into_vertices()));
            info!(
                "Structure {}: {} merged contour {} on slice {} ({} vertices)",
                structure.id(),
                operation,
                structure.active_contour(),
                self.slice,
                vertices
            );
            Ok(EditOutcome::Merged {
                operation,
                vertices,
            })
        } else {
            structure.remove_contour(self.slice);
            info!(
                "Structure {}: contour {} on slice {} removed (bounds area {:.4})",
                structure.id(),
                structure.active_contour(),
                self.slice,
                area
            );
            Ok(EditOutcome::Removed)
        }
    }

    /// Setzt den z-Versatz für registrierte Konturen.
    fn layered(&self, points: Vec<Point>) -> Vec<Point> {
        points
            .into_iter()
            .map(|p| Point::with_z(p.x, p.y, self.config.z_depth))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::ids::StructureId;
    use crate::math::geometry::polygon::{Polygon, PolygonProperties};
    use crate::math::types::points_from_xy;
    use approx::assert_relative_eq;

    fn editor() -> ContourEditor {
        let mut editor = ContourEditor::new(EditorConfig::default()).unwrap();
        editor.activate();
        editor
    }

    fn structure() -> Structure {
        Structure::new(StructureId(1), "organ", "kidney", [0.1, 0.6, 0.3])
    }

    fn stroke_from(coords: &[(f64, f64)]) -> StrokeBuffer {
        let mut stroke = StrokeBuffer::new();
        for &(x, y) in coords {
            stroke.add_point(Point::new(x, y), 0.1);
        }
        stroke
    }

    fn area_of(structure: &Structure, slice: SliceIndex) -> f64 {
        let points = structure.points(slice).unwrap().to_vec();
        Polygon::new(points).unwrap().area()
    }

    #[test]
    fn test_requires_active_editing() {
        let mut editor = ContourEditor::new(EditorConfig::default()).unwrap();
        let mut s = structure();
        let mut stroke = stroke_from(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);

        assert_eq!(
            editor.finish_pen_stroke(&mut s, &mut stroke).unwrap_err(),
            EditError::NotEditable
        );
        assert_eq!(
            editor.apply_brush(&mut s, Point::new(0.0, 0.0)).unwrap_err(),
            EditError::NotEditable
        );
        assert_eq!(
            editor.structure_at(&[], Point::new(0.0, 0.0)).unwrap_err(),
            EditError::NotEditable
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EditorConfig::default().with_brush_step(-1.0);
        assert!(ContourEditor::new(config).is_err());
    }

    #[test]
    fn test_first_stroke_creates_contour() {
        let editor = editor();
        let mut s = structure();
        let mut stroke = stroke_from(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);

        assert_eq!(editor.finish_pen_stroke(&mut s, &mut stroke).unwrap(), EditOutcome::Created);
        assert!(stroke.is_empty());
        let points = s.points(SliceIndex(0)).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].z, editor.config().z_depth);
    }

    #[test]
    fn test_short_stroke_rejected() {
        let editor = editor();
        let mut s = structure();
        let mut stroke = stroke_from(&[(0.0, 0.0), (4.0, 0.0)]);

        assert_eq!(
            editor.finish_pen_stroke(&mut s, &mut stroke).unwrap_err(),
            EditError::StrokeTooShort { points: 2 }
        );
        assert!(stroke.is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn test_stroke_starting_inside_unites() {
        let editor = editor();
        let mut s = structure();
        s.register_contour(
            SliceIndex(0),
            points_from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
        );

        // Start (3,3) liegt innerhalb der bestehenden Kontur
        let mut stroke = stroke_from(&[(3.0, 3.0), (6.0, 3.0), (6.0, 6.0), (3.0, 6.0)]);
        let outcome = editor.finish_pen_stroke(&mut s, &mut stroke).unwrap();
        assert_eq!(
            outcome,
            EditOutcome::Merged {
                operation: BooleanOperation::Union,
                vertices: 8
            }
        );
        assert_relative_eq!(area_of(&s, SliceIndex(0)), 16.0 + 9.0 - 1.0);
    }

    #[test]
    fn test_stroke_starting_outside_subtracts() {
        let editor = editor();
        let mut s = structure();
        s.register_contour(
            SliceIndex(0),
            points_from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
        );

        let mut stroke = stroke_from(&[(6.0, 6.0), (2.0, 6.0), (2.0, 2.0), (6.0, 2.0)]);
        let outcome = editor.finish_pen_stroke(&mut s, &mut stroke).unwrap();
        assert!(matches!(
            outcome,
            EditOutcome::Merged {
                operation: BooleanOperation::Difference,
                ..
            }
        ));
        assert_relative_eq!(area_of(&s, SliceIndex(0)), 12.0);
    }

    #[test]
    fn test_failed_merge_keeps_contour() {
        let editor = editor();
        let mut s = structure();
        let square = points_from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        s.register_contour(SliceIndex(0), square.clone());

        // Liegt komplett daneben: keine Schnittpunkte
        let mut stroke = stroke_from(&[(10.0, 10.0), (12.0, 10.0), (12.0, 12.0)]);
        let err = editor.finish_pen_stroke(&mut s, &mut stroke).unwrap_err();
        assert!(matches!(err, EditError::Merge(_)));
        assert_eq!(s.points(SliceIndex(0)), Some(square.as_slice()));
        assert!(stroke.is_empty());
    }

    #[test]
    fn test_tiny_result_removes_contour() {
        let config = EditorConfig::default().with_min_area(5.0);
        let mut editor = ContourEditor::new(config).unwrap();
        editor.activate();
        let mut s = structure();
        s.register_contour(
            SliceIndex(0),
            points_from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (0.0, 1.0)]),
        );

        // Schneidet fast alles weg: Rest 1x1
        let mut stroke = stroke_from(&[(-1.0, -1.0), (3.0, -1.0), (3.0, 2.0), (-1.0, 2.0)]);
        assert_eq!(editor.finish_pen_stroke(&mut s, &mut stroke).unwrap(), EditOutcome::Removed);
        assert_eq!(s.points(SliceIndex(0)), None);
    }

    #[test]
    fn test_brush_latches_mode() {
        let mut editor = editor();
        let mut s = structure();
        s.register_contour(
            SliceIndex(0),
            points_from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
        );

        // Erster Abdruck innerhalb, am rechten Rand: Union
        let first = editor.apply_brush(&mut s, Point::new(9.0, 5.0)).unwrap();
        assert!(matches!(
            first,
            EditOutcome::Merged {
                operation: BooleanOperation::Union,
                ..
            }
        ));
        assert_eq!(editor.brush_mode(), Some(BooleanOperation::Union));
        assert!(area_of(&s, SliceIndex(0)) > 100.0);

        // Zu nah am vorherigen Abdruck
        assert_eq!(
            editor.apply_brush(&mut s, Point::new(9.05, 5.0)).unwrap(),
            EditOutcome::Skipped
        );

        editor.end_brush(&mut s, Point::new(9.0, 5.0)).unwrap();
        assert_eq!(editor.brush_mode(), None);
    }

    #[test]
    fn test_brush_creates_first_contour() {
        let mut editor = editor();
        let mut s = structure();
        let outcomes = editor.brush_to(&mut s, Point::new(20.0, 20.0)).unwrap();
        assert_eq!(outcomes, vec![EditOutcome::Created]);
        assert_eq!(s.points(SliceIndex(0)).map(<[Point]>::len), Some(10));
        assert_eq!(editor.brush_mode(), Some(BooleanOperation::Union));
    }

    #[test]
    fn test_brush_size_limits() {
        let config = EditorConfig::default()
            .with_brush_limits(1.0, 2.0)
            .with_brush_size(1.5)
            .with_brush_step(0.4);
        let mut editor = ContourEditor::new(config).unwrap();

        assert_relative_eq!(editor.increase_brush_size(), 1.9);
        assert_relative_eq!(editor.increase_brush_size(), 2.0);
        assert_relative_eq!(editor.increase_brush_size(), 2.0);
        assert_relative_eq!(editor.decrease_brush_size(), 1.6);
    }

    #[test]
    fn test_structure_at() {
        let mut editor = editor();
        editor.set_slice(SliceIndex(2));

        let mut first = structure();
        first.register_contour(
            SliceIndex(2),
            points_from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
        );
        let mut second = Structure::new(StructureId(2), "organ", "spleen", [0.5, 0.5, 0.9]);
        second.register_contour_at(
            SliceIndex(2),
            ContourId(3),
            points_from_xy(&[(10.0, 10.0), (14.0, 10.0), (14.0, 14.0), (10.0, 14.0)]),
        );
        let structures = [first, second];

        assert_eq!(
            editor.structure_at(&structures, Point::new(12.0, 12.0)).unwrap(),
            Some((1, ContourId(3)))
        );
        assert_eq!(
            editor.structure_at(&structures, Point::new(1.0, 1.0)).unwrap(),
            Some((0, ContourId(0)))
        );
        assert_eq!(editor.structure_at(&structures, Point::new(7.0, 7.0)).unwrap(), None);

        editor.set_slice(SliceIndex(3));
        assert_eq!(editor.structure_at(&structures, Point::new(1.0, 1.0)).unwrap(), None);
    }
}
