// src/debug/svg.rs
use crate::math::geometry::polygon::operations::boolean::CrossingRecord;
use crate::math::types::{Bounds2D, Point};
use std::path::Path;
use svg::{Document, Node};
use svg::node::element::{Circle, Polygon as SvgPolygon, Rectangle, Style};
use tracing::info;

// ===================================================================================
// HILFS-STRUCT für die SVG-Erstellung
// ===================================================================================
/// Sammelt die Elemente einer Debug-SVG. Die y-Achse wird gespiegelt, damit
/// das Bild dieselbe Orientierung hat wie die Bildschicht.
struct SvgBuilder {
    document: Document,
    bounds: Bounds2D,
    stroke_w_normal: f64,
    point_radius: f64,
}

impl SvgBuilder {
    /// Erstellt ein neues SVG-Grundgerüst mit Stil und Hintergrund.
    fn new(content_bounds: &Bounds2D, svg_pixel_size: f64) -> Self {
        // Etwas Rand, damit Kanten auf der Bounding Box sichtbar bleiben
        let margin = (content_bounds.width() + content_bounds.height()) / 2.0 * 0.05;
        let bounds = content_bounds.expand(margin.max(1e-3));

        let stroke_w_normal = (bounds.width() + bounds.height()) / 2.0 * 0.004;
        let stroke_w_thin = stroke_w_normal * 0.5;
        let point_radius = stroke_w_normal * 1.5;

        let style = Style::new(format!(
            ".background {{ fill: #f0f0f0; }}
.polygon-a {{ fill: rgba(150, 200, 255, 0.4); stroke: #0055aa; stroke-width: {stroke_w_thin}; }}
.polygon-b {{ fill: rgba(255, 200, 150, 0.4); stroke: #cc6600; stroke-width: {stroke_w_thin}; }}
.merged-polygon {{ fill: rgba(200, 150, 255, 0.5); stroke: #5500aa;
  stroke-width: {stroke_w_normal}; }}
.crossing {{ fill: #cc0000; }}"
        ));

        let background = Rectangle::new()
            .set("x", bounds.min.x)
            .set("y", bounds.min.y)
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("class", "background");

        let document = Document::new()
            .set("width", svg_pixel_size)
            .set("height", svg_pixel_size)
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min.x,
                    bounds.min.y,
                    bounds.width(),
                    bounds.height()
                ),
            )
            .add(style)
            .add(background);

        Self {
            document,
            bounds,
            stroke_w_normal,
            point_radius,
        }
    }

    /// Spiegelt y innerhalb der ViewBox.
    fn flip(&self, p: Point) -> (f64, f64) {
        (p.x, self.bounds.max.y + self.bounds.min.y - p.y)
    }

    /// Zeichnet ein Polygon.
    fn draw_polygon(&mut self, vertices: &[Point], class: &str) {
        if vertices.len() < 2 {
            return;
        }
        let points_str = vertices
            .iter()
            .map(|p| {
                let (x, y) = self.flip(*p);
                format!("{:.3},{:.3}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let polygon = SvgPolygon::new()
            .set("points", points_str)
            .set("class", class);
        self.document.append(polygon);
    }

    /// Zeichnet einen Kreis.
    fn draw_circle(&mut self, center: Point, radius: f64, class: &str) {
        let (cx, cy) = self.flip(center);
        let circle = Circle::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("r", radius)
            .set("class", class);
        self.document.append(circle);
    }

    /// Speichert die SVG-Datei.
    fn save(self, path: &Path) -> std::io::Result<()> {
        svg::save(path, &self.document)?;
        info!("Debug SVG '{}' wurde erstellt.", path.display());
        Ok(())
    }
}

/// Schreibt eine SVG mit beiden Eingaben eines Merges, den Schnittpunkten
/// und (falls vorhanden) dem Ergebnis.
///
/// # Arguments
/// * `path` - Der Dateipfad für die zu erstellende SVG.
/// * `polygon_a` - Die bestehende Kontur.
/// * `polygon_b` - Der neue Strich.
/// * `crossings` - Gefundene Schnittpunkte (leer, wenn unbekannt).
/// * `merged` - Das Merge-Ergebnis, falls es eines gibt.
/// * `svg_pixel_size` - Breite und Höhe der SVG in Pixeln.
pub fn create_merge_debug_svg(
    path: impl AsRef<Path>,
    polygon_a: &[Point],
    polygon_b: &[Point],
    crossings: &[CrossingRecord],
    merged: Option<&[Point]>,
    svg_pixel_size: f64,
) -> std::io::Result<()> {
    let all_points = polygon_a
        .iter()
        .chain(polygon_b)
        .chain(merged.unwrap_or_default())
        .copied();
    let Some(bounds) = Bounds2D::from_points_iter(all_points) else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "nothing to draw: all polygons are empty",
        ));
    };

    let mut svg = SvgBuilder::new(&bounds, svg_pixel_size);
    svg.draw_polygon(polygon_a, "polygon-a");
    svg.draw_polygon(polygon_b, "polygon-b");
    if let Some(merged) = merged {
        svg.draw_polygon(merged, "merged-polygon");
    }

    let radius = svg.point_radius.max(svg.stroke_w_normal);
    for crossing in crossings {
        svg.draw_circle(crossing.point, radius, "crossing");
    }

    svg.save(path.as_ref())
}
