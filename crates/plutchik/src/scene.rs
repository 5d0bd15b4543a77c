//! Renderer-neutral snapshot of the wheel, plus a standalone SVG writer.
//!
//! Coordinates are in the fixed logical viewport; hosts scale the whole
//! scene to their surface instead of recomputing geometry per pixel size.

use crate::catalog::{Color, EmotionId};
use crate::geometry::{ArcPath, Point, Sector, num};
use crate::highlight::HoverRole;
use crate::label::LabelPose;
use crate::layout::Ring;
use std::fmt::Write;

pub const STROKE_WIDTH: f64 = 3.0;
pub const CORE_FILL: &str = "#1A1A1A";
pub const STROKE: &str = "#000000";

#[derive(Debug, Clone, PartialEq)]
pub struct SceneWedge {
    pub id: EmotionId,
    pub name: String,
    pub ring: Ring,
    pub role: HoverRole,
    pub sector: Sector,
    pub path: ArcPath,
    pub fill: Color,
    /// Current (animated) translation of the wedge and its label.
    pub offset: Point,
    pub label: LabelPose,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: f64,
    pub center: Point,
    pub core_radius: f64,
    /// Back to front: inactive wedges first, the hovered wedge last.
    pub wedges: Vec<SceneWedge>,
}

impl Scene {
    pub fn wedge(&self, id: &EmotionId) -> Option<&SceneWedge> {
        self.wedges.iter().find(|w| &w.id == id)
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // writing into a String cannot fail
        let _ = self.write_svg(&mut svg);
        svg
    }

    fn write_svg(&self, svg: &mut String) -> std::fmt::Result {
        let size = num(self.viewport);
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
        )?;

        if self.core_radius > 0.0 {
            writeln!(
                svg,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{CORE_FILL}" stroke="{STROKE}" stroke-width="{STROKE_WIDTH}"/>"#,
                num(self.center.x),
                num(self.center.y),
                num(self.core_radius),
            )?;
        }

        for wedge in &self.wedges {
            Self::write_wedge(svg, wedge)?;
        }

        writeln!(svg, "</svg>")
    }

    fn write_wedge(svg: &mut String, wedge: &SceneWedge) -> std::fmt::Result {
        let (x, y) = (num(wedge.label.position.x), num(wedge.label.position.y));
        let weight = match wedge.ring {
            Ring::Inner => "bold",
            Ring::Outer => "600",
        };

        writeln!(
            svg,
            r#"  <g class="wedge {} {}" data-id="{}" transform="translate({} {})">"#,
            wedge.ring,
            wedge.role,
            escape_xml(&wedge.id),
            num(wedge.offset.x),
            num(wedge.offset.y),
        )?;
        writeln!(
            svg,
            r#"    <path d="{}" fill="{}" stroke="{STROKE}" stroke-width="{STROKE_WIDTH}" stroke-linejoin="round"/>"#,
            wedge.path, wedge.fill,
        )?;
        writeln!(
            svg,
            r#"    <text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="middle" font-size="{}" font-weight="{weight}" transform="rotate({} {x} {y})">{}</text>"#,
            num(wedge.font_size),
            num(wedge.label.rotation),
            escape_xml(&wedge.name),
        )?;
        writeln!(svg, "  </g>")
    }
}

/// Uniform fit of the square logical viewport into a host surface, centered
/// along the longer axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Viewport {
    pub fn fit(logical: f64, width: f64, height: f64) -> Self {
        let side = width.min(height).max(0.0);
        let scale = if logical > 0.0 { side / logical } else { 0.0 };
        Self {
            scale,
            offset: Point::new((width - side) / 2.0, (height - side) / 2.0),
        }
    }

    /// Surface coordinates back to logical ones. `None` while the surface
    /// has no area.
    pub fn to_logical(&self, surface: Point) -> Option<Point> {
        (self.scale > 0.0).then(|| (surface - self.offset) * (1.0 / self.scale))
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
