//! Glyph outline flattening (requires the `font` feature).
//!
//! [`GlyphOutlineCollector`] receives a glyph's outline from `ttf-parser`
//! and records it as tagged points in the layout [`crate::outline`]
//! understands; [`flatten_glyph`] runs that through the curve flatteners.

use crate::basics::{PointD, PointKind};
use crate::curves::{CubicFlattener, QuadraticFlattener};
use crate::outline::{flatten_outline, OutlineError};

/// Records outline commands as tagged points, scaled from font units.
pub struct GlyphOutlineCollector {
    points: Vec<PointD>,
    scale: f64,
    flip_y: bool,
}

impl GlyphOutlineCollector {
    pub fn new(scale: f64, flip_y: bool) -> Self {
        Self {
            points: Vec::with_capacity(64),
            scale,
            flip_y,
        }
    }

    #[inline]
    fn point(&self, x: f32, y: f32, kind: PointKind) -> PointD {
        let y = y as f64 * self.scale;
        PointD::with_kind(
            x as f64 * self.scale,
            if self.flip_y { -y } else { y },
            kind,
        )
    }

    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PointD> {
        self.points
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutlineCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        let kind = if self.points.is_empty() {
            PointKind::empty()
        } else {
            PointKind::BREAK
        };
        let p = self.point(x, y, kind);
        self.points.push(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y, PointKind::empty());
        self.points.push(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let c = self.point(x1, y1, PointKind::CONTROL);
        let p = self.point(x, y, PointKind::empty());
        self.points.extend([c, p]);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let c1 = self.point(x1, y1, PointKind::CUBIC);
        let c2 = self.point(x2, y2, PointKind::CUBIC);
        let p = self.point(x, y, PointKind::empty());
        self.points.extend([c1, c2, p]);
    }

    // contours are closed implicitly
    fn close(&mut self) {}
}

/// Tagged outline points of a glyph at `size` pixels per em.
///
/// `None` for glyphs without an outline, such as a space.
pub fn glyph_points(
    face: &ttf_parser::Face<'_>,
    glyph: ttf_parser::GlyphId,
    size: f64,
    flip_y: bool,
) -> Option<Vec<PointD>> {
    let scale = size / face.units_per_em() as f64;
    let mut collector = GlyphOutlineCollector::new(scale, flip_y);
    face.outline_glyph(glyph, &mut collector)?;
    Some(collector.into_points())
}

/// Flattened glyph outline, contours separated by [`PointKind::BREAK`].
pub fn flatten_glyph(
    face: &ttf_parser::Face<'_>,
    glyph: ttf_parser::GlyphId,
    size: f64,
    flip_y: bool,
) -> Result<Option<Vec<PointD>>, OutlineError> {
    match glyph_points(face, glyph, size, flip_y) {
        Some(pts) => {
            flatten_outline(&pts, &QuadraticFlattener::new(), &CubicFlattener::new()).map(Some)
        }
        None => Ok(None),
    }
}
