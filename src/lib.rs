//! # conic-raster
//!
//! Geometric core of a software 2D renderer. It turns shape descriptions
//! (ellipses, arcs, pies, Bezier curves, rounded boxes, capsules, rhombi)
//! into point and line sequences ready for scan-conversion, and applies
//! rotation, skew and non-uniform scale about an arbitrary centre
//! consistently across all of them.
//!
//! - Transform composition with sin/cos, centre and skew resolved once
//!   per batch
//! - Ellipse construction from three, four or five points through a
//!   general conic solve
//! - Ellipse, arc and pie perimeters, Bernstein Bezier chains and adaptive
//!   quadratic/cubic flattening
//! - Stroke outlines (outer and inner perimeters) for closed and open shapes
//! - Bresenham, Nissen and fast-quadrant ellipse rasterization into spans
//!   and lines
//!
//! ## Architecture
//!
//! Nothing here touches pixels. Every operation produces either
//!
//! 1. **Points**: [`basics::PointD`] sequences, tagged with a
//!    [`basics::PointKind`] for controls, contour breaks and centres
//! 2. **Lines**: [`ellipse_raster::Line`] and [`ellipse_raster::AxisLine`]
//!    spans with a fill orientation
//!
//! which a renderer scan-converts.

// Foundation types & math
pub mod basics;
pub mod bounding_rect;
pub mod math;
pub mod trans_affine;

// Transform composition
pub mod rotation;

// Conic construction
pub mod conic;
pub mod curve;

// Tessellation
pub mod arc;
pub mod bernstein;
pub mod curves;
pub mod ellipse;
#[cfg(feature = "font")]
pub mod glyph;
pub mod outline;
pub mod rounded_box;

// Stroking & rasterization
pub mod ellipse_raster;
pub mod stroke;

pub use basics::{PointD, PointKind, RectD};
pub use conic::{Conic, ConicConfig};
pub use curve::{Curve, CurveType};
pub use ellipse_raster::EllipseRasterizer;
pub use outline::OutlineError;
pub use rotation::{Centre, Rotation, Scale, Skew};
pub use stroke::StrokeMode;
