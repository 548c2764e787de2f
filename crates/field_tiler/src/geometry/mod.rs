//! Axis-aligned rectangle model shared by every tiling stage.
//!
//! [`Rect`] stores its bounds as `{xmin, xmax, ymin, ymax}` in the same order the
//! care-area and field tables use. Rectangles entering the pipeline must be finite
//! with strictly positive width and height; see [`Rect::try_new`] and
//! [`validate_rects`].
use std::fmt;

use glam::DVec2;
use mint::Vector2;

use crate::error::{Error, Result};

pub mod index;

pub use index::{CareAreaIndex, CellId, MAX_INDEX_CELLS};

/// Axis-aligned rectangle with `f64` bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Rect {
    /// Creates a rectangle without checking its bounds.
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Creates a rectangle, rejecting non-finite, degenerate or inverted bounds.
    pub fn try_new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        let rect = Self::new(xmin, xmax, ymin, ymax);
        if rect.is_valid() {
            Ok(rect)
        } else {
            Err(Error::InvalidGeometry(format!(
                "rectangle {rect} must be finite with xmin < xmax and ymin < ymax"
            )))
        }
    }

    /// Creates a rectangle from its lower-left and upper-right corners.
    pub fn from_corners(
        min: impl Into<Vector2<f64>>,
        max: impl Into<Vector2<f64>>,
    ) -> Result<Self> {
        let min = DVec2::from(min.into());
        let max = DVec2::from(max.into());
        Self::try_new(min.x, max.x, min.y, max.y)
    }

    /// Lower-left corner.
    #[inline]
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.xmin, self.ymin)
    }

    /// Upper-right corner.
    #[inline]
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.xmax, self.ymax)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns `true` when all bounds are finite and the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.xmin.is_finite()
            && self.xmax.is_finite()
            && self.ymin.is_finite()
            && self.ymax.is_finite()
            && self.xmin < self.xmax
            && self.ymin < self.ymax
    }

    /// Strict overlap test. Rectangles that only share an edge or a corner do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.xmin < other.xmax
            && self.xmax > other.xmin
            && self.ymin < other.ymax
            && self.ymax > other.ymin
    }

    /// Clips `self` against `other`.
    ///
    /// Returns `None` when the rectangles do not overlap or the clipped
    /// rectangle would have zero width or height.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let clipped = Rect::new(
            self.xmin.max(other.xmin),
            self.xmax.min(other.xmax),
            self.ymin.max(other.ymin),
            self.ymax.min(other.ymax),
        );
        (clipped.xmin < clipped.xmax && clipped.ymin < clipped.ymax).then_some(clipped)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}}}",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

impl From<Rect> for [f64; 4] {
    fn from(r: Rect) -> Self {
        [r.xmin, r.xmax, r.ymin, r.ymax]
    }
}

/// Checks every rectangle in `rects`, naming the first offender by `label` and position.
pub fn validate_rects<'a>(rects: impl IntoIterator<Item = &'a Rect>, label: &str) -> Result<()> {
    for (i, rect) in rects.into_iter().enumerate() {
        if !rect.is_valid() {
            return Err(Error::InvalidGeometry(format!(
                "{label} #{i} {rect} must be finite with xmin < xmax and ymin < ymax"
            )));
        }
    }
    Ok(())
}

/// Checks that a tile width is finite and strictly positive.
pub fn validate_width(width: f64, name: &str) -> Result<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidGeometry(format!(
            "{name} must be finite and > 0, got {width}"
        )))
    }
}

/// Total area of a set of rectangles.
pub fn total_area<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> f64 {
    rects.into_iter().map(Rect::area).sum()
}
