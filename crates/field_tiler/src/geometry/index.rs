//! Uniform grid hash over care areas.
//!
//! The sub-field planner clips every candidate tile against every care area it
//! overlaps. [`CareAreaIndex`] buckets care areas by the grid cells their bounds
//! touch so a candidate only has to be tested against the care areas sharing one
//! of its cells. Candidates come back in ascending care-area order, which keeps
//! clipping output identical to a linear scan.
//!
//! The grid spans the bounding box of the care areas and is capped at
//! [`MAX_INDEX_CELLS`] cells; lookups outside the box are clamped to its edge cells.
use std::collections::HashMap;

use glam::DVec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{validate_rects, Rect};

/// Upper bound on the number of grid cells spanned by the care-area bounding box.
pub const MAX_INDEX_CELLS: u64 = 1 << 20;

/// Identifier for a cell in the index grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellId(
    /// Cell index along the X axis.
    pub i64,
    /// Cell index along the Y axis.
    pub i64,
);

/// Spatial index over a borrowed care-area sequence.
#[derive(Debug, Clone)]
pub struct CareAreaIndex<'a> {
    care_areas: &'a [Rect],
    origin: DVec2,
    cell_size: f64,
    /// Highest cell along each axis; the lowest is `CellId(0, 0)`.
    last_cell: CellId,
    cells: HashMap<CellId, Vec<usize>>,
}

impl<'a> CareAreaIndex<'a> {
    /// Builds an index with square cells of `cell_size` world units.
    pub fn try_new(care_areas: &'a [Rect], cell_size: f64) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "spatial index cell size must be finite and > 0, got {cell_size}"
            )));
        }
        validate_rects(care_areas, "care area")?;

        let (origin, far) = care_areas
            .iter()
            .map(|r| (r.min(), r.max()))
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
            .unwrap_or((DVec2::ZERO, DVec2::ZERO));

        let span = ((far - origin) / cell_size).floor() + DVec2::ONE;
        let cell_count = span.x * span.y;
        if !(cell_count <= MAX_INDEX_CELLS as f64) {
            return Err(Error::InvalidConfig(format!(
                "spatial index cell size {cell_size} spans {cell_count} cells, \
                 more than the limit of {MAX_INDEX_CELLS}"
            )));
        }

        let mut index = Self {
            care_areas,
            origin,
            cell_size,
            last_cell: CellId(span.x as i64 - 1, span.y as i64 - 1),
            cells: HashMap::new(),
        };
        for (i, rect) in care_areas.iter().enumerate() {
            let (lo, hi) = index.cell_range(rect);
            for cx in lo.0..=hi.0 {
                for cy in lo.1..=hi.1 {
                    index.cells.entry(CellId(cx, cy)).or_default().push(i);
                }
            }
        }

        debug!(
            care_areas = care_areas.len(),
            cells = index.cells.len(),
            cell_size,
            "built care area index"
        );
        Ok(index)
    }

    /// The indexed care areas, in input order.
    pub fn care_areas(&self) -> &'a [Rect] {
        self.care_areas
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Computes the cell containing `position`.
    pub fn cell_for_position(&self, position: DVec2) -> CellId {
        let rel = (position - self.origin) / self.cell_size;
        CellId(rel.x.floor() as i64, rel.y.floor() as i64)
    }

    /// Cells touched by `rect`, clamped to the indexed bounding box.
    fn cell_range(&self, rect: &Rect) -> (CellId, CellId) {
        let lo = self.cell_for_position(rect.min());
        let hi = self.cell_for_position(rect.max());
        (
            CellId(lo.0.max(0), lo.1.max(0)),
            CellId(hi.0.min(self.last_cell.0), hi.1.min(self.last_cell.1)),
        )
    }

    /// Returns the positions of all care areas that may overlap `rect`, ascending.
    ///
    /// The result is a superset of the overlapping care areas; callers still apply
    /// the strict overlap test.
    pub fn candidates(&self, rect: &Rect) -> Vec<usize> {
        let (lo, hi) = self.cell_range(rect);
        let mut out = Vec::new();
        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                if let Some(bucket) = self.cells.get(&CellId(cx, cy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Iterates the care areas that strictly overlap `rect`, in input order.
    pub fn overlapping<'s>(&'s self, rect: &'s Rect) -> impl Iterator<Item = &'a Rect> + 's {
        let care_areas = self.care_areas;
        self.candidates(rect)
            .into_iter()
            .map(move |i| &care_areas[i])
            .filter(move |ca| rect.overlaps(ca))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn areas() -> Vec<Rect> {
        vec![
            Rect::new(0.0, 10.0, 0.0, 10.0),
            Rect::new(10.0, 20.0, 0.0, 10.0),
            Rect::new(40.0, 50.0, 40.0, 50.0),
            Rect::new(5.0, 45.0, 5.0, 8.0),
        ]
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let a = areas();
        assert!(CareAreaIndex::try_new(&a, 0.0).is_err());
        assert!(CareAreaIndex::try_new(&a, f64::NAN).is_err());
    }

    #[test]
    fn rejects_invalid_care_area() {
        let a = vec![Rect::new(0.0, 1.0, 1.0, 0.0)];
        assert!(matches!(
            CareAreaIndex::try_new(&a, 1.0),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn cell_for_position_is_relative_to_origin() {
        let a = vec![Rect::new(-5.0, 5.0, -5.0, 5.0)];
        let index = CareAreaIndex::try_new(&a, 2.0).unwrap();
        assert_eq!(index.cell_for_position(DVec2::new(-5.0, -5.0)), CellId(0, 0));
        assert_eq!(index.cell_for_position(DVec2::new(-3.5, -1.0)), CellId(0, 2));
    }

    #[test]
    fn candidates_are_sorted_and_unique() {
        let a = areas();
        let index = CareAreaIndex::try_new(&a, 4.0).unwrap();
        let c = index.candidates(&Rect::new(6.0, 14.0, 6.0, 9.0));
        assert_eq!(c, vec![0, 1, 3]);
    }

    #[test]
    fn overlapping_matches_linear_scan() {
        let a = areas();
        let index = CareAreaIndex::try_new(&a, 3.0).unwrap();
        let queries = [
            Rect::new(0.0, 5.0, 0.0, 5.0),
            Rect::new(9.0, 11.0, 0.0, 1.0),
            Rect::new(10.0, 12.0, 20.0, 30.0),
            Rect::new(44.0, 46.0, 6.0, 44.0),
        ];
        for query in &queries {
            let indexed: Vec<Rect> = index.overlapping(query).copied().collect();
            let linear: Vec<Rect> = a
                .iter()
                .filter(|ca| query.overlaps(ca))
                .copied()
                .collect();
            assert_eq!(indexed, linear, "query {query}");
        }
    }

    #[test]
    fn rejects_cell_size_spanning_too_many_cells() {
        let a = vec![Rect::new(0.0, 2000.0, 0.0, 2000.0)];
        assert!(matches!(
            CareAreaIndex::try_new(&a, 1.0),
            Err(Error::InvalidConfig(_))
        ));
        let index = CareAreaIndex::try_new(&a, 4.0).unwrap();
        assert_eq!(index.cell_count(), 501 * 501);
    }

    #[test]
    fn far_away_query_is_clamped_to_the_grid() {
        let a = areas();
        let index = CareAreaIndex::try_new(&a, 1.0).unwrap();
        assert!(index
            .candidates(&Rect::new(1e300, f64::MAX, -f64::MAX, -1e300))
            .is_empty());
        let huge = Rect::new(-1e12, 1e12, -1e12, 1e12);
        assert_eq!(index.candidates(&huge), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_index_has_no_candidates() {
        let index = CareAreaIndex::try_new(&[], 1.0).unwrap();
        assert_eq!(index.cell_count(), 0);
        assert!(index.candidates(&Rect::new(0.0, 1.0, 0.0, 1.0)).is_empty());
    }
}
