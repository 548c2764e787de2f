//! Coverage efficiency: total sub-field area over total care-area area.
use crate::error::{Error, Result};
use crate::geometry::{total_area, Rect};
use crate::tiling::SubField;

/// Relative tolerance applied when deciding whether a ratio lies in `(0, 1]`.
pub const COVERAGE_TOLERANCE: f64 = 1e-9;

/// Areas behind a coverage ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageReport {
    /// Summed area of all sub-fields.
    pub covered_area: f64,
    /// Summed area of all care areas.
    pub care_area: f64,
    /// `covered_area / care_area`, never clamped.
    pub ratio: f64,
}

impl CoverageReport {
    /// Computes coverage of `care_areas` by `sub_fields`.
    ///
    /// Fails when the care areas have no total area, since the ratio is undefined.
    pub fn compute(care_areas: &[Rect], sub_fields: &[SubField]) -> Result<Self> {
        let care_area = total_area(care_areas);
        if !(care_area.is_finite() && care_area > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "total care area must be finite and > 0, got {care_area}"
            )));
        }
        let covered_area = total_area(sub_fields.iter().map(|sf| &sf.rect));
        Ok(Self {
            covered_area,
            care_area,
            ratio: covered_area / care_area,
        })
    }

    /// Returns `true` when the ratio lies in `(0, 1]`, up to [`COVERAGE_TOLERANCE`].
    ///
    /// A ratio above one means sub-fields counted overlapping care areas twice;
    /// zero means nothing was covered.
    pub fn is_consistent(&self) -> bool {
        self.ratio > 0.0 && self.ratio <= 1.0 + COVERAGE_TOLERANCE
    }
}

/// Ratio of total sub-field area to total care-area area.
pub fn coverage_efficiency(care_areas: &[Rect], sub_fields: &[SubField]) -> Result<f64> {
    CoverageReport::compute(care_areas, sub_fields).map(|r| r.ratio)
}
