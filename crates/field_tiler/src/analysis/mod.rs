//! Checks run over a finished sub-field set.
//!
//! Both checks only read the sub-fields and are independent of each other.
pub mod coverage;
pub mod overlap;

pub use coverage::{coverage_efficiency, CoverageReport, COVERAGE_TOLERANCE};
pub use overlap::{find_first_overlap, verify_no_overlap, OverlapPair};
