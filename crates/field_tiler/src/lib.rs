#![forbid(unsafe_code)]
//! field_tiler: Two-level tiling of rectangular care areas into main fields and sub-fields.
//!
//! Modules:
//! - geometry: axis-aligned rectangles, validation, and a grid-hash index over care areas
//! - tiling: main-field placement and clipped sub-field placement
//! - analysis: overlap verification and coverage efficiency
//! - pipeline: run configuration, runner, events
//!
//! The crate works on typed, in-memory rectangles only; reading and writing tables is left
//! to callers.
pub mod analysis;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod tiling;

/// Convenient re-exports for common types. Import with `use field_tiler::prelude::*;`.
pub mod prelude {
    pub use crate::analysis::{
        coverage_efficiency, find_first_overlap, verify_no_overlap, CoverageReport, OverlapPair,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{CareAreaIndex, CellId, Rect};
    pub use crate::pipeline::events::{
        EventSink, FnSink, TilingEvent, TilingEventKind, VecSink,
    };
    pub use crate::pipeline::runner::{
        run_tiling, run_tiling_with_events, RunConfig, RunResult, TilingRunner,
    };
    pub use crate::tiling::{
        plan_main_fields, plan_sub_fields, plan_sub_fields_indexed, FieldId, IdSequence,
        MainField, SubField,
    };
}
