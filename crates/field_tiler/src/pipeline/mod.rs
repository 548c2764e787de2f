//! Run configuration, orchestration and observation of a full tiling run.
//!
//! Stages run in a fixed order: main fields, sub-fields, overlap check, coverage.
pub mod events;
pub mod runner;
