#![forbid(unsafe_code)]
//! File-level driver for `field_tiler`: reads the care-area and metadata tables, runs the
//! tiling and writes the main-field and sub-field tables.

pub mod input;
pub mod output;
mod rendering;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use field_tiler::prelude::*;
use tracing::{debug, info};

pub use input::{parse_care_areas, parse_metadata, read_care_areas, read_metadata, Metadata};
pub use output::{save_main_fields, save_sub_fields, write_main_fields, write_sub_fields};
pub use rendering::{init_tracing, render_tiling, render_tiling_to_png, RenderConfig};

/// Input and output locations for one end-to-end run.
#[derive(Debug, Clone)]
pub struct Options {
    pub care_areas: PathBuf,
    pub metadata: PathBuf,
    pub main_fields_out: PathBuf,
    pub sub_fields_out: PathBuf,
    pub spatial_index_cell: Option<f64>,
    pub render: Option<PathBuf>,
}

/// Reads inputs, plans both field levels, verifies them and writes the output tables.
///
/// Output files are only written once planning has succeeded.
pub fn run(options: &Options) -> Result<RunResult> {
    let care_areas = read_care_areas(&options.care_areas)?;
    let metadata = read_metadata(&options.metadata)?;

    let mut config = RunConfig::new(metadata.main_field_width, metadata.sub_field_width);
    if let Some(cell) = options.spatial_index_cell {
        config = config.with_spatial_index(cell);
    }

    let runner = TilingRunner::try_new(config).context("Tiling failed")?;
    let started = Instant::now();
    let mut stage_timer = FnSink::new(|event: TilingEvent| {
        debug!(
            stage = ?event.kind(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "tiling stage done"
        );
    });
    let result = runner
        .run_with_events(&care_areas, &mut stage_timer)
        .context("Tiling failed")?;

    save_main_fields(&options.main_fields_out, &result.main_fields)?;
    save_sub_fields(&options.sub_fields_out, &result.sub_fields)?;
    info!(
        main_fields = %options.main_fields_out.display(),
        sub_fields = %options.sub_fields_out.display(),
        "wrote field tables"
    );

    if let Some(path) = &options.render {
        render_tiling_to_png(&care_areas, &result, &RenderConfig::default(), path)?;
    }
    Ok(result)
}
