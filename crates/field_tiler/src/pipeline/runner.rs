//! High-level runner for executing the full tiling pipeline on a care-area set.
use tracing::{debug, info, warn};

use crate::analysis::{find_first_overlap, CoverageReport, OverlapPair};
use crate::error::{Error, Result};
use crate::geometry::{validate_rects, validate_width, CareAreaIndex, Rect};
use crate::pipeline::events::{EventSink, TilingEvent, TilingEventKind};
use crate::tiling::{
    plan_main_fields, plan_sub_fields, plan_sub_fields_indexed, MainField, SubField,
};

/// Configuration for a tiling run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Side length of main fields in world units.
    pub main_field_width: f64,
    /// Side length of sub-fields in world units.
    pub sub_field_width: f64,
    /// Cell size of the care-area index. `None` scans care areas linearly.
    pub spatial_index_cell: Option<f64>,
}

impl RunConfig {
    /// Creates a new [`RunConfig`] with the two field widths.
    pub fn new(main_field_width: f64, sub_field_width: f64) -> Self {
        Self {
            main_field_width,
            sub_field_width,
            spatial_index_cell: None,
        }
    }

    /// Enables the care-area index with the given cell size.
    pub fn with_spatial_index(mut self, cell_size: f64) -> Self {
        self.spatial_index_cell = Some(cell_size);
        self
    }

    /// Validates the configuration.
    ///
    /// Non-positive widths are [`Error::InvalidGeometry`], as in the planners; a bad
    /// index cell size is [`Error::InvalidConfig`].
    pub fn validate(&self) -> Result<()> {
        validate_width(self.main_field_width, "main_field_width")?;
        validate_width(self.sub_field_width, "sub_field_width")?;
        if let Some(cell) = self.spatial_index_cell {
            if !(cell.is_finite() && cell > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "spatial_index_cell must be finite and > 0, got {cell}"
                )));
            }
        }
        Ok(())
    }
}

/// Result of a tiling run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Main fields in creation order.
    pub main_fields: Vec<MainField>,
    /// Sub-fields in creation order.
    pub sub_fields: Vec<SubField>,
    /// First overlapping sub-field pair, if any.
    pub overlap: Option<OverlapPair>,
    /// Coverage of the care areas by the sub-fields.
    pub coverage: CoverageReport,
}

impl RunResult {
    /// Returns `true` when no two sub-fields overlap.
    pub fn is_overlap_free(&self) -> bool {
        self.overlap.is_none()
    }
}

pub struct TilingRunner {
    /// Run configuration applied to this runner.
    pub config: RunConfig,
}

impl TilingRunner {
    pub fn try_new(config: RunConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs the pipeline over `care_areas`.
    pub fn run(&self, care_areas: &[Rect]) -> Result<RunResult> {
        run_tiling(care_areas, &self.config, None)
    }

    pub fn run_with_events(
        &self,
        care_areas: &[Rect],
        sink: &mut dyn EventSink,
    ) -> Result<RunResult> {
        run_tiling(care_areas, &self.config, Some(sink))
    }
}

pub fn run_tiling(
    care_areas: &[Rect],
    config: &RunConfig,
    sink: Option<&mut dyn EventSink>,
) -> Result<RunResult> {
    if let Some(s) = sink {
        run_tiling_with_events(care_areas, config, s)
    } else {
        run_tiling_with_events(care_areas, config, &mut ())
    }
}

pub fn run_tiling_with_events(
    care_areas: &[Rect],
    config: &RunConfig,
    sink: &mut dyn EventSink,
) -> Result<RunResult> {
    config.validate()?;
    if care_areas.is_empty() {
        return Err(Error::InvalidGeometry("care area set is empty".into()));
    }
    validate_rects(care_areas, "care area")?;

    if sink.wants(TilingEventKind::RunStarted) {
        sink.send(TilingEvent::RunStarted {
            config: config.clone(),
            care_area_count: care_areas.len(),
        });
    }

    let main_fields = plan_main_fields(care_areas, config.main_field_width)?;
    if sink.wants(TilingEventKind::MainFieldsPlanned) {
        sink.send(TilingEvent::MainFieldsPlanned {
            count: main_fields.len(),
        });
    }

    let sub_fields = match config.spatial_index_cell {
        Some(cell) => {
            let index = CareAreaIndex::try_new(care_areas, cell)?;
            plan_sub_fields_indexed(&main_fields, config.sub_field_width, &index)?
        }
        None => plan_sub_fields(&main_fields, config.sub_field_width, care_areas)?,
    };
    if sink.wants(TilingEventKind::SubFieldsPlanned) {
        sink.send(TilingEvent::SubFieldsPlanned {
            count: sub_fields.len(),
            indexed: config.spatial_index_cell.is_some(),
        });
    }

    let overlap = find_first_overlap(&sub_fields);
    match overlap {
        Some(pair) => {
            warn!("Overlap detected between {}.", pair);
            send_warning(sink, "overlap", format!("overlap detected between {pair}"));
        }
        None => debug!("No overlap detected in {} sub-fields.", sub_fields.len()),
    }
    if sink.wants(TilingEventKind::OverlapChecked) {
        sink.send(TilingEvent::OverlapChecked { overlap });
    }

    let coverage = CoverageReport::compute(care_areas, &sub_fields)?;
    if !coverage.is_consistent() {
        warn!(
            "Coverage efficiency {:.6} lies outside (0, 1]; sub-fields and care areas disagree.",
            coverage.ratio
        );
        send_warning(
            sink,
            "coverage",
            format!("coverage efficiency {} lies outside (0, 1]", coverage.ratio),
        );
    }
    if sink.wants(TilingEventKind::CoverageComputed) {
        sink.send(TilingEvent::CoverageComputed { report: coverage });
    }

    info!(
        "Tiled {} care areas into {} main fields and {} sub-fields | coverage: {:.4}.",
        care_areas.len(),
        main_fields.len(),
        sub_fields.len(),
        coverage.ratio,
    );

    if sink.wants(TilingEventKind::RunFinished) {
        sink.send(TilingEvent::RunFinished {
            main_field_count: main_fields.len(),
            sub_field_count: sub_fields.len(),
        });
    }

    Ok(RunResult {
        main_fields,
        sub_fields,
        overlap,
        coverage,
    })
}

fn send_warning(sink: &mut dyn EventSink, context: &str, message: String) {
    if sink.wants(TilingEventKind::Warning) {
        sink.send(TilingEvent::Warning {
            context: context.into(),
            message,
        });
    }
}
