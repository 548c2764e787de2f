//! Main-field placement.
//!
//! Each care area is covered by a square grid of `main_field_width` anchored at its
//! lower-left corner. The last row and column are not clipped and may reach past the
//! care area; clipping happens when sub-fields are placed.
use tracing::debug;

use crate::error::Result;
use crate::geometry::{validate_rects, validate_width, Rect};
use crate::tiling::{grid_cells, IdSequence, MainField};

/// Tiles every care area with main fields of `main_field_width`, ids starting at 1.
pub fn plan_main_fields(care_areas: &[Rect], main_field_width: f64) -> Result<Vec<MainField>> {
    validate_width(main_field_width, "main_field_width")?;
    validate_rects(care_areas, "care area")?;

    let mut ids = IdSequence::new();
    let mut fields = Vec::new();
    for care_area in care_areas {
        place_in_care_area(care_area, main_field_width, &mut ids, &mut fields);
    }

    debug!(
        care_areas = care_areas.len(),
        main_fields = fields.len(),
        main_field_width,
        "planned main fields"
    );
    Ok(fields)
}

fn place_in_care_area(
    care_area: &Rect,
    width: f64,
    ids: &mut IdSequence,
    out: &mut Vec<MainField>,
) {
    for (x_lo, x_hi) in grid_cells(care_area.xmin, care_area.xmax, width) {
        for (y_lo, y_hi) in grid_cells(care_area.ymin, care_area.ymax, width) {
            out.push(MainField {
                id: ids.next_id(),
                rect: Rect::new(x_lo, x_hi, y_lo, y_hi),
            });
        }
    }
}
