//! Sub-field placement with care-area clipping.
//!
//! Every main field is tiled with a grid of `sub_field_width`. Unlike main fields, the
//! last row and column of a main field are clamped to its own bounds. Each candidate
//! tile is then clipped against every care area it strictly overlaps, yielding one
//! sub-field per overlapping care area. Main fields carry no link back to the care
//! area that produced them, so clipping always considers the whole care-area set.
use tracing::debug;

use crate::error::Result;
use crate::geometry::{validate_rects, validate_width, CareAreaIndex, Rect};
use crate::tiling::{grid_cells, IdSequence, MainField, SubField};

/// Tiles `main_fields` into sub-fields clipped to `care_areas`, ids starting at 1.
///
/// Care areas are scanned linearly for every candidate tile.
pub fn plan_sub_fields(
    main_fields: &[MainField],
    sub_field_width: f64,
    care_areas: &[Rect],
) -> Result<Vec<SubField>> {
    validate_width(sub_field_width, "sub_field_width")?;
    validate_rects(main_fields.iter().map(|mf| &mf.rect), "main field")?;
    validate_rects(care_areas, "care area")?;

    let fields = place_sub_fields(main_fields, sub_field_width, |_| care_areas.iter());
    debug!(
        main_fields = main_fields.len(),
        care_areas = care_areas.len(),
        sub_fields = fields.len(),
        sub_field_width,
        "planned sub fields"
    );
    Ok(fields)
}

/// Same as [`plan_sub_fields`], looking up care areas through `index`.
///
/// Output is identical to the linear scan over `index.care_areas()`.
pub fn plan_sub_fields_indexed(
    main_fields: &[MainField],
    sub_field_width: f64,
    index: &CareAreaIndex<'_>,
) -> Result<Vec<SubField>> {
    validate_width(sub_field_width, "sub_field_width")?;
    validate_rects(main_fields.iter().map(|mf| &mf.rect), "main field")?;

    let care_areas = index.care_areas();
    let fields = place_sub_fields(main_fields, sub_field_width, |candidate| {
        index
            .candidates(candidate)
            .into_iter()
            .map(move |i| &care_areas[i])
    });
    debug!(
        main_fields = main_fields.len(),
        care_areas = care_areas.len(),
        index_cells = index.cell_count(),
        sub_fields = fields.len(),
        sub_field_width,
        "planned sub fields (indexed)"
    );
    Ok(fields)
}

fn place_sub_fields<'c, F, I>(
    main_fields: &[MainField],
    width: f64,
    mut lookup: F,
) -> Vec<SubField>
where
    F: FnMut(&Rect) -> I,
    I: IntoIterator<Item = &'c Rect>,
{
    let mut ids = IdSequence::new();
    let mut fields = Vec::new();
    for mf in main_fields {
        let bounds = mf.rect;
        for (x_lo, x_hi) in grid_cells(bounds.xmin, bounds.xmax, width) {
            for (y_lo, y_hi) in grid_cells(bounds.ymin, bounds.ymax, width) {
                let candidate =
                    Rect::new(x_lo, x_hi.min(bounds.xmax), y_lo, y_hi.min(bounds.ymax));
                for care_area in lookup(&candidate) {
                    if let Some(clipped) = candidate.intersection(care_area) {
                        fields.push(SubField {
                            id: ids.next_id(),
                            rect: clipped,
                            main_field_id: mf.id,
                        });
                    }
                }
            }
        }
    }
    fields
}
