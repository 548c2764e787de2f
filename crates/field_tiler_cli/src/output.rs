//! CSV emission of main fields and sub-fields.
//!
//! Rows are written in creation order without a header:
//! `ID,Xmin,Xmax,Ymin,Ymax` for main fields and `ID,Xmin,Xmax,Ymin,Ymax,MainFieldID`
//! for sub-fields.
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use field_tiler::tiling::{FieldId, MainField, SubField};
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct MainFieldRow {
    id: FieldId,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl From<&MainField> for MainFieldRow {
    fn from(mf: &MainField) -> Self {
        Self {
            id: mf.id,
            xmin: mf.rect.xmin,
            xmax: mf.rect.xmax,
            ymin: mf.rect.ymin,
            ymax: mf.rect.ymax,
        }
    }
}

#[derive(Serialize)]
struct SubFieldRow {
    id: FieldId,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    main_field_id: FieldId,
}

impl From<&SubField> for SubFieldRow {
    fn from(sf: &SubField) -> Self {
        Self {
            id: sf.id,
            xmin: sf.rect.xmin,
            xmax: sf.rect.xmax,
            ymin: sf.rect.ymin,
            ymax: sf.rect.ymax,
            main_field_id: sf.main_field_id,
        }
    }
}

fn write_rows<W, T, R>(writer: W, items: &[T]) -> Result<()>
where
    W: Write,
    R: Serialize + for<'a> From<&'a T>,
{
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    for item in items {
        csv.serialize(R::from(item))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes main-field rows to `writer`.
pub fn write_main_fields<W: Write>(writer: W, main_fields: &[MainField]) -> Result<()> {
    write_rows::<_, _, MainFieldRow>(writer, main_fields)
}

/// Writes sub-field rows to `writer`.
pub fn write_sub_fields<W: Write>(writer: W, sub_fields: &[SubField]) -> Result<()> {
    write_rows::<_, _, SubFieldRow>(writer, sub_fields)
}

/// Writes main-field rows to a new file at `path`.
pub fn save_main_fields(path: &Path, main_fields: &[MainField]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_main_fields(file, main_fields)
        .with_context(|| format!("Failed to write main fields to {}", path.display()))?;
    debug!(path = %path.display(), rows = main_fields.len(), "wrote main fields");
    Ok(())
}

/// Writes sub-field rows to a new file at `path`.
pub fn save_sub_fields(path: &Path, sub_fields: &[SubField]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_sub_fields(file, sub_fields)
        .with_context(|| format!("Failed to write sub fields to {}", path.display()))?;
    debug!(path = %path.display(), rows = sub_fields.len(), "wrote sub fields");
    Ok(())
}
