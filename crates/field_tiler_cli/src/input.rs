//! CSV ingestion of care areas and run metadata.
//!
//! Care-area files have no header; every row is `Xmin,Xmax,Ymin,Ymax`, optionally
//! preceded by a row identifier that is ignored. Metadata files have one header row
//! followed by a single `mainFieldWidth,subFieldWidth` row.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use field_tiler::geometry::Rect;
use tracing::debug;

/// The two field widths read from the metadata table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metadata {
    pub main_field_width: f64,
    pub sub_field_width: f64,
}

/// Reads care areas from a headerless CSV file.
pub fn read_care_areas(path: &Path) -> Result<Vec<Rect>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open care area file: {}", path.display()))?;
    let care_areas = parse_care_areas(file)
        .with_context(|| format!("Invalid care area file: {}", path.display()))?;
    debug!(path = %path.display(), care_areas = care_areas.len(), "read care areas");
    Ok(care_areas)
}

/// Parses care areas from headerless CSV content.
pub fn parse_care_areas<R: Read>(reader: R) -> Result<Vec<Rect>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut care_areas = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.with_context(|| format!("Failed to read care area row {row}"))?;
        let offset = match record.len() {
            4 => 0,
            5 => 1,
            n => bail!(
                "care area row {row} has {n} columns; expected Xmin,Xmax,Ymin,Ymax \
                 with an optional leading ID column"
            ),
        };
        let xmin = numeric(&record, offset, row)?;
        let xmax = numeric(&record, offset + 1, row)?;
        let ymin = numeric(&record, offset + 2, row)?;
        let ymax = numeric(&record, offset + 3, row)?;
        let rect = Rect::try_new(xmin, xmax, ymin, ymax)
            .with_context(|| format!("care area row {row} is not a valid rectangle"))?;
        care_areas.push(rect);
    }

    if care_areas.is_empty() {
        bail!("no care areas found");
    }
    Ok(care_areas)
}

/// Reads the metadata table from a CSV file.
pub fn read_metadata(path: &Path) -> Result<Metadata> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open metadata file: {}", path.display()))?;
    let metadata = parse_metadata(file)
        .with_context(|| format!("Invalid metadata file: {}", path.display()))?;
    debug!(path = %path.display(), ?metadata, "read metadata");
    Ok(metadata)
}

/// Parses the metadata table: a header row, then `mainFieldWidth,subFieldWidth`.
pub fn parse_metadata<R: Read>(reader: R) -> Result<Metadata> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let Some(record) = reader.records().next() else {
        bail!("metadata must contain a header row followed by a data row");
    };
    let record = record.context("Failed to read metadata row")?;
    if record.len() != 2 {
        bail!(
            "metadata should have exactly two columns (mainFieldWidth, subFieldWidth), found {}",
            record.len()
        );
    }

    Ok(Metadata {
        main_field_width: numeric(&record, 0, 2)?,
        sub_field_width: numeric(&record, 1, 2)?,
    })
}

fn numeric(record: &StringRecord, column: usize, row: usize) -> Result<f64> {
    let raw = record.get(column).unwrap_or_default();
    raw.parse::<f64>()
        .with_context(|| format!("row {row}, column {}: '{raw}' is not numeric", column + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_and_five_column_rows() {
        let csv = "0,10,0,10\n7, 10,20,0,10\n";
        let areas = parse_care_areas(csv.as_bytes()).unwrap();
        assert_eq!(
            areas,
            vec![
                Rect::new(0.0, 10.0, 0.0, 10.0),
                Rect::new(10.0, 20.0, 0.0, 10.0)
            ]
        );
    }

    #[test]
    fn first_care_area_row_is_data() {
        let areas = parse_care_areas("1.5,2.5,3,4\n".as_bytes()).unwrap();
        assert_eq!(areas, vec![Rect::new(1.5, 2.5, 3.0, 4.0)]);
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = parse_care_areas("0,1,2\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1 has 3 columns"));
    }

    #[test]
    fn rejects_non_numeric_care_area() {
        let err = parse_care_areas("0,1,0,1\n0,x,0,1\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2, column 2: 'x' is not numeric"));
    }

    #[test]
    fn rejects_inverted_care_area() {
        let err = parse_care_areas("5,1,0,1\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("not a valid rectangle"));
    }

    #[test]
    fn rejects_empty_care_area_file() {
        assert!(parse_care_areas("".as_bytes()).is_err());
    }

    #[test]
    fn metadata_skips_header() {
        let meta = parse_metadata("main,sub\n10,5\n".as_bytes()).unwrap();
        assert_eq!(
            meta,
            Metadata {
                main_field_width: 10.0,
                sub_field_width: 5.0
            }
        );
    }

    #[test]
    fn metadata_requires_two_columns() {
        let err = parse_metadata("a,b,c\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("exactly two columns"));
    }

    #[test]
    fn metadata_requires_numeric_values() {
        let err = parse_metadata("a,b\nten,5\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'ten' is not numeric"));
    }

    #[test]
    fn metadata_requires_data_row() {
        assert!(parse_metadata("a,b\n".as_bytes()).is_err());
    }
}
