use std::fs;
use std::path::Path;

use field_tiler_cli::{run, Options};
use tempfile::TempDir;

fn options(dir: &Path, care: &str, meta: &str) -> Options {
    let care_path = dir.join("CareAreas.csv");
    let meta_path = dir.join("metadata.csv");
    fs::write(&care_path, care).unwrap();
    fs::write(&meta_path, meta).unwrap();
    Options {
        care_areas: care_path,
        metadata: meta_path,
        main_fields_out: dir.join("mainfields.csv"),
        sub_fields_out: dir.join("subfields.csv"),
        spatial_index_cell: None,
        render: None,
    }
}

fn rows(path: &Path) -> Vec<Vec<f64>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split(',').map(|v| v.parse().unwrap()).collect())
        .collect()
}

#[test]
fn end_to_end_writes_both_tables() {
    let dir = TempDir::new().unwrap();
    let opts = options(dir.path(), "1,0,10,0,10\n", "main,sub\n10,5\n");
    let result = run(&opts).unwrap();

    assert!(result.is_overlap_free());
    assert_eq!(result.coverage.ratio, 1.0);
    assert_eq!(rows(&opts.main_fields_out), vec![vec![1.0, 0.0, 10.0, 0.0, 10.0]]);

    let subs = rows(&opts.sub_fields_out);
    assert_eq!(subs.len(), 4);
    assert_eq!(subs[0], vec![1.0, 0.0, 5.0, 0.0, 5.0, 1.0]);
    assert!(subs.iter().all(|r| r.len() == 6 && r[5] == 1.0));
}

#[test]
fn spatial_index_gives_the_same_tables() {
    let care = "0,7,0,7\n10,14,2,9\n-3,-1,20,26\n";
    let meta = "mainFieldWidth,subFieldWidth\n5,2\n";

    let linear_dir = TempDir::new().unwrap();
    let linear = options(linear_dir.path(), care, meta);
    run(&linear).unwrap();

    let indexed_dir = TempDir::new().unwrap();
    let mut indexed = options(indexed_dir.path(), care, meta);
    indexed.spatial_index_cell = Some(4.0);
    run(&indexed).unwrap();

    assert_eq!(
        fs::read_to_string(&linear.sub_fields_out).unwrap(),
        fs::read_to_string(&indexed.sub_fields_out).unwrap()
    );
}

#[test]
fn bad_metadata_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let opts = options(dir.path(), "0,1,0,1\n", "a,b,c\n1,2,3\n");
    let err = run(&opts).unwrap_err();
    assert!(format!("{err:#}").contains("exactly two columns"));
    assert!(!opts.main_fields_out.exists());
    assert!(!opts.sub_fields_out.exists());
}

#[test]
fn non_positive_width_is_a_tiling_error() {
    let dir = TempDir::new().unwrap();
    let opts = options(dir.path(), "0,1,0,1\n", "a,b\n0,1\n");
    let err = run(&opts).unwrap_err();
    assert!(format!("{err:#}").contains("Tiling failed"));
    assert!(!opts.main_fields_out.exists());
}

#[test]
fn overly_fine_spatial_index_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut opts = options(dir.path(), "0,10,0,10\n", "a,b\n10,5\n");
    opts.spatial_index_cell = Some(0.001);
    let err = run(&opts).unwrap_err();
    assert!(format!("{err:#}").contains("spatial index cell size"));
    assert!(!opts.sub_fields_out.exists());
}

#[test]
fn missing_care_area_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut opts = options(dir.path(), "0,1,0,1\n", "a,b\n1,1\n");
    opts.care_areas = dir.path().join("nope.csv");
    let err = run(&opts).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to open care area file"));
}

#[test]
fn render_writes_a_png() {
    let dir = TempDir::new().unwrap();
    let mut opts = options(dir.path(), "0,10,0,10\n", "a,b\n10,5\n");
    let png = dir.path().join("tiling.png");
    opts.render = Some(png.clone());
    run(&opts).unwrap();
    let bytes = fs::read(&png).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}
