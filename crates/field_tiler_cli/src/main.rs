use std::path::PathBuf;

use clap::Parser;
use field_tiler_cli::{init_tracing, run, Options};

/// Tile rectangular care areas into main fields and sub-fields.
#[derive(Parser, Debug)]
#[command(name = "field-tiler", version, about)]
struct Cli {
    /// Care-area table: Xmin,Xmax,Ymin,Ymax per row, optionally preceded by an ID.
    #[arg(long, default_value = "CareAreas.csv")]
    care_areas: PathBuf,

    /// Metadata table: header row, then mainFieldWidth,subFieldWidth.
    #[arg(long, default_value = "metadata.csv")]
    metadata: PathBuf,

    /// Directory receiving the output tables.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, default_value = "mainfields.csv")]
    main_fields_name: String,

    #[arg(long, default_value = "subfields.csv")]
    sub_fields_name: String,

    /// Look up care areas through a uniform grid with this cell size.
    #[arg(long, value_name = "CELL")]
    spatial_index: Option<f64>,

    /// Also draw the tiling into a PNG at this path.
    #[arg(long, value_name = "PNG")]
    render: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = Options {
        care_areas: cli.care_areas,
        metadata: cli.metadata,
        main_fields_out: cli.out_dir.join(&cli.main_fields_name),
        sub_fields_out: cli.out_dir.join(&cli.sub_fields_name),
        spatial_index_cell: cli.spatial_index,
        render: cli.render,
    };
    let result = run(&options)?;

    match result.overlap {
        None => println!("No overlap detected in Sub-Fields."),
        Some(pair) => println!("Overlap detected between {pair}."),
    }
    println!("Coverage Efficiency: {:.2}", result.coverage.ratio);
    Ok(())
}
