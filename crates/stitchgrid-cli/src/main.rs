//! stitchgrid CLI — headless summary tables for stitching datasets.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use stitchgrid::{
    GroupListModel, StitchingDataset, SummaryEngine, SummaryTableModel, TileLayout, ViewTableModel,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "stitchgrid")]
#[command(about = "Summarize registration quality of grouped multi-view stitching datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the summary table of a dataset.
    Summarize(SummarizeArgs),

    /// Generate a synthetic tile-grid dataset and summarize it.
    Demo(DemoArgs),
}

#[derive(Debug, Clone, Args)]
struct SummarizeArgs {
    /// Path to the dataset JSON.
    #[arg(long)]
    dataset: PathBuf,

    /// Emit summary records as JSON instead of an aligned text table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct DemoArgs {
    /// Number of tiles along x.
    #[arg(long, default_value = "3")]
    tiles_x: usize,

    /// Number of tiles along y.
    #[arg(long, default_value = "3")]
    tiles_y: usize,

    /// Tile width in pixels.
    #[arg(long, default_value = "100.0")]
    tile_width: f64,

    /// Tile height in pixels.
    #[arg(long, default_value = "100.0")]
    tile_height: f64,

    /// Linear overlap fraction between neighboring tiles, in [0, 1).
    #[arg(long, default_value = "0.2")]
    overlap: f64,

    /// Views per tile (channels/illuminations collapsed into one row).
    #[arg(long, default_value = "2")]
    views_per_tile: usize,

    /// Write the generated dataset JSON here.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Summarize(args) => run_summarize(args),
        Commands::Demo(args) => run_demo(args),
    }
}

fn run_summarize(args: SummarizeArgs) -> CliResult<()> {
    let dataset = StitchingDataset::from_json_file(&args.dataset)?;
    summarize(dataset, args.json)
}

fn run_demo(args: DemoArgs) -> CliResult<()> {
    let layout = TileLayout {
        tiles_x: args.tiles_x,
        tiles_y: args.tiles_y,
        tile_dim: [args.tile_width, args.tile_height],
        overlap: args.overlap,
    };
    let dataset = layout.demo_dataset(args.views_per_tile)?;

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&dataset)?;
        std::fs::write(out, json)?;
        println!("Wrote {}", out.display());
    }

    summarize(dataset, false)
}

fn summarize(dataset: StitchingDataset, as_json: bool) -> CliResult<()> {
    let parts = dataset.into_parts();
    let engine = SummaryEngine::new(&parts.missing, &parts.registrations, &parts.links);

    if as_json {
        let records = engine.build_rows(&parts.groups)?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let model = SummaryTableModel::new(GroupListModel::new(parts.groups.clone()), engine);
    print_table(&model)
}

fn print_table<M: ViewTableModel>(model: &M) -> CliResult<()> {
    let columns = model.column_count();
    let header: Vec<String> = (0..columns).map(|c| model.column_name(c)).collect();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(model.row_count());
    for row in 0..model.row_count() {
        rows.push(
            (0..columns)
                .map(|c| model.value_at(row, c))
                .collect::<Result<_, _>>()?,
        );
    }

    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    print_row(&header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    print_row(&rule, &widths);
    for row in &rows {
        print_row(row, &widths);
    }
    Ok(())
}

fn print_row(cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    println!("{}", padded.join("  "));
}
