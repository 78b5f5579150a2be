use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use iconsplit::{
    debug, drawing::SheetDrawingConfig, load_sheet, presets, write_icons, GridSpec, SheetPlan,
    SplitOptions, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_OUTPUT_ROOT, DEFAULT_TARGET_SIZE,
};
use image::GenericImageView;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Slices a grid-layout icon sheet into per-plugin `assets/icon.png` files.
#[derive(Parser, Debug)]
#[command(name = "iconsplit", version)]
struct Cli {
    /// Path of the sheet image to slice
    source: PathBuf,

    /// Number of grid rows in the sheet
    #[arg(default_value_t = DEFAULT_GRID_ROWS, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Number of grid columns in the sheet
    #[arg(default_value_t = DEFAULT_GRID_COLS, value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,

    /// Side length of the saved icons, in pixels
    #[arg(long, default_value_t = DEFAULT_TARGET_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Directory the per-plugin folders are created under
    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    out_dir: PathBuf,

    /// Which embedded slot table to slice by
    #[arg(long, default_value = "plugin-pack")]
    layout: String,

    /// Also save a copy of the sheet with the planned grid drawn on it
    #[arg(long)]
    preview: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        // Usage errors exit with 1 rather than clap's default 2; --help and
        // --version are not errors and exit 0
        let _ = err.print();
        process::exit(if err.use_stderr() { 1 } else { 0 });
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    if !cli.source.exists() {
        bail!("Image not found: {}", cli.source.display());
    }

    let table = presets::by_name(&cli.layout).with_context(|| {
        format!(
            "Unknown layout {:?} (expected one of: {})",
            cli.layout,
            presets::NAMES.join(", ")
        )
    })?;

    let sheet = load_sheet(&cli.source).context("Failed to open sheet image")?;
    let (width, height) = sheet.dimensions();
    let spec = GridSpec::new(cli.rows, cli.cols);
    let plan = SheetPlan::try_from_image(&sheet, &spec, &table)?;

    info!("Sheet size: {}x{}", width, height);
    info!("Grid: {} rows x {} cols", spec.rows, spec.cols);
    info!("Cell size: {}x{}", plan.cell_width, plan.cell_height);

    if let Some(preview) = &cli.preview {
        debug::save_preview(&sheet, &plan, preview, &SheetDrawingConfig::default())?;
        info!("Preview saved to {}", preview.display());
    }

    let options = SplitOptions::new(&cli.out_dir, cli.size);
    let report = write_icons(&sheet, &plan, &options)?;

    println!(
        "Done! Split {} icons into {}.",
        report.written(),
        options.output_root.display()
    );

    Ok(())
}
