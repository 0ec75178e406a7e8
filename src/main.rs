use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use simnet::pipeline::{run, PipelineConfig};
use simnet::render::{LayoutOptions, RenderOptions};

#[derive(Parser)]
#[command(name = "simnet")]
#[command(about = "Cluster and render a protein similarity network from all-vs-all search hits.", long_about = None)]
struct Args {
    /// Tab-separated hits file from the search tool: query, target, score, qcov, tcov.
    #[arg(value_name = "HITS_TSV")]
    hits: PathBuf,

    /// Output directory for report tables and network images (created if absent).
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    // === Filtering ===
    /// Space-separated list of score thresholds for network edges.
    #[arg(short = 't', long = "threshold", value_name = "F", num_args = 1.., required = true, help_heading = "Filtering")]
    threshold: Vec<f64>,

    /// Minimum coverage threshold for filtering alignments.
    #[arg(short = 'c', long = "coverage", value_name = "F", required = true, help_heading = "Filtering")]
    coverage: f64,

    // === Annotation ===
    /// TSV file with nodes to label: node[\tlabel[\tcolor[\tsize]]].
    #[arg(short = 'l', long = "label-node", value_name = "FILE", help_heading = "Annotation")]
    label_node: Option<PathBuf>,

    // === Image Size ===
    /// Set the width in pixels of the output images.
    #[arg(short = 'x', long = "width", value_name = "N", default_value_t = 2000, help_heading = "Image Size")]
    width: u32,

    /// Set the height in pixels of the output images.
    #[arg(short = 'y', long = "height", value_name = "N", default_value_t = 2000, help_heading = "Image Size")]
    height: u32,

    /// Verbosity level (0 = error, 1 = info, 2 = debug).
    #[arg(short = 'v', long = "verbose", value_name = "N", default_value_t = 1)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        eprintln!(
            "[simnet] error: cannot create output directory {}: {e}",
            args.output_dir.display()
        );
        return ExitCode::FAILURE;
    }

    let config = PipelineConfig {
        hits_path: args.hits,
        output_dir: args.output_dir,
        thresholds: args.threshold,
        coverage: args.coverage,
        label_path: args.label_node,
        render: RenderOptions {
            width: args.width,
            height: args.height,
            layout: LayoutOptions::default(),
            ..RenderOptions::default()
        },
    };

    match run(&config) {
        Ok(()) => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[simnet] error: {e}");
            ExitCode::FAILURE
        }
    }
}
