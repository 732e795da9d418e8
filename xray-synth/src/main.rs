/// False-colour X-ray dataset generator entry point
use clap::Parser;
use clap::builder::TypedValueParser as _;
use constants::{
    CANVAS_COUNT, CANVAS_HEIGHT, CANVAS_WIDTH, OUTPUT_DIR, VOXEL_RESOLUTION, WORKER_COUNT,
};
use std::path::PathBuf;
use xray_synth::{CanvasSize, DatasetGenerator, GeneratorSettings, SynthConfig};

#[derive(Parser, Debug)]
#[command(about = "Convert STL files to false colored xray images")]
struct Args {
    /// Input directory containing .stl files.
    #[arg(long)]
    input: PathBuf,

    /// Voxel resolution.
    #[arg(long, default_value_t = VOXEL_RESOLUTION, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    vres: usize,

    /// Image width.
    #[arg(long, default_value_t = CANVAS_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height.
    #[arg(long, default_value_t = CANVAS_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Number of images.
    #[arg(long, default_value_t = CANVAS_COUNT, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    count: usize,

    /// Output directory.
    #[arg(long, default_value = OUTPUT_DIR)]
    output: PathBuf,

    /// Number of worker threads.
    #[arg(long, default_value_t = WORKER_COUNT, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    nproc: usize,

    /// Run seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding material calibration and blending settings.
    #[arg(long)]
    materials: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> xray_synth::Result<()> {
    let config = match &args.materials {
        Some(path) => SynthConfig::from_json_file(path)?,
        None => SynthConfig::default(),
    };

    let settings = GeneratorSettings {
        input_dir: args.input,
        output_dir: args.output,
        count: args.count,
        canvas: CanvasSize {
            width: args.width,
            height: args.height,
        },
        voxel_resolution: args.vres,
        workers: args.nproc,
        seed: args.seed.unwrap_or_else(rand::random),
    };

    let report = DatasetGenerator::new(settings, config)?.generate()?;
    log::info!(
        "Generation complete: {} canvases from {} objects ({} placements skipped, seed {})",
        report.canvases,
        report.objects,
        report.skipped_placements,
        report.seed
    );
    Ok(())
}
