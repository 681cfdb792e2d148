//! Movie Barcode CLI
//!
//! Command-line interface that collects the build parameters and runs one
//! barcode build over a video file. All sampling and reduction logic lives
//! in the library.

use clap::Parser;
use movie_barcode::{BarPolicy, BarcodeBuilder, BuildOptions, FileConfig};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "movie-barcode", version, about = "Create a barcode image out of a video")]
struct Cli {
    /// Path to the video file.
    video: PathBuf,

    /// Strip reduction policy: 'squeeze' or 'average'.
    #[arg(short, long)]
    policy: Option<BarPolicy>,

    /// Sample every Nth frame (overrides --stride-seconds).
    #[arg(long)]
    stride_frames: Option<u64>,

    /// Sample one frame every N seconds.
    #[arg(long)]
    stride_seconds: Option<u64>,

    /// Width in pixels of each bar in the barcode.
    #[arg(long)]
    bar_width: Option<u32>,

    /// Fraction of the video to cover, in (0, 1].
    #[arg(long)]
    stop: Option<f64>,

    /// Save the barcode as a PNG.
    #[arg(long)]
    save: bool,

    /// Directory the PNG is written to (defaults to the current directory).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Optional TOML configuration file; explicit flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Merges CLI flags over the optional configuration file.
fn resolve_options(cli: &Cli) -> Result<BuildOptions, String> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_file(path).map_err(|e| e.to_string())?,
        None => FileConfig::default(),
    };

    let policy = cli
        .policy
        .or(file.policy)
        .ok_or_else(|| "no policy given; pass --policy squeeze|average".to_string())?;

    let mut options = BuildOptions::new(policy);
    if let Some(frames) = cli.stride_frames.or(file.stride_frames) {
        options.stride_frames = Some(frames);
    }
    if let Some(seconds) = cli.stride_seconds.or(file.stride_seconds) {
        options.stride_seconds = seconds;
    }
    if let Some(width) = cli.bar_width.or(file.bar_width) {
        options.bar_width = width;
    }
    if let Some(stop) = cli.stop.or(file.stop_fraction) {
        options.stop_fraction = stop;
    }
    options.persist = cli.save || file.save.unwrap_or(false);
    options.output_dir = cli.output_dir.clone().or(file.output_dir);

    Ok(options)
}

#[cfg(feature = "ffmpeg")]
fn run(cli: &Cli, builder: BarcodeBuilder) -> Result<(), String> {
    let source = movie_barcode::FfmpegVideo::open(&cli.video).map_err(|e| e.to_string())?;

    let output = builder.build(source).map_err(|e| e.to_string())?;

    println!(
        "{:.2} minutes elapsed, {} frames were used ({} skipped)",
        output.stats.elapsed.as_secs_f64() / 60.0,
        output.stats.frames_used,
        output.stats.frames_skipped,
    );

    match output.persisted {
        Some(Ok(path)) => println!("movie barcode saved as '{}'", path.display()),
        Some(Err(e)) => eprintln!("barcode built but could not be saved: {e}"),
        None => {}
    }

    Ok(())
}

#[cfg(not(feature = "ffmpeg"))]
fn run(_cli: &Cli, _builder: BarcodeBuilder) -> Result<(), String> {
    Err("this build has no video decoding support; rebuild with `--features ffmpeg`".to_string())
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Movie Barcode v{}", movie_barcode::VERSION);

    let cli = Cli::parse();

    let options = match resolve_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let builder = match BarcodeBuilder::new(options) {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // Ctrl-C stops sampling between steps and assembles what was gathered.
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        if let Err(e) = ctrlc::set_handler(move || cancel.store(true, Ordering::Relaxed)) {
            eprintln!("failed to install Ctrl-C handler: {e}");
        }
    }
    let builder = builder.with_cancel_flag(cancel);

    if let Err(e) = run(&cli, builder) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
