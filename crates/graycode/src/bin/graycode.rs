use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use graycode::capture::load_capture_sequence;
use graycode::core::{Axis, GrayImageView, PlaneKind};
use graycode::pattern::{write_png, PatternSet};
use graycode::{DecodeReport, GrayCodeScanner, ScanError, ScannerConfig, TimingsMs};
use log::LevelFilter;

/// Gray-code structured light: generate projector patterns, decode captures.
#[derive(Parser, Debug)]
#[command(name = "graycode", version, about)]
struct Cli {
    /// More log output (debug).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bit-plane layout for a configuration.
    Info(ConfigArg),
    /// Write the pattern sequence as PNG files.
    Generate {
        #[command(flatten)]
        config: ConfigArg,
        /// Output directory.
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "pattern")]
        prefix: String,
    },
    /// Decode a directory of captures into a JSON report.
    Decode {
        #[command(flatten)]
        config: ConfigArg,
        /// Directory holding `{prefix}_{index:03}.png` captures.
        #[arg(long)]
        captures: PathBuf,
        #[arg(long, default_value = "capture")]
        prefix: String,
        #[arg(long, default_value = "graycode_report.json")]
        report: PathBuf,
        /// Sample spacing (camera pixels) of the correspondences listed in the report.
        #[arg(long, default_value_t = 16)]
        sample_step: usize,
        /// Optional PNG rendering of the decoded columns.
        #[arg(long)]
        column_viz: Option<PathBuf>,
        /// Optional PNG rendering of the decoded rows.
        #[arg(long)]
        row_viz: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ConfigArg {
    /// Scanner configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&cli)?;

    match cli.command {
        Command::Info(ConfigArg { config }) => info(&config)?,
        Command::Generate {
            config,
            out,
            prefix,
        } => generate(&config.config, &out, &prefix)?,
        Command::Decode {
            config,
            captures,
            prefix,
            report,
            sample_step,
            column_viz,
            row_viz,
        } => decode(
            &config.config,
            &captures,
            &prefix,
            &report,
            sample_step,
            [(Axis::Column, column_viz), (Axis::Row, row_viz)],
        )?,
    }
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    #[cfg(feature = "tracing")]
    {
        tracing_log::LogTracer::init()?;
        log::set_max_level(level);
        graycode::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    graycode::core::init_with_level(level)?;

    Ok(())
}

fn info(config_path: &Path) -> Result<(), ScanError> {
    let cfg = ScannerConfig::load_json(config_path)?;
    let layout = cfg.layout()?;
    println!(
        "projector {}x{}, camera {}x{}",
        cfg.projector_width, cfg.projector_height, cfg.camera_width, cfg.camera_height
    );
    println!(
        "column bits {} phase {}, row bits {} phase {}",
        layout.column_bits, layout.column_phase, layout.row_bits, layout.row_phase
    );
    println!("patterns {}", layout.total_patterns);
    for index in 0..layout.total_patterns {
        if let Some(kind) = layout.plane_kind(index) {
            println!("{index:3}  {}", describe(kind));
        }
    }
    Ok(())
}

fn describe(kind: PlaneKind) -> String {
    let suffix = if kind.is_inverted() { " (invert)" } else { "" };
    match kind {
        PlaneKind::Reference { axis, .. } => format!("{} reference{suffix}", axis_name(axis)),
        PlaneKind::Gray { axis, bit, .. } => format!("{} bit {bit}{suffix}", axis_name(axis)),
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Column => "column",
        Axis::Row => "row",
    }
}

fn generate(config_path: &Path, out: &Path, prefix: &str) -> Result<(), ScanError> {
    let cfg = ScannerConfig::load_json(config_path)?;
    let layout = cfg.layout()?;
    let (set, generate_ms) = timed_value(|| PatternSet::generate(&layout));
    log::info!("generated {} patterns in {generate_ms} ms", set.len());
    let written = set.write_png_sequence(out, prefix)?;
    println!("wrote {} patterns to {}", written.len(), out.display());
    Ok(())
}

fn decode(
    config_path: &Path,
    captures_dir: &Path,
    prefix: &str,
    report_path: &Path,
    sample_step: usize,
    visualizations: [(Axis, Option<PathBuf>); 2],
) -> Result<(), ScanError> {
    let t_total = Instant::now();
    let cfg = ScannerConfig::load_json(config_path)?;
    let mut scanner = GrayCodeScanner::new(&cfg)?;

    let (captures, load_captures) = timed_result(|| {
        load_capture_sequence(captures_dir, prefix, scanner.required_image_count())
    })?;
    let views: Vec<GrayImageView<'_>> = captures.iter().map(|c| c.view()).collect();
    let ((), decode_ms) = timed_result(|| scanner.decode(&views))?;

    for (axis, path) in visualizations {
        if let Some(path) = path {
            write_png(&path, &scanner.visualize(axis))?;
            println!("wrote {} visualization to {}", axis_name(axis), path.display());
        }
    }

    let timings = TimingsMs {
        load_captures,
        decode: decode_ms,
        total: t_total.elapsed().as_millis() as u64,
    };
    let report = DecodeReport::new(
        cfg,
        *scanner.layout(),
        scanner.correspondences(),
        sample_step,
        timings,
    );
    report.write_json(report_path)?;
    println!(
        "decoded {}/{} pixels, wrote report JSON to {}",
        report.decoded_pixels,
        report.total_pixels,
        report_path.display()
    );
    Ok(())
}

fn timed_result<T, E, F: FnOnce() -> Result<T, E>>(f: F) -> Result<(T, u64), E> {
    let start = Instant::now();
    let value = f()?;
    let elapsed = start.elapsed().as_millis() as u64;
    Ok((value, elapsed))
}

fn timed_value<T, F: FnOnce() -> T>(f: F) -> (T, u64) {
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed().as_millis() as u64;
    (value, elapsed)
}
