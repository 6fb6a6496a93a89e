//! cab2adif CLI - Convert a Cabrillo contest log to an ADIF file.

use anyhow::{Context, Result, bail};
use cab2adif::{AdifGenerator, CabrilloParser, Config};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Convert amateur-radio contest logs from Cabrillo to ADIF 3.1.4
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cabrillo input file
    input: PathBuf,

    /// ADIF output file (defaults to the input path with the configured
    /// extension)
    output: Option<PathBuf>,

    /// Print the statistics reports after conversion
    #[arg(short, long)]
    stats: bool,

    /// Print statistics as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // CLI flag wins over config file; RUST_LOG wins over both
    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let output = args.output.clone().unwrap_or_else(|| {
        args.input.with_extension(config.output_extension.clone())
    });

    info!("cab2adif starting");
    info!("Input: {}", args.input.display());
    info!("Output: {}", output.display());

    let start = Instant::now();

    let mut parser = CabrilloParser::new();
    parser
        .parse_file(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    if parser.qso_count() == 0 {
        bail!("No QSOs found in {}", args.input.display());
    }

    let mut generator = AdifGenerator::new();
    let adif = generator.generate(parser.qsos(), parser.metadata());

    let report = generator.validate_adif(&adif);
    if !report.valid {
        warn!("Generated ADIF failed self-check: {:?}", report);
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, &adif)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let duration = start.elapsed();
    println!(
        "Converted {} QSOs to {} ({} bytes) in {:.2?}",
        parser.qso_count(),
        output.display(),
        adif.len(),
        duration
    );

    if args.stats || config.print_stats {
        let log_stats = parser.statistics();
        let conv_stats = generator.conversion_stats();

        if args.json {
            let combined = serde_json::json!({
                "log": log_stats,
                "conversion": conv_stats,
            });
            println!("{}", serde_json::to_string_pretty(&combined)?);
        } else {
            println!("\n{}", log_stats);
            println!("\n{}", conv_stats);
        }
    }

    Ok(())
}
