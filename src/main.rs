use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use boundary_fetch::api::OverpassClient;
use boundary_fetch::config::{CliOverrides, Settings};
use boundary_fetch::domain::{AdminLevel, QueryStyle};
use boundary_fetch::logger::init_logger;
use boundary_fetch::{FetchEvent, Fetcher};

/// Download OpenStreetMap administrative boundary relations from Overpass
///
/// Each level is saved as al<level>.geom.osm, exactly as the server returned it.
///
/// Examples:
///   # Countries and states into the current directory
///   boundary-fetch
///
///   # Only counties, into ./data
///   boundary-fetch -l 6 -o data
///
///   # Use another Overpass instance
///   boundary-fetch --url https://overpass-api.de/api/interpreter
#[derive(Parser, Debug)]
#[command(name = "boundary-fetch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches boundary-fetch.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Admin levels to fetch, in order (default: 2,4)
    #[arg(short = 'l', long = "level", value_delimiter = ',')]
    levels: Vec<u8>,

    /// Directory the .geom.osm files are written to (default: current directory)
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Overpass interpreter URL
    #[arg(long)]
    url: Option<String>,

    /// Query output form: geom or recurse
    #[arg(long)]
    query_style: Option<QueryStyle>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);
    let total_start = Instant::now();

    let cli = CliOverrides {
        levels: args.levels.iter().copied().map(AdminLevel::from).collect(),
        output_dir: args.output_dir.clone(),
        url: args.url.clone(),
        query_style: args.query_style,
    };
    let settings = Settings::load(cli, args.config.as_deref())?;

    let client = OverpassClient::new(&settings.overpass)?;

    if args.verbose {
        println!("Configuration:");
        if let Some(ref source) = settings.source {
            println!("  Config file: {}", source.display());
        }
        println!(
            "  Levels: {}",
            settings
                .levels
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("  Overpass: {}", client.url());
        println!("  Query style: {:?}", settings.query_style);
        println!("  Server timeout: {}s", settings.overpass.server_timeout_secs);
        match settings.overpass.timeout_secs {
            Some(secs) => println!("  Client timeout: {}s", secs),
            None => println!("  Client timeout: none"),
        }
        println!("  Output dir: {}", settings.output_dir.display());
        println!();
    }

    let fetcher = Fetcher::new(client, &settings.output_dir)
        .with_style(settings.query_style)
        .with_server_timeout(settings.overpass.server_timeout_secs);

    let mut spinner: Option<(ProgressBar, Instant)> = None;
    let mut current = None;
    let result = fetcher.fetch_levels(&settings.levels, |event| match event {
        FetchEvent::Started(level) => {
            current = Some(level);
            spinner = Some((
                create_spinner(&format!("Fetching admin_level={}...", level)),
                Instant::now(),
            ));
        }
        FetchEvent::Saved(saved) => {
            if let Some((pb, start)) = spinner.take() {
                pb.finish_with_message(format!(
                    "Saved admin_level={} -> {} ({:.1} KB) [{:.1}s]",
                    saved.level,
                    saved.path.display(),
                    saved.bytes as f64 / 1024.0,
                    start.elapsed().as_secs_f32()
                ));
            }
        }
    });

    let saved = match result {
        Ok(saved) => saved,
        Err(e) => {
            if let Some((pb, _)) = spinner.take() {
                pb.abandon();
            }
            let level = current.map(|l| l.to_string()).unwrap_or_default();
            return Err(e).context(format!("Failed to fetch admin_level={}", level));
        }
    };

    println!();
    println!(
        "Done! {} file(s) in {:.1}s",
        saved.len(),
        total_start.elapsed().as_secs_f32()
    );
    println!("Output: {}", fetcher.output_dir().display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
