//! CLI entry point for the bikeshare trip explorer.
//!
//! Runs the interactive session by default, or prints a one-shot report for a
//! city/month/day selection given on the command line.

use anyhow::{Context, Result};
use bikeshare_stats::analyzers::report::Report;
use bikeshare_stats::{
    config::CityCatalog,
    filters::FilterSpec,
    loader::load,
    output::{SECTIONS, report_json},
    session::{self, StdioPrompt},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory the city trip files are resolved against
    #[arg(short, long, default_value = ".", global = true)]
    data_dir: PathBuf,

    /// JSON file mapping city names to trip files (overrides the built-in cities)
    #[arg(long, global = true)]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for a city, month and weekday, then show statistics (default)
    Explore,
    /// Print statistics for a single selection without prompting
    Report {
        /// City to analyze, e.g. "new york city"
        #[arg(short, long)]
        city: String,

        /// january..june, or all
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Full weekday name, or all
        #[arg(long, default_value = "all")]
        day: String,

        /// Emit the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // Stderr stays at warn so log lines don't interleave with prompts.
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.cities {
        Some(path) => CityCatalog::load(path)?,
        None => CityCatalog::default(),
    }
    .with_data_dir(&cli.data_dir);

    let result = match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let mut prompt = StdioPrompt::new(stdin.lock(), std::io::stdout());
            session::run(&mut prompt, &catalog)
        }
        Commands::Report {
            city,
            month,
            day,
            json,
        } => report(&catalog, &city, &month, &day, json),
    };

    if let Err(e) = &result {
        error!(error = %e, "bikeshare exited with an error");
    }
    result
}

/// Loads one selection and prints every statistics section, or the JSON report.
fn report(catalog: &CityCatalog, city: &str, month: &str, day: &str, json: bool) -> Result<()> {
    let spec = FilterSpec::parse(catalog, city, month, day)?;
    let trips = load(catalog, &spec).with_context(|| format!("loading trips for {}", spec.city))?;
    info!(records = trips.len(), "Selection loaded");

    if json {
        println!("{}", report_json(&Report::build(&spec, &trips))?);
        return Ok(());
    }

    println!(
        "{} | month: {} | day: {} | {} trips",
        spec.city,
        spec.month,
        spec.weekday,
        trips.len()
    );
    for section in &SECTIONS {
        println!("\n{}\n", section.title);
        print!("{}", (section.render)(&trips));
    }
    Ok(())
}
