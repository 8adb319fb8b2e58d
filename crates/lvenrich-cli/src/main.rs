use anyhow::Result;
use clap::{Parser, Subcommand};
use lvenrich_acquire::{FetchConfig, HttpSource};
use lvenrich_enrich::EnrichConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lvenrich")]
#[command(about = "Add launch vehicle names to a CSV of spacecraft international designators")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Defaults to `enrich` with input.csv -> output.csv
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Directory URL holding the lau{year}.htm chronology pages
    #[arg(long, default_value = lvenrich_acquire::source::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = lvenrich_acquire::source::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Save each fetched page as lau{year}.html in this directory
    #[arg(long)]
    archive_dir: Option<PathBuf>,
}

impl SourceArgs {
    fn fetch_config(&self, delay: Duration) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            delay,
            archive_dir: self.archive_dir.clone(),
            ..FetchConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the launch vehicle of every row and write the enriched CSV
    Enrich {
        /// Input CSV with a header row
        #[arg(short, long, default_value = lvenrich_enrich::DEFAULT_INPUT)]
        input: PathBuf,

        /// Output CSV (overwritten)
        #[arg(short, long, default_value = lvenrich_enrich::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Header of the international designator column
        #[arg(long, default_value = lvenrich_model::DESIGNATOR_FIELD)]
        column: String,

        /// Pause after each newly fetched year, in milliseconds
        #[arg(long, default_value_t = lvenrich_acquire::source::DEFAULT_DELAY_MS)]
        delay_ms: u64,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Fetch one year's launch table and write it as JSON
    Fetch {
        /// Launch year (e.g., 2023)
        year: i32,

        /// Output path for the JSON table [default: lau{year}.json]
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        None => {
            let config = EnrichConfig::default();
            let source = HttpSource::new(&config.fetch)?;
            lvenrich_enrich::run(&config, source).await?;
        }
        Some(Commands::Enrich {
            input,
            output,
            column,
            delay_ms,
            source,
        }) => {
            let config = EnrichConfig {
                input,
                output,
                designator_field: column,
                fetch: source.fetch_config(Duration::from_millis(delay_ms)),
            };
            tracing::info!(
                input = %config.input.display(),
                output = %config.output.display(),
                column = %config.designator_field,
                "Enriching"
            );
            let http = HttpSource::new(&config.fetch)?;
            lvenrich_enrich::run(&config, http).await?;
        }
        Some(Commands::Fetch { year, output, source }) => {
            let config = source.fetch_config(Duration::ZERO);
            let http = HttpSource::new(&config)?;
            let dump = lvenrich_acquire::fetch_year(&http, &config, year).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("lau{year}.json")));
            lvenrich_acquire::output::write_year_table(&dump, &path)?;
        }
    }

    Ok(())
}
