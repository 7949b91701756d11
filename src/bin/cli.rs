//! meteoindex CLI
//!
//! Indexes one observation file and answers a single query against it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meteoindex::summary::{FieldSummary, Summary};
use meteoindex::{Config, Observation, ObservationStore, TemporalKey};
use tracing_subscriber::{fmt, EnvFilter};

/// meteoindex CLI
#[derive(Parser, Debug)]
#[command(name = "meteoindex-cli")]
#[command(about = "Query weather observation files by timestamp")]
#[command(version)]
struct Cli {
    /// Observation file (semicolon-delimited)
    file: PathBuf,

    /// Keep the index in file order instead of rebalancing it
    #[arg(long)]
    no_rebalance: bool,

    /// Skip rows with unparseable timestamps instead of failing
    #[arg(long)]
    skip_malformed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the observation at one moment
    One {
        #[command(flatten)]
        at: KeyArgs,
    },

    /// Print every observation in a range, then per-field statistics
    Range {
        #[command(flatten)]
        from: KeyArgs,

        #[command(flatten)]
        to: ToKeyArgs,
    },

    /// Print the file's header entries
    Header,
}

/// Moment to query; omitted fields match anything
#[derive(clap::Args, Debug)]
struct KeyArgs {
    #[arg(long)]
    year: Option<u16>,
    #[arg(long)]
    month: Option<u8>,
    #[arg(long)]
    day: Option<u8>,
    #[arg(long)]
    hour: Option<u8>,
    #[arg(long)]
    minute: Option<u8>,
}

/// Upper bound of a range; defaults to the lower bound when every field is omitted
#[derive(clap::Args, Debug)]
struct ToKeyArgs {
    #[arg(long)]
    to_year: Option<u16>,
    #[arg(long)]
    to_month: Option<u8>,
    #[arg(long)]
    to_day: Option<u8>,
    #[arg(long)]
    to_hour: Option<u8>,
    #[arg(long)]
    to_minute: Option<u8>,
}

impl KeyArgs {
    fn key(&self) -> TemporalKey {
        build_key(self.year, self.month, self.day, self.hour, self.minute)
    }
}

impl ToKeyArgs {
    fn key(&self) -> Option<TemporalKey> {
        let key = build_key(
            self.to_year,
            self.to_month,
            self.to_day,
            self.to_hour,
            self.to_minute,
        );
        (key != TemporalKey::any()).then_some(key)
    }
}

fn build_key(
    year: Option<u16>,
    month: Option<u8>,
    day: Option<u8>,
    hour: Option<u8>,
    minute: Option<u8>,
) -> TemporalKey {
    let mut key = TemporalKey::any();
    key.date.year = year;
    key.date.month = month;
    key.date.day = day;
    key.time.hour = hour;
    key.time.minute = minute;
    key
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,meteoindex=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tracing::info!("meteoindex v{}", meteoindex::VERSION);

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> meteoindex::Result<()> {
    let config = Config::builder()
        .rebalance_index(!cli.no_rebalance)
        .skip_malformed_rows(cli.skip_malformed)
        .build()?;

    let mut store = ObservationStore::open_with_config(&cli.file, config)?;

    match cli.command {
        Commands::One { at } => {
            let observation = store.get_one_record(&at.key())?;
            println!("{}", header_row());
            println!("{}", format_row(&observation));
        }
        Commands::Range { from, to } => {
            let from = from.key();
            let to = to.key().unwrap_or(from);
            let observations = store.get_range_records(&from, &to)?;

            println!("{}", header_row());
            for observation in &observations {
                println!("{}", format_row(observation));
            }
            print_summary(&Summary::from_observations(&observations));
        }
        Commands::Header => {
            for (key, value) in store.metadata() {
                println!("{}: {}", key, value);
            }
        }
    }

    Ok(())
}

fn header_row() -> String {
    let mut row = String::from("timestamp");
    for name in Observation::FIELD_NAMES {
        row.push(';');
        row.push_str(name);
    }
    row
}

fn format_row(observation: &Observation) -> String {
    let mut row = observation.key.to_string();
    for value in observation.values() {
        row.push_str(&format!(";{:.2}", value));
    }
    row
}

fn print_summary(summary: &Summary) {
    println!("rows: {}", summary.rows);
    println!("{}", summary_row("mean", summary, |f| f.mean()));
    println!("{}", summary_row("sum", summary, |f| Some(f.sum)));
    println!("{}", summary_row("max", summary, |f| f.max));
    println!("{}", summary_row("min", summary, |f| f.min));
}

fn summary_row<F>(label: &str, summary: &Summary, pick: F) -> String
where
    F: Fn(&FieldSummary) -> Option<f64>,
{
    let mut row = label.to_string();
    for field in &summary.fields {
        match pick(field) {
            Some(value) => row.push_str(&format!(";{:.2}", value)),
            None => row.push(';'),
        }
    }
    row
}
