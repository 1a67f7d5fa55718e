use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use dayweather_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "dayweather", version, about = "Dayweather CLI")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Plan for this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's internal weather
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Focus and life task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Capacity, time left and guidance for right now
    Status(commands::status::StatusArgs),
    /// Hard stop for the day
    Stop {
        #[command(subcommand)]
        action: commands::stop::StopAction,
    },
    /// Things that got in the way
    Barrier {
        #[command(subcommand)]
        action: commands::barrier::BarrierAction,
    },
    /// Evening reflection
    Reflect {
        #[command(subcommand)]
        action: commands::reflect::ReflectAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Filter from `-v` or `RUST_LOG`, if either was given.
fn explicit_filter(verbose: u8) -> Option<EnvFilter> {
    match verbose {
        0 => EnvFilter::try_from_default_env().ok(),
        1 => Some(EnvFilter::new("info")),
        2 => Some(EnvFilter::new("debug")),
        _ => Some(EnvFilter::new("trace")),
    }
}

fn init_logging(filter: EnvFilter) {
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Without an explicit filter the level comes from config, so the
    // subscriber can only be installed once config has been read.
    let loaded = match explicit_filter(cli.verbose) {
        Some(filter) => {
            init_logging(filter);
            Config::load()
        }
        None => {
            let loaded = Config::load();
            let level = match &loaded {
                Ok(config) => config.logging.level.as_str(),
                Err(_) => "warn",
            };
            init_logging(EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")));
            loaded
        }
    };
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "config unreadable, using default log level");
    }

    let date = commands::plan_date(cli.date);
    let result = match cli.command {
        Commands::Energy { action } => commands::energy::run(action, date),
        Commands::Task { action } => commands::task::run(action, date),
        Commands::Status(args) => commands::status::run(args, date),
        Commands::Stop { action } => commands::stop::run(action, date),
        Commands::Barrier { action } => commands::barrier::run(action, date),
        Commands::Reflect { action } => commands::reflect::run(action, date),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
