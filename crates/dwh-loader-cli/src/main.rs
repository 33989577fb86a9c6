//! dwh-loader CLI - star-schema warehouse bootstrap and load.

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use dwh_loader::{catalog, Config, LoadError, Orchestrator, StatementGroup};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "dwh-loader")]
#[command(about = "Star-schema warehouse bootstrap and load")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = dwh_loader::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop and recreate the warehouse tables
    #[command(name = "create_schema")]
    CreateSchema,

    /// Bulk-copy raw data into staging, then load the fact and dimension tables
    #[command(name = "do_etl")]
    DoEtl,

    /// Print the SQL text of one statement group, or all of them
    #[command(name = "show_sql")]
    ShowSql {
        /// Statement group to print
        group: Option<Group>,
    },

    /// Check warehouse connectivity
    #[command(name = "health_check")]
    HealthCheck,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Group {
    Drop,
    Create,
    Copy,
    Insert,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), LoadError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    // Load configuration once; the catalog and runner receive it as an
    // explicit value.
    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    println!("*** start - {} ***", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let outcome = dispatch(&cli.command, config).await;
    println!("=== end - {} ===", Local::now().format("%Y-%m-%d %H:%M:%S"));

    outcome
}

async fn dispatch(command: &Commands, config: Config) -> Result<(), LoadError> {
    match command {
        Commands::CreateSchema => Orchestrator::new(config).create_schema().await,
        Commands::DoEtl => Orchestrator::new(config).do_etl().await,
        Commands::ShowSql { group } => show_sql(*group, &config),
        Commands::HealthCheck => {
            Orchestrator::new(config).health_check().await?;
            println!("Warehouse connection OK");
            Ok(())
        }
    }
}

fn show_sql(choice: Option<Group>, config: &Config) -> Result<(), LoadError> {
    let groups: Vec<StatementGroup> = match choice {
        Some(Group::Drop) => vec![catalog::drop_group()],
        Some(Group::Create) => vec![catalog::create_group()],
        Some(Group::Copy) => vec![catalog::copy_group(config)?],
        Some(Group::Insert) => vec![catalog::insert_group()],
        None => vec![
            catalog::drop_group(),
            catalog::create_group(),
            catalog::copy_group(config)?,
            catalog::insert_group(),
        ],
    };

    for group in &groups {
        for (name, text) in group.iter() {
            println!("Showing you sql text for {}:", name);
            println!("{}", text);
        }
    }
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
