use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use campaigns::{
    config::Config,
    csv,
    domain::table::CsvTable,
    ImportSummary, Importer,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "campaigns", about = "Campaign console tooling")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a recipient CSV and print the preview summary as JSON
    Import(ImportArgs),
}

#[derive(Args)]
struct ImportArgs {
    file: PathBuf,
    /// Rows to classify, overrides the configured value
    #[arg(long)]
    preview_limit: Option<usize>,
    /// Parse RFC 4180 quoted fields
    #[arg(long)]
    quoted: bool,
    /// Write the previewed rows to this CSV file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Command::Import(args) => {
            let summary = import(config, args)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn import(mut config: Config, args: &ImportArgs) -> Result<ImportSummary> {
    if let Some(limit) = args.preview_limit {
        config.import.preview_limit = limit;
    }

    let file = &args.file;
    let table = if args.quoted {
        let reader =
            File::open(file).with_context(|| format!("opening {}", file.display()))?;
        csv::read_table(reader)?
    } else {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        CsvTable::parse(&text)
    };

    let summary = Importer::new(config.import).summarize_table(&table);
    info!(
        file = %file.display(),
        total = summary.total_wallets,
        valid = summary.valid_wallets,
        "recipient file classified"
    );

    if let Some(path) = &args.report {
        let writer =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        csv::write_rows(&summary.rows, writer)?;
    }

    Ok(summary)
}
