#![warn(clippy::pedantic)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use kalos_domain::{Exercise, ExerciseService, ImportOptions, ImportSummary, Service};
use kalos_storage::{JsonFile, json_file};
use log::debug;

mod logger;
mod report;
mod settings;

use settings::{LogLevel, Settings};

#[derive(Parser, Debug)]
#[command(name = "kalos", version, about = "Import and inspect the Kalos exercise catalog")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, env = "KALOS_SETTINGS", default_value = "kalos.json")]
    settings: PathBuf,

    /// Exercise catalog file, overrides the settings file
    #[arg(long, env = "KALOS_STORE")]
    store: Option<PathBuf>,

    /// Maximum log level, overrides the settings file
    #[arg(long, env = "KALOS_LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import exercises from a semicolon separated file
    Import {
        file: PathBuf,

        /// Report what would change without writing to the catalog
        #[arg(long)]
        dry_run: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all exercises in the catalog
    List {
        /// Print the exercises as JSON documents
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load(&self.settings)?;
        if let Some(store) = &self.store {
            settings.store.clone_from(store);
        }
        if let Some(log_level) = self.log_level {
            settings.log_level = log_level;
        }
        Ok(settings)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    logger::init(settings.log_level.into()).context("failed to initialize logging")?;
    debug!("using exercise catalog {}", settings.store.display());

    let service = Service::new(JsonFile::new(&settings.store));

    match cli.command {
        Command::Import {
            file,
            dry_run,
            json,
        } => {
            let summary = import(&service, &file, ImportOptions { dry_run }).await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report::Summary::from(&summary))?
                );
            } else {
                print!("{}", report::summary(&summary, dry_run));
            }
        }
        Command::List { json } => {
            let exercises = list(&service, &settings.store).await?;
            if json {
                let documents = exercises
                    .iter()
                    .map(json_file::Exercise::from)
                    .collect::<Vec<_>>();
                println!("{}", serde_json::to_string_pretty(&documents)?);
            } else {
                print!("{}", report::catalog(&exercises));
            }
        }
    }

    Ok(())
}

async fn import(
    service: &impl ExerciseService,
    file: &Path,
    options: ImportOptions,
) -> anyhow::Result<ImportSummary> {
    let content =
        fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    // Domain errors are not `Send`, so they are carried over as messages.
    service
        .import_exercises(&content, options)
        .await
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("failed to import {}", file.display()))
}

async fn list(service: &impl ExerciseService, store: &Path) -> anyhow::Result<Vec<Exercise>> {
    service
        .get_exercises()
        .await
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("failed to read exercise catalog {}", store.display()))
}
