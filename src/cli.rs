use std::{io::Read, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::error;
use serde_json::json;

use crate::{
    analysis::Analyzer,
    config::AppConfig,
    db::Database,
    error::PipelineError,
    pipeline::{Coordinator, RunOutcome},
    scoring::LexiconScorer,
};

#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON settings file; missing files fall back to defaults
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database path, overriding config and environment
    #[clap(long, global = true)]
    pub database: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Chunk, score and store text (read from stdin when TEXT is omitted)
    Analyze {
        #[clap(long, allow_hyphen_values = true)]
        split_size: Option<i64>,

        text: Option<String>,
    },
    /// Print stored records as JSON
    List {
        #[clap(long)]
        batch: Option<String>,
    },
    /// Check that the database answers
    Ping,
}

/// Runs one command. `Ok(false)` means the command ran but reported failure.
pub async fn execute(cli: Cli) -> Result<bool> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let db = match Database::new(config.database_path.clone()) {
        Ok(db) => db,
        Err(err) if matches!(cli.command, Command::Analyze { .. }) => {
            let outcome = unavailable_outcome(err);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            return Ok(false);
        }
        Err(err) => return Err(err),
    };
    let result = dispatch(cli.command, &config, &db).await;
    db.close()?;
    result
}

/// An `analyze` run whose database never opened failed the same way as one
/// whose store went away mid-run.
fn unavailable_outcome(err: anyhow::Error) -> RunOutcome {
    let err = PipelineError::store_unavailable(err);
    error!("Analysis run failed: {err}");
    RunOutcome::from(err)
}

async fn dispatch(command: Command, config: &AppConfig, db: &Database) -> Result<bool> {
    match command {
        Command::Analyze { split_size, text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("failed to read text from stdin")?;
                    buffer
                }
            };

            let analyzer = Analyzer::new(Arc::new(LexiconScorer::new()))
                .with_workers(config.scoring_workers);
            let coordinator = Coordinator::new(analyzer, db.clone());
            let outcome = coordinator
                .run(&text, split_size.unwrap_or(config.default_split_size))
                .await;

            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(outcome.is_success())
        }
        Command::List { batch } => {
            let records = match batch {
                Some(batch_id) => db.list_batch(&batch_id).await?,
                None => db.list_records().await?,
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(true)
        }
        Command::Ping => {
            db.ping().await?;
            println!("{}", json!({ "message": "Pong!" }));
            Ok(true)
        }
    }
}
