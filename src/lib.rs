pub mod analysis;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod scoring;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use log::error;

pub use analysis::{Analyzer, Chunk, WordChunker};
pub use db::{BatchReceipt, Database, PersistedRecord, ScoredRecord};
pub use error::{FailureReason, PipelineError};
pub use pipeline::{Coordinator, RecordStore, RunOutcome};
pub use scoring::{LexiconScorer, Scorer};

pub fn run() -> ExitCode {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = cli::Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::execute(cli)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
