use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueHint};
use tracing::info;
use tracing::level_filters::LevelFilter;

use llm_cache::config::{constants, WorkerConfig};
use llm_cache::core::{print_error_message, WorkerResult};
use llm_cache::env::{self, EnvVar};
use llm_cache::{logging, PendingQueue, Translator, Worker};

#[derive(Parser, Debug)]
#[command(
    name = "llm-worker",
    version,
    about = "Translates pending game text through a local LLM and caches the results",
    after_help = env_help()
)]
struct Cli {
    /// Directory holding pending.txt and cache.db
    #[arg(long, value_hint = ValueHint::DirPath)]
    data_dir: Option<PathBuf>,

    /// Model name sent to the chat endpoint
    #[arg(long)]
    model: Option<String>,

    /// Chat endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append lines to the pending queue without translating anything
    Enqueue {
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

fn env_help() -> String {
    format!("Environment:\n{}", env::generate_env_docs())
}

fn main() {
    let cli = Cli::parse();

    let level = match env::LogLevel::get() {
        Ok(level) => level.unwrap_or(LevelFilter::INFO),
        Err(e) => {
            print_error_message(&e.to_string());
            process::exit(1);
        }
    };
    logging::init(constants::LOG_TAG, level);

    if let Err(e) = run(cli) {
        print_error_message(&format!("Error: {e}"));
        process::exit(1);
    }
}

fn run(cli: Cli) -> WorkerResult<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Some(Command::Enqueue { lines }) => enqueue(&config, &lines),
        None => {
            let translator = Translator::from_config(&config)?;
            let summary = Worker::new(config, translator).run()?;
            info!("Done: {}", summary);
            Ok(())
        }
    }
}

/// Defaults, then environment, then flags
fn resolve_config(cli: &Cli) -> WorkerResult<WorkerConfig> {
    let mut config = WorkerConfig::from_env()?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = env::Endpoint::parse(endpoint)?;
    }
    Ok(config)
}

fn enqueue(config: &WorkerConfig, lines: &[String]) -> WorkerResult<()> {
    let mut queue = PendingQueue::new(config.pending_file());
    let mut added = 0;
    for line in lines {
        if queue.enqueue(line)? {
            added += 1;
        }
    }
    info!("{} lines queued in {}", added, queue.path().display());
    Ok(())
}
