use std::path::PathBuf;

use clap::{Parser, ValueHint};

use llm_cache::config::{constants, WorkerConfig};
use llm_cache::core::print_info_message;
use llm_cache::inspector;

#[derive(Parser, Debug)]
#[command(
    name = "inspect-cache",
    version,
    about = "Prints the size of the translation cache and a few of its rows"
)]
struct Cli {
    /// Directory holding cache.db
    #[arg(long, value_hint = ValueHint::DirPath)]
    data_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            print_info_message(&e.to_string());
            return;
        }
    };
    let cache_file = match cli.data_dir {
        Some(data_dir) => config.with_data_dir(data_dir).cache_file(),
        None => config.cache_file(),
    };

    match inspector::report(&cache_file, constants::INSPECT_SAMPLE_SIZE) {
        Ok(report) => print!("{report}"),
        Err(e) => print_info_message(&e.to_string()),
    }
}
