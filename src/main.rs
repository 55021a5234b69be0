mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use crate::core::config;
use crate::core::content;
use crate::core::corpus::Corpus;
use crate::core::state::App;

#[derive(Parser)]
#[command(name = "tome", about = "Terminal documentation browser")]
struct Args {
    /// Path to a documentation corpus (.toml or .json); defaults to the
    /// built-in docs
    #[arg(short, long)]
    docs: Option<PathBuf>,

    /// Section id to open on startup
    #[arg(short, long)]
    section: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to tome.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("tome.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Config unusable, falling back to defaults: {e}");
            config::TomeConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.docs.as_deref().and_then(|p| p.to_str()),
        args.section.as_deref(),
    );

    let corpus = match &resolved.docs_path {
        Some(path) => match Corpus::load(path) {
            Ok(corpus) => corpus,
            Err(e) => {
                log::error!("Failed to load corpus from {}: {e}", path.display());
                eprintln!("tome: cannot load docs from {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => content::builtin(),
    };

    log::info!(
        "Tome starting up: {} v{}, {} sections",
        corpus.meta().name,
        corpus.meta().version.as_deref().unwrap_or("?"),
        corpus.len()
    );

    let app = App::with_start_id(corpus, resolved.start_id.as_deref());
    tui::run(app, &resolved)
}
