mod categorize;
mod config;
mod error;
mod favorites;
mod host;
mod locale;
mod matcher;
mod model;
mod pipeline;
mod preview;
mod scope;
mod sources;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use signal_hook::consts::SIGINT;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use crate::config::load_config;
use crate::favorites::load_favorites;
use crate::host::{CategorisedResult, JsonLinesReply};
use crate::scope::AppScope;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one query and print categories and results as JSON lines
    Search {
        /// Query text; empty lists everything
        #[arg(default_value = "")]
        query: String,
        /// Override the layout setting (0 = by type, other = by letter)
        #[arg(short, long)]
        layout: Option<i64>,
    },
    /// Read one emitted result from stdin and print its preview widgets
    Preview,
}

/// Returns the host cancellation flag, set once SIGINT arrives.
fn install_interrupt_handler() -> Result<Arc<AtomicBool>> {
    let cancelled = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&cancelled)).context("installing SIGINT handler")?;
    Ok(cancelled)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("starting up");

    let mut config = load_config(args.config.as_deref())?;
    let favorites = load_favorites(config.sources.favorites.as_deref());
    let locale = std::env::var("LANG").unwrap_or_default();

    match args.command {
        Command::Search { query, layout } => {
            if let Some(layout) = layout {
                config.general.layout = layout;
            }
            let cancelled = install_interrupt_handler()?;

            let scope = AppScope::new(config, locale, Box::new(favorites));
            let mut reply = JsonLinesReply::new(io::stdout().lock());
            scope.search(&query, &mut reply, &cancelled)?;
        }
        Command::Preview => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            let result: CategorisedResult =
                serde_json::from_str(input.trim()).context("decoding result from stdin")?;

            let scope = AppScope::new(config, locale, Box::new(favorites));
            let mut reply = JsonLinesReply::new(io::stdout().lock());
            scope.preview(&result, &mut reply)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn interrupt_sets_cancellation_flag() {
        let cancelled = install_interrupt_handler().unwrap();
        assert!(!cancelled.load(Ordering::SeqCst));

        signal_hook::low_level::raise(SIGINT).unwrap();

        assert!(cancelled.load(Ordering::SeqCst));
    }
}
