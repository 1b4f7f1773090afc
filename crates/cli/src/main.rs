//! WordWeave CLI — the main entry point.
//!
//! Commands:
//! - `init`     — Write the default config and a sample word list
//! - `serve`    — Run the exercise over stdin/stdout JSON lines
//! - `simulate` — Play a run against a scripted in-process host
//! - `replay`   — Rebuild a recorded attempt and print its summary

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "wordweave",
    about = "WordWeave — syllable-assembly drag exercise",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration and a sample word list
    Init,

    /// Run the exercise for a host talking JSON lines on stdin/stdout
    Serve {
        /// No host: log outbound messages and never start
        #[arg(long)]
        standalone: bool,

        /// Seed for the word and syllable shuffles
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play a run against a scripted host that drags every answer into place
    Simulate {
        /// Number of words in the run
        #[arg(short, long)]
        count: Option<usize>,

        /// Live per-syllable feedback
        #[arg(long)]
        easy: bool,

        /// Word list to use instead of the configured one
        #[arg(short, long, env = "WORDWEAVE_WORD_LIST")]
        words: Option<PathBuf>,

        /// Answer this many items wrong
        #[arg(short, long, default_value_t = 0)]
        mistakes: usize,

        /// Seed for the word and syllable shuffles
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rebuild a replay record and print what was answered
    Replay {
        /// JSON file holding the replay record
        file: PathBuf,

        /// Print the finish report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing. Stdout carries the protocol in `serve`.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Serve { standalone, seed } => commands::serve::run(standalone, seed).await?,
        Commands::Simulate {
            count,
            easy,
            words,
            mistakes,
            seed,
        } => {
            commands::simulate::run(commands::simulate::SimulateOptions {
                count,
                easy,
                words,
                mistakes,
                seed,
            })
            .await?
        }
        Commands::Replay { file, json } => commands::replay::run(file, json).await?,
    }

    Ok(())
}
