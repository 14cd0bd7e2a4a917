// SPDX-License-Identifier: MIT OR Apache-2.0
//! `tickflow` - batch evaluator for tickflow graphs.
//!
//! Loads a graph saved as JSON, ticks it a number of times and writes the
//! resulting graph back out.

mod config;
mod runner;

use clap::{Parser, Subcommand};
use config::RunnerConfig;
use runner::Session;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "tickflow", version, about = "Tick a dataflow graph")]
struct Cli {
    /// Runner configuration file (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a graph, tick it and print or save the result
    Run {
        /// Graph file (JSON)
        graph: PathBuf,
        /// Number of ticks, overriding the configuration
        #[arg(long)]
        ticks: Option<u32>,
        /// Write the result here instead of standard output. Required when
        /// the graph prints to standard output itself.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write indented JSON
        #[arg(long)]
        pretty: bool,
    },
    /// List the registered node types
    Types,
    /// Print the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting tickflow v{}", env!("CARGO_PKG_VERSION"));
    let session = Session::with_builtins();

    match cli.command {
        Command::Run {
            graph,
            ticks,
            output,
            pretty,
        } => {
            let mut loaded = session.load_file(&graph)?;
            if output.is_none() {
                session.check_stdout_free(&loaded)?;
            }
            session.run(&mut loaded, ticks.unwrap_or(config.ticks))?;
            let text = session.save(&loaded, pretty || config.pretty)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => println!("{text}"),
            }
        }
        Command::Types => {
            for name in session.type_names() {
                println!("{name}");
            }
        }
        Command::Config => println!("{}", config.to_ron()?),
    }
    Ok(())
}
