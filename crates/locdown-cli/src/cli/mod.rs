//! CLI for locdown.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use locdown_core::config;
use locdown_core::ids::IdKind;
use std::path::PathBuf;

use commands::{run_check, run_fetch, run_max_id};

/// Top-level CLI for locdown.
#[derive(Debug, Parser)]
#[command(name = "locdown")]
#[command(about = "locdown: batch downloader for id-addressed catalogs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Find the highest valid id behind a URL template.
    MaxId {
        /// URL with a single `{id}` placeholder.
        template: String,
        /// Id space to search.
        #[arg(long, default_value = "recording", value_parser = parse_kind)]
        kind: IdKind,
        /// Start the search here instead of the cached value or seed.
        #[arg(long, value_name = "N")]
        start: Option<u64>,
        /// Ignore the cached value even if it is fresh.
        #[arg(long)]
        refresh: bool,
    },

    /// Download ids (N, A-B, random, randomN; optional `artist:` prefix).
    Fetch {
        /// URL with a single `{id}` placeholder.
        template: String,
        /// Id specifiers.
        #[arg(required = true)]
        ids: Vec<String>,
        /// Id kind for specifiers without a prefix.
        #[arg(long, default_value = "recording", value_parser = parse_kind)]
        kind: IdKind,
        /// Concurrent downloads (default: max_connections from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Directory to write `<id>.bin` files into (default: current dir).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Probe ids and report which exist.
    Check {
        /// URL with a single `{id}` placeholder.
        template: String,
        /// Id specifiers (ranges allowed; random is not).
        #[arg(required = true)]
        ids: Vec<String>,
        /// Concurrent probes (default: max_connections from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },
}

fn parse_kind(s: &str) -> Result<IdKind, String> {
    s.parse::<IdKind>().map_err(|e| e.to_string())
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::MaxId {
                template,
                kind,
                start,
                refresh,
            } => run_max_id(&cfg, &template, kind, start, refresh).await?,
            CliCommand::Fetch {
                template,
                ids,
                kind,
                jobs,
                dest,
            } => {
                let dest = match dest {
                    Some(d) => d,
                    None => std::env::current_dir()?,
                };
                run_fetch(&cfg, &template, &ids, kind, jobs, &dest).await?;
            }
            CliCommand::Check {
                template,
                ids,
                jobs,
            } => run_check(&cfg, &template, &ids, jobs).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
