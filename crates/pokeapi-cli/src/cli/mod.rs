//! CLI for the pokeapi client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use pokeapi_core::resources::{DEFAULT_LIST_LIMIT, DEFAULT_PAGE_SIZE};
use pokeapi_core::{config, PokeClient};
use std::path::PathBuf;

use commands::{
    run_completions, run_generation, run_iterate, run_list, run_pokemon, run_with_generation,
};

/// Top-level CLI for the PokeAPI client.
#[derive(Debug, Parser)]
#[command(name = "pokeapi")]
#[command(about = "Query the PokeAPI with retries, caching and validation", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/pokeapi/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Resource kinds with a typed API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Pokemon,
    Generation,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch one pokemon by id or name.
    Pokemon {
        /// Numeric id or name (e.g. 25 or pikachu).
        id_or_name: String,
        /// Reject responses that fail schema checks.
        #[arg(long)]
        validate: bool,
    },

    /// Fetch one generation by id or name.
    Generation {
        /// Numeric id or name (e.g. 1 or generation-i).
        id_or_name: String,
        /// Reject responses that fail schema checks.
        #[arg(long)]
        validate: bool,
    },

    /// Print a single page of resource links.
    List {
        kind: ResourceKind,
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT, value_name = "N")]
        limit: u32,
        #[arg(long, default_value_t = 0, value_name = "N")]
        offset: u32,
    },

    /// Walk every page and print one name per line.
    Iterate {
        kind: ResourceKind,
        /// Links requested per page.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_name = "N")]
        page_size: u32,
        /// Stop after N names.
        #[arg(long, value_name = "N")]
        take: Option<usize>,
    },

    /// Fetch a pokemon and the generation its species belongs to.
    WithGeneration {
        /// Numeric id or name.
        id_or_name: String,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need neither config nor network.
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let client = PokeClient::from_config(&cfg)?;

        match cli.command {
            CliCommand::Pokemon {
                id_or_name,
                validate,
            } => run_pokemon(&client, &id_or_name, validate).await?,
            CliCommand::Generation {
                id_or_name,
                validate,
            } => run_generation(&client, &id_or_name, validate).await?,
            CliCommand::List {
                kind,
                limit,
                offset,
            } => run_list(&client, kind, limit, offset).await?,
            CliCommand::Iterate {
                kind,
                page_size,
                take,
            } => run_iterate(&client, kind, page_size, take).await?,
            CliCommand::WithGeneration { id_or_name } => {
                run_with_generation(&client, &id_or_name).await?
            }
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
