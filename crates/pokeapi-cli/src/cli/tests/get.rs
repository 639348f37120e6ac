//! Tests for pokemon, generation, with-generation, completions and global flags.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_pokemon() {
    match parse(&["pokeapi", "pokemon", "pikachu"]) {
        CliCommand::Pokemon {
            id_or_name,
            validate,
        } => {
            assert_eq!(id_or_name, "pikachu");
            assert!(!validate);
        }
        _ => panic!("expected Pokemon"),
    }
}

#[test]
fn cli_parse_generation_validate() {
    match parse(&["pokeapi", "generation", "1", "--validate"]) {
        CliCommand::Generation {
            id_or_name,
            validate,
        } => {
            assert_eq!(id_or_name, "1");
            assert!(validate);
        }
        _ => panic!("expected Generation with --validate"),
    }
}

#[test]
fn cli_parse_with_generation() {
    match parse(&["pokeapi", "with-generation", "25"]) {
        CliCommand::WithGeneration { id_or_name } => assert_eq!(id_or_name, "25"),
        _ => panic!("expected WithGeneration"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["pokeapi", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["pokeapi", "pokemon", "1", "--config", "/tmp/p.toml"]).unwrap();
    assert_eq!(cli.config.unwrap().to_str(), Some("/tmp/p.toml"));
}

#[test]
fn cli_parse_missing_id_fails() {
    assert!(Cli::try_parse_from(["pokeapi", "pokemon"]).is_err());
}
