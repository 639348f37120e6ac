//! CLI command handlers. Each command is in its own file.

mod completions;
mod generation;
mod iterate;
mod list;
mod pokemon;
mod with_generation;

pub use completions::run_completions;
pub use generation::run_generation;
pub use iterate::run_iterate;
pub use list::run_list;
pub use pokemon::run_pokemon;
pub use with_generation::run_with_generation;

use anyhow::Result;
use pokeapi_core::GetOptions;
use serde::Serialize;

/// `--validate` forces checks on; otherwise the configured default applies.
fn get_options(validate: bool) -> GetOptions {
    GetOptions {
        validate: validate.then_some(true),
        ..GetOptions::default()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
