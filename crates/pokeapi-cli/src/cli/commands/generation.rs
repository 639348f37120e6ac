//! `pokeapi generation` – fetch one generation.

use anyhow::Result;
use pokeapi_core::PokeClient;

use super::{get_options, print_json};

pub async fn run_generation(client: &PokeClient, id_or_name: &str, validate: bool) -> Result<()> {
    let generation = client
        .generation()
        .get(id_or_name, &get_options(validate))
        .await?;
    print_json(&generation)
}
