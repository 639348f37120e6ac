//! `pokeapi pokemon` – fetch one pokemon.

use anyhow::Result;
use pokeapi_core::PokeClient;

use super::{get_options, print_json};

pub async fn run_pokemon(client: &PokeClient, id_or_name: &str, validate: bool) -> Result<()> {
    let pokemon = client.pokemon().get(id_or_name, &get_options(validate)).await?;
    print_json(&pokemon)
}
