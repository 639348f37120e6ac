//! `pokeapi with-generation` – pokemon plus its species' generation.

use anyhow::Result;
use pokeapi_core::PokeClient;

use super::print_json;

pub async fn run_with_generation(client: &PokeClient, id_or_name: &str) -> Result<()> {
    let both = client.get_pokemon_with_generation(id_or_name).await?;
    print_json(&both)
}
