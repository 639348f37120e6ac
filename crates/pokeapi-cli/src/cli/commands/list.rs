//! `pokeapi list` – print one page of links as JSON.

use anyhow::Result;
use pokeapi_core::{ListParams, PokeClient, RequestOptions};

use super::print_json;
use crate::cli::ResourceKind;

pub async fn run_list(
    client: &PokeClient,
    kind: ResourceKind,
    limit: u32,
    offset: u32,
) -> Result<()> {
    let params = ListParams { limit, offset };
    let options = RequestOptions::new();
    let page = match kind {
        ResourceKind::Pokemon => client.pokemon().list(params, &options).await?,
        ResourceKind::Generation => client.generation().list(params, &options).await?,
    };
    print_json(&page)
}
