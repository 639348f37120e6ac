//! `pokeapi iterate` – stream every name across pages.

use anyhow::Result;
use futures_util::StreamExt;
use pokeapi_core::{PokeClient, RequestOptions};

use crate::cli::ResourceKind;

/// Print names as pages arrive; `take` stops early without fetching further pages.
pub async fn run_iterate(
    client: &PokeClient,
    kind: ResourceKind,
    page_size: u32,
    take: Option<usize>,
) -> Result<()> {
    let options = RequestOptions::new();
    let stream = match kind {
        ResourceKind::Pokemon => client.pokemon().iterate(page_size, options),
        ResourceKind::Generation => client.generation().iterate(page_size, options),
    };
    let mut stream = stream.take(take.unwrap_or(usize::MAX));

    let mut printed = 0usize;
    while let Some(link) = stream.next().await {
        println!("{}", link?.name);
        printed += 1;
    }
    tracing::debug!(printed, "iterate finished");
    Ok(())
}
