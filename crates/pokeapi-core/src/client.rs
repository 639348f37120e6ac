//! Top-level client: one transport shared by every resource API.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheLike, LruCache, DEFAULT_CACHE_CAPACITY};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resources::{
    GenerationApi, GetOptions, Generation, IdOrName, Pokemon, PokemonApi, SpeciesLink,
};
use crate::transport::{Fetch, Transport, TransportBuilder};

/// A pokemon together with the generation its species was introduced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonWithGeneration {
    pub pokemon: Pokemon,
    pub generation: Option<Generation>,
}

#[derive(Debug, Clone)]
pub struct PokeClient {
    transport: Transport,
    pokemon: PokemonApi,
    generation: GenerationApi,
}

impl PokeClient {
    /// Client with default settings and the built-in HTTP fetcher.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> PokeClientBuilder {
        PokeClientBuilder::default()
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        PokeClientBuilder::from_config(config).build()
    }

    pub fn pokemon(&self) -> &PokemonApi {
        &self.pokemon
    }

    pub fn generation(&self) -> &GenerationApi {
        &self.generation
    }

    /// Raw access for endpoints without a typed API.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Fetch a pokemon, then follow species → generation.
    ///
    /// `generation` is `None` when the pokemon has no species URL or the
    /// species carries no generation link. Any failed request fails the call.
    pub async fn get_pokemon_with_generation(
        &self,
        id_or_name: impl Into<IdOrName>,
    ) -> Result<PokemonWithGeneration> {
        let options = GetOptions::default();
        let pokemon = self.pokemon.get(id_or_name, &options).await?;

        if pokemon.species.url.is_empty() {
            return Ok(PokemonWithGeneration {
                pokemon,
                generation: None,
            });
        }

        let species: SpeciesLink = self
            .transport
            .get(&pokemon.species.url, &options.request)
            .await?;
        let generation = match species.generation.as_ref().and_then(|g| last_segment(&g.url)) {
            Some(id) => Some(self.generation.get(id, &options).await?),
            None => None,
        };
        tracing::debug!(
            pokemon = %pokemon.name,
            generation = generation.as_ref().map(|g| g.name.as_str()).unwrap_or("-"),
            "resolved generation"
        );

        Ok(PokemonWithGeneration {
            pokemon,
            generation,
        })
    }
}

/// Last non-empty `/`-separated segment, e.g. `"1"` for `.../generation/1/`.
fn last_segment(url: &str) -> Option<&str> {
    url.rsplit('/').find(|s| !s.is_empty())
}

/// Builder for [`PokeClient`]. Transport settings are forwarded to
/// [`TransportBuilder`].
pub struct PokeClientBuilder {
    transport: TransportBuilder,
    cache_capacity: usize,
    pokemon_cache: Option<Arc<dyn CacheLike<Pokemon>>>,
    generation_cache: Option<Arc<dyn CacheLike<Generation>>>,
    validate: bool,
}

impl Default for PokeClientBuilder {
    fn default() -> Self {
        Self {
            transport: TransportBuilder::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            pokemon_cache: None,
            generation_cache: None,
            validate: false,
        }
    }
}

impl PokeClientBuilder {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            transport: config.transport_builder(),
            cache_capacity: config.cache_capacity,
            validate: config.validate_responses,
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.transport = self.transport.base_url(base_url);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.transport = self.transport.header(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.timeout(timeout);
        self
    }

    pub fn attempts(mut self, attempts: u32) -> Self {
        self.transport = self.transport.attempts(attempts);
        self
    }

    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.transport = self.transport.backoff(backoff);
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.transport = self.transport.fetcher(fetcher);
        self
    }

    /// Capacity of each default LRU cache. Ignored for kinds given an
    /// explicit cache.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn pokemon_cache(mut self, cache: Arc<dyn CacheLike<Pokemon>>) -> Self {
        self.pokemon_cache = Some(cache);
        self
    }

    pub fn generation_cache(mut self, cache: Arc<dyn CacheLike<Generation>>) -> Self {
        self.generation_cache = Some(cache);
        self
    }

    pub fn validate_responses(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn build(self) -> Result<PokeClient> {
        let transport = self.transport.build()?;
        let capacity = self.cache_capacity;
        let pokemon_cache: Arc<dyn CacheLike<Pokemon>> = match self.pokemon_cache {
            Some(cache) => cache,
            None => Arc::new(LruCache::new(capacity)),
        };
        let generation_cache: Arc<dyn CacheLike<Generation>> = match self.generation_cache {
            Some(cache) => cache,
            None => Arc::new(LruCache::new(capacity)),
        };

        let validate = self.validate;
        Ok(PokeClient {
            pokemon: PokemonApi::new(transport.clone(), Some(pokemon_cache), validate),
            generation: GenerationApi::new(transport.clone(), Some(generation_cache), validate),
            transport,
        })
    }
}
