//! Typed, retrying client for the read-only PokeAPI REST service.
//!
//! ```text
//! PokeClient
//!     → ResourceApi (cache, validation)
//!     → Transport (URL/header merge, timeout, retry)
//!     → Fetch (reqwest by default)
//! ```

pub mod cache;
pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod resources;
pub mod retry;
pub mod transport;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use cache::{CacheLike, LruCache};
pub use cancel::CancellationToken;
pub use client::{PokeClient, PokeClientBuilder, PokemonWithGeneration};
pub use config::ClientConfig;
pub use error::{Error, HttpError, NetworkCause, Result};
pub use pagination::{Page, PageStream};
pub use resources::{
    Generation, GenerationApi, GetOptions, IdOrName, ListParams, NamedResource, Pokemon,
    PokemonAbility, PokemonApi,
};
pub use transport::{Fetch, RequestOptions, Transport};
pub use validate::{Validate, ValidationIssue};
