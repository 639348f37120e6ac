//! Resource APIs: thin request builders over the transport.
//!
//! ```text
//! ResourceApi::get(id)
//!     → cache lookup ("<kind>:<id>")
//!     → miss: Transport::get("/<kind>/<id>/")
//!     → maybe_validate
//!     → cache store
//! ```

mod api;
mod models;

use std::fmt;

use serde::de::DeserializeOwned;

use crate::validate::Validate;

pub use api::{GetOptions, ListParams, ResourceApi, DEFAULT_LIST_LIMIT, DEFAULT_PAGE_SIZE};
pub use models::{Generation, NamedResource, Pokemon, PokemonAbility, SpeciesLink};

/// A resource kind addressable as `/<KIND>/<id or name>/`.
pub trait Resource: DeserializeOwned + Validate + Clone + Send + Sync + 'static {
    const KIND: &'static str;
}

impl Resource for Pokemon {
    const KIND: &'static str = "pokemon";
}

impl Resource for Generation {
    const KIND: &'static str = "generation";
}

pub type PokemonApi = ResourceApi<Pokemon>;
pub type GenerationApi = ResourceApi<Generation>;

/// Numeric id or name of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdOrName {
    Id(u32),
    Name(String),
}

impl fmt::Display for IdOrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdOrName::Id(id) => write!(f, "{id}"),
            IdOrName::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for IdOrName {
    fn from(id: u32) -> Self {
        IdOrName::Id(id)
    }
}

impl From<&str> for IdOrName {
    /// Digits-only input is treated as an id so `"25"` and `25` share a cache key.
    fn from(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(id) => IdOrName::Id(id),
            Err(_) => IdOrName::Name(s.to_string()),
        }
    }
}

impl From<String> for IdOrName {
    fn from(s: String) -> Self {
        IdOrName::from(s.as_str())
    }
}

impl From<&String> for IdOrName {
    fn from(s: &String) -> Self {
        IdOrName::from(s.as_str())
    }
}
