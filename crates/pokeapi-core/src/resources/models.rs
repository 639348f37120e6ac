//! Typed subsets of the PokeAPI resource shapes. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::validate::{Issues, Validate, ValidationIssue};

/// `{name, url}` link to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl Validate for NamedResource {
    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Issues::default();
        issues.non_empty("name", &self.name);
        issues.absolute_url("url", &self.url);
        issues.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonAbility {
    pub ability: NamedResource,
    pub is_hidden: bool,
    pub slot: u32,
}

impl Validate for PokemonAbility {
    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Issues::default();
        issues.nested("ability", &self.ability);
        issues.positive("slot", i64::from(self.slot));
        issues.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub abilities: Vec<PokemonAbility>,
    pub species: NamedResource,
}

impl Validate for Pokemon {
    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Issues::default();
        issues.positive("id", i64::from(self.id));
        issues.non_empty("name", &self.name);
        issues.each("abilities", &self.abilities);
        issues.nested("species", &self.species);
        issues.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub id: u32,
    pub name: String,
    pub main_region: NamedResource,
    pub pokemon_species: Vec<NamedResource>,
}

impl Validate for Generation {
    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Issues::default();
        issues.positive("id", i64::from(self.id));
        issues.non_empty("name", &self.name);
        issues.nested("main_region", &self.main_region);
        issues.each("pokemon_species", &self.pokemon_species);
        issues.finish()
    }
}

/// The part of a `pokemon-species` resource needed to reach its generation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpeciesLink {
    #[serde(default)]
    pub generation: Option<NamedResource>,
}
