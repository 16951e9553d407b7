//! Corpus generation for the contract composition engine.
//!
//! Every standard has a [`Blueprint`] of option domains. Enumerating all
//! blueprints, building each alternative and optionally reducing the result
//! to a minimal cover yields a corpus of distinct contract shapes, exported
//! as one content-addressed `.sol` file each.

#![deny(unsafe_code)]

pub mod alternatives;
pub mod blueprints;
pub mod config;
pub mod cover;
pub mod error;
pub mod sources;

pub use alternatives::{Alternatives, Blueprint};
pub use blueprints::{generate_kind_options, generate_options, option_space_size};
pub use config::{GenerateConfig, Subset};
pub use cover::{cover_indices, find_cover};
pub use error::{GenerateError, GenerateResult};
pub use sources::{
    content_id, dependency_signature, generate_contract_subset, generate_contracts,
    generate_sources, select_subset, write_generated_sources, GeneratedContract, GeneratedSource,
};
