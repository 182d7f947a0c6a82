//! # fr_core - Football reference-data consistency core
//!
//! Keeps contracts, squads and fixtures mutually consistent as new facts
//! arrive from manual entry and scrapers.
//!
//! ## Layout
//! - `outcome`, `guard`: result algebra and validation predicates
//! - `domain`: entities and value objects with validating constructors
//! - `ports`: repository, scraper and clock traits
//! - `use_cases`: reconciliation flows over the ports
//! - `store`: in-memory implementation of every repository
//! - `config`: registry configuration

pub mod config;
pub mod domain;
pub mod dto;
pub mod guard;
pub mod outcome;
pub mod ports;
pub mod store;
pub mod use_cases;

pub use config::{ConfigError, RegistryConfig};
pub use guard::Guard;
pub use outcome::{GuardResult, Join, OptionExt, ResultExt};
pub use store::{MemoryStore, StoreSnapshot};

// Re-export use cases
pub use use_cases::{
    AddFixtureDetails, AddFixtureDetailsError, CreateFixture, CreateFixtureError, ImportStadium,
    ImportStadiumError, ImportTeam, ImportTeamError, ImportedTeam, RegisterContract,
    RegisterContractError, Repositories, SyncFixtureDetails, SyncFixtureDetailsError,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
