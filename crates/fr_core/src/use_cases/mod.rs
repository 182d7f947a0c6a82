//! Reconciliation use cases
//!
//! Each use case takes a plain request, reads current state through the
//! repository traits, builds the next state with the domain constructors and
//! persists it. Store and scraper faults surface as the `Unexpected` arm of
//! the use case's error and are logged at `error` level; business refusals
//! are logged at `debug`.

pub mod add_fixture_details;
pub mod create_fixture;
pub mod import_stadium;
pub mod import_team;
pub mod register_contract;
pub mod sync_fixture_details;

#[cfg(test)]
mod test_support;

pub use add_fixture_details::{AddFixtureDetails, AddFixtureDetailsError};
pub use create_fixture::{CreateFixture, CreateFixtureError};
pub use import_stadium::{ImportStadium, ImportStadiumError};
pub use import_team::{ImportTeam, ImportTeamError, ImportedTeam};
pub use register_contract::{RegisterContract, RegisterContractError};
pub use sync_fixture_details::{SyncFixtureDetails, SyncFixtureDetailsError};

use crate::ports::repositories::{
    ContractRepository, FixtureDetailsRepository, FixtureRepository, LeagueEditionRepository,
    LeagueRepository, PlayerRepository, SeasonRepository, SquadRepository, StadiumRepository,
    TeamRepository,
};
use crate::store::MemoryStore;
use std::sync::Arc;

/// Handles to every repository, shared by the use cases.
#[derive(Clone)]
pub struct Repositories {
    pub contracts: Arc<dyn ContractRepository>,
    pub squads: Arc<dyn SquadRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub stadiums: Arc<dyn StadiumRepository>,
    pub leagues: Arc<dyn LeagueRepository>,
    pub seasons: Arc<dyn SeasonRepository>,
    pub editions: Arc<dyn LeagueEditionRepository>,
    pub fixtures: Arc<dyn FixtureRepository>,
    pub fixture_details: Arc<dyn FixtureDetailsRepository>,
}

impl Repositories {
    /// Every repository backed by the same in-memory store.
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            contracts: store.clone(),
            squads: store.clone(),
            teams: store.clone(),
            players: store.clone(),
            stadiums: store.clone(),
            leagues: store.clone(),
            seasons: store.clone(),
            editions: store.clone(),
            fixtures: store.clone(),
            fixture_details: store,
        }
    }
}
