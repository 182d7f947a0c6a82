//! In-memory store
//!
//! Implements every repository trait over a single `RwLock`ed set of tables.
//! Used by the CLI, which loads and writes the tables as a JSON
//! [`StoreSnapshot`], and by the use-case tests.

mod snapshot;

pub use snapshot::StoreSnapshot;

use crate::domain::{
    Contract, Entity, EntityId, ExternalReference, Fixture, FixtureDetails, League, LeagueEdition,
    Player, Season, Squad, Stadium, Team,
};
use crate::ports::error::StoreError;
use crate::ports::repositories::{
    ContractRepository, FixtureDetailsRepository, FixtureRepository, LeagueEditionRepository,
    LeagueRepository, PlayerRepository, SeasonRepository, SquadRepository, StadiumRepository,
    TeamRepository,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<StoreSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self { tables: RwLock::new(snapshot) }
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        self.read(StoreSnapshot::clone)
    }

    fn read<R>(&self, f: impl FnOnce(&StoreSnapshot) -> R) -> Result<R, StoreError> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(f(&tables))
    }

    fn write<R>(&self, f: impl FnOnce(&mut StoreSnapshot) -> R) -> Result<R, StoreError> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        Ok(f(&mut tables))
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

/// Insert or replace by identity, assigning an id on first save.
fn upsert<T: Entity + Clone>(table: &mut Vec<T>, entity: T, kind: &str) -> T {
    let entity = match entity.id() {
        Some(_) => entity,
        None => entity.with_id(EntityId::generate()),
    };
    match table.iter_mut().find(|stored| stored.same_identity_as(&entity)) {
        Some(stored) => *stored = entity.clone(),
        None => table.push(entity.clone()),
    }
    if let Some(id) = entity.id() {
        debug!("Saved {kind} {id}");
    }
    entity
}

fn by_id<'a, T: Entity>(table: &'a [T], id: &EntityId) -> Option<&'a T> {
    table.iter().find(|stored| stored.id() == Some(id))
}

fn same_name(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

#[async_trait]
impl ContractRepository for MemoryStore {
    async fn find_open(
        &self,
        player_id: &EntityId,
        team_id: &EntityId,
        until: NaiveDate,
    ) -> Result<Option<Contract>, StoreError> {
        self.read(|t| {
            t.contracts
                .iter()
                .find(|c| c.binds(player_id, team_id) && c.is_open_at(until))
                .cloned()
        })
    }

    async fn find_incomplete(
        &self,
        player_id: &EntityId,
        team_id: &EntityId,
        starting_date: NaiveDate,
    ) -> Result<Option<Contract>, StoreError> {
        self.read(|t| {
            t.contracts
                .iter()
                .find(|c| c.binds(player_id, team_id) && c.is_incomplete_for(starting_date))
                .cloned()
        })
    }

    async fn find_by_player(&self, player_id: &EntityId) -> Result<Vec<Contract>, StoreError> {
        self.read(|t| t.contracts.iter().filter(|c| &c.player().id == player_id).cloned().collect())
    }

    async fn save(&self, contract: Contract) -> Result<Contract, StoreError> {
        self.write(|t| upsert(&mut t.contracts, contract, "contract"))
    }
}

#[async_trait]
impl SquadRepository for MemoryStore {
    async fn find_by_team(&self, team_id: &EntityId) -> Result<Option<Squad>, StoreError> {
        self.read(|t| t.squads.iter().find(|s| s.team_id() == team_id).cloned())
    }

    async fn save(&self, squad: Squad) -> Result<Squad, StoreError> {
        self.write(|t| upsert(&mut t.squads, squad, "squad"))
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Team>, StoreError> {
        self.read(|t| by_id(&t.teams, id).cloned())
    }

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Team>, StoreError> {
        self.read(|t| {
            t.teams.iter().find(|team| team.external_references().intersects(references)).cloned()
        })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, StoreError> {
        self.read(|t| t.teams.iter().find(|team| team.answers_to(name)).cloned())
    }

    async fn save(&self, team: Team) -> Result<Team, StoreError> {
        self.write(|t| upsert(&mut t.teams, team, "team"))
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Player>, StoreError> {
        self.read(|t| by_id(&t.players, id).cloned())
    }

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Player>, StoreError> {
        self.read(|t| {
            t.players.iter().find(|p| p.external_references().intersects(references)).cloned()
        })
    }

    async fn find_all_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Vec<Player>, StoreError> {
        self.read(|t| {
            t.players
                .iter()
                .filter(|p| p.external_references().intersects(references))
                .cloned()
                .collect()
        })
    }

    async fn save(&self, player: Player) -> Result<Player, StoreError> {
        self.write(|t| upsert(&mut t.players, player, "player"))
    }
}

#[async_trait]
impl FixtureRepository for MemoryStore {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Fixture>, StoreError> {
        self.read(|t| by_id(&t.fixtures, id).cloned())
    }

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Fixture>, StoreError> {
        self.read(|t| {
            t.fixtures.iter().find(|f| f.external_references().intersects(references)).cloned()
        })
    }

    async fn find_by_teams_and_date(
        &self,
        home_id: &EntityId,
        away_id: &EntityId,
        match_date: NaiveDateTime,
    ) -> Result<Option<Fixture>, StoreError> {
        self.read(|t| {
            t.fixtures
                .iter()
                .find(|f| f.is_between(home_id, away_id) && f.match_date().date() == match_date.date())
                .cloned()
        })
    }

    async fn save(&self, fixture: Fixture) -> Result<Fixture, StoreError> {
        self.write(|t| upsert(&mut t.fixtures, fixture, "fixture"))
    }
}

#[async_trait]
impl FixtureDetailsRepository for MemoryStore {
    async fn find_by_fixture(
        &self,
        fixture_id: &EntityId,
    ) -> Result<Option<FixtureDetails>, StoreError> {
        self.read(|t| t.fixture_details.iter().find(|d| d.fixture_id() == fixture_id).cloned())
    }

    async fn save(&self, details: FixtureDetails) -> Result<FixtureDetails, StoreError> {
        self.write(|t| upsert(&mut t.fixture_details, details, "fixture details"))
    }
}

#[async_trait]
impl LeagueRepository for MemoryStore {
    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<League>, StoreError> {
        self.read(|t| {
            t.leagues.iter().find(|l| l.external_references().intersects(references)).cloned()
        })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<League>, StoreError> {
        self.read(|t| t.leagues.iter().find(|l| same_name(l.name(), name)).cloned())
    }

    async fn save(&self, league: League) -> Result<League, StoreError> {
        self.write(|t| upsert(&mut t.leagues, league, "league"))
    }
}

#[async_trait]
impl SeasonRepository for MemoryStore {
    async fn find_by_year(&self, year: i32) -> Result<Option<Season>, StoreError> {
        self.read(|t| t.seasons.iter().find(|s| s.year() == year).cloned())
    }

    async fn save(&self, season: Season) -> Result<Season, StoreError> {
        self.write(|t| upsert(&mut t.seasons, season, "season"))
    }
}

#[async_trait]
impl LeagueEditionRepository for MemoryStore {
    async fn find_by_league_and_season(
        &self,
        league_id: &EntityId,
        season_id: &EntityId,
    ) -> Result<Option<LeagueEdition>, StoreError> {
        self.read(|t| {
            t.editions
                .iter()
                .find(|e| &e.league().id == league_id && e.season().id() == Some(season_id))
                .cloned()
        })
    }

    async fn save(&self, edition: LeagueEdition) -> Result<LeagueEdition, StoreError> {
        self.write(|t| upsert(&mut t.editions, edition, "league edition"))
    }
}

#[async_trait]
impl StadiumRepository for MemoryStore {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Stadium>, StoreError> {
        self.read(|t| by_id(&t.stadiums, id).cloned())
    }

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Stadium>, StoreError> {
        self.read(|t| {
            t.stadiums.iter().find(|s| s.external_references().intersects(references)).cloned()
        })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Stadium>, StoreError> {
        self.read(|t| t.stadiums.iter().find(|s| same_name(s.name(), name)).cloned())
    }

    async fn save(&self, stadium: Stadium) -> Result<Stadium, StoreError> {
        self.write(|t| upsert(&mut t.stadiums, stadium, "stadium"))
    }
}

#[cfg(test)]
mod tests;
