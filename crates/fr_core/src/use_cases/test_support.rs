use super::Repositories;
use crate::domain::{
    Contract, EntityId, ExternalReference, ExternalReferences, ExternalReferencesDto, Fixture,
    FixtureDetails, FixtureProps, League, LeagueEdition, LeagueEditionProps, LeagueSummary, Player,
    PlayerProps, Season, Squad, Stadium, StadiumProps, Team, TeamProps,
};
use crate::ports::error::StoreError;
use crate::ports::repositories::{
    ContractRepository, FixtureDetailsRepository, FixtureRepository, LeagueRepository,
    SquadRepository,
};
use crate::store::{MemoryStore, StoreSnapshot};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn refs(value: serde_json::Value) -> ExternalReferencesDto {
    serde_json::from_value(value).unwrap()
}

pub fn references(value: serde_json::Value) -> ExternalReferences {
    ExternalReferences::from_dto(&refs(value))
}

/// A fresh in-memory store with seeding helpers.
pub struct World {
    pub store: Arc<MemoryStore>,
    pub repositories: Repositories,
}

impl World {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let repositories = Repositories::in_memory(store.clone());
        Self { store, repositories }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot().unwrap()
    }

    /// Whole store as JSON, for before/after comparisons.
    pub fn dump(&self) -> String {
        self.snapshot().to_json().unwrap()
    }

    /// Repositories over the same store whose `save` on `table` fails while
    /// the returned switch is on.
    pub fn failing_saves(&self, table: Table) -> (Repositories, Arc<AtomicBool>) {
        let down = Arc::new(AtomicBool::new(true));
        let faulty = Arc::new(FaultyStore { inner: self.store.clone(), table, down: down.clone() });
        let mut repositories = self.repositories.clone();
        match table {
            Table::Contracts => repositories.contracts = faulty,
            Table::Squads => repositories.squads = faulty,
            Table::Fixtures => repositories.fixtures = faulty,
            Table::FixtureDetails => repositories.fixture_details = faulty,
            Table::Leagues => repositories.leagues = faulty,
        }
        (repositories, down)
    }

    pub async fn team(&self, name: &str, sofascore: i64) -> Team {
        let team = Team::create(TeamProps {
            name: name.into(),
            external_references: references(serde_json::json!({ "sofascore": sofascore })),
            ..TeamProps::default()
        })
        .unwrap();
        self.repositories.teams.save(team).await.unwrap()
    }

    pub async fn player(&self, name: &str, sofascore: i64) -> Player {
        let player = Player::create(PlayerProps {
            name: name.into(),
            external_references: references(serde_json::json!({ "sofascore": sofascore })),
            ..PlayerProps::default()
        })
        .unwrap();
        self.repositories.players.save(player).await.unwrap()
    }

    pub async fn stadium(&self, name: &str, sofascore: i64) -> Stadium {
        let stadium = Stadium::create(StadiumProps {
            name: name.into(),
            external_references: references(serde_json::json!({ "sofascore": sofascore })),
            ..StadiumProps::default()
        })
        .unwrap();
        self.repositories.stadiums.save(stadium).await.unwrap()
    }

    /// A `NotStarted` fixture in an unbounded edition.
    pub async fn fixture(&self, home: &Team, away: &Team, sofascore: i64) -> Fixture {
        let edition = LeagueEdition::create(LeagueEditionProps {
            id: Some(EntityId::generate()),
            league: LeagueSummary { id: EntityId::generate(), name: "Serie A".into() },
            season: Season::create(Some(EntityId::generate()), 2024).unwrap(),
            starting_date: None,
            ending_date: None,
        })
        .unwrap();
        let fixture = Fixture::create(FixtureProps {
            id: None,
            edition,
            round: "Round 1".into(),
            home: home.summary().unwrap(),
            away: away.summary().unwrap(),
            ground: None,
            match_date: NaiveDateTime::parse_from_str("2024-08-17T18:30:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            referee: None,
            external_references: references(serde_json::json!({ "sofascore": sofascore })),
        })
        .unwrap();
        self.repositories.fixtures.save(fixture).await.unwrap()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Contracts,
    Squads,
    Fixtures,
    FixtureDetails,
    Leagues,
}

/// Reads go to the wrapped store; saves on one table fail while `down` is set.
pub struct FaultyStore {
    inner: Arc<MemoryStore>,
    table: Table,
    down: Arc<AtomicBool>,
}

impl FaultyStore {
    fn check(&self, table: Table) -> Result<(), StoreError> {
        if self.table == table && self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("db down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContractRepository for FaultyStore {
    async fn find_open(
        &self,
        player_id: &EntityId,
        team_id: &EntityId,
        until: NaiveDate,
    ) -> Result<Option<Contract>, StoreError> {
        self.inner.find_open(player_id, team_id, until).await
    }

    async fn find_incomplete(
        &self,
        player_id: &EntityId,
        team_id: &EntityId,
        starting_date: NaiveDate,
    ) -> Result<Option<Contract>, StoreError> {
        self.inner.find_incomplete(player_id, team_id, starting_date).await
    }

    async fn find_by_player(&self, player_id: &EntityId) -> Result<Vec<Contract>, StoreError> {
        self.inner.find_by_player(player_id).await
    }

    async fn save(&self, contract: Contract) -> Result<Contract, StoreError> {
        self.check(Table::Contracts)?;
        ContractRepository::save(self.inner.as_ref(), contract).await
    }
}

#[async_trait]
impl SquadRepository for FaultyStore {
    async fn find_by_team(&self, team_id: &EntityId) -> Result<Option<Squad>, StoreError> {
        self.inner.find_by_team(team_id).await
    }

    async fn save(&self, squad: Squad) -> Result<Squad, StoreError> {
        self.check(Table::Squads)?;
        SquadRepository::save(self.inner.as_ref(), squad).await
    }
}

#[async_trait]
impl FixtureRepository for FaultyStore {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Fixture>, StoreError> {
        FixtureRepository::find_by_id(self.inner.as_ref(), id).await
    }

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Fixture>, StoreError> {
        FixtureRepository::find_by_references(self.inner.as_ref(), references).await
    }

    async fn find_by_teams_and_date(
        &self,
        home_id: &EntityId,
        away_id: &EntityId,
        match_date: NaiveDateTime,
    ) -> Result<Option<Fixture>, StoreError> {
        self.inner.find_by_teams_and_date(home_id, away_id, match_date).await
    }

    async fn save(&self, fixture: Fixture) -> Result<Fixture, StoreError> {
        self.check(Table::Fixtures)?;
        FixtureRepository::save(self.inner.as_ref(), fixture).await
    }
}

#[async_trait]
impl FixtureDetailsRepository for FaultyStore {
    async fn find_by_fixture(
        &self,
        fixture_id: &EntityId,
    ) -> Result<Option<FixtureDetails>, StoreError> {
        self.inner.find_by_fixture(fixture_id).await
    }

    async fn save(&self, details: FixtureDetails) -> Result<FixtureDetails, StoreError> {
        self.check(Table::FixtureDetails)?;
        FixtureDetailsRepository::save(self.inner.as_ref(), details).await
    }
}

#[async_trait]
impl LeagueRepository for FaultyStore {
    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<League>, StoreError> {
        LeagueRepository::find_by_references(self.inner.as_ref(), references).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<League>, StoreError> {
        LeagueRepository::find_by_name(self.inner.as_ref(), name).await
    }

    async fn save(&self, league: League) -> Result<League, StoreError> {
        self.check(Table::Leagues)?;
        LeagueRepository::save(self.inner.as_ref(), league).await
    }
}
