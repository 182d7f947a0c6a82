//! Repository traits.
//!
//! Every `save` assigns an identity when the entity has none and returns the
//! stored value. Lookups by external reference match when any one of the given
//! references is carried by the stored record.

use super::error::StoreError;
use crate::domain::{
    Contract, EntityId, ExternalReference, Fixture, FixtureDetails, League, LeagueEdition, Player,
    Season, Squad, Stadium, Team,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Contract for (player, team) with no ending date, started on or before `until`.
    async fn find_open(
        &self,
        player_id: &EntityId,
        team_id: &EntityId,
        until: NaiveDate,
    ) -> Result<Option<Contract>, StoreError>;

    /// Contract for (player, team) with no starting date, ending on or after `starting_date`.
    async fn find_incomplete(
        &self,
        player_id: &EntityId,
        team_id: &EntityId,
        starting_date: NaiveDate,
    ) -> Result<Option<Contract>, StoreError>;

    async fn find_by_player(&self, player_id: &EntityId) -> Result<Vec<Contract>, StoreError>;

    async fn save(&self, contract: Contract) -> Result<Contract, StoreError>;
}

#[async_trait]
pub trait SquadRepository: Send + Sync {
    async fn find_by_team(&self, team_id: &EntityId) -> Result<Option<Squad>, StoreError>;

    async fn save(&self, squad: Squad) -> Result<Squad, StoreError>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Team>, StoreError>;

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Team>, StoreError>;

    /// Case-insensitive match on name or short name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, StoreError>;

    async fn save(&self, team: Team) -> Result<Team, StoreError>;
}

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Player>, StoreError>;

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Player>, StoreError>;

    /// Batch lookup: every stored player carrying at least one of `references`.
    async fn find_all_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Vec<Player>, StoreError>;

    async fn save(&self, player: Player) -> Result<Player, StoreError>;
}

#[async_trait]
pub trait FixtureRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Fixture>, StoreError>;

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Fixture>, StoreError>;

    /// Fixture between the two teams on the calendar day of `match_date`.
    async fn find_by_teams_and_date(
        &self,
        home_id: &EntityId,
        away_id: &EntityId,
        match_date: NaiveDateTime,
    ) -> Result<Option<Fixture>, StoreError>;

    async fn save(&self, fixture: Fixture) -> Result<Fixture, StoreError>;
}

#[async_trait]
pub trait FixtureDetailsRepository: Send + Sync {
    async fn find_by_fixture(
        &self,
        fixture_id: &EntityId,
    ) -> Result<Option<FixtureDetails>, StoreError>;

    async fn save(&self, details: FixtureDetails) -> Result<FixtureDetails, StoreError>;
}

#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<League>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<League>, StoreError>;

    async fn save(&self, league: League) -> Result<League, StoreError>;
}

#[async_trait]
pub trait SeasonRepository: Send + Sync {
    async fn find_by_year(&self, year: i32) -> Result<Option<Season>, StoreError>;

    async fn save(&self, season: Season) -> Result<Season, StoreError>;
}

#[async_trait]
pub trait LeagueEditionRepository: Send + Sync {
    async fn find_by_league_and_season(
        &self,
        league_id: &EntityId,
        season_id: &EntityId,
    ) -> Result<Option<LeagueEdition>, StoreError>;

    async fn save(&self, edition: LeagueEdition) -> Result<LeagueEdition, StoreError>;
}

#[async_trait]
pub trait StadiumRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Stadium>, StoreError>;

    async fn find_by_references(
        &self,
        references: &[ExternalReference],
    ) -> Result<Option<Stadium>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Stadium>, StoreError>;

    async fn save(&self, stadium: Stadium) -> Result<Stadium, StoreError>;
}
