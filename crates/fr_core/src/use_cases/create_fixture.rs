//! CreateFixture
//!
//! Resolves both teams and the ground, checks for a duplicate, then resolves
//! the competition context of the new match, building the league, season
//! and league edition on first sight. Teams and grounds are never created
//! here: they must already exist. New competition records are saved only
//! once the fixture itself is valid, right before the fixture.

use super::Repositories;
use crate::domain::{
    Entity, EntityId, ExternalReferences, Fixture, FixtureError, FixtureProps, League, LeagueEdition,
    LeagueEditionProps, LeagueError, LeagueProps, Season, Stadium, Team,
};
use crate::dto::{parse_date, parse_match_date, CreateFixtureRequest, EditionWindowDto, LeagueDto, LookupDto};
use crate::outcome::OptionExt;
use crate::ports::error::StoreError;
use crate::ports::repositories::{
    FixtureRepository, LeagueEditionRepository, LeagueRepository, SeasonRepository,
    StadiumRepository, TeamRepository,
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateFixtureError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    InvalidLeague(#[from] LeagueError),

    #[error(transparent)]
    InvalidFixture(#[from] FixtureError),

    #[error("Home team not found")]
    HomeTeamNotFound,

    #[error("Away team not found")]
    AwayTeamNotFound,

    #[error("Ground not found")]
    GroundNotFound,

    #[error("Fixture already exists")]
    AlreadyExists,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<StoreError> for CreateFixtureError {
    fn from(err: StoreError) -> Self {
        CreateFixtureError::Unexpected(err.to_string())
    }
}

pub struct CreateFixture {
    leagues: Arc<dyn LeagueRepository>,
    seasons: Arc<dyn SeasonRepository>,
    editions: Arc<dyn LeagueEditionRepository>,
    teams: Arc<dyn TeamRepository>,
    stadiums: Arc<dyn StadiumRepository>,
    fixtures: Arc<dyn FixtureRepository>,
}

impl CreateFixture {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            leagues: repositories.leagues.clone(),
            seasons: repositories.seasons.clone(),
            editions: repositories.editions.clone(),
            teams: repositories.teams.clone(),
            stadiums: repositories.stadiums.clone(),
            fixtures: repositories.fixtures.clone(),
        }
    }

    pub async fn execute(&self, request: CreateFixtureRequest) -> Result<Fixture, CreateFixtureError> {
        self.run(request).await.inspect_err(|err| match err {
            CreateFixtureError::Unexpected(_) => error!("CreateFixture failed: {err}"),
            _ => debug!("CreateFixture refused: {err}"),
        })
    }

    async fn run(&self, request: CreateFixtureRequest) -> Result<Fixture, CreateFixtureError> {
        let match_date = parse_match_date(&request.match_date).ok_or_else(|| {
            CreateFixtureError::InvalidDate(format!("match date '{}'", request.match_date))
        })?;
        let external_references = ExternalReferences::from_dto(&request.external_references);

        if !external_references.is_empty()
            && self.fixtures.find_by_references(external_references.as_slice()).await?.is_some()
        {
            return Err(CreateFixtureError::AlreadyExists);
        }

        let home = self
            .resolve_team(&request.home_team)
            .await?
            .ok_or(CreateFixtureError::HomeTeamNotFound)?
            .summary()
            .must_be_present("stored team identity");
        let away = self
            .resolve_team(&request.away_team)
            .await?
            .ok_or(CreateFixtureError::AwayTeamNotFound)?
            .summary()
            .must_be_present("stored team identity");
        let ground = match &request.ground {
            Some(lookup) => Some(
                self.resolve_stadium(lookup)
                    .await?
                    .ok_or(CreateFixtureError::GroundNotFound)?
                    .summary()
                    .must_be_present("stored stadium identity"),
            ),
            None => None,
        };
        if self.fixtures.find_by_teams_and_date(&home.id, &away.id, match_date).await?.is_some() {
            return Err(CreateFixtureError::AlreadyExists);
        }

        let league = self.resolve_league(&request.league).await?;
        let season = self.resolve_season(request.season).await?;
        let edition = self
            .resolve_edition(&league.value, &season.value, request.edition.as_ref())
            .await?;

        let fixture = Fixture::create(FixtureProps {
            id: None,
            edition: edition.value.clone(),
            round: request.round,
            home,
            away,
            ground,
            match_date,
            referee: request.referee,
            external_references,
        })?;

        if league.created {
            let league = self.leagues.save(league.value).await?;
            info!("Registered league {}", league.name());
        }
        if season.created {
            self.seasons.save(season.value).await?;
        }
        if edition.created {
            self.editions.save(edition.value).await?;
        }
        let saved = self.fixtures.save(fixture).await?;
        info!(
            "Created fixture {} vs {} on {}",
            saved.home().team.name,
            saved.away().team.name,
            saved.match_date()
        );
        Ok(saved)
    }

    /// By external reference, then by name, else a new league.
    async fn resolve_league(&self, dto: &LeagueDto) -> Result<Resolved<League>, CreateFixtureError> {
        let references = ExternalReferences::from_dto(&dto.external_references);
        if !references.is_empty() {
            if let Some(league) = self.leagues.find_by_references(references.as_slice()).await? {
                return Ok(Resolved::stored(league));
            }
        }
        if let Some(league) = self.leagues.find_by_name(&dto.name).await? {
            return Ok(Resolved::stored(league));
        }

        Ok(Resolved::created(League::create(LeagueProps {
            id: Some(EntityId::generate()),
            name: dto.name.clone(),
            country: dto.country.clone(),
            external_references: references,
        })?))
    }

    async fn resolve_season(&self, year: i32) -> Result<Resolved<Season>, CreateFixtureError> {
        match self.seasons.find_by_year(year).await? {
            Some(season) => Ok(Resolved::stored(season)),
            None => Ok(Resolved::created(Season::create(Some(EntityId::generate()), year)?)),
        }
    }

    /// An existing edition keeps its window; the request's window only
    /// applies to a newly created one.
    async fn resolve_edition(
        &self,
        league: &League,
        season: &Season,
        window: Option<&EditionWindowDto>,
    ) -> Result<Resolved<LeagueEdition>, CreateFixtureError> {
        let league = league.summary().must_be_present("league identity");
        let season_id = *season.id().must_be_present("season identity");
        if let Some(edition) = self.editions.find_by_league_and_season(&league.id, &season_id).await? {
            return Ok(Resolved::stored(edition));
        }

        let (starting_date, ending_date) = match window {
            Some(window) => (
                parse_window_date(window.starting_date.as_deref())?,
                parse_window_date(window.ending_date.as_deref())?,
            ),
            None => (None, None),
        };
        Ok(Resolved::created(LeagueEdition::create(LeagueEditionProps {
            id: Some(EntityId::generate()),
            league,
            season: season.clone(),
            starting_date,
            ending_date,
        })?))
    }

    async fn resolve_team(&self, lookup: &LookupDto) -> Result<Option<Team>, StoreError> {
        let references = ExternalReferences::from_dto(&lookup.external_references);
        if !references.is_empty() {
            if let Some(team) = self.teams.find_by_references(references.as_slice()).await? {
                return Ok(Some(team));
            }
        }
        match lookup.name.as_deref() {
            Some(name) => self.teams.find_by_name(name).await,
            None => Ok(None),
        }
    }

    async fn resolve_stadium(&self, lookup: &LookupDto) -> Result<Option<Stadium>, StoreError> {
        let references = ExternalReferences::from_dto(&lookup.external_references);
        if !references.is_empty() {
            if let Some(stadium) = self.stadiums.find_by_references(references.as_slice()).await? {
                return Ok(Some(stadium));
            }
        }
        match lookup.name.as_deref() {
            Some(name) => self.stadiums.find_by_name(name).await,
            None => Ok(None),
        }
    }
}

/// A stored entity, or a new one with its identity assigned but not saved.
struct Resolved<T> {
    value: T,
    created: bool,
}

impl<T> Resolved<T> {
    fn stored(value: T) -> Self {
        Self { value, created: false }
    }

    fn created(value: T) -> Self {
        Self { value, created: true }
    }
}

fn parse_window_date(value: Option<&str>) -> Result<Option<NaiveDate>, CreateFixtureError> {
    value
        .map(|v| {
            parse_date(v)
                .ok_or_else(|| CreateFixtureError::InvalidDate(format!("edition date '{v}'")))
        })
        .transpose()
}
