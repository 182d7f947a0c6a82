//! AddFixtureDetails
//!
//! Attaches scraped match details to a fixture and marks it finished. All
//! players referenced by rosters and events are fetched in one query; events
//! are then built one by one and the first invalid event fails the request.
//! Nothing is written until the details and the finished fixture are both
//! built. The details row is saved before the fixture; the fixture's status
//! decides whether details are recorded, so a retry after a failed fixture
//! save overwrites the row instead of being refused.

use super::Repositories;
use crate::domain::fixture::{factory::describe, FixtureDetailsProps, RosterProps};
use crate::domain::{
    Entity, EntityId, ExternalReference, ExternalReferenceFactory, ExternalReferences,
    ExternalReferencesDto, Fixture, FixtureDetails, FixtureDetailsError, FixtureError,
    FixtureEvent, FixtureEventError, FixtureEventFactory, FixtureStatus, PlayerLookup,
    PlayerSummary,
};
use crate::dto::{AddFixtureDetailsRequest, FixtureDetailsDto, RosterDto};
use crate::outcome::OptionExt;
use crate::ports::error::StoreError;
use crate::ports::repositories::{FixtureDetailsRepository, FixtureRepository, PlayerRepository};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddFixtureDetailsError {
    #[error("Fixture not found: {0}")]
    FixtureNotFound(String),

    #[error("Fixture details already recorded")]
    FixtureDetailsAlreadyExists,

    #[error("Fixture already finished")]
    FixtureAlreadyFinished,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error(transparent)]
    InvalidEvent(FixtureEventError),

    #[error(transparent)]
    InvalidDetails(#[from] FixtureDetailsError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<StoreError> for AddFixtureDetailsError {
    fn from(err: StoreError) -> Self {
        AddFixtureDetailsError::Unexpected(err.to_string())
    }
}

impl From<FixtureEventError> for AddFixtureDetailsError {
    fn from(err: FixtureEventError) -> Self {
        match err {
            FixtureEventError::UnresolvedPlayer(reference) => {
                AddFixtureDetailsError::PlayerNotFound(reference)
            }
            other => AddFixtureDetailsError::InvalidEvent(other),
        }
    }
}

impl From<FixtureError> for AddFixtureDetailsError {
    fn from(err: FixtureError) -> Self {
        match err {
            FixtureError::AlreadyFinished => AddFixtureDetailsError::FixtureAlreadyFinished,
            other => AddFixtureDetailsError::Unexpected(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct AddFixtureDetails {
    fixtures: Arc<dyn FixtureRepository>,
    details: Arc<dyn FixtureDetailsRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl AddFixtureDetails {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            fixtures: repositories.fixtures.clone(),
            details: repositories.fixture_details.clone(),
            players: repositories.players.clone(),
        }
    }

    pub async fn execute(
        &self,
        request: AddFixtureDetailsRequest,
    ) -> Result<Fixture, AddFixtureDetailsError> {
        let outcome = match self.find_fixture(&request).await {
            Ok(fixture) => self.record(fixture, request.details).await,
            Err(err) => Err(err),
        };
        outcome.inspect_err(log_failure)
    }

    async fn find_fixture(
        &self,
        request: &AddFixtureDetailsRequest,
    ) -> Result<Fixture, AddFixtureDetailsError> {
        let references = ExternalReferences::from_dto(&request.fixture_references);
        let fixture = if references.is_empty() {
            None
        } else {
            self.fixtures.find_by_references(references.as_slice()).await?
        };
        fixture.ok_or_else(|| {
            AddFixtureDetailsError::FixtureNotFound(describe(&request.fixture_references))
        })
    }

    /// Finish an already loaded fixture with `dto`.
    pub async fn record(
        &self,
        fixture: Fixture,
        dto: FixtureDetailsDto,
    ) -> Result<Fixture, AddFixtureDetailsError> {
        let fixture_id = *fixture.id().must_be_present("stored fixture identity");
        if fixture.details().is_some() {
            return Err(AddFixtureDetailsError::FixtureDetailsAlreadyExists);
        }
        if fixture.status() == FixtureStatus::MatchFinished {
            return Err(AddFixtureDetailsError::FixtureAlreadyFinished);
        }
        // A details row without a finished fixture is left over from a failed
        // fixture save and gets overwritten.
        let details_id = match self.details.find_by_fixture(&fixture_id).await? {
            Some(orphan) => {
                warn!("Replacing details left over for unfinished fixture {fixture_id}");
                *orphan.id().must_be_present("stored details identity")
            }
            None => EntityId::generate(),
        };

        let players = self.resolve_players(&dto).await?;
        let events = dto
            .events
            .iter()
            .map(|event| FixtureEventFactory::create(event, &players))
            .collect::<Result<Vec<FixtureEvent>, _>>()?;

        let details = FixtureDetails::create(FixtureDetailsProps {
            id: Some(details_id),
            fixture_id,
            home: roster(&dto.home, &players)?,
            away: roster(&dto.away, &players)?,
            events,
        })?;
        let finished = fixture.finish(dto.home_score, dto.away_score, details.clone())?;

        self.details.save(details).await?;
        let saved = self.fixtures.save(finished).await?;
        info!(
            "Recorded {} {}-{} {}",
            saved.home().team.name,
            dto.home_score,
            dto.away_score,
            saved.away().team.name
        );
        Ok(saved)
    }

    /// One batched query for every referenced player; reports the first
    /// reference, in roster then event order, that matches nobody.
    async fn resolve_players(
        &self,
        dto: &FixtureDetailsDto,
    ) -> Result<PlayerLookup, AddFixtureDetailsError> {
        let wanted: Vec<_> = dto.player_references().into_iter().filter(|r| !r.is_empty()).collect();
        let references: Vec<ExternalReference> = wanted
            .iter()
            .flat_map(|r| ExternalReferenceFactory::from_dto(r))
            .collect();

        let players = if references.is_empty() {
            PlayerLookup::default()
        } else {
            PlayerLookup::new(self.players.find_all_by_references(&references).await?)
        };
        debug!("Resolved {} of {} referenced players", players.len(), wanted.len());

        match players.first_missing(wanted) {
            Some(missing) => Err(AddFixtureDetailsError::PlayerNotFound(describe(missing))),
            None => Ok(players),
        }
    }
}

fn roster(dto: &RosterDto, players: &PlayerLookup) -> Result<RosterProps, FixtureEventError> {
    Ok(RosterProps {
        lineup: resolve_all(dto.lineup.as_deref(), players)?,
        bench: resolve_all(dto.bench.as_deref(), players)?,
    })
}

/// A missing list stays missing so the roster guard can reject it.
fn resolve_all(
    references: Option<&[ExternalReferencesDto]>,
    players: &PlayerLookup,
) -> Result<Option<Vec<PlayerSummary>>, FixtureEventError> {
    references
        .map(|refs| refs.iter().map(|r| players.require(r)).collect::<Result<Vec<_>, _>>())
        .transpose()
}

fn log_failure(err: &AddFixtureDetailsError) {
    match err {
        AddFixtureDetailsError::Unexpected(_) => error!("AddFixtureDetails failed: {err}"),
        _ => debug!("AddFixtureDetails refused: {err}"),
    }
}
