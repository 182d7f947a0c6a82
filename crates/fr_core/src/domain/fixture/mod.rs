//! Fixtures and their lifecycle
//!
//! A fixture is created `NotStarted` and moves to `MatchFinished` exactly
//! once, when its details are recorded. There is no way back.

pub mod details;
pub mod events;
pub mod factory;

pub use details::{FixtureDetails, FixtureDetailsError, FixtureDetailsProps, Roster, RosterProps};
pub use events::{
    sort_events, CardColor, CardEvent, FixtureEvent, FixtureEventError, GoalEvent, GoalKind,
    Minute, PenaltyEvent, PenaltyOutcome, PeriodEvent, Side, SubstitutionEvent, MAX_EVENT_MINUTE,
};
pub use factory::{FixtureEventFactory, PlayerLookup};

use super::entity::{impl_entity, EntityId};
use super::external_reference::ExternalReferences;
use super::league::LeagueEdition;
use super::stadium::StadiumSummary;
use super::team::TeamSummary;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("Fixture round is mandatory")]
    RoundMandatory,

    #[error("A team cannot play against itself")]
    SameTeams,

    #[error("Match date {0} is outside the league edition window")]
    OutsideEdition(NaiveDateTime),

    #[error("Fixture has already finished")]
    AlreadyFinished,

    #[error("Details belong to another fixture")]
    DetailsMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FixtureStatus {
    #[default]
    NotStarted,
    MatchFinished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureTeam {
    pub team: TeamSummary,
    pub score: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct FixtureProps {
    pub id: Option<EntityId>,
    pub edition: LeagueEdition,
    pub round: String,
    pub home: TeamSummary,
    pub away: TeamSummary,
    pub ground: Option<StadiumSummary>,
    pub match_date: NaiveDateTime,
    pub referee: Option<String>,
    pub external_references: ExternalReferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    id: Option<EntityId>,
    edition: LeagueEdition,
    round: String,
    home: FixtureTeam,
    away: FixtureTeam,
    #[serde(default)]
    ground: Option<StadiumSummary>,
    match_date: NaiveDateTime,
    status: FixtureStatus,
    #[serde(default)]
    referee: Option<String>,
    #[serde(default)]
    external_references: ExternalReferences,
    #[serde(default)]
    details: Option<FixtureDetails>,
}

impl_entity!(Fixture);

impl Fixture {
    /// New fixtures always start as `NotStarted` without scores or details.
    pub fn create(props: FixtureProps) -> Result<Fixture, FixtureError> {
        let round = props.round.trim().to_string();
        if round.is_empty() {
            return Err(FixtureError::RoundMandatory);
        }
        if props.home.id == props.away.id {
            return Err(FixtureError::SameTeams);
        }
        if !props.edition.covers(props.match_date.date()) {
            return Err(FixtureError::OutsideEdition(props.match_date));
        }

        Ok(Fixture {
            id: props.id,
            edition: props.edition,
            round,
            home: FixtureTeam { team: props.home, score: None },
            away: FixtureTeam { team: props.away, score: None },
            ground: props.ground,
            match_date: props.match_date,
            status: FixtureStatus::NotStarted,
            referee: props.referee.filter(|r| !r.trim().is_empty()),
            external_references: props.external_references,
            details: None,
        })
    }

    /// Finished successor carrying the final score and details.
    pub fn finish(
        &self,
        home_score: u8,
        away_score: u8,
        details: FixtureDetails,
    ) -> Result<Fixture, FixtureError> {
        if self.status == FixtureStatus::MatchFinished || self.details.is_some() {
            return Err(FixtureError::AlreadyFinished);
        }
        if self.id.as_ref() != Some(details.fixture_id()) {
            return Err(FixtureError::DetailsMismatch);
        }

        let mut finished = self.clone();
        finished.home.score = Some(home_score);
        finished.away.score = Some(away_score);
        finished.status = FixtureStatus::MatchFinished;
        finished.details = Some(details);
        Ok(finished)
    }

    pub fn edition(&self) -> &LeagueEdition {
        &self.edition
    }

    pub fn round(&self) -> &str {
        &self.round
    }

    pub fn home(&self) -> &FixtureTeam {
        &self.home
    }

    pub fn away(&self) -> &FixtureTeam {
        &self.away
    }

    pub fn ground(&self) -> Option<&StadiumSummary> {
        self.ground.as_ref()
    }

    pub fn match_date(&self) -> NaiveDateTime {
        self.match_date
    }

    pub fn status(&self) -> FixtureStatus {
        self.status
    }

    pub fn referee(&self) -> Option<&str> {
        self.referee.as_deref()
    }

    pub fn external_references(&self) -> &ExternalReferences {
        &self.external_references
    }

    pub fn details(&self) -> Option<&FixtureDetails> {
        self.details.as_ref()
    }

    pub fn is_between(&self, home_id: &EntityId, away_id: &EntityId) -> bool {
        &self.home.team.id == home_id && &self.away.team.id == away_id
    }
}
