use super::events::{sort_events, FixtureEvent};
use crate::domain::entity::{impl_entity, EntityId};
use crate::domain::player::PlayerSummary;
use crate::guard::Guard;
use crate::outcome::OptionExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureDetailsError {
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    pub lineup: Vec<PlayerSummary>,
    pub bench: Vec<PlayerSummary>,
}

impl Roster {
    pub fn players(&self) -> impl Iterator<Item = &PlayerSummary> {
        self.lineup.iter().chain(self.bench.iter())
    }
}

/// Roster as received: either collection may be missing.
#[derive(Debug, Clone, Default)]
pub struct RosterProps {
    pub lineup: Option<Vec<PlayerSummary>>,
    pub bench: Option<Vec<PlayerSummary>>,
}

#[derive(Debug, Clone)]
pub struct FixtureDetailsProps {
    pub id: Option<EntityId>,
    pub fixture_id: EntityId,
    pub home: RosterProps,
    pub away: RosterProps,
    pub events: Vec<FixtureEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDetails {
    id: Option<EntityId>,
    fixture_id: EntityId,
    home: Roster,
    away: Roster,
    events: Vec<FixtureEvent>,
}

impl_entity!(FixtureDetails);

impl FixtureDetails {
    /// Both rosters must carry a lineup and a bench (empty lists are fine).
    /// Events are stored in chronological order.
    pub fn create(props: FixtureDetailsProps) -> Result<FixtureDetails, FixtureDetailsError> {
        Guard::against_null_or_undefined_bulk(&[
            (props.home.lineup.is_some(), "home lineup"),
            (props.home.bench.is_some(), "home bench"),
            (props.away.lineup.is_some(), "away lineup"),
            (props.away.bench.is_some(), "away bench"),
        ])
        .into_result()
        .map_err(FixtureDetailsError::InvalidRoster)?;

        let mut events = props.events;
        sort_events(&mut events);

        Ok(FixtureDetails {
            id: props.id,
            fixture_id: props.fixture_id,
            home: Roster {
                lineup: props.home.lineup.must_be_present("home lineup"),
                bench: props.home.bench.must_be_present("home bench"),
            },
            away: Roster {
                lineup: props.away.lineup.must_be_present("away lineup"),
                bench: props.away.bench.must_be_present("away bench"),
            },
            events,
        })
    }

    pub fn fixture_id(&self) -> &EntityId {
        &self.fixture_id
    }

    pub fn home(&self) -> &Roster {
        &self.home
    }

    pub fn away(&self) -> &Roster {
        &self.away
    }

    pub fn events(&self) -> &[FixtureEvent] {
        &self.events
    }
}
