//! Fixture events
//!
//! A closed set of occurrences recorded for a finished fixture. Timestamps are
//! match minutes including stoppage time, bounded to `0..=125`. Goals always
//! carry a timestamp; the other variants may not.

use crate::domain::player::PlayerSummary;
use crate::guard::Guard;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MAX_EVENT_MINUTE: u8 = 125;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureEventError {
    #[error("Unknown event type: {0}")]
    UnknownType(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid {event} event: {message}")]
    Invalid { event: &'static str, message: String },

    #[error("Player could not be resolved: {0}")]
    UnresolvedPlayer(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minute(u8);

impl Minute {
    pub fn new(value: i64) -> Result<Minute, FixtureEventError> {
        Guard::in_range(value, 0, i64::from(MAX_EVENT_MINUTE), "timestamp")
            .into_result()
            .map_err(FixtureEventError::InvalidTimestamp)?;
        Ok(Minute(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    #[default]
    Regular,
    OwnGoal,
    Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Yellow,
    SecondYellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyOutcome {
    Scored,
    Missed,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub timestamp: Minute,
    pub side: Side,
    pub kind: GoalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorer: Option<PlayerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<PlayerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u8>,
}

/// Shoot-out penalty. In-play penalties are goals with [`GoalKind::Penalty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyEvent {
    pub timestamp: Option<Minute>,
    pub side: Side,
    pub outcome: PenaltyOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEvent {
    pub timestamp: Option<Minute>,
    pub side: Side,
    pub color: CardColor,
    /// Absent when the card was shown to staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionEvent {
    pub timestamp: Option<Minute>,
    pub side: Side,
    pub player_in: PlayerSummary,
    pub player_out: PlayerSummary,
}

/// Period boundary (half time, full time, extra time) with the score at that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEvent {
    pub timestamp: Option<Minute>,
    pub label: String,
    pub home_score: u8,
    pub away_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FixtureEvent {
    Goal(GoalEvent),
    Penalty(PenaltyEvent),
    Card(CardEvent),
    Substitution(SubstitutionEvent),
    Period(PeriodEvent),
}

impl FixtureEvent {
    pub fn timestamp(&self) -> Option<Minute> {
        match self {
            FixtureEvent::Goal(e) => Some(e.timestamp),
            FixtureEvent::Penalty(e) => e.timestamp,
            FixtureEvent::Card(e) => e.timestamp,
            FixtureEvent::Substitution(e) => e.timestamp,
            FixtureEvent::Period(e) => e.timestamp,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FixtureEvent::Goal(_) => "goal",
            FixtureEvent::Penalty(_) => "penalty",
            FixtureEvent::Card(_) => "card",
            FixtureEvent::Substitution(_) => "substitution",
            FixtureEvent::Period(_) => "period",
        }
    }

    pub fn players(&self) -> Vec<&PlayerSummary> {
        match self {
            FixtureEvent::Goal(e) => e.scorer.iter().chain(e.assist.iter()).collect(),
            FixtureEvent::Penalty(e) => e.player.iter().collect(),
            FixtureEvent::Card(e) => e.player.iter().collect(),
            FixtureEvent::Substitution(e) => vec![&e.player_in, &e.player_out],
            FixtureEvent::Period(_) => Vec::new(),
        }
    }
}

/// Ascending by timestamp, timestamp-less events last. Stable, so events
/// sharing a minute keep their reported order.
pub fn sort_events(events: &mut [FixtureEvent]) {
    events.sort_by_key(|event| {
        let timestamp = event.timestamp();
        (timestamp.is_none(), timestamp)
    });
}
