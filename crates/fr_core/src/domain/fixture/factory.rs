//! Fixture event factory
//!
//! Turns raw scraped events into typed [`FixtureEvent`]s. Builders are
//! registered per event type in [`BUILDERS`]; players are resolved through a
//! [`PlayerLookup`] filled by a single batched query before any event is built.

use super::events::{
    CardColor, CardEvent, FixtureEvent, FixtureEventError, GoalEvent, GoalKind, Minute,
    PenaltyEvent, PenaltyOutcome, PeriodEvent, SubstitutionEvent,
};
use crate::domain::external_reference::{
    ExternalReferenceFactory, ExternalReferences, ExternalReferencesDto,
};
use crate::domain::player::{Player, PlayerSummary};
use crate::dto::FixtureEventDto;
use crate::guard::Guard;
use crate::outcome::{GuardResult, OptionExt};

/// Persisted players indexed by their external references.
#[derive(Debug, Clone, Default)]
pub struct PlayerLookup {
    players: Vec<(ExternalReferences, PlayerSummary)>,
}

impl PlayerLookup {
    /// Players without identity cannot be embedded and are skipped.
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        let players = players
            .into_iter()
            .filter_map(|player| {
                let summary = player.summary()?;
                Some((player.external_references().clone(), summary))
            })
            .collect();
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn resolve(&self, references: &ExternalReferencesDto) -> Option<&PlayerSummary> {
        let wanted = ExternalReferenceFactory::from_dto(references);
        self.players
            .iter()
            .find(|(known, _)| known.intersects(&wanted))
            .map(|(_, summary)| summary)
    }

    pub fn require(
        &self,
        references: &ExternalReferencesDto,
    ) -> Result<PlayerSummary, FixtureEventError> {
        self.resolve(references)
            .cloned()
            .ok_or_else(|| FixtureEventError::UnresolvedPlayer(describe(references)))
    }

    /// First reference set, in iteration order, that no known player answers to.
    pub fn first_missing<'a>(
        &self,
        references: impl IntoIterator<Item = &'a ExternalReferencesDto>,
    ) -> Option<&'a ExternalReferencesDto> {
        references.into_iter().find(|r| self.resolve(r).is_none())
    }
}

/// `provider:ref` pairs, used in error messages.
pub fn describe(references: &ExternalReferencesDto) -> String {
    references
        .iter()
        .map(|(provider, value)| format!("{provider}:{value}"))
        .collect::<Vec<_>>()
        .join(",")
}

type Builder = fn(&FixtureEventDto, &PlayerLookup) -> Result<FixtureEvent, FixtureEventError>;

const BUILDERS: &[(&str, Builder)] = &[
    ("goal", build_goal),
    ("penalty", build_penalty),
    ("card", build_card),
    ("substitution", build_substitution),
    ("period", build_period),
];

const GOAL_KINDS: &[(&str, GoalKind)] = &[
    ("regular", GoalKind::Regular),
    ("owngoal", GoalKind::OwnGoal),
    ("penalty", GoalKind::Penalty),
];

const CARD_COLORS: &[(&str, CardColor)] = &[
    ("yellow", CardColor::Yellow),
    ("secondyellow", CardColor::SecondYellow),
    ("yellowred", CardColor::SecondYellow),
    ("red", CardColor::Red),
];

const PENALTY_OUTCOMES: &[(&str, PenaltyOutcome)] = &[
    ("scored", PenaltyOutcome::Scored),
    ("missed", PenaltyOutcome::Missed),
    ("saved", PenaltyOutcome::Saved),
];

pub struct FixtureEventFactory;

impl FixtureEventFactory {
    pub fn create(
        dto: &FixtureEventDto,
        players: &PlayerLookup,
    ) -> Result<FixtureEvent, FixtureEventError> {
        let kind = dto.kind.trim().to_lowercase();
        let (_, build) = BUILDERS
            .iter()
            .find(|(name, _)| *name == kind)
            .ok_or_else(|| FixtureEventError::UnknownType(dto.kind.clone()))?;
        build(dto, players)
    }

    pub fn supported_types() -> impl Iterator<Item = &'static str> {
        BUILDERS.iter().map(|(name, _)| *name)
    }
}

fn normalise(value: &str) -> String {
    value.trim().to_lowercase().replace(['_', '-', ' '], "")
}

fn ensure(event: &'static str, checks: GuardResult) -> Result<(), FixtureEventError> {
    checks.into_result().map_err(|message| FixtureEventError::Invalid { event, message })
}

fn parse_variant<T: Copy>(
    event: &'static str,
    field: &str,
    raw: &str,
    table: &[(&str, T)],
) -> Result<T, FixtureEventError> {
    let key = normalise(raw);
    let names: Vec<&str> = table.iter().map(|(name, _)| *name).collect();
    ensure(event, Guard::is_one_of(&key.as_str(), &names, field))?;
    Ok(table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
        .must_be_present(field))
}

fn timestamp(dto: &FixtureEventDto) -> Result<Option<Minute>, FixtureEventError> {
    dto.timestamp.map(Minute::new).transpose()
}

fn player(
    references: Option<&ExternalReferencesDto>,
    players: &PlayerLookup,
) -> Result<Option<PlayerSummary>, FixtureEventError> {
    references.filter(|r| !r.is_empty()).map(|r| players.require(r)).transpose()
}

fn build_goal(
    dto: &FixtureEventDto,
    players: &PlayerLookup,
) -> Result<FixtureEvent, FixtureEventError> {
    ensure(
        "goal",
        GuardResult::combine([
            Guard::against_null_or_undefined(dto.timestamp.as_ref(), "timestamp"),
            Guard::against_null_or_undefined(dto.side.as_ref(), "side"),
        ]),
    )?;
    let kind = match dto.goal_kind.as_deref() {
        Some(raw) => parse_variant("goal", "goal kind", raw, GOAL_KINDS)?,
        None => GoalKind::default(),
    };

    Ok(FixtureEvent::Goal(GoalEvent {
        timestamp: timestamp(dto)?.must_be_present("goal timestamp"),
        side: dto.side.must_be_present("goal side"),
        kind,
        scorer: player(dto.player.as_ref(), players)?,
        assist: player(dto.assist.as_ref(), players)?,
        home_score: dto.home_score,
        away_score: dto.away_score,
    }))
}

fn build_penalty(
    dto: &FixtureEventDto,
    players: &PlayerLookup,
) -> Result<FixtureEvent, FixtureEventError> {
    ensure(
        "penalty",
        GuardResult::combine([
            Guard::against_null_or_undefined(dto.side.as_ref(), "side"),
            Guard::against_null_or_undefined(dto.outcome.as_ref(), "outcome"),
        ]),
    )?;
    let outcome = dto.outcome.as_deref().must_be_present("penalty outcome");

    Ok(FixtureEvent::Penalty(PenaltyEvent {
        timestamp: timestamp(dto)?,
        side: dto.side.must_be_present("penalty side"),
        outcome: parse_variant("penalty", "outcome", outcome, PENALTY_OUTCOMES)?,
        player: player(dto.player.as_ref(), players)?,
    }))
}

fn build_card(
    dto: &FixtureEventDto,
    players: &PlayerLookup,
) -> Result<FixtureEvent, FixtureEventError> {
    ensure(
        "card",
        GuardResult::combine([
            Guard::against_null_or_undefined(dto.side.as_ref(), "side"),
            Guard::against_null_or_undefined(dto.color.as_ref(), "color"),
        ]),
    )?;
    let color = dto.color.as_deref().must_be_present("card color");

    Ok(FixtureEvent::Card(CardEvent {
        timestamp: timestamp(dto)?,
        side: dto.side.must_be_present("card side"),
        color: parse_variant("card", "color", color, CARD_COLORS)?,
        player: player(dto.player.as_ref(), players)?,
    }))
}

fn build_substitution(
    dto: &FixtureEventDto,
    players: &PlayerLookup,
) -> Result<FixtureEvent, FixtureEventError> {
    ensure(
        "substitution",
        GuardResult::combine([
            Guard::against_null_or_undefined(dto.side.as_ref(), "side"),
            Guard::against_null_or_undefined(dto.player_in.as_ref(), "player in"),
            Guard::against_null_or_undefined(dto.player_out.as_ref(), "player out"),
        ]),
    )?;

    Ok(FixtureEvent::Substitution(SubstitutionEvent {
        timestamp: timestamp(dto)?,
        side: dto.side.must_be_present("substitution side"),
        player_in: players.require(dto.player_in.as_ref().must_be_present("player in"))?,
        player_out: players.require(dto.player_out.as_ref().must_be_present("player out"))?,
    }))
}

/// Scores missing from a period marker count as 0.
fn build_period(
    dto: &FixtureEventDto,
    _players: &PlayerLookup,
) -> Result<FixtureEvent, FixtureEventError> {
    let label = dto.label.as_deref().map(str::trim).unwrap_or_default();
    ensure("period", Guard::against_at_least(1, label, "label"))?;

    Ok(FixtureEvent::Period(PeriodEvent {
        timestamp: timestamp(dto)?,
        label: label.to_string(),
        home_score: dto.home_score.unwrap_or(0),
        away_score: dto.away_score.unwrap_or(0),
    }))
}
