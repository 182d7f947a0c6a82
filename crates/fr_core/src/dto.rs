//! Data transfer shapes accepted by the use cases and returned by scrapers.
//!
//! Dates travel as ISO-8601 strings and are parsed at the use-case boundary.

use crate::domain::entity::EntityId;
use crate::domain::fixture::Side;
use crate::domain::stadium::Coordinates;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use crate::domain::external_reference::{ExternalReferenceDto, ExternalReferencesDto};

/// `YYYY-MM-DD`, or the date part of an ISO datetime.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_match_date(value).map(|dt| dt.date()))
}

/// RFC 3339 (normalised to UTC), naive `YYYY-MM-DDTHH:MM[:SS]`, or a bare date at midnight.
pub fn parse_match_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterContractRequest {
    pub player_id: EntityId,
    pub team_id: EntityId,
    #[serde(default)]
    pub starting_date: Option<String>,
    #[serde(default)]
    pub ending_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueDto {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub external_references: ExternalReferencesDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditionWindowDto {
    #[serde(default)]
    pub starting_date: Option<String>,
    #[serde(default)]
    pub ending_date: Option<String>,
}

/// Identifies an existing record by external reference first, then by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_references: ExternalReferencesDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFixtureRequest {
    pub league: LeagueDto,
    pub season: i32,
    #[serde(default)]
    pub edition: Option<EditionWindowDto>,
    pub round: String,
    pub home_team: LookupDto,
    pub away_team: LookupDto,
    #[serde(default)]
    pub ground: Option<LookupDto>,
    pub match_date: String,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default)]
    pub external_references: ExternalReferencesDto,
}

/// Players are identified by their external references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterDto {
    #[serde(default)]
    pub lineup: Option<Vec<ExternalReferencesDto>>,
    #[serde(default)]
    pub bench: Option<Vec<ExternalReferencesDto>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureEventDto {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub player: Option<ExternalReferencesDto>,
    #[serde(default)]
    pub assist: Option<ExternalReferencesDto>,
    #[serde(default)]
    pub player_in: Option<ExternalReferencesDto>,
    #[serde(default)]
    pub player_out: Option<ExternalReferencesDto>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub goal_kind: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub home_score: Option<u8>,
    #[serde(default)]
    pub away_score: Option<u8>,
}

impl FixtureEventDto {
    pub fn player_references(&self) -> impl Iterator<Item = &ExternalReferencesDto> {
        [&self.player, &self.assist, &self.player_in, &self.player_out].into_iter().flatten()
    }
}

/// Raw match details as produced by a fixture scraper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureDetailsDto {
    pub home_score: u8,
    pub away_score: u8,
    #[serde(default)]
    pub home: RosterDto,
    #[serde(default)]
    pub away: RosterDto,
    #[serde(default)]
    pub events: Vec<FixtureEventDto>,
}

impl FixtureDetailsDto {
    /// Every player reference in roster order, then event order.
    pub fn player_references(&self) -> Vec<&ExternalReferencesDto> {
        let rosters = [&self.home, &self.away].into_iter().flat_map(|roster| {
            roster.lineup.iter().flatten().chain(roster.bench.iter().flatten())
        });
        rosters.chain(self.events.iter().flat_map(|e| e.player_references())).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFixtureDetailsRequest {
    pub fixture_references: ExternalReferencesDto,
    #[serde(flatten)]
    pub details: FixtureDetailsDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedTeam {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub external_references: ExternalReferencesDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedPlayer {
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub external_references: ExternalReferencesDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StadiumInfo {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub external_references: ExternalReferencesDto,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}
