use super::entity::{impl_entity, EntityId};
use super::external_reference::ExternalReferences;
use crate::guard::Guard;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SEASON_MIN_YEAR: i32 = 1850;
pub const SEASON_MAX_YEAR: i32 = 2200;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("League name is mandatory")]
    NameMandatory,

    #[error("Invalid season: {0}")]
    InvalidSeason(String),

    #[error("Edition starting date {starting} does not belong to season {season}")]
    StartingDateOutsideSeason { starting: NaiveDate, season: i32 },

    #[error("Edition starting date {starting} is after ending date {ending}")]
    InvalidDates { starting: NaiveDate, ending: NaiveDate },
}

#[derive(Debug, Clone, Default)]
pub struct LeagueProps {
    pub id: Option<EntityId>,
    pub name: String,
    pub country: Option<String>,
    pub external_references: ExternalReferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    id: Option<EntityId>,
    name: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    external_references: ExternalReferences,
}

impl_entity!(League);

impl League {
    pub fn create(props: LeagueProps) -> Result<League, LeagueError> {
        let name = props.name.trim().to_string();
        if name.is_empty() {
            return Err(LeagueError::NameMandatory);
        }
        Ok(League {
            id: props.id,
            name,
            country: props.country,
            external_references: props.external_references,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn external_references(&self) -> &ExternalReferences {
        &self.external_references
    }

    pub fn summary(&self) -> Option<LeagueSummary> {
        self.id.map(|id| LeagueSummary { id, name: self.name.clone() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub id: EntityId,
    pub name: String,
}

/// A season, identified by the calendar year it starts in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    id: Option<EntityId>,
    year: i32,
}

impl_entity!(Season);

impl Season {
    pub fn create(id: Option<EntityId>, year: i32) -> Result<Season, LeagueError> {
        Guard::in_range(year, SEASON_MIN_YEAR, SEASON_MAX_YEAR, "season year")
            .into_result()
            .map_err(LeagueError::InvalidSeason)?;
        Ok(Season { id, year })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// "2024/2025" style label.
    pub fn label(&self) -> String {
        format!("{}/{}", self.year, self.year + 1)
    }
}

#[derive(Debug, Clone)]
pub struct LeagueEditionProps {
    pub id: Option<EntityId>,
    pub league: LeagueSummary,
    pub season: Season,
    pub starting_date: Option<NaiveDate>,
    pub ending_date: Option<NaiveDate>,
}

/// One season's running of one league, optionally bounded by a validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueEdition {
    id: Option<EntityId>,
    league: LeagueSummary,
    season: Season,
    #[serde(default)]
    starting_date: Option<NaiveDate>,
    #[serde(default)]
    ending_date: Option<NaiveDate>,
}

impl_entity!(LeagueEdition);

impl LeagueEdition {
    pub fn create(props: LeagueEditionProps) -> Result<LeagueEdition, LeagueError> {
        if let Some(starting) = props.starting_date {
            if starting.year() != props.season.year {
                return Err(LeagueError::StartingDateOutsideSeason {
                    starting,
                    season: props.season.year,
                });
            }
        }
        if let (Some(starting), Some(ending)) = (props.starting_date, props.ending_date) {
            if starting > ending {
                return Err(LeagueError::InvalidDates { starting, ending });
            }
        }

        Ok(LeagueEdition {
            id: props.id,
            league: props.league,
            season: props.season,
            starting_date: props.starting_date,
            ending_date: props.ending_date,
        })
    }

    pub fn league(&self) -> &LeagueSummary {
        &self.league
    }

    pub fn season(&self) -> &Season {
        &self.season
    }

    pub fn starting_date(&self) -> Option<NaiveDate> {
        self.starting_date
    }

    pub fn ending_date(&self) -> Option<NaiveDate> {
        self.ending_date
    }

    /// Whether `date` falls inside the validity window. Open bounds accept anything.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.starting_date.map_or(true, |start| date >= start)
            && self.ending_date.map_or(true, |end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn edition(starting: Option<&str>, ending: Option<&str>) -> Result<LeagueEdition, LeagueError> {
        LeagueEdition::create(LeagueEditionProps {
            id: None,
            league: LeagueSummary { id: EntityId::generate(), name: "Serie A".into() },
            season: Season::create(None, 2024).unwrap(),
            starting_date: starting.map(date),
            ending_date: ending.map(date),
        })
    }

    #[test]
    fn starting_date_must_match_season_year() {
        assert!(edition(Some("2024-08-17"), Some("2025-05-25")).is_ok());
        assert_eq!(
            edition(Some("2023-08-17"), None).unwrap_err(),
            LeagueError::StartingDateOutsideSeason { starting: date("2023-08-17"), season: 2024 }
        );
    }

    #[test]
    fn window_must_be_ordered() {
        assert!(matches!(
            edition(Some("2024-12-01"), Some("2024-08-01")),
            Err(LeagueError::InvalidDates { .. })
        ));
    }

    #[test]
    fn covers_is_inclusive_and_open_ended() {
        let bounded = edition(Some("2024-08-17"), Some("2025-05-25")).unwrap();
        assert!(bounded.covers(date("2024-08-17")));
        assert!(bounded.covers(date("2025-05-25")));
        assert!(!bounded.covers(date("2025-05-26")));

        let open = edition(None, None).unwrap();
        assert!(open.covers(date("1999-01-01")));
    }

    #[test]
    fn season_year_is_bounded() {
        assert!(matches!(Season::create(None, 1700), Err(LeagueError::InvalidSeason(_))));
        assert_eq!(Season::create(None, 2024).unwrap().label(), "2024/2025");
    }
}
