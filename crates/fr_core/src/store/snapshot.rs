use crate::domain::{
    Contract, Fixture, FixtureDetails, League, LeagueEdition, Player, Season, Squad, Stadium, Team,
};
use serde::{Deserialize, Serialize};

/// Every table of the in-memory store, as persisted to a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub squads: Vec<Squad>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub stadiums: Vec<Stadium>,
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub editions: Vec<LeagueEdition>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub fixture_details: Vec<FixtureDetails>,
}

impl StoreSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Row count per table, in declaration order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("teams", self.teams.len()),
            ("players", self.players.len()),
            ("squads", self.squads.len()),
            ("contracts", self.contracts.len()),
            ("stadiums", self.stadiums.len()),
            ("leagues", self.leagues.len()),
            ("seasons", self.seasons.len()),
            ("editions", self.editions.len()),
            ("fixtures", self.fixtures.len()),
            ("fixture_details", self.fixture_details.len()),
        ]
    }
}
