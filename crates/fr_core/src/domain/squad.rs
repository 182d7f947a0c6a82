//! Squad: the current roster of a team.
//!
//! Membership is a projection of active contracts. Nothing edits it directly;
//! contract registration adds and removes players.

use super::entity::{impl_entity, EntityId};
use super::player::PlayerSummary;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquadError {
    #[error("Player {0} appears more than once in the squad")]
    DuplicatePlayer(EntityId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SquadRecord")]
pub struct Squad {
    id: Option<EntityId>,
    team_id: EntityId,
    players: Vec<PlayerSummary>,
}

/// Stored form; loading goes through `Squad::create`.
#[derive(Deserialize)]
struct SquadRecord {
    id: Option<EntityId>,
    team_id: EntityId,
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

impl TryFrom<SquadRecord> for Squad {
    type Error = SquadError;

    fn try_from(record: SquadRecord) -> Result<Self, Self::Error> {
        Squad::create(record.id, record.team_id, record.players)
    }
}

impl_entity!(Squad);

impl Squad {
    pub fn new(team_id: EntityId) -> Self {
        Self { id: None, team_id, players: Vec::new() }
    }

    pub fn create(
        id: Option<EntityId>,
        team_id: EntityId,
        players: Vec<PlayerSummary>,
    ) -> Result<Squad, SquadError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = players.iter().find(|p| !seen.insert(p.id)) {
            return Err(SquadError::DuplicatePlayer(duplicate.id));
        }
        Ok(Squad { id, team_id, players })
    }

    pub fn team_id(&self) -> &EntityId {
        &self.team_id
    }

    pub fn players(&self) -> &[PlayerSummary] {
        &self.players
    }

    pub fn contains(&self, player_id: &EntityId) -> bool {
        self.players.iter().any(|p| &p.id == player_id)
    }

    /// Adding a player already present by id returns the squad unchanged.
    pub fn add_player(mut self, player: PlayerSummary) -> Self {
        if !self.contains(&player.id) {
            self.players.push(player);
        }
        self
    }

    pub fn remove_player(mut self, player_id: &EntityId) -> Self {
        self.players.retain(|p| &p.id != player_id);
        self
    }
}
