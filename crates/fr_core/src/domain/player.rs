use super::entity::{impl_entity, EntityId};
use super::external_reference::ExternalReferences;
use crate::guard::Guard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLAYER_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPosition {
    #[serde(alias = "G")]
    Goalkeeper,
    #[serde(alias = "D")]
    Defender,
    #[serde(alias = "M")]
    Midfielder,
    #[serde(alias = "F")]
    Forward,
}

impl PlayerPosition {
    /// Accepts full names and the single-letter codes used by scrapers.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "g" | "gk" | "goalkeeper" => Some(PlayerPosition::Goalkeeper),
            "d" | "df" | "defender" => Some(PlayerPosition::Defender),
            "m" | "mf" | "midfielder" => Some(PlayerPosition::Midfielder),
            "f" | "fw" | "forward" => Some(PlayerPosition::Forward),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Player name is mandatory")]
    NameMandatory,

    #[error("Player name is invalid: {0}")]
    InvalidName(String),
}

#[derive(Debug, Clone, Default)]
pub struct PlayerProps {
    pub id: Option<EntityId>,
    pub name: String,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<PlayerPosition>,
    pub external_references: ExternalReferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: Option<EntityId>,
    name: String,
    #[serde(default)]
    nationality: Option<String>,
    #[serde(default)]
    birth_date: Option<NaiveDate>,
    #[serde(default)]
    position: Option<PlayerPosition>,
    #[serde(default)]
    external_references: ExternalReferences,
}

impl_entity!(Player);

impl Player {
    pub fn create(props: PlayerProps) -> Result<Player, PlayerError> {
        let name = props.name.trim().to_string();
        if name.is_empty() {
            return Err(PlayerError::NameMandatory);
        }
        Guard::against_at_most(PLAYER_NAME_MAX_LENGTH, &name, "name")
            .into_result()
            .map_err(PlayerError::InvalidName)?;

        Ok(Player {
            id: props.id,
            name,
            nationality: props.nationality,
            birth_date: props.birth_date,
            position: props.position,
            external_references: props.external_references,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nationality(&self) -> Option<&str> {
        self.nationality.as_deref()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn position(&self) -> Option<PlayerPosition> {
        self.position
    }

    pub fn external_references(&self) -> &ExternalReferences {
        &self.external_references
    }

    /// Embedded snapshot, available once the player has been persisted.
    pub fn summary(&self) -> Option<PlayerSummary> {
        self.id.map(|id| PlayerSummary { id, name: self.name.clone() })
    }

    pub fn with_references(mut self, references: &ExternalReferences) -> Self {
        self.external_references = self.external_references.merge(references);
        self
    }
}

/// Player snapshot embedded in contracts, squads and fixture details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: EntityId,
    pub name: String,
}
