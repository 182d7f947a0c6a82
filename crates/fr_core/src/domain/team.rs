use super::entity::{impl_entity, EntityId};
use super::external_reference::ExternalReferences;
use crate::guard::Guard;
use crate::outcome::GuardResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("Team name is mandatory")]
    NameMandatory,

    #[error("Team is invalid: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default)]
pub struct TeamProps {
    pub id: Option<EntityId>,
    pub name: String,
    pub short_name: Option<String>,
    pub country: Option<String>,
    pub stadium_id: Option<EntityId>,
    pub external_references: ExternalReferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: Option<EntityId>,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    stadium_id: Option<EntityId>,
    #[serde(default)]
    external_references: ExternalReferences,
}

impl_entity!(Team);

impl Team {
    pub fn create(props: TeamProps) -> Result<Team, TeamError> {
        let name = props.name.trim().to_string();
        if name.is_empty() {
            return Err(TeamError::NameMandatory);
        }

        let short_name = props.short_name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        GuardResult::combine([
            Guard::against_at_most(100, &name, "name"),
            Guard::against_at_most(30, short_name.as_deref().unwrap_or_default(), "short name"),
        ])
        .into_result()
        .map_err(TeamError::Invalid)?;

        Ok(Team {
            id: props.id,
            name,
            short_name,
            country: props.country,
            stadium_id: props.stadium_id,
            external_references: props.external_references,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn stadium_id(&self) -> Option<&EntityId> {
        self.stadium_id.as_ref()
    }

    pub fn external_references(&self) -> &ExternalReferences {
        &self.external_references
    }

    pub fn summary(&self) -> Option<TeamSummary> {
        self.id.map(|id| TeamSummary { id, name: self.name.clone() })
    }

    pub fn with_references(mut self, references: &ExternalReferences) -> Self {
        self.external_references = self.external_references.merge(references);
        self
    }

    /// Case-insensitive match against either the full or the short name.
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.eq_ignore_ascii_case(name)
            || self.short_name.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: EntityId,
    pub name: String,
}
