//! Contract between a player and a team.
//!
//! A contract is an immutable value: date changes produce a new, re-validated
//! contract instead of mutating the existing one.
//!
//! Date shapes:
//! - both dates: a complete historical or fixed-term contract
//! - only `starting_date`: an open contract
//! - only `ending_date`: a just-closed contract being backfilled, whose
//!   start is not known yet (an "incomplete" contract)

use super::entity::{impl_entity, EntityId};
use super::player::PlayerSummary;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Starting date {starting} is after ending date {ending}")]
    InvalidDates { starting: NaiveDate, ending: NaiveDate },
}

#[derive(Debug, Clone)]
pub struct ContractProps {
    pub id: Option<EntityId>,
    pub player: PlayerSummary,
    pub team_id: EntityId,
    pub starting_date: Option<NaiveDate>,
    pub ending_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    id: Option<EntityId>,
    player: PlayerSummary,
    team_id: EntityId,
    #[serde(default)]
    starting_date: Option<NaiveDate>,
    #[serde(default)]
    ending_date: Option<NaiveDate>,
}

impl_entity!(Contract);

impl Contract {
    pub fn create(props: ContractProps) -> Result<Contract, ContractError> {
        if let (Some(starting), Some(ending)) = (props.starting_date, props.ending_date) {
            if starting > ending {
                return Err(ContractError::InvalidDates { starting, ending });
            }
        }

        Ok(Contract {
            id: props.id,
            player: props.player,
            team_id: props.team_id,
            starting_date: props.starting_date,
            ending_date: props.ending_date,
        })
    }

    fn props(&self) -> ContractProps {
        ContractProps {
            id: self.id,
            player: self.player.clone(),
            team_id: self.team_id,
            starting_date: self.starting_date,
            ending_date: self.ending_date,
        }
    }

    /// Successor contract with `starting_date` set.
    pub fn with_starting_date(&self, starting_date: NaiveDate) -> Result<Contract, ContractError> {
        Contract::create(ContractProps { starting_date: Some(starting_date), ..self.props() })
    }

    /// Successor contract with `ending_date` set.
    pub fn with_ending_date(&self, ending_date: NaiveDate) -> Result<Contract, ContractError> {
        Contract::create(ContractProps { ending_date: Some(ending_date), ..self.props() })
    }

    pub fn player(&self) -> &PlayerSummary {
        &self.player
    }

    pub fn team_id(&self) -> &EntityId {
        &self.team_id
    }

    pub fn starting_date(&self) -> Option<NaiveDate> {
        self.starting_date
    }

    pub fn ending_date(&self) -> Option<NaiveDate> {
        self.ending_date
    }

    pub fn is_contract_active(&self) -> bool {
        self.is_contract_active_at(Utc::now().date_naive())
    }

    /// No ending date and started on or before `today`.
    pub fn is_contract_active_at(&self, today: NaiveDate) -> bool {
        self.ending_date.is_none() && self.starting_date.is_some_and(|start| start <= today)
    }

    /// Started on or before `until` and not closed.
    pub fn is_open_at(&self, until: NaiveDate) -> bool {
        self.is_contract_active_at(until)
    }

    /// Closed without a known start, ending on or after `starting_date`.
    pub fn is_incomplete_for(&self, starting_date: NaiveDate) -> bool {
        self.starting_date.is_none() && self.ending_date.is_some_and(|end| end >= starting_date)
    }

    pub fn binds(&self, player_id: &EntityId, team_id: &EntityId) -> bool {
        &self.player.id == player_id && &self.team_id == team_id
    }
}
