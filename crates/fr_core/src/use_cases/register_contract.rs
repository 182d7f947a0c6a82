//! RegisterContract
//!
//! Records a new fact about a player/team contract and keeps the team's squad
//! in line with it. What happens depends on which dates the request carries:
//!
//! | dates            | lookup                                   | result                               |
//! |------------------|------------------------------------------|--------------------------------------|
//! | start and end    | none                                     | new contract with both dates         |
//! | start only       | open contract as of today                | `OpenContractExists`                 |
//! |                  | else incomplete contract ending >= start | that contract with its start set     |
//! |                  | else                                     | new open contract                    |
//! | end only         | open contract started on or before end   | that contract closed at `end`        |
//! |                  | else                                     | new contract with only an end        |
//! | neither          |                                          | `InvalidDates`                       |
//!
//! The player joins the squad when the new contract state is active, and
//! leaves it when the request closed a started contract. The squad is written
//! before the contract: a failed squad save changes nothing, and after a
//! failed contract save the retry repeats the same idempotent squad change.
//!
//! Two concurrent registrations for the same player and team may both pass
//! the open-contract check and both save; the last write wins. The store
//! offers no versioning to detect this.

use super::Repositories;
use crate::config::SquadSyncConfig;
use crate::domain::{
    Contract, ContractError, ContractProps, Entity, EntityId, PlayerSummary, Squad,
};
use crate::dto::{parse_date, RegisterContractRequest};
use crate::outcome::{OptionExt, ResultExt};
use crate::ports::clock::Clock;
use crate::ports::error::StoreError;
use crate::ports::repositories::{
    ContractRepository, PlayerRepository, SquadRepository, TeamRepository,
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterContractError {
    #[error("Invalid contract dates: {0}")]
    InvalidDates(String),

    #[error("Player already has an open contract with this team")]
    OpenContractExists,

    #[error("Player not found: {0}")]
    PlayerNotFound(EntityId),

    #[error("Team not found: {0}")]
    TeamNotFound(EntityId),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<StoreError> for RegisterContractError {
    fn from(err: StoreError) -> Self {
        RegisterContractError::Unexpected(err.to_string())
    }
}

impl From<ContractError> for RegisterContractError {
    fn from(err: ContractError) -> Self {
        RegisterContractError::InvalidDates(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SquadChange {
    /// Add the player when the new contract state is active.
    FollowActivity,
    /// The request closed a started contract.
    Remove,
}

pub struct RegisterContract {
    contracts: Arc<dyn ContractRepository>,
    squads: Arc<dyn SquadRepository>,
    players: Arc<dyn PlayerRepository>,
    teams: Arc<dyn TeamRepository>,
    clock: Arc<dyn Clock>,
    config: SquadSyncConfig,
}

impl RegisterContract {
    pub fn new(repositories: &Repositories, clock: Arc<dyn Clock>, config: SquadSyncConfig) -> Self {
        Self {
            contracts: repositories.contracts.clone(),
            squads: repositories.squads.clone(),
            players: repositories.players.clone(),
            teams: repositories.teams.clone(),
            clock,
            config,
        }
    }

    pub async fn execute(
        &self,
        request: RegisterContractRequest,
    ) -> Result<Contract, RegisterContractError> {
        self.run(request).await.inspect_err(|err| match err {
            RegisterContractError::Unexpected(_) => error!("RegisterContract failed: {err}"),
            _ => debug!("RegisterContract refused: {err}"),
        })
    }

    async fn run(&self, request: RegisterContractRequest) -> Result<Contract, RegisterContractError> {
        let starting_date = parse_optional(request.starting_date.as_deref(), "starting date")?;
        let ending_date = parse_optional(request.ending_date.as_deref(), "ending date")?;

        let player = self
            .players
            .find_by_id(&request.player_id)
            .await?
            .ok_or(RegisterContractError::PlayerNotFound(request.player_id))?
            .summary()
            .must_be_present("stored player identity");
        if self.teams.find_by_id(&request.team_id).await?.is_none() {
            return Err(RegisterContractError::TeamNotFound(request.team_id));
        }

        self.reconcile(player, request.team_id, starting_date, ending_date)
            .await
            .async_chain(|(contract, change)| async move {
                self.sync_squad(&contract, change).await?;
                Ok::<_, RegisterContractError>(self.contracts.save(contract).await?)
            })
            .await
    }

    /// Next contract state for the request, without saving it.
    async fn reconcile(
        &self,
        player: PlayerSummary,
        team_id: EntityId,
        starting_date: Option<NaiveDate>,
        ending_date: Option<NaiveDate>,
    ) -> Result<(Contract, SquadChange), RegisterContractError> {
        let fresh = |starting_date, ending_date| {
            Contract::create(ContractProps {
                id: None,
                player: player.clone(),
                team_id,
                starting_date,
                ending_date,
            })
        };

        match (starting_date, ending_date) {
            (Some(start), Some(end)) => Ok((fresh(Some(start), Some(end))?, SquadChange::FollowActivity)),
            (Some(start), None) => {
                let today = self.clock.today();
                if self.contracts.find_open(&player.id, &team_id, today).await?.is_some() {
                    return Err(RegisterContractError::OpenContractExists);
                }
                let contract = match self.contracts.find_incomplete(&player.id, &team_id, start).await? {
                    Some(incomplete) => {
                        info!("Completing contract of {} with starting date {start}", player.name);
                        incomplete.with_starting_date(start)?
                    }
                    None => fresh(Some(start), None)?,
                };
                Ok((contract, SquadChange::FollowActivity))
            }
            (None, Some(end)) => match self.contracts.find_open(&player.id, &team_id, end).await? {
                Some(open) => {
                    info!("Closing contract of {} at {end}", player.name);
                    Ok((open.with_ending_date(end)?, SquadChange::Remove))
                }
                None => Ok((fresh(None, Some(end))?, SquadChange::FollowActivity)),
            },
            (None, None) => Err(RegisterContractError::InvalidDates(
                "a starting date or an ending date is required".to_string(),
            )),
        }
    }

    async fn sync_squad(&self, contract: &Contract, change: SquadChange) -> Result<(), StoreError> {
        let add = contract.is_contract_active_at(self.clock.today());
        if !add && change != SquadChange::Remove {
            return Ok(());
        }

        let team_id = contract.team_id();
        let squad = match self.squads.find_by_team(team_id).await? {
            Some(squad) => squad,
            None if !add => return Ok(()),
            None if self.config.create_missing => Squad::new(*team_id),
            None => {
                warn!("No squad for team {team_id}, skipping squad update");
                return Ok(());
            }
        };

        let player = contract.player();
        let updated = if add {
            squad.add_player(player.clone())
        } else {
            squad.remove_player(&player.id)
        };
        let saved = self.squads.save(updated).await?;
        if let Some(id) = saved.id() {
            debug!("Squad {id} now has {} players", saved.players().len());
        }
        Ok(())
    }
}

fn parse_optional(
    value: Option<&str>,
    field: &str,
) -> Result<Option<NaiveDate>, RegisterContractError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            parse_date(v)
                .ok_or_else(|| RegisterContractError::InvalidDates(format!("{field} '{v}' is not a date")))
        })
        .transpose()
}

#[cfg(test)]
mod tests;
