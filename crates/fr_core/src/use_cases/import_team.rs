//! ImportTeam
//!
//! Fetches a team and its players from a scraper and upserts them by
//! external reference. Every entity is built and validated before the first
//! save, so an invalid player leaves the store untouched.

use super::Repositories;
use crate::config::ImportConfig;
use crate::domain::{
    Entity, ExternalReference, ExternalReferences, Player, PlayerError, PlayerPosition,
    PlayerProps, Team, TeamError, TeamProps,
};
use crate::dto::{parse_date, ScrapedPlayer};
use crate::guard::Guard;
use crate::outcome::OptionExt;
use crate::ports::adapters::TeamScraper;
use crate::ports::error::{ScraperError, StoreError};
use crate::ports::repositories::{PlayerRepository, TeamRepository};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportTeamError {
    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error(transparent)]
    InvalidTeam(#[from] TeamError),

    #[error("Invalid player '{name}': {source}")]
    InvalidPlayer {
        name: String,
        #[source]
        source: PlayerError,
    },

    #[error("Too many players: {0}")]
    TooManyPlayers(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<StoreError> for ImportTeamError {
    fn from(err: StoreError) -> Self {
        ImportTeamError::Unexpected(err.to_string())
    }
}

impl From<ScraperError> for ImportTeamError {
    fn from(err: ScraperError) -> Self {
        ImportTeamError::Unexpected(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ImportedTeam {
    pub team: Team,
    pub players: Vec<Player>,
}

pub struct ImportTeam {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
    scraper: Arc<dyn TeamScraper>,
    config: ImportConfig,
}

impl ImportTeam {
    pub fn new(
        repositories: &Repositories,
        scraper: Arc<dyn TeamScraper>,
        config: ImportConfig,
    ) -> Self {
        Self {
            teams: repositories.teams.clone(),
            players: repositories.players.clone(),
            scraper,
            config,
        }
    }

    pub async fn execute(
        &self,
        reference: ExternalReference,
    ) -> Result<ImportedTeam, ImportTeamError> {
        self.run(&reference).await.inspect_err(|err| match err {
            ImportTeamError::Unexpected(_) => error!("ImportTeam {reference} failed: {err}"),
            _ => debug!("ImportTeam {reference} refused: {err}"),
        })
    }

    async fn run(&self, reference: &ExternalReference) -> Result<ImportedTeam, ImportTeamError> {
        let scraped = self
            .scraper
            .get_by_reference(reference)
            .await?
            .ok_or_else(|| ImportTeamError::TeamNotFound(reference.to_string()))?;
        let roster = self.scraper.get_team_players(reference).await?;
        Guard::in_range(roster.len(), 0, self.config.max_players_per_team, "players")
            .into_result()
            .map_err(ImportTeamError::TooManyPlayers)?;

        let references = ExternalReferences::new([reference.clone()])
            .merge(&ExternalReferences::from_dto(&scraped.external_references));
        let existing = self.teams.find_by_references(references.as_slice()).await?;
        let team = Team::create(TeamProps {
            id: existing.as_ref().and_then(|t| t.id().copied()),
            name: scraped.name,
            short_name: scraped.short_name,
            country: scraped.country,
            stadium_id: existing.as_ref().and_then(|t| t.stadium_id().copied()),
            external_references: existing
                .map(|t| t.external_references().clone().merge(&references))
                .unwrap_or(references),
        })?;

        let players = roster.into_iter().map(build_player).collect::<Result<Vec<_>, _>>()?;

        let team = self.teams.save(team).await?;
        let mut saved = Vec::with_capacity(players.len());
        for player in players {
            saved.push(self.upsert_player(player).await?);
        }
        info!("Imported {} with {} players", team.name(), saved.len());
        Ok(ImportedTeam { team, players: saved })
    }

    async fn upsert_player(&self, player: Player) -> Result<Player, StoreError> {
        let existing = if player.external_references().is_empty() {
            None
        } else {
            self.players.find_by_references(player.external_references().as_slice()).await?
        };
        let player = match existing {
            Some(existing) => {
                let id = *existing.id().must_be_present("stored player identity");
                player.with_id(id).with_references(existing.external_references())
            }
            None => player,
        };
        self.players.save(player).await
    }
}

fn build_player(scraped: ScrapedPlayer) -> Result<Player, ImportTeamError> {
    let birth_date = scraped.birth_date.as_deref().and_then(|raw| {
        let parsed = parse_date(raw);
        if parsed.is_none() {
            warn!("Ignoring unparseable birth date '{raw}' for {}", scraped.name);
        }
        parsed
    });

    Player::create(PlayerProps {
        id: None,
        name: scraped.name.clone(),
        nationality: scraped.nationality,
        birth_date,
        position: scraped.position.as_deref().and_then(PlayerPosition::parse),
        external_references: ExternalReferences::from_dto(&scraped.external_references),
    })
    .map_err(|source| ImportTeamError::InvalidPlayer { name: scraped.name, source })
}

#[cfg(test)]
mod tests;
