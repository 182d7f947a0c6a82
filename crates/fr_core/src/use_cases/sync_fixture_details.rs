//! SyncFixtureDetails
//!
//! Pulls the details of a played fixture from a scraper and records them
//! through [`AddFixtureDetails`]. Meant to be run by a scheduler after the
//! match date.

use super::add_fixture_details::{AddFixtureDetails, AddFixtureDetailsError};
use super::Repositories;
use crate::domain::{EntityId, Fixture, FixtureStatus};
use crate::ports::adapters::FixtureScraper;
use crate::ports::error::{ScraperError, StoreError};
use crate::ports::repositories::FixtureRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncFixtureDetailsError {
    #[error("Fixture not found: {0}")]
    FixtureNotFound(EntityId),

    #[error("Fixture already finished")]
    FixtureAlreadyFinished,

    #[error("No details available for fixture {0}")]
    DetailsUnavailable(EntityId),

    #[error(transparent)]
    Details(#[from] AddFixtureDetailsError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<StoreError> for SyncFixtureDetailsError {
    fn from(err: StoreError) -> Self {
        SyncFixtureDetailsError::Unexpected(err.to_string())
    }
}

impl From<ScraperError> for SyncFixtureDetailsError {
    fn from(err: ScraperError) -> Self {
        SyncFixtureDetailsError::Unexpected(err.to_string())
    }
}

pub struct SyncFixtureDetails {
    fixtures: Arc<dyn FixtureRepository>,
    scraper: Arc<dyn FixtureScraper>,
    add_details: AddFixtureDetails,
}

impl SyncFixtureDetails {
    pub fn new(repositories: &Repositories, scraper: Arc<dyn FixtureScraper>) -> Self {
        Self {
            fixtures: repositories.fixtures.clone(),
            scraper,
            add_details: AddFixtureDetails::new(repositories),
        }
    }

    pub async fn execute(&self, fixture_id: EntityId) -> Result<Fixture, SyncFixtureDetailsError> {
        self.run(fixture_id).await.inspect_err(|err| match err {
            SyncFixtureDetailsError::Unexpected(_)
            | SyncFixtureDetailsError::Details(AddFixtureDetailsError::Unexpected(_)) => {
                error!("SyncFixtureDetails failed for {fixture_id}: {err}")
            }
            _ => debug!("SyncFixtureDetails skipped {fixture_id}: {err}"),
        })
    }

    async fn run(&self, fixture_id: EntityId) -> Result<Fixture, SyncFixtureDetailsError> {
        let fixture = self
            .fixtures
            .find_by_id(&fixture_id)
            .await?
            .ok_or(SyncFixtureDetailsError::FixtureNotFound(fixture_id))?;
        if fixture.status() == FixtureStatus::MatchFinished {
            return Err(SyncFixtureDetailsError::FixtureAlreadyFinished);
        }

        let details = self
            .scraper
            .get_fixture_details(fixture.external_references())
            .await?
            .ok_or(SyncFixtureDetailsError::DetailsUnavailable(fixture_id))?;

        Ok(self.add_details.record(fixture, details).await?)
    }
}
