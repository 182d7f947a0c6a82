//! Scraper and geo adapter traits. A record the source does not know is
//! `Ok(None)`; `Err` is reserved for transport or payload failures.

use super::error::ScraperError;
use crate::domain::{Coordinates, ExternalReference, ExternalReferences};
use crate::dto::{FixtureDetailsDto, Place, ScrapedPlayer, ScrapedTeam, StadiumInfo};
use async_trait::async_trait;

#[async_trait]
pub trait FixtureScraper: Send + Sync {
    /// Raw details of a finished match, picked by whichever of `fixture`'s
    /// references this scraper understands.
    async fn get_fixture_details(
        &self,
        fixture: &ExternalReferences,
    ) -> Result<Option<FixtureDetailsDto>, ScraperError>;
}

#[async_trait]
pub trait TeamScraper: Send + Sync {
    async fn get_by_reference(
        &self,
        reference: &ExternalReference,
    ) -> Result<Option<ScrapedTeam>, ScraperError>;

    async fn get_team_players(
        &self,
        reference: &ExternalReference,
    ) -> Result<Vec<ScrapedPlayer>, ScraperError>;
}

#[async_trait]
pub trait Geocoding: Send + Sync {
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<Place>, ScraperError>;
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Option<Place>, ScraperError>;
}

#[async_trait]
pub trait StadiumScraper: Send + Sync {
    async fn get_stadium_info(
        &self,
        reference: &ExternalReference,
    ) -> Result<Option<StadiumInfo>, ScraperError>;
}
