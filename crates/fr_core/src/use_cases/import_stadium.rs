//! ImportStadium
//!
//! Fetches a stadium from a scraper, fills in what the scraper left out from
//! the geo adapters and upserts it by external reference. Enrichment is best
//! effort: a failing geo lookup is logged and the stadium is saved with what
//! is known.

use super::Repositories;
use crate::config::EnrichmentConfig;
use crate::domain::{
    Entity, ExternalReference, ExternalReferences, Stadium, StadiumError, StadiumProps,
};
use crate::dto::{Place, StadiumInfo};
use crate::ports::adapters::{Geocoding, PlaceSearch, StadiumScraper};
use crate::ports::error::{ScraperError, StoreError};
use crate::ports::repositories::StadiumRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportStadiumError {
    #[error("Stadium not found: {0}")]
    StadiumNotFound(String),

    #[error(transparent)]
    InvalidStadium(#[from] StadiumError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<StoreError> for ImportStadiumError {
    fn from(err: StoreError) -> Self {
        ImportStadiumError::Unexpected(err.to_string())
    }
}

impl From<ScraperError> for ImportStadiumError {
    fn from(err: ScraperError) -> Self {
        ImportStadiumError::Unexpected(err.to_string())
    }
}

pub struct ImportStadium {
    stadiums: Arc<dyn StadiumRepository>,
    scraper: Arc<dyn StadiumScraper>,
    geocoding: Arc<dyn Geocoding>,
    places: Arc<dyn PlaceSearch>,
    config: EnrichmentConfig,
}

impl ImportStadium {
    pub fn new(
        repositories: &Repositories,
        scraper: Arc<dyn StadiumScraper>,
        geocoding: Arc<dyn Geocoding>,
        places: Arc<dyn PlaceSearch>,
        config: EnrichmentConfig,
    ) -> Self {
        Self { stadiums: repositories.stadiums.clone(), scraper, geocoding, places, config }
    }

    pub async fn execute(&self, reference: ExternalReference) -> Result<Stadium, ImportStadiumError> {
        self.run(&reference).await.inspect_err(|err| match err {
            ImportStadiumError::Unexpected(_) => error!("ImportStadium {reference} failed: {err}"),
            _ => debug!("ImportStadium {reference} refused: {err}"),
        })
    }

    async fn run(&self, reference: &ExternalReference) -> Result<Stadium, ImportStadiumError> {
        let info = self
            .scraper
            .get_stadium_info(reference)
            .await?
            .ok_or_else(|| ImportStadiumError::StadiumNotFound(reference.to_string()))?;
        let info = self.enrich(info).await;

        let references = ExternalReferences::new([reference.clone()])
            .merge(&ExternalReferences::from_dto(&info.external_references));
        let existing = self.stadiums.find_by_references(references.as_slice()).await?;
        let stadium = Stadium::create(StadiumProps {
            id: existing.as_ref().and_then(|s| s.id().copied()),
            name: info.name,
            city: info.city,
            country: info.country,
            capacity: info.capacity,
            coordinates: info.coordinates,
            external_references: existing
                .map(|s| s.external_references().clone().merge(&references))
                .unwrap_or(references),
        })?;

        let saved = self.stadiums.save(stadium).await?;
        info!("Imported stadium {}", saved.name());
        Ok(saved)
    }

    async fn enrich(&self, info: StadiumInfo) -> StadiumInfo {
        match info.coordinates {
            Some(coordinates) if info.city.is_none() || info.country.is_none() => {
                if !self.config.geocode_stadiums {
                    return info;
                }
                let place = self.geocoding.reverse(coordinates).await;
                fill(info, place, "reverse geocoding")
            }
            None if self.config.search_missing_coordinates => {
                let query = match info.city.as_deref() {
                    Some(city) => format!("{}, {city}", info.name),
                    None => info.name.clone(),
                };
                let place = self.places.search(&query).await;
                fill(info, place, "place search")
            }
            _ => info,
        }
    }
}

/// Fields already known win over looked-up ones.
fn fill(
    mut info: StadiumInfo,
    place: Result<Option<Place>, ScraperError>,
    lookup: &str,
) -> StadiumInfo {
    match place {
        Ok(Some(place)) => {
            info.city = info.city.or(place.city);
            info.country = info.country.or(place.country);
            info.coordinates = info.coordinates.or(place.coordinates);
        }
        Ok(None) => debug!("No {lookup} result for {}", info.name),
        Err(err) => warn!("{lookup} failed for {}: {err}", info.name),
    }
    info
}
