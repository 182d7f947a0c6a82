use super::entity::{impl_entity, EntityId};
use super::external_reference::ExternalReferences;
use crate::guard::Guard;
use crate::outcome::GuardResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StadiumError {
    #[error("Stadium name is mandatory")]
    NameMandatory,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
}

/// WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, StadiumError> {
        GuardResult::combine([
            Guard::in_range(latitude, -90.0, 90.0, "latitude"),
            Guard::in_range(longitude, -180.0, 180.0, "longitude"),
        ])
        .into_result()
        .map_err(StadiumError::InvalidCoordinates)?;
        Ok(Self { latitude, longitude })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StadiumProps {
    pub id: Option<EntityId>,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub capacity: Option<u32>,
    pub coordinates: Option<Coordinates>,
    pub external_references: ExternalReferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stadium {
    id: Option<EntityId>,
    name: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    capacity: Option<u32>,
    #[serde(default)]
    coordinates: Option<Coordinates>,
    #[serde(default)]
    external_references: ExternalReferences,
}

impl_entity!(Stadium);

impl Stadium {
    pub fn create(props: StadiumProps) -> Result<Stadium, StadiumError> {
        let name = props.name.trim().to_string();
        if name.is_empty() {
            return Err(StadiumError::NameMandatory);
        }
        if let Some(capacity) = props.capacity {
            Guard::greater_than(0, capacity, "capacity")
                .into_result()
                .map_err(StadiumError::InvalidCapacity)?;
        }
        if let Some(c) = props.coordinates {
            Coordinates::new(c.latitude, c.longitude)?;
        }

        Ok(Stadium {
            id: props.id,
            name,
            city: props.city,
            country: props.country,
            capacity: props.capacity,
            coordinates: props.coordinates,
            external_references: props.external_references,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn external_references(&self) -> &ExternalReferences {
        &self.external_references
    }

    pub fn summary(&self) -> Option<StadiumSummary> {
        self.id.map(|id| StadiumSummary { id, name: self.name.clone() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StadiumSummary {
    pub id: EntityId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_range_checked() {
        assert!(Coordinates::new(45.478, 9.124).is_ok());
        assert!(matches!(Coordinates::new(91.0, 0.0), Err(StadiumError::InvalidCoordinates(_))));
        assert!(matches!(Coordinates::new(0.0, -181.0), Err(StadiumError::InvalidCoordinates(_))));
    }

    #[test]
    fn capacity_must_be_positive() {
        let err = Stadium::create(StadiumProps {
            name: "San Siro".into(),
            capacity: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, StadiumError::InvalidCapacity(_)));

        let stadium = Stadium::create(StadiumProps {
            name: "San Siro".into(),
            capacity: Some(75_817),
            coordinates: Some(Coordinates { latitude: 45.478, longitude: 9.124 }),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(stadium.capacity(), Some(75_817));
    }
}
