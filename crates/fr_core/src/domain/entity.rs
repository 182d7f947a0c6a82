//! Entity base
//!
//! Entities carry an optional identity assigned by the store on first save.
//! Two entities are equal when they are of the same type and carry the same
//! identity; entities without identity are never equal, not even to
//! themselves. Value objects in this crate are plain structs with
//! attribute-wise `PartialEq` and a validating constructor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

pub trait Entity {
    fn id(&self) -> Option<&EntityId>;

    /// Copy of the entity carrying `id`. Used by stores on first save.
    fn with_id(self, id: EntityId) -> Self
    where
        Self: Sized;

    fn persisted(&self) -> bool {
        self.id().is_some()
    }

    fn same_identity_as(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }
}

/// Implements `Entity` and identity-based `PartialEq` for structs with an
/// `id: Option<EntityId>` field.
macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::entity::Entity for $ty {
                fn id(&self) -> Option<&$crate::domain::entity::EntityId> {
                    self.id.as_ref()
                }

                fn with_id(mut self, id: $crate::domain::entity::EntityId) -> Self {
                    self.id = Some(id);
                    self
                }
            }

            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $crate::domain::entity::Entity::same_identity_as(self, other)
                }
            }
        )+
    };
}

pub(crate) use impl_entity;
