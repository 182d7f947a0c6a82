//! Domain entities and value objects.

pub mod contract;
pub mod entity;
pub mod external_reference;
pub mod fixture;
pub mod league;
pub mod player;
pub mod squad;
pub mod stadium;
pub mod team;

pub use contract::{Contract, ContractError, ContractProps};
pub use entity::{Entity, EntityId};
pub use external_reference::{
    ExternalReference, ExternalReferenceDto, ExternalReferenceError, ExternalReferenceFactory,
    ExternalReferences, ExternalReferencesDto, Provider, RefKind, RefValue, PROVIDERS,
};
pub use fixture::{
    Fixture, FixtureDetails, FixtureDetailsError, FixtureError, FixtureEvent, FixtureEventError,
    FixtureEventFactory, FixtureProps, FixtureStatus, FixtureTeam, PlayerLookup,
};
pub use league::{
    League, LeagueEdition, LeagueEditionProps, LeagueError, LeagueProps, LeagueSummary, Season,
};
pub use player::{Player, PlayerError, PlayerPosition, PlayerProps, PlayerSummary};
pub use squad::{Squad, SquadError};
pub use stadium::{Coordinates, Stadium, StadiumError, StadiumProps, StadiumSummary};
pub use team::{Team, TeamError, TeamProps, TeamSummary};
