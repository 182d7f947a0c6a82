//! Narrow interfaces to the collaborators the core depends on: persistence,
//! scrapers and time. Implementations live outside the core, except for the
//! in-memory store in [`crate::store`].

pub mod adapters;
pub mod clock;
pub mod error;
pub mod repositories;

pub use adapters::{FixtureScraper, Geocoding, PlaceSearch, StadiumScraper, TeamScraper};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ScraperError, StoreError};
pub use repositories::{
    ContractRepository, FixtureDetailsRepository, FixtureRepository, LeagueEditionRepository,
    LeagueRepository, PlayerRepository, SeasonRepository, SquadRepository, StadiumRepository,
    TeamRepository,
};
