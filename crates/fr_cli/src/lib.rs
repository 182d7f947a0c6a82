//! Registry CLI support
//!
//! A session loads a JSON store snapshot into an in-memory store, runs use
//! cases against it and writes the snapshot back.

use anyhow::{Context, Result};
use fr_core::domain::{Contract, Fixture};
use fr_core::dto::{AddFixtureDetailsRequest, CreateFixtureRequest, RegisterContractRequest};
use fr_core::ports::clock::{Clock, SystemClock};
use fr_core::{
    AddFixtureDetails, CreateFixture, MemoryStore, RegisterContract, RegistryConfig, Repositories,
    StoreSnapshot,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Snapshot at `path`, or an empty one when the file does not exist yet.
pub fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
    if !path.exists() {
        info!("No store at {}, starting empty", path.display());
        return Ok(StoreSnapshot::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store {}", path.display()))?;
    StoreSnapshot::from_json(&content)
        .with_context(|| format!("Failed to parse store {}", path.display()))
}

pub fn save_snapshot(path: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    fs::write(path, snapshot.to_json()?)
        .with_context(|| format!("Failed to write store {}", path.display()))
}

pub fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse request {}", path.display()))
}

/// Table sizes of a snapshot, one `name: count` per line.
pub fn summary(snapshot: &StoreSnapshot) -> String {
    snapshot
        .counts()
        .into_iter()
        .map(|(table, count)| format!("{table}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct Session {
    store: Arc<MemoryStore>,
    repositories: Repositories,
    config: RegistryConfig,
    clock: Arc<dyn Clock>,
}

impl Session {
    pub fn new(snapshot: StoreSnapshot, config: RegistryConfig) -> Self {
        let store = Arc::new(MemoryStore::from_snapshot(snapshot));
        let repositories = Repositories::in_memory(store.clone());
        Self { store, repositories, config, clock: Arc::new(SystemClock) }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn open(path: &Path, config: RegistryConfig) -> Result<Self> {
        Ok(Self::new(load_snapshot(path)?, config))
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(self.store.snapshot()?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_snapshot(path, &self.snapshot()?)
    }

    pub async fn register_contract(&self, request: RegisterContractRequest) -> Result<Contract> {
        let use_case =
            RegisterContract::new(&self.repositories, self.clock.clone(), self.config.squads.clone());
        Ok(use_case.execute(request).await?)
    }

    pub async fn create_fixture(&self, request: CreateFixtureRequest) -> Result<Fixture> {
        Ok(CreateFixture::new(&self.repositories).execute(request).await?)
    }

    pub async fn add_fixture_details(&self, request: AddFixtureDetailsRequest) -> Result<Fixture> {
        Ok(AddFixtureDetails::new(&self.repositories).execute(request).await?)
    }
}
