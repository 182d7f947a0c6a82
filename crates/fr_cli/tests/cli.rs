use chrono::NaiveDate;
use fr_cli::{load_snapshot, read_request, save_snapshot, summary, Session};
use fr_core::domain::{
    Entity, EntityId, ExternalReferences, FixtureStatus, Player, PlayerProps, Team, TeamProps,
};
use fr_core::dto::RegisterContractRequest;
use fr_core::ports::clock::FixedClock;
use fr_core::{RegistryConfig, StoreSnapshot};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn references(value: serde_json::Value) -> ExternalReferences {
    ExternalReferences::from_dto(&serde_json::from_value(value).unwrap())
}

fn team(name: &str, sofascore: i64) -> Team {
    Team::create(TeamProps {
        name: name.into(),
        external_references: references(json!({ "sofascore": sofascore })),
        ..TeamProps::default()
    })
    .unwrap()
    .with_id(EntityId::generate())
}

fn player(name: &str, sofascore: i64) -> Player {
    Player::create(PlayerProps {
        name: name.into(),
        external_references: references(json!({ "sofascore": sofascore })),
        ..PlayerProps::default()
    })
    .unwrap()
    .with_id(EntityId::generate())
}

fn seeded() -> StoreSnapshot {
    StoreSnapshot {
        teams: vec![team("Juventus", 2687), team("Torino", 2696)],
        players: vec![player("Dušan Vlahović", 100), player("Duván Zapata", 200)],
        ..StoreSnapshot::default()
    }
}

#[test]
fn missing_store_starts_empty() {
    let dir = TempDir::new().unwrap();
    let snapshot = load_snapshot(&dir.path().join("absent.json")).unwrap();
    assert!(snapshot.counts().iter().all(|(_, count)| *count == 0));
}

#[test]
fn malformed_request_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("request.json");
    fs::write(&path, "{ not json").unwrap();

    let err = read_request::<RegisterContractRequest>(&path).unwrap_err();
    assert!(err.to_string().contains("request.json"));
}

#[tokio::test]
async fn contract_registration_persists_contract_and_squad() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("registry.json");
    let snapshot = seeded();
    let player_id = *snapshot.players[0].id().unwrap();
    let team_id = *snapshot.teams[0].id().unwrap();
    save_snapshot(&store, &snapshot).unwrap();

    let request = dir.path().join("contract.json");
    fs::write(
        &request,
        json!({ "player_id": player_id, "team_id": team_id, "starting_date": "2022-01-28" }).to_string(),
    )
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let session = Session::open(&store, RegistryConfig::default())
        .unwrap()
        .with_clock(Arc::new(FixedClock(today)));
    let contract = session.register_contract(read_request(&request).unwrap()).await.unwrap();
    assert!(contract.is_contract_active_at(today));
    session.save(&store).unwrap();

    let reloaded = load_snapshot(&store).unwrap();
    assert_eq!(reloaded.contracts.len(), 1);
    assert_eq!(reloaded.squads.len(), 1);
    assert_eq!(reloaded.squads[0].players()[0].name, "Dušan Vlahović");
    assert!(summary(&reloaded).contains("contracts: 1"));
}

#[tokio::test]
async fn fixture_lifecycle_through_a_session() {
    let session = Session::new(seeded(), RegistryConfig::default());

    let create = serde_json::from_value(json!({
        "league": { "name": "Serie A" },
        "season": 2024,
        "round": "Round 9",
        "home_team": { "name": "Juventus" },
        "away_team": { "external_references": { "sofascore": 2696 } },
        "match_date": "2024-10-19T16:00:00Z",
        "external_references": { "sofascore": 12499320 }
    }))
    .unwrap();
    let fixture = session.create_fixture(create).await.unwrap();
    assert_eq!(fixture.status(), FixtureStatus::NotStarted);

    let details = serde_json::from_value(json!({
        "fixture_references": { "sofascore": 12499320 },
        "home_score": 2,
        "away_score": 0,
        "home": { "lineup": [{ "sofascore": 100 }], "bench": [] },
        "away": { "lineup": [{ "sofascore": 200 }], "bench": [] },
        "events": [
            { "type": "goal", "timestamp": 24, "side": "home", "player": { "sofascore": 100 } },
            { "type": "period", "timestamp": 45, "label": "HT", "home_score": 1, "away_score": 0 },
            { "type": "goal", "timestamp": 51, "side": "home", "player": { "sofascore": 100 } }
        ]
    }))
    .unwrap();
    let finished = session.add_fixture_details(details).await.unwrap();

    assert_eq!(finished.status(), FixtureStatus::MatchFinished);
    assert_eq!(finished.details().unwrap().events().len(), 3);
    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.fixtures.len(), 1);
    assert_eq!(snapshot.fixture_details.len(), 1);
}
