use super::*;
use crate::domain::{ContractProps, ExternalReferences, PlayerProps, TeamProps};
use serde_json::json;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn references(value: serde_json::Value) -> ExternalReferences {
    ExternalReferences::from_dto(&serde_json::from_value(value).unwrap())
}

async fn player(store: &MemoryStore, name: &str, sofascore: i64) -> Player {
    PlayerRepository::save(
        store,
        Player::create(PlayerProps {
            name: name.into(),
            external_references: references(json!({ "sofascore": sofascore })),
            ..PlayerProps::default()
        })
        .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn save_assigns_id_once_and_replaces_by_identity() {
    let store = MemoryStore::new();
    let team = Team::create(TeamProps { name: "Inter".into(), ..TeamProps::default() }).unwrap();
    assert!(!team.persisted());

    let saved = TeamRepository::save(&store, team).await.unwrap();
    let id = *saved.id().unwrap();
    let renamed = Team::create(TeamProps {
        id: Some(id),
        name: "FC Internazionale".into(),
        short_name: Some("Inter".into()),
        ..TeamProps::default()
    })
    .unwrap();
    TeamRepository::save(&store, renamed).await.unwrap();

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.teams.len(), 1);
    let stored = TeamRepository::find_by_id(&store, &id).await.unwrap().unwrap();
    assert_eq!(stored.name(), "FC Internazionale");
    assert!(TeamRepository::find_by_name(&store, "inter").await.unwrap().is_some());
}

#[tokio::test]
async fn batch_player_lookup_matches_any_reference() {
    let store = MemoryStore::new();
    player(&store, "Barella", 1).await;
    player(&store, "Bastoni", 2).await;
    player(&store, "Dimarco", 3).await;

    let wanted = references(json!({ "sofascore": 1 })).merge(&references(json!({ "wikipedia": "x" })));
    let wanted: Vec<ExternalReference> =
        wanted.as_slice().iter().chain(references(json!({ "sofascore": 3 })).as_slice()).cloned().collect();
    let found = store.find_all_by_references(&wanted).await.unwrap();
    let names: Vec<&str> = found.iter().map(Player::name).collect();
    assert_eq!(names, ["Barella", "Dimarco"]);
}

#[tokio::test]
async fn open_and_incomplete_contract_queries() {
    let store = MemoryStore::new();
    let saved = player(&store, "Frattesi", 10).await;
    let summary = saved.summary().unwrap();
    let team_id = EntityId::generate();

    let open = Contract::create(ContractProps {
        id: None,
        player: summary.clone(),
        team_id,
        starting_date: Some(date("2023-07-01")),
        ending_date: None,
    })
    .unwrap();
    let incomplete = Contract::create(ContractProps {
        id: None,
        player: summary.clone(),
        team_id,
        starting_date: None,
        ending_date: Some(date("2022-06-30")),
    })
    .unwrap();
    ContractRepository::save(&store, open).await.unwrap();
    ContractRepository::save(&store, incomplete).await.unwrap();

    assert!(store.find_open(&summary.id, &team_id, date("2024-01-01")).await.unwrap().is_some());
    assert!(store.find_open(&summary.id, &team_id, date("2023-01-01")).await.unwrap().is_none());
    assert!(store.find_incomplete(&summary.id, &team_id, date("2021-07-01")).await.unwrap().is_some());
    assert!(store.find_incomplete(&summary.id, &team_id, date("2022-07-01")).await.unwrap().is_none());
    assert_eq!(store.find_by_player(&summary.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn snapshot_survives_json() {
    let store = MemoryStore::new();
    player(&store, "Sommer", 7).await;

    let json = store.snapshot().unwrap().to_json().unwrap();
    let restored = MemoryStore::from_snapshot(StoreSnapshot::from_json(&json).unwrap());
    let wanted = references(json!({ "sofascore": 7 }));
    let found = PlayerRepository::find_by_references(&restored, wanted.as_slice()).await.unwrap();
    assert_eq!(found.map(|p| p.name().to_string()), Some("Sommer".to_string()));
    assert_eq!(restored.snapshot().unwrap().counts()[1], ("players", 1));
}

#[test]
fn snapshot_with_duplicated_squad_player_is_rejected() {
    let player = json!({ "id": EntityId::generate(), "name": "Barella" });
    let json = json!({
        "squads": [{ "id": null, "team_id": EntityId::generate(), "players": [player.clone(), player] }]
    });

    assert!(StoreSnapshot::from_json(&json.to_string()).is_err());
}
