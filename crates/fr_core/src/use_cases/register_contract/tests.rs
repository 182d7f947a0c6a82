use super::*;
use crate::domain::{Player, Team};
use crate::ports::clock::FixedClock;
use crate::use_cases::test_support::{date, Table, World};
use std::sync::atomic::Ordering;

const TODAY: &str = "2024-03-01";

fn use_case(world: &World, config: SquadSyncConfig) -> RegisterContract {
    RegisterContract::new(&world.repositories, Arc::new(FixedClock(date(TODAY))), config)
}

fn request(player: &Player, team: &Team, starting: Option<&str>, ending: Option<&str>) -> RegisterContractRequest {
    RegisterContractRequest {
        player_id: *player.id().unwrap(),
        team_id: *team.id().unwrap(),
        starting_date: starting.map(String::from),
        ending_date: ending.map(String::from),
    }
}

async fn seed(world: &World) -> (Player, Team) {
    (world.player("Davide Frattesi", 222).await, world.team("Inter", 2697).await)
}

async fn existing(world: &World, player: &Player, team: &Team, starting: Option<&str>, ending: Option<&str>) -> Contract {
    let contract = Contract::create(ContractProps {
        id: None,
        player: player.summary().unwrap(),
        team_id: *team.id().unwrap(),
        starting_date: starting.map(date),
        ending_date: ending.map(date),
    })
    .unwrap();
    world.repositories.contracts.save(contract).await.unwrap()
}

fn squad_players(world: &World, team: &Team) -> Option<usize> {
    world
        .snapshot()
        .squads
        .iter()
        .find(|s| s.team_id() == team.id().unwrap())
        .map(|s| s.players().len())
}

#[tokio::test]
async fn both_dates_create_a_closed_contract_without_touching_the_squad() {
    let world = World::new();
    let (player, team) = seed(&world).await;

    let contract = use_case(&world, SquadSyncConfig::default())
        .execute(request(&player, &team, Some("2024-01-01"), Some("2024-06-01")))
        .await
        .unwrap();

    assert!(contract.persisted());
    assert_eq!(contract.starting_date(), Some(date("2024-01-01")));
    assert_eq!(contract.ending_date(), Some(date("2024-06-01")));
    assert_eq!(world.snapshot().contracts.len(), 1);
    assert_eq!(squad_players(&world, &team), None);
}

#[tokio::test]
async fn start_completes_an_incomplete_contract() {
    let world = World::new();
    let (player, team) = seed(&world).await;
    let incomplete = existing(&world, &player, &team, None, Some("2024-12-31")).await;

    let contract = use_case(&world, SquadSyncConfig::default())
        .execute(request(&player, &team, Some("2024-01-01"), None))
        .await
        .unwrap();

    assert_eq!(contract, incomplete);
    assert_eq!(contract.starting_date(), Some(date("2024-01-01")));
    assert_eq!(contract.ending_date(), Some(date("2024-12-31")));
    assert_eq!(world.snapshot().contracts.len(), 1);
    assert_eq!(squad_players(&world, &team), None);
}

#[tokio::test]
async fn start_is_refused_while_an_open_contract_exists() {
    let world = World::new();
    let (player, team) = seed(&world).await;
    existing(&world, &player, &team, Some("2023-07-01"), None).await;

    let err = use_case(&world, SquadSyncConfig::default())
        .execute(request(&player, &team, Some("2024-02-01"), None))
        .await
        .unwrap_err();

    assert_eq!(err, RegisterContractError::OpenContractExists);
    assert_eq!(world.snapshot().contracts.len(), 1);
    assert_eq!(squad_players(&world, &team), None);
}

#[tokio::test]
async fn open_contract_adds_player_to_a_new_squad_once() {
    let world = World::new();
    let (player, team) = seed(&world).await;
    let other_team = world.team("Sassuolo", 2793).await;
    let register = use_case(&world, SquadSyncConfig::default());

    register.execute(request(&player, &team, Some("2023-07-01"), None)).await.unwrap();
    assert_eq!(squad_players(&world, &team), Some(1));

    // A future start is not active yet.
    register.execute(request(&player, &other_team, Some("2024-07-01"), None)).await.unwrap();
    assert_eq!(squad_players(&world, &other_team), None);
}

#[tokio::test]
async fn ending_date_closes_the_open_contract_and_leaves_the_squad() {
    let world = World::new();
    let (player, team) = seed(&world).await;
    let register = use_case(&world, SquadSyncConfig::default());
    let opened = register.execute(request(&player, &team, Some("2023-07-01"), None)).await.unwrap();

    let closed = register.execute(request(&player, &team, None, Some("2024-02-15"))).await.unwrap();

    assert_eq!(closed, opened);
    assert_eq!(closed.ending_date(), Some(date("2024-02-15")));
    assert_eq!(world.snapshot().contracts.len(), 1);
    assert_eq!(squad_players(&world, &team), Some(0));
}

#[tokio::test]
async fn ending_date_without_open_contract_records_an_incomplete_one() {
    let world = World::new();
    let (player, team) = seed(&world).await;

    let contract = use_case(&world, SquadSyncConfig::default())
        .execute(request(&player, &team, None, Some("2022-06-30")))
        .await
        .unwrap();

    assert_eq!(contract.starting_date(), None);
    assert!(contract.is_incomplete_for(date("2021-07-01")));
    assert_eq!(squad_players(&world, &team), None);
}

#[tokio::test]
async fn squad_is_not_created_when_disabled() {
    let world = World::new();
    let (player, team) = seed(&world).await;

    use_case(&world, SquadSyncConfig { create_missing: false })
        .execute(request(&player, &team, Some("2023-07-01"), None))
        .await
        .unwrap();

    assert_eq!(world.snapshot().contracts.len(), 1);
    assert_eq!(squad_players(&world, &team), None);
}

#[tokio::test]
async fn invalid_requests_are_rejected_before_any_save() {
    let world = World::new();
    let (player, team) = seed(&world).await;
    let register = use_case(&world, SquadSyncConfig::default());

    let err = register.execute(request(&player, &team, None, None)).await.unwrap_err();
    assert!(matches!(err, RegisterContractError::InvalidDates(_)));

    let err = register
        .execute(request(&player, &team, Some("2024-06-01"), Some("2024-01-01")))
        .await
        .unwrap_err();
    assert!(matches!(err, RegisterContractError::InvalidDates(_)));

    let err = register.execute(request(&player, &team, Some("first of May"), None)).await.unwrap_err();
    assert!(matches!(err, RegisterContractError::InvalidDates(_)));

    let mut unknown = request(&player, &team, Some("2024-01-01"), None);
    unknown.team_id = EntityId::generate();
    let err = register.execute(unknown).await.unwrap_err();
    assert!(matches!(err, RegisterContractError::TeamNotFound(_)));

    assert!(world.snapshot().contracts.is_empty());
}

#[tokio::test]
async fn failed_squad_save_leaves_the_store_unchanged() {
    let world = World::new();
    let (player, team) = seed(&world).await;
    let before = world.dump();
    let (repositories, _down) = world.failing_saves(Table::Squads);
    let register = RegisterContract::new(
        &repositories,
        Arc::new(FixedClock(date(TODAY))),
        SquadSyncConfig::default(),
    );

    let err = register
        .execute(request(&player, &team, Some("2024-01-01"), None))
        .await
        .unwrap_err();

    assert_eq!(err, RegisterContractError::Unexpected("Store unavailable: db down".into()));
    assert_eq!(world.dump(), before);
}

#[tokio::test]
async fn retry_after_failed_contract_save_converges() {
    let world = World::new();
    let (player, team) = seed(&world).await;
    let (repositories, down) = world.failing_saves(Table::Contracts);
    let register = RegisterContract::new(
        &repositories,
        Arc::new(FixedClock(date(TODAY))),
        SquadSyncConfig::default(),
    );

    let err = register
        .execute(request(&player, &team, Some("2024-01-01"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, RegisterContractError::Unexpected(_)));
    assert!(world.snapshot().contracts.is_empty());

    down.store(false, Ordering::SeqCst);
    let contract = register
        .execute(request(&player, &team, Some("2024-01-01"), None))
        .await
        .unwrap();

    assert!(contract.persisted());
    assert_eq!(world.snapshot().contracts.len(), 1);
    assert_eq!(squad_players(&world, &team), Some(1));
}
