use super::*;
use crate::domain::{ExternalReferenceFactory, PlayerPosition, Provider, RefValue};
use crate::dto::ScrapedTeam;
use crate::use_cases::test_support::World;
use async_trait::async_trait;
use serde_json::json;

struct StubScraper {
    team: Option<ScrapedTeam>,
    players: Vec<ScrapedPlayer>,
}

#[async_trait]
impl TeamScraper for StubScraper {
    async fn get_by_reference(
        &self,
        _reference: &ExternalReference,
    ) -> Result<Option<ScrapedTeam>, ScraperError> {
        Ok(self.team.clone())
    }

    async fn get_team_players(
        &self,
        _reference: &ExternalReference,
    ) -> Result<Vec<ScrapedPlayer>, ScraperError> {
        Ok(self.players.clone())
    }
}

fn scraper(players: serde_json::Value) -> Arc<StubScraper> {
    Arc::new(StubScraper {
        team: Some(
            serde_json::from_value(json!({
                "name": "Bologna",
                "short_name": "BFC",
                "country": "Italy",
                "external_references": { "wikipedia": "Bologna_FC_1909" }
            }))
            .unwrap(),
        ),
        players: serde_json::from_value(players).unwrap(),
    })
}

fn sofascore(id: i64) -> ExternalReference {
    ExternalReferenceFactory::get_reference("sofascore", RefValue::Number(id)).unwrap()
}

fn roster() -> serde_json::Value {
    json!([
        {
            "name": "Riccardo Orsolini",
            "nationality": "Italy",
            "birth_date": "1997-01-24",
            "position": "F",
            "external_references": { "sofascore": 789 }
        },
        { "name": "Lukasz Skorupski", "position": "G", "external_references": { "sofascore": 790 } }
    ])
}

#[tokio::test]
async fn imports_team_and_players() {
    let world = World::new();

    let imported = ImportTeam::new(&world.repositories, scraper(roster()), ImportConfig::default())
        .execute(sofascore(2685))
        .await
        .unwrap();

    assert!(imported.team.persisted());
    assert_eq!(imported.team.short_name(), Some("BFC"));
    let refs = imported.team.external_references();
    assert!(refs.by_provider(Provider::SOFASCORE).is_some());
    assert!(refs.by_provider(Provider::WIKIPEDIA).is_some());

    assert_eq!(imported.players.len(), 2);
    assert_eq!(imported.players[0].position(), Some(PlayerPosition::Forward));
    assert_eq!(imported.players[0].birth_date().map(|d| d.to_string()), Some("1997-01-24".into()));
    assert_eq!(imported.players[1].position(), Some(PlayerPosition::Goalkeeper));
}

#[tokio::test]
async fn reimport_updates_in_place() {
    let world = World::new();
    let existing_player = world.player("Orsolini", 789).await;
    let import = ImportTeam::new(&world.repositories, scraper(roster()), ImportConfig::default());

    let first = import.execute(sofascore(2685)).await.unwrap();
    let second = import.execute(sofascore(2685)).await.unwrap();

    assert_eq!(first.team, second.team);
    assert_eq!(first.players[0], existing_player);
    let snapshot = world.snapshot();
    assert_eq!(snapshot.teams.len(), 1);
    assert_eq!(snapshot.players.len(), 2);
    assert_eq!(snapshot.players[0].name(), "Riccardo Orsolini");
}

#[tokio::test]
async fn invalid_player_aborts_before_any_save() {
    let world = World::new();
    let players = json!([
        { "name": "Riccardo Orsolini", "external_references": { "sofascore": 789 } },
        { "name": "   ", "external_references": { "sofascore": 791 } }
    ]);

    let err = ImportTeam::new(&world.repositories, scraper(players), ImportConfig::default())
        .execute(sofascore(2685))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportTeamError::InvalidPlayer { source: PlayerError::NameMandatory, .. }));
    let snapshot = world.snapshot();
    assert!(snapshot.teams.is_empty());
    assert!(snapshot.players.is_empty());
}

#[tokio::test]
async fn oversized_roster_and_unknown_team_are_refused() {
    let world = World::new();
    let err = ImportTeam::new(
        &world.repositories,
        scraper(roster()),
        ImportConfig { max_players_per_team: 1 },
    )
    .execute(sofascore(2685))
    .await
    .unwrap_err();
    assert!(matches!(err, ImportTeamError::TooManyPlayers(_)));

    let empty = Arc::new(StubScraper { team: None, players: Vec::new() });
    let err = ImportTeam::new(&world.repositories, empty, ImportConfig::default())
        .execute(sofascore(1))
        .await
        .unwrap_err();
    assert_eq!(err, ImportTeamError::TeamNotFound("sofascore:1".into()));
}
