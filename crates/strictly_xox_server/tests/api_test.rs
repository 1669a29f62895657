//! Tests for the REST API, driven in-process through the router.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::json;
use strictly_xox::Player;
use strictly_xox_server::{
    ActionView, BoardView, GameRegistry, MoveView, RankingView, SAMPLE_GAME_ID, router,
};
use tower::ServiceExt;

async fn app() -> Router {
    router(GameRegistry::with_sample_game().await.unwrap())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> T {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK, "GET {uri}: {}", String::from_utf8_lossy(&body));
    serde_json::from_slice(&body).unwrap()
}

async fn add_sample_game(app: &Router) -> u64 {
    let settings = json!({
        "players": [
            {"name": "Max", "preferredColour": "#CAFFEE"},
            {"name": "Moritz", "preferredColour": "#1CE7EA"}
        ],
        "startingPlayerName": "Max"
    });
    let (status, body) = send(app, Method::POST, "/", Some(settings)).await;
    assert_eq!(status, StatusCode::OK);
    String::from_utf8(body).unwrap().parse().unwrap()
}

async fn post_action(app: &Router, id: u64, player: &str, action: &str) -> (StatusCode, Vec<u8>) {
    let uri = format!("/{id}/players/{player}/actions/{action}");
    send(app, Method::POST, &uri, None).await
}

async fn all_game_ids(app: &Router) -> Vec<u64> {
    get_json(app, "/").await
}

#[tokio::test]
async fn test_sample_game_listed() {
    let app = app().await;
    assert!(all_game_ids(&app).await.contains(&SAMPLE_GAME_ID));
}

#[tokio::test]
async fn test_post_adds_game() {
    let app = app().await;
    let id = add_sample_game(&app).await;
    assert!(all_game_ids(&app).await.contains(&id));
}

#[tokio::test]
async fn test_ranking_of_new_game() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let ranking: RankingView = get_json(&app, &format!("/{id}")).await;
    assert!(!ranking.game_over);
    for score in &ranking.scores {
        assert_eq!(score.score, 0, "{} should have a score of 0", score.name);
    }
    let names: Vec<_> = ranking.scores.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Max", "Moritz"]);
}

#[tokio::test]
async fn test_ranking_wire_format() {
    let app = app().await;
    let value: serde_json::Value = get_json(&app, &format!("/{SAMPLE_GAME_ID}")).await;
    assert_eq!(
        value,
        json!({
            "gameOver": false,
            "scores": [{"name": "Max", "score": 0}, {"name": "Moritz", "score": 0}]
        })
    );
}

#[tokio::test]
async fn test_delete_game() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!all_game_ids(&app).await.contains(&id));

    let (status, _) = send(&app, Method::GET, &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_board_of_new_game() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let board: BoardView = get_json(&app, &format!("/{id}/board")).await;
    assert!(board.empty);
    for x in 0..3 {
        for y in 0..3 {
            assert!(board.is_free(x, y));
        }
    }
    assert!(!board.three_in_a_line);
}

#[tokio::test]
async fn test_players_in_configured_order() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let players: Vec<Player> = get_json(&app, &format!("/{id}/players")).await;
    assert_eq!(
        players,
        vec![Player::new("Max", "#CAFFEE"), Player::new("Moritz", "#1CE7EA")]
    );
}

#[tokio::test]
async fn test_actions_only_for_player_on_turn() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let max: Vec<ActionView> = get_json(&app, &format!("/{id}/players/Max/actions")).await;
    assert_eq!(max.len(), 9);

    let moritz: Vec<ActionView> = get_json(&app, &format!("/{id}/players/Moritz/actions")).await;
    assert!(moritz.is_empty());

    let (status, _) = send(&app, Method::GET, &format!("/{id}/players/Bolte/actions"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_execute_action_advances_turn() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let actions: Vec<ActionView> = get_json(&app, &format!("/{id}/players/Max/actions")).await;
    let center = actions.iter().find(|a| a.x == 1 && a.y == 1).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/{id}/players/Max/actions/{}", center.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let board: BoardView = serde_json::from_slice(&body).unwrap();
    assert!(!board.empty);
    assert_eq!(board.cells[1][1].as_deref(), Some("Max"));

    let max: Vec<ActionView> = get_json(&app, &format!("/{id}/players/Max/actions")).await;
    assert!(max.is_empty());
    let moritz: Vec<ActionView> = get_json(&app, &format!("/{id}/players/Moritz/actions")).await;
    assert_eq!(moritz.len(), 8);

    let history: Vec<MoveView> = get_json(&app, &format!("/{id}/history")).await;
    assert_eq!(history, vec![MoveView::new("Max".into(), 1, 1)]);
}

#[tokio::test]
async fn test_repeated_action_rejected() {
    let app = app().await;
    let id = add_sample_game(&app).await;
    let uri = format!("/{id}/players/Max/actions/0");

    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let before: BoardView = get_json(&app, &format!("/{id}/board")).await;

    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let after: BoardView = get_json(&app, &format!("/{id}/board")).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_out_of_turn_action_forbidden() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let (status, body) = post_action(&app, id, "Moritz", "4").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "It's not Moritz's turn");
}

#[tokio::test]
async fn test_won_game_rejects_actions() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    let moves = [("Max", "0"), ("Moritz", "3"), ("Max", "1"), ("Moritz", "4"), ("Max", "2")];
    for (player, cell) in moves {
        let (status, _) = post_action(&app, id, player, cell).await;
        assert_eq!(status, StatusCode::OK);
    }

    let board: BoardView = get_json(&app, &format!("/{id}/board")).await;
    assert!(board.three_in_a_line);
    let ranking: RankingView = get_json(&app, &format!("/{id}")).await;
    assert!(ranking.game_over);
    assert_eq!(ranking.scores[0].score, 1);
    assert_eq!(ranking.scores[1].score, 0);

    let (status, _) = post_action(&app, id, "Moritz", "8").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_drawn_game_rejects_actions() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    // X O X / X O O / O X X
    let moves = [
        ("Max", "0"),
        ("Moritz", "1"),
        ("Max", "2"),
        ("Moritz", "4"),
        ("Max", "3"),
        ("Moritz", "5"),
        ("Max", "7"),
        ("Moritz", "6"),
        ("Max", "8"),
    ];
    for (player, cell) in moves {
        let (status, _) = post_action(&app, id, player, cell).await;
        assert_eq!(status, StatusCode::OK, "{player} claiming {cell}");
    }

    let board: BoardView = get_json(&app, &format!("/{id}/board")).await;
    assert!(board.full);
    assert!(!board.three_in_a_line);

    let ranking: RankingView = get_json(&app, &format!("/{id}")).await;
    assert!(ranking.game_over);
    assert!(ranking.scores.iter().all(|s| s.score == 0));

    for player in ["Max", "Moritz"] {
        let actions: Vec<ActionView> =
            get_json(&app, &format!("/{id}/players/{player}/actions")).await;
        assert!(actions.is_empty());
        let (status, _) = post_action(&app, id, player, "4").await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}

#[tokio::test]
async fn test_action_id_aliases_rejected() {
    let app = app().await;
    let id = add_sample_game(&app).await;

    for alias in ["04", "+4", "%204"] {
        let (status, _) = post_action(&app, id, "Max", alias).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "action {alias}");
    }
    let board: BoardView = get_json(&app, &format!("/{id}/board")).await;
    assert!(board.empty);
}

#[tokio::test]
async fn test_invalid_setup_rejected() {
    let app = app().await;
    let settings = json!({
        "players": [{"name": "Max", "preferredColour": "#CAFFEE"}],
        "startingPlayerName": "Max"
    });

    let (status, _) = send(&app, Method::POST, "/", Some(settings)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(all_game_ids(&app).await, vec![SAMPLE_GAME_ID]);
}

#[tokio::test]
async fn test_unknown_game_not_found() {
    let app = app().await;
    for path in ["/17", "/17/board", "/17/players", "/17/players/Max/actions", "/17/history"] {
        let (status, _) = send(&app, Method::GET, path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {path}");
    }
}

#[tokio::test]
async fn test_read_queries_are_idempotent() {
    let app = app().await;
    let id = add_sample_game(&app).await;
    post_action(&app, id, "Max", "8").await;

    for path in ["board", "players", "players/Moritz/actions", "history"] {
        let first: serde_json::Value = get_json(&app, &format!("/{id}/{path}")).await;
        let second: serde_json::Value = get_json(&app, &format!("/{id}/{path}")).await;
        assert_eq!(first, second, "/{id}/{path}");
    }
}
