//! End-to-end tests for the pokedex binary
//!
//! These tests validate the full command workflow including:
//! - Cache-first search and remote fallback
//! - Output formats
//! - Input validation and error reporting

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Helper to create a mock list response
fn mock_list_response() -> serde_json::Value {
    serde_json::json!({
        "data": {
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}
            ]
        },
        "pagination": {"limit": 20, "offset": 0}
    })
}

/// Helper to create a mock search response
fn mock_search_response() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "id": 25,
                "name": "pikachu",
                "height": 4,
                "weight": 60,
                "base_experience": 112,
                "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
                "sprites": {"front_default": "front.png", "back_default": "back.png"}
            },
            null
        ],
        "search": {"count": 1, "limit": 10, "offset": 0, "query": "pika"}
    })
}

fn empty_search_response(query: &str) -> serde_json::Value {
    serde_json::json!({
        "data": [],
        "search": {"count": 0, "limit": 10, "offset": 0, "query": query}
    })
}

async fn mount_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_list_response()))
        .mount(server)
        .await;
}

fn pokedex(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("pokedex").unwrap();
    cmd.env("POKEDEX_MAX_RETRIES", "0")
        .env("POKEDEX_RETRY_BACKOFF_MS", "1")
        .env_remove("POKEDEX_LOG_LEVEL")
        .arg("--server-url")
        .arg(format!("{}/api/v1", server.uri()));
    cmd
}

#[tokio::test]
async fn test_search_answers_from_cache() {
    let mock_server = MockServer::start().await;
    mount_list(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_search_response("char")))
        .expect(0)
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .arg("search")
        .arg("char")
        .arg("--format")
        .arg("compact")
        .assert()
        .success()
        .stdout(predicate::str::contains("#0004 charmander"))
        .stdout(predicate::str::contains("bulbasaur").not());
}

#[tokio::test]
async fn test_search_falls_back_to_remote() {
    let mock_server = MockServer::start().await;
    mount_list(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/search"))
        .and(query_param("q", "pika"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_search_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .arg("search")
        .arg("pika")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pikachu"))
        .stdout(predicate::str::contains("Electric"))
        .stdout(predicate::str::contains("remote search"));
}

#[tokio::test]
async fn test_search_json_reports_source() {
    let mock_server = MockServer::start().await;
    mount_list(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_search_response()))
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .args(["search", "pika", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""source": "api""#))
        .stdout(predicate::str::contains(r#""has_more": false"#))
        .stdout(predicate::str::contains(r#""name": "pikachu""#));
}

#[tokio::test]
async fn test_search_no_results_suggests_cached_names() {
    let mock_server = MockServer::start().await;
    mount_list(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_search_response("charmandr")))
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .args(["search", "charmandr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"))
        .stdout(predicate::str::contains("Did you mean"))
        .stdout(predicate::str::contains("charmander"));
}

#[tokio::test]
async fn test_search_server_error() {
    let mock_server = MockServer::start().await;
    mount_list(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .args(["search", "mew"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("status 500"))
        .stderr(predicate::function(|err: &str| err.matches("Error:").count() == 1))
        .stderr(predicate::str::contains("Command failed").not())
        .stderr(predicate::str::contains("\x1b[").not());
}

#[tokio::test]
async fn test_search_without_catalog_uses_remote() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/search"))
        .and(query_param("q", "pika"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_search_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .args(["search", "pika", "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#0025 pikachu"));
}

#[tokio::test]
async fn test_search_empty_query() {
    let mock_server = MockServer::start().await;

    pokedex(&mock_server)
        .args(["search", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search query cannot be empty"));
}

#[tokio::test]
async fn test_list_invalid_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .args(["list", "--limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Limit must be between 1 and 100"));
}

#[tokio::test]
async fn test_list_table() {
    let mock_server = MockServer::start().await;
    mount_list(&mock_server).await;

    pokedex(&mock_server)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bulbasaur"))
        .stdout(predicate::str::contains("Charmander"))
        .stdout(predicate::str::contains("Showing 2 of 2"));
}

#[tokio::test]
async fn test_show_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/name/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": mock_search_response()["data"][0].clone()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .args(["show", "Pikachu", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""height": "0.4 m""#))
        .stdout(predicate::str::contains(r#""weight": "6 kg""#));
}

#[tokio::test]
async fn test_show_reuses_earlier_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/name/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": mock_search_response()["data"][0].clone()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pokemon/25"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    pokedex(&mock_server)
        .args(["show", "pikachu", "25", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::function(|out: &str| out.matches(r#""name": "pikachu""#).count() == 2));
}

#[tokio::test]
async fn test_show_invalid_id() {
    let mock_server = MockServer::start().await;

    pokedex(&mock_server)
        .args(["show", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pokemon ID must be positive"));
}

#[test]
fn test_config_get_unknown_key() {
    let mut cmd = Command::cargo_bin("pokedex").unwrap();
    cmd.args(["config", "get", "cache_dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
