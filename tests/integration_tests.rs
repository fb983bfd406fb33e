//! Integration tests for the game client over real HTTP
//!
//! A small fake authority runs on a local TCP listener and answers each
//! request from a route table, so these tests cover the HTTP authority, error
//! mapping and store updates together.

use borders_client::config::ClientConfig;
use borders_client::error::ClientError;
use borders_client::game::GameClient;
use borders_client::network::{Authority, HttpAuthority};
use borders_client::store::GameStore;
use borders_shared::{GameState, NO_HINT_AVAILABLE};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::sleep;

/// A request as seen by the fake authority.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    body: Value,
}

type Routes = HashMap<(&'static str, &'static str), (u16, Value)>;

struct FakeAuthority {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeAuthority {
    async fn start(routes: Routes) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self { addr, requests }
    }

    fn api_base(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn client(&self) -> GameClient {
        let authority = Arc::new(HttpAuthority::new(&self.api_base()).unwrap());
        GameClient::new(
            authority,
            GameStore::new(),
            ClientConfig::new(self.api_base()),
        )
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &Routes,
    recorded: &Mutex<Vec<Recorded>>,
) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    let body = serde_json::from_slice(&buffer[head_end..]).unwrap_or(Value::Null);
    recorded.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    let (status, payload) = routes
        .iter()
        .find(|((route_method, route_path), _)| *route_method == method && *route_path == path)
        .map(|(_, answer)| answer.clone())
        .unwrap_or((404, json!({"detail": "Not Found"})));
    let payload = payload.to_string();
    let response = format!(
        "HTTP/1.1 {} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn game_json(completed: u32) -> Value {
    let found = completed > 0;
    let value = if found { "Spain" } else { "" };
    json!({
        "target_country": "Portugal",
        "target_country_code": "PRT",
        "fields": [
            {"id": 0, "value": value, "is_correct": found, "is_filled": found}
        ],
        "total_fields": 1,
        "completed_fields": completed,
        "game_complete": completed == 1
    })
}

fn portugal(completed: u32) -> GameState {
    serde_json::from_value(game_json(completed)).unwrap()
}

/// AUTHORITY CONTRACT TESTS
mod contract_tests {
    use super::*;

    /// Tests that a fresh game is requested with POST and mirrored into the store
    #[tokio::test]
    async fn start_game_over_http() {
        let mut routes = Routes::new();
        routes.insert(
            ("POST", "/api/game/start"),
            (200, json!({"success": true, "game_state": game_json(0), "message": "ok"})),
        );
        let authority = FakeAuthority::start(routes).await;
        let client = authority.client();

        let state = client.start_new_game().await.unwrap();

        assert_eq!(state, portugal(0));
        assert_eq!(client.store().game_state.get(), portugal(0));
        assert_eq!(
            client.store().message.get(),
            "Fill in all 1 countries that border Portugal!"
        );
        assert!(!client.store().is_loading.get());

        let requests = authority.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/api/game/start");
    }

    /// Tests the update body shape and the response message handling
    #[tokio::test]
    async fn update_field_over_http() {
        let mut routes = Routes::new();
        routes.insert(
            ("POST", "/api/game/update-field"),
            (
                200,
                json!({
                    "success": true,
                    "game_state": game_json(1),
                    "message": "Congratulations! You completed all countries!"
                }),
            ),
        );
        let authority = FakeAuthority::start(routes).await;
        let client = authority.client();

        let response = client.update_field(0, "Spain", true).await.unwrap();

        assert!(response.game_state.game_complete);
        assert_eq!(client.store().game_state.get(), portugal(1));
        assert_eq!(
            client.store().message.get(),
            "Congratulations! You completed all countries!"
        );
        assert_eq!(
            authority.requests()[0].body,
            json!({"field_id": 0, "country_name": "Spain"})
        );
    }

    /// Tests that a 404 from /game/current starts a new game instead of failing
    #[tokio::test]
    async fn missing_game_recovers_with_new_game() {
        let mut routes = Routes::new();
        routes.insert(
            ("GET", "/api/game/current"),
            (404, json!({"detail": "No active game"})),
        );
        routes.insert(
            ("POST", "/api/game/start"),
            (200, json!({"game_state": game_json(0)})),
        );
        let authority = FakeAuthority::start(routes).await;
        let client = authority.client();

        let state = client.get_current_game().await;

        assert_eq!(state, Some(portugal(0)));
        assert_eq!(
            client.store().message.get(),
            "Fill in all 1 countries that border Portugal!"
        );
        let paths: Vec<String> = authority.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/api/game/current", "/api/game/start"]);
    }

    /// Tests hint, reveal and suggestions endpoints
    #[tokio::test]
    async fn hint_reveal_and_suggestions() {
        let mut routes = Routes::new();
        routes.insert(
            ("GET", "/api/game/hint"),
            (200, json!({"hint": "One country has 5 letters"})),
        );
        routes.insert(
            ("GET", "/api/game/reveal"),
            (
                200,
                json!({"success": true, "revealed_answers": {"target_country": "Portugal"}}),
            ),
        );
        routes.insert(
            ("POST", "/api/game/suggestions"),
            (200, json!({"suggestions": ["Spain", "Sweden"]})),
        );
        let authority = FakeAuthority::start(routes).await;
        let client = authority.client();

        assert_eq!(
            client.get_hint().await.as_deref(),
            Some("One country has 5 letters")
        );
        assert_eq!(client.store().show_hint.get(), "One country has 5 letters");

        let answers = client.reveal_answers().await.unwrap();
        assert_eq!(answers, json!({"target_country": "Portugal"}));

        assert_eq!(
            client.get_suggestions("s", Some(2)).await,
            vec!["Spain", "Sweden"]
        );
        let suggest = authority
            .requests()
            .into_iter()
            .find(|r| r.path == "/api/game/suggestions")
            .unwrap();
        assert_eq!(suggest.body, json!({"query": "s", "limit": 2}));
    }
}

/// FAILURE HANDLING TESTS
mod failure_tests {
    use super::*;

    /// Tests that rejected requests map to the right error variants
    #[tokio::test]
    async fn status_codes_map_to_error_variants() {
        let mut routes = Routes::new();
        routes.insert(
            ("POST", "/api/game/update-field"),
            (400, json!({"detail": "Invalid field ID"})),
        );
        routes.insert(("GET", "/api/game/hint"), (200, json!({"unexpected": 1})));
        let authority = FakeAuthority::start(routes).await;
        let http = HttpAuthority::new(&authority.api_base()).unwrap();

        let rejected = http
            .update_field(&borders_shared::UpdateFieldRequest {
                field_id: 9,
                country_name: "Atlantis".to_string(),
            })
            .await
            .unwrap_err();
        match rejected {
            ClientError::Rejected { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Invalid field ID");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }

        let not_found = http.current_game().await.unwrap_err();
        assert!(not_found.is_not_found());

        let malformed = http.hint().await.unwrap_err();
        assert!(matches!(malformed, ClientError::Decode(_)));
    }

    /// Tests that failures keep the last good state and surface a message
    #[tokio::test]
    async fn failures_keep_last_known_state() {
        let mut routes = Routes::new();
        routes.insert(
            ("POST", "/api/game/start"),
            (500, json!({"detail": "No countries with borders available"})),
        );
        routes.insert(
            ("POST", "/api/game/update-field"),
            (400, json!({"detail": "No active game. Start a new game first."})),
        );
        routes.insert(("GET", "/api/game/reveal"), (400, json!({"detail": "No active game"})));
        routes.insert(("GET", "/api/game/hint"), (500, json!({"detail": "boom"})));
        let authority = FakeAuthority::start(routes).await;
        let client = authority.client();
        client.store().game_state.set(portugal(0));

        assert!(client.start_new_game().await.is_none());
        assert_eq!(client.store().game_state.get(), portugal(0));
        assert_eq!(
            client.store().message.get(),
            "Error starting game: authority rejected request (500): No countries with borders available"
        );
        assert!(!client.store().is_loading.get());

        assert!(client.update_field(0, "Spain", true).await.is_none());
        assert_eq!(client.store().game_state.get(), portugal(0));
        assert!(client.store().message.get().starts_with("Error updating field:"));

        assert!(client.reveal_answers().await.is_none());
        assert!(client
            .store()
            .message
            .get()
            .starts_with("Error revealing answers:"));

        assert!(client.get_hint().await.is_none());
        assert_eq!(client.store().show_hint.get(), NO_HINT_AVAILABLE);
    }

    /// Tests that an unreachable authority is reported, not raised
    #[tokio::test]
    async fn unreachable_authority() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = format!("http://{}/api", addr);
        let client = GameClient::new(
            Arc::new(HttpAuthority::new(&base).unwrap()),
            GameStore::new(),
            ClientConfig::new(base),
        );

        assert!(client.get_current_game().await.is_none());
        assert!(client.store().game_state.get().is_empty());
        assert!(client
            .store()
            .message
            .get()
            .starts_with("Error getting game state: request failed"));
    }
}

/// DEBOUNCE TESTS
mod debounce_tests {
    use super::*;

    fn update_routes() -> Routes {
        let mut routes = Routes::new();
        routes.insert(
            ("POST", "/api/game/update-field"),
            (200, json!({"game_state": game_json(0), "message": "Not a neighbour."})),
        );
        routes
    }

    fn sent_bodies(authority: &FakeAuthority) -> Vec<Value> {
        authority
            .requests()
            .into_iter()
            .filter(|r| r.path == "/api/game/update-field")
            .map(|r| r.body)
            .collect()
    }

    /// Tests that a typing burst produces a single request with the final text
    #[tokio::test]
    async fn typing_burst_sends_once() {
        let authority = FakeAuthority::start(update_routes()).await;
        let client = authority.client();

        for partial in ["S", "Sp", "Spa", "Spai"] {
            client.update_field(0, partial, false).await;
            sleep(Duration::from_millis(50)).await;
        }

        sleep(Duration::from_millis(600)).await;
        assert_eq!(
            sent_bodies(&authority),
            vec![json!({"field_id": 0, "country_name": "Spai"})]
        );
        assert_eq!(client.store().message.get(), "Not a neighbour.");
    }

    /// Tests that a commit right after typing only sends the commit
    #[tokio::test]
    async fn commit_cancels_typing() {
        let authority = FakeAuthority::start(update_routes()).await;
        let client = authority.client();

        client.update_field(5, "Fr", false).await;
        client.update_field(5, "France", true).await;

        sleep(Duration::from_millis(600)).await;
        assert_eq!(
            sent_bodies(&authority),
            vec![json!({"field_id": 5, "country_name": "France"})]
        );
    }

    /// Tests that settle flushes pending typing
    #[tokio::test]
    async fn settle_flushes_typing() {
        let authority = FakeAuthority::start(update_routes()).await;
        let client = authority.client();

        client.update_field(0, "", false).await;
        client.store().message.set("stale".to_string());
        client.coordinator().settle().await;

        assert_eq!(sent_bodies(&authority).len(), 1);
        assert_eq!(client.store().message.get(), "");
    }
}
