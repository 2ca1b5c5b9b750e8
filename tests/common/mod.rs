#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use url::Url;

use swapi_contract::HttpTransport;

/// In-process stand-in for the SWAPI routes the suite touches
pub struct StubServer {
    pub base_url: Url,
    handle: JoinHandle<()>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone, Default)]
struct StubState {
    flaky_hits: Arc<AtomicUsize>,
}

pub async fn spawn_stub() -> Result<StubServer> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind stub listener")?;
    let addr = listener.local_addr()?;
    let base_url = Url::parse(&format!("http://{}/api", addr))?;

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app()).await;
    });

    Ok(StubServer { base_url, handle })
}

/// Base URL on a port nothing listens on
pub fn refused_base_url() -> Result<Url> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(Url::parse(&format!("http://127.0.0.1:{}/api", port))?)
}

/// Transport that never routes loopback traffic through an environment proxy
pub fn transport_with_timeout(timeout: Duration) -> Result<HttpTransport> {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .user_agent("swapi-contract-tests")
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(HttpTransport::with_client(client))
}

pub fn transport() -> Result<HttpTransport> {
    transport_with_timeout(Duration::from_secs(5))
}

fn app() -> Router {
    Router::new()
        .route("/api/people/:id", get(person))
        .route("/api/planets/:id", get(planet))
        .route("/api/starships/", get(search_starships))
        .route("/api/starships/:id", get(starship))
        .route("/api/films/:id", get(film))
        .route("/api/species/:id", get(species))
        .route("/api/slow", get(slow))
        .route("/api/flaky", get(flaky))
        .route("/api/plain", get(|| async { "not json" }))
        .route("/api/old-films/:id", get(moved_film))
        .with_state(StubState::default())
}

fn found(body: Value) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" }))).into_response()
}

async fn person(Path(id): Path<u32>) -> Response {
    match id {
        1 => found(json!({
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "films": ["https://swapi.dev/api/films/1/", "https://swapi.dev/api/films/2/"],
            "vehicles": ["https://swapi.dev/api/vehicles/14/", "https://swapi.dev/api/vehicles/30/"],
            "starships": ["https://swapi.dev/api/starships/12/"]
        })),
        _ => not_found(),
    }
}

async fn planet(Path(id): Path<u32>) -> Response {
    match id {
        1 => found(json!({
            "name": "Tatooine",
            "climate": "arid",
            "terrain": "desert",
            "population": "200000"
        })),
        _ => not_found(),
    }
}

fn starships() -> Vec<Value> {
    vec![
        json!({"name": "Millennium Falcon", "model": "YT-1300 light freighter", "manufacturer": "Corellian Engineering Corporation"}),
        json!({"name": "X-wing", "model": "T-65 X-wing", "manufacturer": "Incom Corporation"}),
        json!({"name": "A-wing", "model": "RZ-1 A-wing Interceptor", "manufacturer": "Alliance Underground Engineering"}),
        json!({"name": "B-wing", "model": "A/SF-01 B-wing starfighter", "manufacturer": "Slayn & Korpil"}),
    ]
}

async fn starship(Path(id): Path<u32>) -> Response {
    match id {
        10 => found(starships().remove(0)),
        _ => not_found(),
    }
}

async fn search_starships(Query(params): Query<std::collections::HashMap<String, String>>) -> Response {
    let term = params.get("search").map(|s| s.to_lowercase()).unwrap_or_default();
    let results: Vec<Value> = starships()
        .into_iter()
        .filter(|ship| {
            ["name", "model"].iter().any(|field| {
                ship[*field]
                    .as_str()
                    .map(|text| text.to_lowercase().contains(&term))
                    .unwrap_or(false)
            })
        })
        .collect();

    found(json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results
    }))
}

async fn film(Path(id): Path<u32>) -> Response {
    match id {
        1 => found(json!({
            "title": "A New Hope",
            "episode_id": 4,
            "director": "George Lucas",
            "producer": "Gary Kurtz, Rick McCallum"
        })),
        _ => not_found(),
    }
}

async fn species(Path(id): Path<u32>) -> Response {
    match id {
        1 => found(json!({
            "name": "Human",
            "classification": "mammal",
            "designation": "sentient",
            "average_height": "180",
            "skin_colors": "caucasian, black, asian, hispanic",
            "hair_colors": "blonde, brown, black, red",
            "eye_colors": "brown, blue, green, hazel, grey, amber",
            "average_lifespan": "120",
            "language": "Galactic Basic",
            "people": ["https://swapi.dev/api/people/66/"],
            "films": ["https://swapi.dev/api/films/1/"]
        })),
        _ => not_found(),
    }
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    found(json!({ "name": "late" }))
}

async fn flaky(State(state): State<StubState>) -> Response {
    let hits = state.flaky_hits.fetch_add(1, Ordering::SeqCst);
    found(json!({ "hits": hits }))
}

async fn moved_film(Path(id): Path<u32>) -> Redirect {
    Redirect::permanent(&format!("/api/films/{id}"))
}
