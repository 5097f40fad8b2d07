//! Read-only HTTP surface over the simulation. One background task owns the
//! engine and resort exclusively; after each successful tick it swaps a
//! freshly assembled aggregate into shared state, so readers either see a
//! whole tick's effects or none of them.

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use rand::Rng;
use serde_json::json;
use thiserror::Error;
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::{
    config::ResortConfig,
    engine::Engine,
    models::{LiftData, ResortState, SafetyData, SlopeData, WeatherData},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("lift '{0}' not found")]
    LiftNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::LiftNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Clone)]
struct AppState {
    latest: Arc<Mutex<ResortState>>,
    broadcaster: broadcast::Sender<String>,
}

impl AppState {
    fn current(&self) -> ResortState {
        self.latest.lock().expect("state lock poisoned").clone()
    }
}

pub async fn run(config: ResortConfig) -> Result<()> {
    let mut engine = Engine::standard(&config);
    let mut resort = engine.build_resort(&config);

    let (tx, _) = broadcast::channel::<String>(64);
    let latest = Arc::new(Mutex::new(resort.state()));

    let cadence = config.cadence.clone();
    let latest_for_sim = latest.clone();
    let tx_for_sim = tx.clone();
    tokio::spawn(async move {
        loop {
            match engine.tick(&mut resort) {
                Ok(()) => {
                    let state = resort.state();
                    log::debug!(
                        "tick {} complete ({} incidents on record)",
                        resort.tick(),
                        state.safety.incident_reports.len()
                    );
                    if let Ok(payload) = serde_json::to_string(&state) {
                        let _ = tx_for_sim.send(payload);
                    }
                    *latest_for_sim.lock().expect("state lock poisoned") = state;
                    let interval = {
                        let mut rng = rand::thread_rng();
                        rng.gen_range(cadence.min_interval_secs..=cadence.max_interval_secs)
                    };
                    tokio::time::sleep(Duration::from_secs_f64(interval)).await;
                }
                Err(err) => {
                    // Last published state stays servable; retry after a
                    // short backoff.
                    log::error!("tick failed: {err:#}");
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
    });

    let state = Arc::new(AppState {
        latest,
        broadcaster: tx,
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| anyhow::anyhow!("invalid listen address: {err}"))?;

    log::info!(
        "resort '{}' serving on http://{} (seed {})",
        config.name,
        addr,
        config.seed
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/current-state", get(current_state))
        .route("/api/current-state/weather", get(weather))
        .route("/api/current-state/lifts", get(lifts))
        .route("/api/current-state/safety", get(safety))
        .route("/api/current-state/slopes", get(slopes))
        .route("/api/weather", get(weather))
        .route("/api/lifts", get(lifts))
        .route("/api/lifts/:lift_id", get(lift_by_id))
        .route("/api/safety", get(safety))
        .route("/api/slopes", get(slopes))
        .route("/api/events", get(stream_events))
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    log::info!("shutting down");
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "alpinegen" }))
}

async fn current_state(State(state): State<Arc<AppState>>) -> Json<ResortState> {
    Json(state.current())
}

async fn weather(State(state): State<Arc<AppState>>) -> Json<WeatherData> {
    Json(state.current().weather)
}

async fn lifts(State(state): State<Arc<AppState>>) -> Json<Vec<LiftData>> {
    Json(state.current().lifts)
}

async fn lift_by_id(
    State(state): State<Arc<AppState>>,
    Path(lift_id): Path<String>,
) -> Result<Json<LiftData>, ApiError> {
    state
        .current()
        .lifts
        .into_iter()
        .find(|lift| lift.lift_id == lift_id)
        .map(Json)
        .ok_or(ApiError::LiftNotFound(lift_id))
}

async fn safety(State(state): State<Arc<AppState>>) -> Json<SafetyData> {
    Json(state.current().safety)
}

async fn slopes(State(state): State<Arc<AppState>>) -> Json<Vec<SlopeData>> {
    Json(state.current().slopes)
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
