//! HTTP surface: `/metrics` scrapes, the `/` site index, and 404 for the rest.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use unifi_sdn_core::{Controller, CoreError, Metrics};

use crate::collector;
use crate::index::{self, ControllerSites};

/// Header Prometheus sets to announce its scrape deadline.
pub const SCRAPE_TIMEOUT_HEADER: &str = "x-prometheus-scrape-timeout-seconds";

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    controllers: Arc<[Controller]>,
}

impl AppState {
    pub fn new(controllers: Vec<Controller>) -> Self {
        Self {
            controllers: controllers.into(),
        }
    }

    fn controller(&self, target: &str) -> Option<&Controller> {
        self.controllers.iter().find(|c| c.target_name() == target)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/metrics", get(handle_metrics))
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 page not found") })
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

// ── /metrics ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ScrapeParams {
    target: Option<String>,
    site: Option<String>,
}

#[derive(Debug, Error)]
enum ScrapeFailure {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("collection exceeded scrape timeout of {0:?}")]
    TimedOut(Duration),
}

fn scrape_timeout(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(SCRAPE_TIMEOUT_HEADER)?.to_str().ok()?;
    let secs: f64 = raw.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok().filter(|d| !d.is_zero())
}

async fn collect(
    controller: &Controller,
    site: &str,
    deadline: Option<Duration>,
) -> Result<Metrics, ScrapeFailure> {
    let Some(limit) = deadline else {
        return Ok(controller.metrics(site).await?);
    };
    match tokio::time::timeout(limit, controller.metrics(site)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(ScrapeFailure::TimedOut(limit)),
    }
}

fn missing(param: &str) -> Response {
    (StatusCode::BAD_REQUEST, format!("{param} parameter missing")).into_response()
}

async fn handle_metrics(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
    headers: HeaderMap,
) -> Response {
    let Some(target) = params.target.filter(|t| !t.is_empty()) else {
        return missing("target");
    };
    let Some(site) = params.site.filter(|s| !s.is_empty()) else {
        return missing("site");
    };
    let Some(controller) = state.controller(&target) else {
        return (StatusCode::NOT_FOUND, "configuration not found").into_response();
    };

    debug!(%target, %site, "scraping");
    let snapshot = match collect(controller, &site, scrape_timeout(&headers)).await {
        Ok(metrics) => Some(metrics),
        Err(ScrapeFailure::Core(e)) if e.is_not_found() => {
            return (StatusCode::NOT_FOUND, e.to_string()).into_response();
        }
        Err(e) => {
            warn!(%target, %site, error = %e, "fetching failed");
            None
        }
    };

    match collector::render(snapshot.as_ref()) {
        Ok(body) => ([(header::CONTENT_TYPE, collector::content_type())], body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("encoding metrics failed: {e}"),
        )
            .into_response(),
    }
}

// ── / ───────────────────────────────────────────────────────────────

async fn handle_index(State(state): State<AppState>) -> Response {
    let mut listing = Vec::with_capacity(state.controllers.len());
    for controller in state.controllers.iter() {
        match controller.sites().await {
            Ok(sites) => listing.push(ControllerSites {
                target: controller.target_name().to_owned(),
                sites,
            }),
            Err(e) => {
                warn!(target = controller.target_name(), error = %e, "fetching sites failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!(
                        "error fetching sites for controller {}: {e}",
                        controller.target_name()
                    ),
                )
                    .into_response();
            }
        }
    }
    Html(index::render(listing)).into_response()
}
