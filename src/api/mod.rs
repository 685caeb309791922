mod cli;
mod error;
mod payload;

use anyhow::Context;
use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::core::{Recommendation, recommend};

pub use cli::{
    Cli, CliInvestmentGoal, CliInvestmentHorizon, CliRiskTolerance, Command, LogFormat,
    RecommendArgs, ServeArgs,
};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use payload::{ProfilePayload, validate_profile};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Installs the global subscriber. Logs go to stderr so `recommend` output
/// on stdout stays machine-readable.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);
    if origin.trim() == "*" {
        return Ok(layer.allow_origin(Any));
    }
    let origin = HeaderValue::from_str(origin.trim())
        .with_context(|| format!("invalid CORS origin `{origin}`"))?;
    Ok(layer.allow_origin(origin))
}

pub fn app_router(args: &ServeArgs) -> anyhow::Result<Router> {
    let router = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/profile/submit", post(submit_profile_handler))
        .fallback(not_found_handler)
        .layer(cors_layer(&args.cors_origin)?)
        .layer(TraceLayer::new_for_http());
    Ok(router)
}

pub async fn run_http_server(args: ServeArgs) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let app = app_router(&args)?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, cors_origin = %args.cors_origin, "wealthplan API listening");
    info!("Local access: http://127.0.0.1:{}/api/health", args.port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Validates CLI arguments and derives a recommendation for them.
pub fn run_recommend(args: RecommendArgs) -> ApiResult<Recommendation> {
    let profile = args.into_profile()?;
    Ok(recommend(&profile)?)
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn submit_profile_handler(payload: Result<Json<ProfilePayload>, JsonRejection>) -> Response {
    match payload.map_err(ApiError::from).and_then(|Json(payload)| submit_profile(payload)) {
        Ok(recommendation) => json_response(StatusCode::OK, recommendation),
        Err(err) => err.into_response(),
    }
}

fn submit_profile(payload: ProfilePayload) -> ApiResult<Recommendation> {
    let profile = payload.into_profile()?;
    let recommendation = recommend(&profile)?;
    info!(
        age = profile.age,
        risk = %profile.risk_tolerance,
        goal = %profile.investment_goal,
        horizon = %profile.investment_horizon,
        health_score = recommendation.health_score,
        "recommendation derived"
    );
    Ok(recommendation)
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
