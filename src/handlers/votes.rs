use crate::error::GatewayError;
use crate::extract::VoteResult;
use crate::metrics::{FETCH_LATENCY, NAMES_RETURNED, RATE_LIMITED, REQUEST_TOTAL, UPSTREAM_FAILURES};
use crate::models::{VoteQuery, VoteRequest, parse_vote_id};
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        ConnectInfo, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

const JSON_UTF8: &str = "application/json; charset=utf-8";

// GET /vote?id=...
pub async fn get_votes_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    query: Result<Query<VoteQuery>, QueryRejection>,
) -> Result<Response, GatewayError> {
    admit(&state, addr)?;

    let Query(query) = query.map_err(|e| GatewayError::BadInput(e.body_text()))?;
    let vote_id = parse_vote_id(query.id.as_deref())?;

    respond(&state, vote_id).await
}

// POST /vote with {"id": "..."}; an `id` query parameter takes precedence
pub async fn post_votes_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    query: Result<Query<VoteQuery>, QueryRejection>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    admit(&state, addr)?;

    let raw = match query.ok().and_then(|Query(q)| q.id) {
        Some(id) => Some(id),
        None => {
            let Json(req) = body.map_err(|e| GatewayError::BadInput(e.body_text()))?;
            req.id
        }
    };
    let vote_id = parse_vote_id(raw.as_deref())?;

    respond(&state, vote_id).await
}

fn admit(state: &AppState, addr: SocketAddr) -> Result<(), GatewayError> {
    REQUEST_TOTAL.inc();

    let client = addr.ip().to_string();
    if !state.rate_limiter.admit(&client) {
        RATE_LIMITED.inc();
        info!(%client, limit = state.rate_limiter.limit(), "Request rate limited");
        return Err(GatewayError::RateLimited);
    }
    Ok(())
}

async fn respond(state: &AppState, vote_id: u64) -> Result<Response, GatewayError> {
    let votes = fetch_votes(state, vote_id).await?;

    let json = serde_json::to_vec(&votes).map_err(|e| {
        error!(vote_id, error = %e, "Error encoding votes to JSON");
        GatewayError::Internal(e.to_string())
    })?;

    Ok(([(header::CONTENT_TYPE, JSON_UTF8)], json).into_response())
}

/// Fetch the results page for `vote_id` and extract its vote groups.
pub async fn fetch_votes(state: &AppState, vote_id: u64) -> Result<VoteResult, GatewayError> {
    let start_time = Instant::now();

    let page = state.source.fetch_page(vote_id).await.map_err(|e| {
        UPSTREAM_FAILURES.inc();
        warn!(vote_id, error = %e, "Error fetching votes");
        GatewayError::Upstream(e)
    })?;

    // parsed document stays local, it is not Send
    let votes = state.extractor.extract_html(&page);

    FETCH_LATENCY.observe(start_time.elapsed().as_secs_f64());
    let names: usize = votes.values().map(Vec::len).sum();
    NAMES_RETURNED.observe(names as f64);
    debug!(vote_id, categories = votes.len(), names, "Extracted votes");

    Ok(votes)
}
