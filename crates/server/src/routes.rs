//! HTTP routes.
//!
//! - `POST /solve` solves a request and records it in the history
//! - `GET /historial` lists the history, newest first
//! - `POST /borrar_historial` clears the history
//! - anything else is served from the static directory, if configured

use std::{path::PathBuf, sync::Arc};

use serde::Serialize;
use tracing::{error, info, warn};
use warp::{
    Filter, Rejection, Reply,
    filters::BoxedFilter,
    http::StatusCode,
    hyper::body::Bytes,
    reply::{Response, json, with_status},
};

use crate::{
    history::{HistoryEntry, Ledger},
    solve::{SolveError, SolvePayload, SolveRequest, SolveResult, solve},
};

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Builds every route, with request tracing.
pub fn app(
    ledger: Arc<dyn Ledger>,
    static_dir: Option<PathBuf>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone + Send + Sync + 'static {
    let routes = match static_dir {
        Some(dir) => api(ledger)
            .or(warp::fs::dir(dir).map(Reply::into_response))
            .unify()
            .boxed(),
        None => api(ledger),
    };
    routes.with(warp::trace::request())
}

/// Builds the JSON API routes.
pub fn api(ledger: Arc<dyn Ledger>) -> BoxedFilter<(Response,)> {
    let solve = warp::path("solve")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_ledger(Arc::clone(&ledger)))
        .map(|body: Bytes, ledger: Arc<dyn Ledger>| handle_solve(&body, ledger.as_ref()));

    let history = warp::path("historial")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_ledger(Arc::clone(&ledger)))
        .map(|ledger: Arc<dyn Ledger>| handle_history(ledger.as_ref()));

    let clear = warp::path("borrar_historial")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_ledger(ledger))
        .map(|ledger: Arc<dyn Ledger>| handle_clear(ledger.as_ref()));

    solve.or(history).unify().or(clear).unify().boxed()
}

fn with_ledger(
    ledger: Arc<dyn Ledger>,
) -> impl Filter<Extract = (Arc<dyn Ledger>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&ledger))
}

fn handle_solve(body: &[u8], ledger: &dyn Ledger) -> Response {
    match solve_and_record(body, ledger) {
        Ok(result) => json(&result).into_response(),
        Err(error) => {
            warn!(%error, "solve failed");
            error_response(error.to_string(), StatusCode::BAD_REQUEST)
        }
    }
}

/// Parses, solves and records one request.
///
/// A history write failure is logged and does not fail the solve.
fn solve_and_record(body: &[u8], ledger: &dyn Ledger) -> Result<SolveResult, SolveError> {
    let payload: SolvePayload = serde_json::from_slice(body)
        .map_err(|error| SolveError::InvalidRequest(format!("malformed JSON: {error}")))?;
    let request = SolveRequest::try_from(payload)?;
    let result = solve(&request)?;

    info!(
        expression = %request.expression,
        method = %result.method,
        iterations = result.iterations,
        root = result.root,
        "solved"
    );

    let entry = HistoryEntry::now(request.expression, result.method, result.root);
    if let Err(error) = ledger.append(entry) {
        error!(%error, "failed to record solve in history");
    }
    Ok(result)
}

fn handle_history(ledger: &dyn Ledger) -> Response {
    match ledger.list() {
        Ok(entries) => json(&entries).into_response(),
        Err(error) => {
            error!(%error, "failed to read history");
            error_response(error.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn handle_clear(ledger: &dyn Ledger) -> Response {
    match ledger.clear() {
        Ok(()) => {
            info!("history cleared");
            json(&Vec::<HistoryEntry>::new()).into_response()
        }
        Err(error) => {
            error!(%error, "failed to clear history");
            error_response(error.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn error_response(error: String, status: StatusCode) -> Response {
    with_status(json(&ErrorBody { error }), status).into_response()
}
