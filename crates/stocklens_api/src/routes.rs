//! HTTP routing for the `/api/v1` surface.
//!
//! # Responsibility
//! - Map URLs onto lookup service calls.
//! - Turn every outcome, including extractor rejections, into an envelope.
//!
//! # Invariants
//! - Matched routes always answer HTTP 200; the envelope code carries the
//!   outcome.
//! - Unknown routes answer HTTP 404 with an envelope body.
//! - Known routes hit with an unsupported method answer HTTP 405 with an
//!   envelope body.

use crate::envelope::ApiResult;
use crate::state::AppState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::info;
use serde::Deserialize;
use std::time::Instant;
use stocklens_core::{StockDetail, StockSummary};

pub const API_PREFIX: &str = "/api/v1";
pub const NO_MATCH_MSG: &str = "no matching stocks found";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Keyword matched against symbol and name.
    pub q: Option<String>,
}

/// Builds the application router over shared state.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/search", get(search))
        .route("/stocks/sector/:sector", get(stocks_by_sector))
        .route("/stocks/:symbol", get(stock_details))
        .route("/stocks/:symbol/exists", get(stock_exists))
        .method_not_allowed_fallback(method_not_allowed);

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(unknown_route)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<StockSummary>> {
    let keyword = match params {
        Ok(Query(params)) => params.q,
        Err(rejection) => return ApiResult::bad_request(rejection.body_text()),
    };
    info!("event=search module=api status=start keyword={keyword:?}");

    match state
        .with_service(move |service| service.search(keyword.as_deref()))
        .await
    {
        Ok(results) if results.is_empty() => ApiResult::success_with_message(NO_MATCH_MSG, results),
        Ok(results) => ApiResult::success(results),
        Err(err) => err.into_envelope("search"),
    }
}

async fn stock_details(
    State(state): State<AppState>,
    symbol: Result<Path<String>, PathRejection>,
) -> ApiResult<StockDetail> {
    let symbol = match symbol {
        Ok(Path(symbol)) => symbol,
        Err(rejection) => return ApiResult::bad_request(rejection.body_text()),
    };
    info!("event=stock_detail module=api status=start symbol={symbol}");

    match state
        .with_service(move |service| service.get_stock_details(Some(symbol.as_str())))
        .await
    {
        Ok(details) => ApiResult::success(details),
        Err(err) => err.into_envelope("stock_detail"),
    }
}

async fn stock_exists(
    State(state): State<AppState>,
    symbol: Result<Path<String>, PathRejection>,
) -> ApiResult<bool> {
    let symbol = match symbol {
        Ok(Path(symbol)) => symbol,
        Err(rejection) => return ApiResult::bad_request(rejection.body_text()),
    };
    info!("event=stock_exists module=api status=start symbol={symbol}");

    match state
        .with_service(move |service| service.exists(&symbol))
        .await
    {
        Ok(exists) => ApiResult::success(exists),
        Err(err) => err.into_envelope("stock_exists"),
    }
}

async fn stocks_by_sector(
    State(state): State<AppState>,
    sector: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<StockSummary>> {
    let sector = match sector {
        Ok(Path(sector)) => sector,
        Err(rejection) => return ApiResult::bad_request(rejection.body_text()),
    };
    info!("event=stock_sector module=api status=start sector={sector}");

    match state
        .with_service(move |service| service.find_by_sector(&sector))
        .await
    {
        Ok(stocks) => ApiResult::success(stocks),
        Err(err) => err.into_envelope("stock_sector"),
    }
}

async fn unknown_route(request: Request) -> Response {
    let envelope = ApiResult::<()>::bad_request(format!(
        "no route for {} {}",
        request.method(),
        request.uri().path()
    ));
    (StatusCode::NOT_FOUND, envelope).into_response()
}

async fn method_not_allowed(request: Request) -> Response {
    let envelope = ApiResult::<()>::bad_request(format!(
        "method {} not allowed for {}",
        request.method(),
        request.uri().path()
    ));
    (StatusCode::METHOD_NOT_ALLOWED, envelope).into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api status={} method={method} path={path} duration_ms={}",
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
