use crate::api::{ApiError, AppState};
use crate::clusterer::{marketing_strategies, summarize_clusters, ClusterSummary, MarketingStrategy};
use crate::customer::{Customer, NewCustomer};
use crate::export::{to_csv_string, CSV_FILENAME};
use crate::store::{CustomerFilters, CustomerStore, FilterQuery, ModelPerformance, Totals};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state
        .store
        .all_customers()
        .map_err(|e| ApiError::from_store(e, "Failed to fetch customers"))?;
    Ok(Json(customers))
}

pub(crate) async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<NewCustomer>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(new) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let created = state
        .store
        .create_customer(new)
        .map_err(|e| ApiError::from_store(e, "Failed to create customer"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

fn filtered(state: &AppState, query: &FilterQuery) -> Result<Vec<Customer>, ApiError> {
    let filters = CustomerFilters::parse(query)?;
    state
        .store
        .filtered_customers(&filters)
        .map_err(|e| ApiError::from_store(e, "Failed to fetch customers"))
}

pub(crate) async fn filtered_customers(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(filtered(&state, &query)?))
}

pub(crate) async fn download_filtered_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FilterQuery>,
) -> Result<Response, ApiError> {
    let customers = filtered(&state, &query)?;
    csv_response(&headers, &customers, "filtered-customer-data.csv")
}

pub(crate) async fn clusters(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClusterSummary>>, ApiError> {
    let summaries = state
        .store
        .cluster_summaries()
        .map_err(|e| ApiError::from_store(e, "Failed to fetch cluster analysis"))?;
    Ok(Json(summaries))
}

/// Summaries recomputed from the current (optionally filtered) customer set
pub(crate) async fn live_clusters(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<ClusterSummary>>, ApiError> {
    let customers = filtered(&state, &query)?;
    Ok(Json(summarize_clusters(&customers)))
}

pub(crate) async fn strategies() -> Json<&'static [MarketingStrategy]> {
    Json(marketing_strategies())
}

pub(crate) async fn model_performance(
    State(state): State<AppState>,
) -> Result<Json<ModelPerformance>, ApiError> {
    let perf = state
        .store
        .model_performance()
        .map_err(|e| ApiError::from_store(e, "Failed to fetch model performance data"))?;
    Ok(Json(perf))
}

pub(crate) async fn summary(State(state): State<AppState>) -> Result<Json<Totals>, ApiError> {
    let totals = state
        .store
        .totals()
        .map_err(|e| ApiError::from_store(e, "Failed to fetch summary statistics"))?;
    Ok(Json(totals))
}

pub(crate) async fn download_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let customers = state
        .store
        .all_customers()
        .map_err(|e| ApiError::from_store(e, "Failed to download CSV file"))?;
    csv_response(&headers, &customers, CSV_FILENAME)
}

fn csv_response(
    headers: &HeaderMap,
    customers: &[Customer],
    filename: &str,
) -> Result<Response, ApiError> {
    let body = to_csv_string(customers)?;
    let etag = format!("\"{}\"", hex::encode(Sha256::digest(body.as_bytes())));

    let not_modified = headers
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);

    let mut resp = if not_modified {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        (StatusCode::OK, body).into_response()
    };

    let resp_headers = resp.headers_mut();
    resp_headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    if let Ok(v) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename)) {
        resp_headers.insert(CONTENT_DISPOSITION, v);
    }
    if let Ok(v) = HeaderValue::from_str(&etag) {
        resp_headers.insert(ETAG, v);
    }
    Ok(resp)
}
