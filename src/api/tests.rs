use super::*;
use crate::clusterer::ClusterSummary;
use crate::customer::{Customer, NewCustomer};
use crate::export::{parse_csv, CSV_HEADER};
use crate::store::{CustomerStore, MemoryStore, StoreError};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

/// A store whose backing storage is always unavailable
struct BrokenStore;

impl CustomerStore for BrokenStore {
    fn all_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Err(StoreError::Storage("disk on fire".to_string()))
    }

    fn create_customer(&self, _customer: NewCustomer) -> Result<Customer, StoreError> {
        Err(StoreError::Storage("disk on fire".to_string()))
    }

    fn cluster_summaries(&self) -> Result<Vec<ClusterSummary>, StoreError> {
        Err(StoreError::Storage("disk on fire".to_string()))
    }
}

fn app() -> Router {
    build_router(AppState::new(MemoryStore::seeded(42)))
}

async fn get(router: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

async fn body_bytes(resp: Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

#[tokio::test]
async fn test_list_customers() {
    let resp = get(app(), "/customers").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let customers = json.as_array().unwrap();
    assert_eq!(customers.len(), 200);
    assert!(customers[0]["customerId"].is_number());
    assert!(customers[0]["spendingScore"].is_number());
}

#[tokio::test]
async fn test_api_prefix_is_mounted() {
    let resp = get(app(), "/api/summary").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_filtered_customers() {
    let resp = get(app(), "/customers/filtered?ageGroup=31-45&gender=male&cluster=0").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    for c in json.as_array().unwrap() {
        let age = c["age"].as_u64().unwrap();
        assert!((31..=45).contains(&age));
        assert_eq!(c["gender"], "Male");
        assert_eq!(c["cluster"], 0);
    }
}

#[tokio::test]
async fn test_filtered_rejects_bad_cluster() {
    let resp = get(app(), "/customers/filtered?cluster=abc").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_filtered_rejects_bad_age_group() {
    let resp = get(app(), "/customers/filtered?ageGroup=teen").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clusters_endpoint() {
    let resp = get(app(), "/clusters").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let clusters = json.as_array().unwrap();
    assert_eq!(clusters.len(), 5);
    assert_eq!(clusters[0]["cluster"], 0);
    assert_eq!(clusters[0]["label"], "Careful Spenders");
    assert_eq!(clusters[4]["size"], 81);
    assert!(clusters[0]["avgAge"].is_number());
}

#[tokio::test]
async fn test_live_clusters_follow_filters() {
    let resp = get(app(), "/clusters/live?cluster=4").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let clusters = json.as_array().unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0]["cluster"], 4);
    assert_eq!(clusters[0]["size"], 81);
    assert_eq!(clusters[0]["label"], "Other");
}

#[tokio::test]
async fn test_model_performance_shape() {
    let json = body_json(get(app(), "/model-performance").await).await;
    assert_eq!(json["elbowData"][0], json!({"k": 1, "sse": 500.0}));
    assert_eq!(json["silhouetteData"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_summary_shape() {
    let json = body_json(get(app(), "/summary").await).await;
    assert_eq!(json["totalCustomers"], 200);
    assert_eq!(json["totalClusters"], 5);

    let avg_income = json["avgIncome"].as_f64().unwrap();
    assert_eq!(avg_income, (avg_income * 10.0).round() / 10.0);
}

#[tokio::test]
async fn test_summary_on_empty_store() {
    let router = build_router(AppState::new(MemoryStore::new(vec![]).unwrap()));
    let json = body_json(get(router, "/summary").await).await;
    assert_eq!(
        json,
        json!({"totalCustomers": 0, "avgIncome": 0.0, "avgSpending": 0.0, "totalClusters": 0})
    );
}

#[tokio::test]
async fn test_strategies() {
    let json = body_json(get(app(), "/strategies").await).await;
    assert_eq!(json.as_array().unwrap().len(), 5);
    assert_eq!(json[3]["title"], "Premium Customers");
}

#[tokio::test]
async fn test_download_csv() {
    let resp = get(app(), "/download-csv").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("Mall_Customers.csv"));
    assert!(resp.headers().contains_key(header::ETAG));

    let body = String::from_utf8(body_bytes(resp).await).unwrap();
    assert_eq!(body.lines().next(), Some(CSV_HEADER));
    let parsed = parse_csv(&body).unwrap();
    assert_eq!(
        parsed,
        MemoryStore::seeded(42).all_customers().unwrap()
    );
}

#[tokio::test]
async fn test_download_csv_etag_not_modified() {
    let etag = get(app(), "/download-csv").await.headers()[header::ETAG].clone();

    let request = Request::builder()
        .uri("/download-csv")
        .header(header::IF_NONE_MATCH, etag)
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_download_filtered_csv() {
    let resp = get(app(), "/customers/filtered/download-csv?cluster=1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(body_bytes(resp).await).unwrap();
    let parsed = parse_csv(&body).unwrap();
    assert_eq!(parsed.len(), 22);
    assert!(parsed.iter().all(|c| c.cluster == Some(1)));
}

#[tokio::test]
async fn test_create_customer() {
    let router = app();
    let request = Request::builder()
        .method("POST")
        .uri("/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"customerId":900,"gender":"Female","age":28,"annualIncome":31.5,"spendingScore":77}"#,
        ))
        .unwrap();
    let resp = router.clone().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    assert_eq!(json["id"], 201);
    assert!(json["cluster"].is_null());

    let all = body_json(get(router, "/customers").await).await;
    assert_eq!(all.as_array().unwrap().len(), 201);
}

#[tokio::test]
async fn test_create_customer_validation() {
    let bad_score = Request::builder()
        .method("POST")
        .uri("/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"customerId":1,"gender":"Male","age":28,"annualIncome":31.5,"spendingScore":170}"#,
        ))
        .unwrap();
    let resp = app().oneshot(bad_score).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method("POST")
        .uri("/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app().oneshot(malformed).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn test_storage_failure_is_500() {
    let router = build_router(AppState::new(BrokenStore));
    for uri in ["/customers", "/clusters", "/summary", "/download-csv"] {
        let resp = get(router.clone(), uri).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        let json = body_json(resp).await;
        let message = json["error"].as_str().unwrap();
        assert!(!message.contains("disk on fire"));
    }
}

#[tokio::test]
async fn test_request_id_propagated_or_generated() {
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "req-123")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();
    assert_eq!(resp.headers()[REQUEST_ID_HEADER], "req-123");

    let resp = get(app(), "/health").await;
    let generated = resp.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let resp = get(app(), "/nope").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
