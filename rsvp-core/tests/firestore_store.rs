//! FirestoreStore against an in-process stand-in for the Firestore REST API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use rsvp_core::config::FirestoreConfig;
use rsvp_core::store::FirestoreStore;
use rsvp_core::{NewRsvp, RsvpError, RsvpService, RsvpStore};

const API_KEY: &str = "test-key";

#[derive(Clone, Default)]
struct FakeFirestore {
    documents: Arc<Mutex<Vec<Value>>>,
    queries: Arc<Mutex<Vec<Value>>>,
}

fn denied() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": {
                "code": 403,
                "message": "Missing or insufficient permissions.",
                "status": "PERMISSION_DENIED"
            }
        })),
    )
        .into_response()
}

async fn create_document(
    State(fake): State<FakeFirestore>,
    Path((project, database, collection)): Path<(String, String, String)>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return denied();
    }

    let mut documents = fake.documents.lock().unwrap();
    let id = format!("doc{:03}", documents.len() + 1);
    let document = json!({
        "name": format!("projects/{project}/databases/{database}/documents/{collection}/{id}"),
        "fields": body["fields"],
        "createTime": "2025-04-01T12:00:00.000000Z",
        "updateTime": "2025-04-01T12:00:00.000000Z"
    });
    documents.push(document.clone());
    Json(document).into_response()
}

async fn run_query(
    State(fake): State<FakeFirestore>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return denied();
    }
    fake.queries.lock().unwrap().push(body);

    let mut documents = fake.documents.lock().unwrap().clone();
    if documents.is_empty() {
        return Json(json!([{ "readTime": "2025-04-01T12:00:00.000000Z" }])).into_response();
    }

    documents.sort_by(|a, b| {
        let key = |d: &Value| d["fields"]["submittedAt"]["stringValue"].as_str().map(String::from);
        key(b).cmp(&key(a))
    });
    let rows: Vec<Value> = documents
        .into_iter()
        .map(|document| json!({ "document": document, "readTime": "2025-04-01T12:00:01.000000Z" }))
        .collect();
    Json(Value::Array(rows)).into_response()
}

async fn serve(fake: FakeFirestore) -> String {
    let app = Router::new()
        .route(
            "/v1/projects/{project}/databases/{database}/documents:runQuery",
            post(run_query),
        )
        .route(
            "/v1/projects/{project}/databases/{database}/documents/{collection}",
            post(create_document),
        )
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn config(base_url: String, api_key: &str) -> FirestoreConfig {
    let mut config = FirestoreConfig::new("easter-2025");
    config.base_url = base_url;
    config.api_key = Some(api_key.to_string());
    config
}

fn input(name: &str, attendees: i64) -> NewRsvp {
    NewRsvp {
        name: Some(name.to_string()),
        email: Some(format!("{}@x.com", name.to_lowercase())),
        attendees: Some(attendees),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_empty_collection_lists_nothing() {
    let base_url = serve(FakeFirestore::default()).await;
    let store = FirestoreStore::new(config(base_url, API_KEY)).unwrap();

    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_returns_assigned_id() {
    let fake = FakeFirestore::default();
    let base_url = serve(fake.clone()).await;
    let store = FirestoreStore::new(config(base_url, API_KEY)).unwrap();
    let service = RsvpService::new(Arc::new(store));

    let stored = service.submit_rsvp(input("Maria", 3)).await.unwrap();

    assert_eq!(stored.id.as_deref(), Some("doc001"));
    assert_eq!(stored.name, "Maria");
    assert_eq!(stored.attendees, 3);

    let documents = fake.documents.lock().unwrap();
    assert_eq!(documents[0]["fields"]["attendees"]["integerValue"], "3");
    assert!(documents[0]["fields"]["submittedAt"]["stringValue"].is_string());
}

#[tokio::test]
async fn test_list_orders_by_submitted_at_descending() {
    let fake = FakeFirestore::default();
    let base_url = serve(fake.clone()).await;
    let store = FirestoreStore::new(config(base_url, API_KEY)).unwrap();
    let service = RsvpService::new(Arc::new(store));

    for name in ["A", "B", "C"] {
        service.submit_rsvp(input(name, 1)).await.unwrap();
    }

    let listed = service.list_rsvps().await.unwrap();
    let names: Vec<_> = listed.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["C", "B", "A"]);
    assert!(listed.iter().all(|r| r.id.is_some()));

    let queries = fake.queries.lock().unwrap();
    let query = &queries[0]["structuredQuery"];
    assert_eq!(query["from"][0]["collectionId"], "rsvps");
    assert_eq!(query["orderBy"][0]["field"]["fieldPath"], "submittedAt");
    assert_eq!(query["orderBy"][0]["direction"], "DESCENDING");
}

#[tokio::test]
async fn test_rejected_request_is_storage_error() {
    let fake = FakeFirestore::default();
    let base_url = serve(fake.clone()).await;
    let store = FirestoreStore::new(config(base_url, "wrong-key")).unwrap();

    let err = store.list_all().await.unwrap_err();
    match err {
        RsvpError::Storage(message) => {
            assert!(message.contains("403"));
            assert!(message.contains("PERMISSION_DENIED"));
        }
        other => panic!("expected storage error, got {other:?}"),
    }

    let service = RsvpService::new(Arc::new(store));
    assert!(service.submit_rsvp(input("Maria", 1)).await.is_err());
    assert!(fake.documents.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_service_is_storage_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = FirestoreStore::new(config(format!("http://{addr}/v1"), API_KEY)).unwrap();
    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err, RsvpError::Storage(_)));
}
