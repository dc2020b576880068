use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use stockroom_core::ProductStore;
use stockroom_db::{Database, DbConfig, SqliteProductStore};
use stockroom_server::http::{HttpHandle, HttpServer};

struct TestServer {
    base_url: String,
    handle: Option<HttpHandle>,
    client: reqwest::Client,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        // File database so concurrent requests get separate connections
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("api.db")))
            .await
            .unwrap();
        let store: Arc<dyn ProductStore> = Arc::new(SqliteProductStore::new(&db));

        let handle = HttpServer::new("127.0.0.1:0".parse().unwrap(), store)
            .start()
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", handle.local_addr());

        Self {
            base_url,
            handle: Some(handle),
            client: reqwest::Client::new(),
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, body: Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/products"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.shutdown().await;
        }
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    srv.stop().await;
}

#[tokio::test]
async fn create_returns_201_with_location_and_body() {
    let srv = TestServer::spawn().await;

    let res = srv
        .create(json!({"name": "Widget", "category": "Tools", "price": 9.99, "sku": "W-1"}))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers()["location"].to_str().unwrap().to_string();
    let body: Value = res.json().await.unwrap();
    let id = body["id"].as_i64().unwrap();

    assert_eq!(location, format!("/api/v1/products/{}", id));
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["price"], "9.99");
    assert_eq!(body["sku"], "W-1");
    assert!(body["created_at"].is_string());

    let (status, fetched) = srv.get_json(&location).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);

    srv.stop().await;
}

#[tokio::test]
async fn list_orders_by_id_and_filters_ignoring_case() {
    let srv = TestServer::spawn().await;
    for name in ["Blue Widget", "Gadget", "WIDGET Pro"] {
        let res = srv.create(json!({"name": name, "price": "1.00"})).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let (status, all) = srv.get_json("/api/v1/products").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let (_, filtered) = srv.get_json("/api/v1/products?name=widget").await;
    let names: Vec<&str> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blue Widget", "WIDGET Pro"]);

    srv.stop().await;
}

#[tokio::test]
async fn validation_failures_are_422_with_details() {
    let srv = TestServer::spawn().await;

    let res = srv.create(json!({"name": "x", "price": "9.999"})).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"price"));

    let res = srv.create(json!({"price": 1})).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    srv.stop().await;
}

#[tokio::test]
async fn malformed_json_and_bad_ids_are_400() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .post(srv.url("/api/v1/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");

    let (status, body) = srv.get_json("/api/v1/products/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");

    srv.stop().await;
}

#[tokio::test]
async fn duplicates_are_409() {
    let srv = TestServer::spawn().await;
    srv.create(json!({"name": "Widget", "price": 1, "sku": "W-1"}))
        .await;

    let res = srv
        .create(json!({"name": "Other", "price": 1, "sku": "W-1"}))
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
    assert!(body["message"].as_str().unwrap().contains("sku"));

    let res = srv.create(json!({"name": "wIdGeT", "price": 1})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Absent SKUs never collide
    let a = srv.create(json!({"name": "First", "price": 1})).await;
    let b = srv.create(json!({"name": "Second", "price": 1, "sku": ""})).await;
    assert_eq!(a.status(), StatusCode::CREATED);
    assert_eq!(b.status(), StatusCode::CREATED);

    srv.stop().await;
}

#[tokio::test]
async fn put_replaces_and_returns_204() {
    let srv = TestServer::spawn().await;
    let created: Value = srv
        .create(json!({"name": "Widget", "category": "Tools", "price": 9.99, "sku": "W-1"}))
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/api/v1/products/{}", created["id"]);

    let res = srv
        .client
        .put(srv.url(&path))
        .json(&json!({"name": "Widget", "price": "12.50"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let (_, updated) = srv.get_json(&path).await;
    assert_eq!(updated["price"], "12.50");
    assert_eq!(updated["category"], Value::Null);
    assert_eq!(updated["sku"], Value::Null);
    assert_eq!(updated["created_at"], created["created_at"]);

    srv.stop().await;
}

#[tokio::test]
async fn put_on_missing_id_is_404_even_with_bad_payload() {
    let srv = TestServer::spawn().await;

    for body in [json!({"name": "Widget", "price": 1}), json!({"name": "", "price": -1})] {
        let res = srv
            .client
            .put(srv.url("/api/v1/products/999"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    srv.stop().await;
}

#[tokio::test]
async fn put_and_patch_on_missing_id_are_404_even_with_malformed_json() {
    let srv = TestServer::spawn().await;

    for method in [reqwest::Method::PUT, reqwest::Method::PATCH] {
        let res = srv
            .client
            .request(method.clone(), srv.url("/api/v1/products/999"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", method);
    }

    let res = srv
        .client
        .put(srv.url("/api/v1/products/999"))
        .json(&json!({"name": 5, "price": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    srv.stop().await;
}

#[tokio::test]
async fn wrong_field_types_are_422_with_details() {
    let srv = TestServer::spawn().await;

    let res = srv
        .create(json!({"name": "Widget", "price": 1, "sku": 123}))
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "sku");

    srv.stop().await;
}

#[tokio::test]
async fn malformed_json_on_existing_id_is_400() {
    let srv = TestServer::spawn().await;
    let created: Value = srv
        .create(json!({"name": "Widget", "price": 1}))
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/api/v1/products/{}", created["id"]);

    let res = srv
        .client
        .put(srv.url(&path))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    srv.stop().await;
}

#[tokio::test]
async fn patch_keeps_absent_fields_and_clears_nulls() {
    let srv = TestServer::spawn().await;
    let created: Value = srv
        .create(json!({"name": "Widget", "category": "Tools", "price": 9.99, "sku": "W-1"}))
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/api/v1/products/{}", created["id"]);

    let res = srv
        .client
        .patch(srv.url(&path))
        .json(&json!({"price": 3, "sku": null}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let patched: Value = res.json().await.unwrap();
    assert_eq!(patched["name"], "Widget");
    assert_eq!(patched["category"], "Tools");
    assert_eq!(patched["price"], "3.00");
    assert_eq!(patched["sku"], Value::Null);

    srv.stop().await;
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let srv = TestServer::spawn().await;
    let created: Value = srv
        .create(json!({"name": "Widget", "price": 1}))
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/api/v1/products/{}", created["id"]);

    let res = srv.client.delete(srv.url(&path)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let (status, body) = srv.get_json(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let res = srv.client.delete(srv.url(&path)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    srv.stop().await;
}

#[tokio::test]
async fn concurrent_creates_with_same_name_yield_one_conflict() {
    let srv = TestServer::spawn().await;

    let (a, b) = tokio::join!(
        srv.create(json!({"name": "Race", "price": 1})),
        srv.create(json!({"name": "Race", "price": 1})),
    );

    let mut statuses = vec![a.status(), b.status()];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    srv.stop().await;
}
