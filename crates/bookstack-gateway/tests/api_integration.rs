//! End-to-end API tests over the full router.
//!
//! Each test runs against a real RocksDB store in a temp directory with
//! the store-backed identity verifier, exercising the same wiring as
//! the production binary.

use std::sync::Arc;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use bookstack_auth::{hash_password, StoreVerifier};
use bookstack_control::RecordsService;
use bookstack_core::{Role, UserId};
use bookstack_gateway::{create_router, GatewayConfig, GatewayState};
use bookstack_store::{RocksStore, Store, User};

fn test_server() -> (TestServer, Arc<RocksStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(RocksStore::open(dir.path()).unwrap());
    let records = Arc::new(RecordsService::new(Arc::clone(&store)));
    let verifier = Arc::new(StoreVerifier::new(Arc::clone(&store)));
    let state = GatewayState::new(records, verifier, GatewayConfig::default());
    let server = TestServer::new(create_router(state)).unwrap();
    (server, store, dir)
}

/// Seed a user directly into the store, bypassing the admin-only API.
fn seed_user(store: &RocksStore, username: &str, password: &str, role: Role) -> UserId {
    let now = chrono::Utc::now();
    let user = User {
        user_id: store.allocate_user_id().unwrap(),
        username: username.into(),
        password_hash: hash_password(password).unwrap(),
        first_name: "Seed".into(),
        last_name: "User".into(),
        role,
        created_at: now,
        updated_at: now,
    };
    store.put_user(&user).unwrap();
    user.user_id
}

fn cookie_for(user_id: UserId) -> HeaderValue {
    HeaderValue::from_str(&format!("TOKEN={user_id}")).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (server, _store, _dir) = test_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn login_sets_token_cookie() {
    let (server, store, _dir) = test_server();
    let admin_id = seed_user(&store, "root", "hunter2", Role::Admin);

    let response = server
        .post("/api/login")
        .json(&json!({"username": "root", "password": "hunter2"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with(&format!("TOKEN={admin_id};")));
    assert!(set_cookie.contains("Max-Age=3600"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let body: Value = response.json();
    assert_eq!(body["status"], "Success");
    assert_eq!(body["data"]["username"], "root");
    assert_eq!(body["data"]["role"], "ADMIN");
    // The password hash never crosses the wire.
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn login_failure_is_403_with_fixed_message() {
    let (server, store, _dir) = test_server();
    seed_user(&store, "root", "hunter2", Role::Admin);

    let response = server
        .post("/api/login")
        .json(&json!({"username": "root", "password": "wrong"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let body: Value = response.json();
    assert_eq!(body["status"], "Error");
    assert_eq!(body["message"], "No user found.");

    // Unknown usernames read identically.
    let response = server
        .post("/api/login")
        .json(&json!({"username": "ghost", "password": "hunter2"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "No user found.");
}

#[tokio::test]
async fn requests_without_cookie_are_unauthorized() {
    let (server, _store, _dir) = test_server();
    for path in ["/api/whoami", "/api/users", "/api/categories", "/api/books"] {
        let response = server.get(path).await;
        assert_eq!(
            response.status_code(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for {path}"
        );
    }
}

#[tokio::test]
async fn stale_cookie_is_unauthorized() {
    let (server, _store, _dir) = test_server();
    let response = server
        .get("/api/books")
        .add_header(COOKIE, HeaderValue::from_static("TOKEN=999"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/books")
        .add_header(COOKIE, HeaderValue::from_static("TOKEN=not-a-number"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_resolves_the_cookie() {
    let (server, store, _dir) = test_server();
    let admin_id = seed_user(&store, "root", "hunter2", Role::Admin);

    let response = server
        .get("/api/whoami")
        .add_header(COOKIE, cookie_for(admin_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["id"], admin_id.as_u64());
    assert_eq!(body["data"]["role"], "ADMIN");
    assert_eq!(body["data"]["firstName"], "Seed");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let (server, _store, _dir) = test_server();
    let response = server.post("/api/logout").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("TOKEN=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn book_lifecycle_over_the_api() {
    let (server, store, _dir) = test_server();
    let admin_id = seed_user(&store, "root", "hunter2", Role::Admin);
    let cookie = cookie_for(admin_id);

    let response = server
        .post("/api/categories")
        .add_header(COOKIE, cookie.clone())
        .json(&json!({"name": "Fiction"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let category_id = response.json::<Value>()["data"]["categoryId"]
        .as_u64()
        .unwrap();

    let response = server
        .post("/api/books")
        .add_header(COOKIE, cookie.clone())
        .json(&json!({
            "title": "The Dispossessed",
            "author": "Le Guin",
            "description": "An ambiguous utopia",
            "categoryId": category_id,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let book = response.json::<Value>();
    let book_id = book["data"]["bookId"].as_u64().unwrap();
    assert_eq!(book["data"]["createdBy"], admin_id.as_u64());

    // Rename via update.
    let response = server
        .put(&format!("/api/books/{book_id}"))
        .add_header(COOKIE, cookie.clone())
        .json(&json!({
            "title": "The Left Hand of Darkness",
            "author": "Le Guin",
            "description": "",
            "categoryId": category_id,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Soft delete removes it from listings.
    let response = server
        .delete(&format!("/api/books/{book_id}"))
        .add_header(COOKIE, cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get("/api/books")
        .add_header(COOKIE, cookie.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // The dashboard still counts it.
    let response = server
        .get("/api/books/totals")
        .add_header(COOKIE, cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let totals: Value = response.json();
    assert_eq!(totals["data"]["total"], 0);
    assert_eq!(totals["data"]["totalDeleted"], 1);

    let response = server
        .delete("/api/books/9999")
        .add_header(COOKIE, cookie)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_visibility_is_narrowed_by_role() {
    let (server, store, _dir) = test_server();
    let admin_id = seed_user(&store, "root", "hunter2", Role::Admin);
    let admin_cookie = cookie_for(admin_id);

    let mut category_ids = Vec::new();
    for name in ["Fiction", "History"] {
        let response = server
            .post("/api/categories")
            .add_header(COOKIE, admin_cookie.clone())
            .json(&json!({"name": name}))
            .await;
        category_ids.push(
            response.json::<Value>()["data"]["categoryId"]
                .as_u64()
                .unwrap(),
        );
    }
    for (title, category_id) in [("Novel", category_ids[0]), ("Chronicle", category_ids[1])] {
        let response = server
            .post("/api/books")
            .add_header(COOKIE, admin_cookie.clone())
            .json(&json!({
                "title": title,
                "author": "Various",
                "description": "",
                "categoryId": category_id,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    // Create a reader linked to Fiction only.
    let response = server
        .post("/api/users")
        .add_header(COOKIE, admin_cookie.clone())
        .json(&json!({
            "username": "reader",
            "password": "paperback",
            "firstName": "Rea",
            "lastName": "Der",
            "role": "USER",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let reader_id = response.json::<Value>()["data"]["id"].as_u64().unwrap();

    let response = server
        .put(&format!("/api/users/{reader_id}"))
        .add_header(COOKIE, admin_cookie.clone())
        .json(&json!({
            "username": "reader",
            "firstName": "Rea",
            "lastName": "Der",
            "role": "USER",
            "categoryIds": [category_ids[0]],
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let record: Value = response.json();
    assert_eq!(record["data"]["categoryIds"], json!([category_ids[0]]));

    let reader_cookie = cookie_for(UserId::new(reader_id));

    // Narrowed book listing.
    let response = server
        .get("/api/books")
        .add_header(COOKIE, reader_cookie.clone())
        .await;
    let body: Value = response.json();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Novel"]);

    // Administration surfaces are closed to USER callers.
    let response = server
        .get("/api/users")
        .add_header(COOKIE, reader_cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .get("/api/books/totals")
        .add_header(COOKIE, reader_cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .post("/api/categories")
        .add_header(COOKIE, reader_cookie)
        .json(&json!({"name": "Sneaky"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let (server, store, _dir) = test_server();
    let admin_id = seed_user(&store, "root", "hunter2", Role::Admin);
    seed_user(&store, "taken", "pw", Role::User);

    let response = server
        .post("/api/users")
        .add_header(COOKIE, cookie_for(admin_id))
        .json(&json!({
            "username": "taken",
            "password": "pw2",
            "firstName": "T",
            "lastName": "K",
            "role": "USER",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}
