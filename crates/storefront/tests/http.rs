//! End-to-end tests: the real router on an ephemeral port, backed by the
//! in-memory store, driven with reqwest.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::{
    config::{Config, DatabaseConfig, LogConfig},
    repository::{InMemoryStore, Repositories},
    state::AppState,
};
use storefront::handler::AppRouter;
use tokio::net::TcpListener;

struct TestApp {
    base: String,
    store: InMemoryStore,
    client: reqwest::Client,
}

fn test_config() -> Config {
    Config {
        database: DatabaseConfig {
            url: String::new(),
            min_connections: 1,
            max_connections: 1,
        },
        jwt_secret: "integration-secret".into(),
        jwt_expiration_secs: 3600,
        port: 0,
        bcrypt_cost: 4,
        otel_endpoint: None,
        log: LogConfig {
            is_dev: true,
            enable_file_log: false,
        },
    }
}

async fn spawn_app() -> TestApp {
    let store = InMemoryStore::new();
    let state = AppState::new(Repositories::in_memory(&store), &test_config()).await;
    let app = AppRouter::build(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base: format!("http://{addr}/api/v1"),
        store,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    async fn post(&self, path: &str, body: Value, token: Option<&str>) -> reqwest::Response {
        let mut req = self.client.post(format!("{}{path}", self.base)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await.unwrap()
    }

    async fn register_and_login(&self, email: &str) -> String {
        let res = self
            .post(
                "/register",
                json!({
                    "firstName": "Test",
                    "lastName": "User",
                    "email": email,
                    "password": "hunter22"
                }),
                None,
            )
            .await;
        assert_eq!(res.status(), 201);

        let res = self
            .post(
                "/login",
                json!({ "email": email, "password": "hunter22" }),
                None,
            )
            .await;
        assert_eq!(res.status(), 200);

        let body: Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn register_then_login_issues_a_usable_token() {
    let app = spawn_app().await;

    let res = app
        .post(
            "/register",
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "engine"
            }),
            None,
        )
        .await;
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "message": "user created" }));

    let res = app
        .post(
            "/register",
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "engine"
            }),
            None,
        )
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "user with email ada@example.com already exists");

    let res = app
        .post(
            "/login",
            json!({ "email": "ada@example.com", "password": "wrong" }),
            None,
        )
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not found, invalid email or password");

    let res = app
        .post(
            "/login",
            json!({ "email": "ada@example.com", "password": "engine" }),
            None,
        )
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    let res = app
        .client
        .get(format!("{}/users/1", app.base))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let user: Value = res.json().await.unwrap();
    assert_eq!(user["email"], "ada@example.com");
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn invalid_registration_payload_is_rejected() {
    let app = spawn_app().await;

    let res = app
        .post(
            "/register",
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "not-an-email",
                "password": "engine"
            }),
            None,
        )
        .await;

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn products_can_be_created_listed_and_updated() {
    let app = spawn_app().await;
    let token = app.register_and_login("shop@example.com").await;

    let res = app
        .post(
            "/products",
            json!({ "name": "Desk", "price": 120.5, "quantity": 3 }),
            None,
        )
        .await;
    assert_eq!(res.status(), 401);

    let res = app
        .post(
            "/products",
            json!({ "name": "Desk", "price": 120.5, "quantity": 3 }),
            Some(&token),
        )
        .await;
    assert_eq!(res.status(), 201);
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();

    let res = app
        .client
        .put(format!("{}/products/{id}", app.base))
        .bearer_auth(&token)
        .json(&json!({ "name": "Standing desk", "price": 300, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = app
        .client
        .put(format!("{}/products/999", app.base))
        .bearer_auth(&token)
        .json(&json!({ "name": "Ghost", "price": 1, "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let res = app
        .client
        .get(format!("{}/products", app.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let products: Value = res.json().await.unwrap();
    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["name"], "Standing desk");
    assert_eq!(products[0]["quantity"], 2);
}

#[tokio::test]
async fn checkout_places_an_order() {
    let app = spawn_app().await;
    let token = app.register_and_login("buyer@example.com").await;
    let book = app.store.seed_product("book", Decimal::new(1000, 2), 5).await;
    let pen = app.store.seed_product("pen", Decimal::new(500, 2), 5).await;

    let res = app
        .post(
            "/cart/checkout",
            json!({ "items": [
                { "productId": book.id, "quantity": 2 },
                { "productId": pen.id, "quantity": 1 }
            ]}),
            Some(&token),
        )
        .await;

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total_price"].as_f64(), Some(25.0));

    let order_id = body["order_id"].as_i64().unwrap() as i32;
    assert_eq!(app.store.order_items(order_id).await.len(), 2);
    assert_eq!(app.store.product(book.id).await.unwrap().quantity, 3);
}

#[tokio::test]
async fn checkout_business_errors_are_bad_requests() {
    let app = spawn_app().await;
    let token = app.register_and_login("buyer@example.com").await;
    let lamp = app.store.seed_product("lamp", Decimal::new(4200, 2), 3).await;

    let res = app
        .post("/cart/checkout", json!({ "items": [] }), Some(&token))
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("error").is_some());

    let res = app
        .post(
            "/cart/checkout",
            json!({ "items": [{ "productId": lamp.id, "quantity": 0 }] }),
            Some(&token),
        )
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        format!("invalid quantity for the product {}", lamp.id)
    );

    let res = app
        .post(
            "/cart/checkout",
            json!({ "items": [{ "productId": 404, "quantity": 1 }] }),
            Some(&token),
        )
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        "product 404 is not available in the store, please refresh your cart"
    );

    let res = app
        .post(
            "/cart/checkout",
            json!({ "items": [{ "productId": lamp.id, "quantity": 5 }] }),
            Some(&token),
        )
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], format!("product {} is out of stock", lamp.id));
    assert_eq!(app.store.product(lamp.id).await.unwrap().quantity, 3);

    let res = app
        .post("/cart/checkout", json!({ "items": "nope" }), Some(&token))
        .await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn checkout_requires_a_valid_token() {
    let app = spawn_app().await;
    let lamp = app.store.seed_product("lamp", Decimal::new(4200, 2), 3).await;
    let cart = json!({ "items": [{ "productId": lamp.id, "quantity": 1 }] });

    let res = app.post("/cart/checkout", cart.clone(), None).await;
    assert_eq!(res.status(), 401);

    let res = app
        .post("/cart/checkout", cart.clone(), Some("not-a-jwt"))
        .await;
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "permission denied");

    let res = app
        .client
        .post(format!("{}/cart/checkout", app.base))
        .header("Cookie", "token=garbage")
        .json(&cart)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn checkout_storage_failure_is_internal_error() {
    let app = spawn_app().await;
    let token = app.register_and_login("buyer@example.com").await;
    let lamp = app.store.seed_product("lamp", Decimal::new(4200, 2), 3).await;

    app.store.fail_order_item_writes(true);
    let res = app
        .post(
            "/cart/checkout",
            json!({ "items": [{ "productId": lamp.id, "quantity": 1 }] }),
            Some(&token),
        )
        .await;

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "internal storage error");
    assert_eq!(app.store.product(lamp.id).await.unwrap().quantity, 3);
    assert!(app.store.orders().await.is_empty());
}

#[tokio::test]
async fn metrics_endpoint_exposes_service_counters() {
    let app = spawn_app().await;
    app.register_and_login("metrics@example.com").await;

    let res = app
        .client
        .get(app.base.replace("/api/v1", "/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let text = res.text().await.unwrap();
    assert!(text.contains("login_service_request_counter"));
}
