use std::net::SocketAddr;
use tokio::net::TcpListener;

use serde_json::json;
use stockpile_server::{config::Config, routes, state::AppState};
use stockpile_store::{ItemStore, NewItem, WILDCARD_OWNER};

pub struct TestServer {
    pub url: String,
    /// Handle onto the backing stores, for seeding records the API
    /// cannot create (shared items, blog posts).
    pub state: AppState,
    #[allow(dead_code)]
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 0, // OS assigns port
            token_secret: "test-secret".into(),
            token_ttl_secs: 3600,
            request_timeout_secs: 10,
            storage: Default::default(),
        };

        let state = AppState::new(&config).await.unwrap();
        let app = routes::router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            url: format!("http://{addr}"),
            state,
            addr,
        }
    }

    /// Insert a shared (wildcard-owner) item directly into the store.
    pub async fn seed_shared_item(&self, name: &str, quantity: i64) -> String {
        let mut attrs = serde_json::Map::new();
        attrs.insert("name".into(), json!(name));
        let item = self
            .state
            .items
            .insert(NewItem { quantity, attrs }, WILDCARD_OWNER)
            .await
            .unwrap();
        item.id
    }

    /// Fetch a token for an identifier through the API.
    pub async fn token_for(&self, client: &reqwest::Client, identifier: &str) -> String {
        let response = client
            .post(format!("{}/get-token", self.url))
            .json(&json!({ "identifier": identifier }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["token"].as_str().expect("token missing").to_string()
    }
}
