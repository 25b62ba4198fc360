#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

use receitas_api::auth::{PasswordHasher, TokenService};
use receitas_api::database::MemoryStore;
use receitas_api::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_ISSUER: &str = "receitas-api";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start the app in-process on a free port with an empty in-memory store.
    pub async fn spawn() -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenService::new(TEST_SECRET, TEST_ISSUER, Duration::hours(1));
        // Cheap Argon2 cost keeps the suite fast; production cost comes from config
        let passwords = PasswordHasher::new(1024, 1)?;
        let app = receitas_api::app(AppState::new(store, tokens, passwords), &[]);

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<Response> {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn register(&self, nome: &str, email: &str, senha: &str) -> Result<Response> {
        self.post("/register", None, json!({ "nome": nome, "email": email, "senha": senha }))
            .await
    }

    pub async fn login(&self, email: &str, senha: &str) -> Result<Response> {
        self.post("/login", None, json!({ "email": email, "senha": senha })).await
    }

    /// Register and log in a fresh user; returns `(user_id, token)`.
    pub async fn signed_in_user(&self, email: &str) -> Result<(i64, String)> {
        let res = self.register("Ana", email, "pw1").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let body: Value = self.login(email, "pw1").await?.json().await?;
        let id = body["user_info"]["id"].as_i64().context("missing user id")?;
        let token = body["token"].as_str().context("missing token")?.to_string();
        Ok((id, token))
    }

    /// Create a category and return its id.
    pub async fn category(&self, token: &str, nome: &str) -> Result<i64> {
        let res = self.post("/categorias", Some(token), json!({ "nome": nome })).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "category failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("missing category id")
    }

    /// Create a recipe in a new category and return its id.
    pub async fn recipe(&self, token: &str, titulo: &str) -> Result<i64> {
        let categoria_id = self.category(token, &format!("Categoria {}", titulo)).await?;
        let res = self
            .post(
                "/receitas",
                Some(token),
                json!({ "titulo": titulo, "descricao": "Fácil", "categoria_id": categoria_id }),
            )
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "recipe failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("missing recipe id")
    }
}

/// A correctly signed token that expired two hours ago.
pub fn expired_token(user_id: i64) -> Result<String> {
    let tokens = TokenService::new(TEST_SECRET, TEST_ISSUER, Duration::hours(-2));
    Ok(tokens.issue(user_id)?.token)
}

/// A well-formed token signed with a different secret.
pub fn foreign_token(user_id: i64) -> Result<String> {
    let tokens = TokenService::new("some-other-secret", TEST_ISSUER, Duration::hours(1));
    Ok(tokens.issue(user_id)?.token)
}
