mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use common::{expired_token, foreign_token, TestServer};

/// Every protected route with a body that would otherwise succeed.
fn protected_routes(receita_id: i64) -> Vec<(Method, String, Value)> {
    vec![
        (Method::GET, "/receitas".to_string(), Value::Null),
        (
            Method::POST,
            "/receitas".to_string(),
            json!({ "titulo": "Bolo", "descricao": "Simples", "categoria_id": 1 }),
        ),
        (
            Method::POST,
            format!("/receitas/{}/ingredientes", receita_id),
            json!({ "nome": "Farinha", "quantidade": "200g" }),
        ),
        (
            Method::POST,
            format!("/receitas/{}/etapas", receita_id),
            json!({ "descricao": "Misture", "ordem": 1 }),
        ),
        (
            Method::POST,
            format!("/receitas/{}/avaliacoes", receita_id),
            json!({ "nota": 5 }),
        ),
        (Method::POST, "/categorias".to_string(), json!({ "nome": "Intrusa" })),
        (Method::GET, "/me".to_string(), Value::Null),
    ]
}

async fn send(
    server: &TestServer,
    method: Method,
    path: &str,
    body: &Value,
    authorization: Option<&str>,
) -> Result<reqwest::Response> {
    let mut req = server.client.request(method, server.url(path));
    if !body.is_null() {
        req = req.json(body);
    }
    if let Some(value) = authorization {
        req = req.header("authorization", value);
    }
    Ok(req.send().await?)
}

#[tokio::test]
async fn every_bad_token_is_rejected_on_every_route() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, token) = server.signed_in_user("ana@x.com").await?;
    let receita_id = server.recipe(&token, "Bolo").await?;

    let expired = format!("Bearer {}", expired_token(user_id)?);
    let forged = format!("Bearer {}", foreign_token(user_id)?);
    let bad_headers: Vec<Option<&str>> = vec![
        None,
        Some("Bearer not.a.token"),
        Some("Bearer "),
        Some(token.as_str()),
        Some("Basic YW5hQHguY29tOnB3MQ=="),
        Some(expired.as_str()),
        Some(forged.as_str()),
    ];

    for (method, path, body) in protected_routes(receita_id) {
        for header in &bad_headers {
            let res = send(&server, method.clone(), &path, &body, *header).await?;
            assert_eq!(
                res.status(),
                StatusCode::UNAUTHORIZED,
                "{} {} with {:?}",
                method,
                path,
                header
            );
            let body: Value = res.json().await?;
            assert_eq!(body["code"], "UNAUTHORIZED");
        }
    }
    Ok(())
}

#[tokio::test]
async fn expired_token_reports_expiry() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, _) = server.signed_in_user("ana@x.com").await?;

    let res = server.get("/receitas", Some(&expired_token(user_id)?)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["msg"], "Token has expired");
    Ok(())
}

#[tokio::test]
async fn rejected_writes_leave_no_rows() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, token) = server.signed_in_user("ana@x.com").await?;

    let res = server
        .post("/categorias", Some(&expired_token(user_id)?), json!({ "nome": "Doces" }))
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let res = server.post("/categorias", None, json!({ "nome": "Salgados" })).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let categories: Value = server.get("/categorias", None).await?.json().await?;
    assert_eq!(categories, json!([]));

    let res = server
        .post(
            "/receitas",
            Some(&foreign_token(user_id)?),
            json!({ "titulo": "Bolo", "descricao": "Simples", "categoria_id": 1 }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let recipes: Value = server.get("/receitas", Some(&token)).await?.json().await?;
    assert_eq!(recipes, json!([]));
    Ok(())
}

#[tokio::test]
async fn auth_is_checked_before_the_body() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/receitas"))
        .header("content-type", "application/json")
        .body("{broken")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
