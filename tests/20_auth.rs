mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn register_login_browse_scenario() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.register("Ana", "ana@x.com", "pw1").await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["id"], 1);
    assert!(body["msg"].is_string());

    let res = server.register("Ana", "ana@x.com", "pw1").await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = server.login("ana@x.com", "pw1").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["token"].as_str().expect("token").to_string();
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["user_info"]["id"], 1);
    assert_eq!(body["user_info"]["nome"], "Ana");
    assert_eq!(body["user_info"]["email"], "ana@x.com");
    assert!(body["user_info"].get("senha").is_none());

    let res = server.get("/receitas", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let recipes: Value = res.json().await?;
    assert_eq!(recipes, json!([]));

    let res = server.post("/categorias", None, json!({ "nome": "Doces" })).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn wrong_secret_and_unknown_email_look_the_same() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.register("Ana", "ana@x.com", "pw1").await?;

    let wrong = server.login("ana@x.com", "pw2").await?;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong: Value = wrong.json().await?;

    let unknown = server.login("bia@x.com", "pw1").await?;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown: Value = unknown.json().await?;

    assert_eq!(wrong, unknown);
    assert_eq!(wrong["msg"], "Invalid credentials");
    Ok(())
}

#[tokio::test]
async fn email_match_is_case_sensitive() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.register("Ana", "ana@x.com", "pw1").await?;

    let res = server.register("Ana", "ANA@x.com", "pw1").await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server.login("ANA@X.COM", "pw1").await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_reports_every_missing_field() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.post("/register", None, json!({ "email": "" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["nome"].is_string());
    assert!(body["field_errors"]["email"].is_string());
    assert!(body["field_errors"]["senha"].is_string());
    Ok(())
}

#[tokio::test]
async fn register_rejects_malformed_email() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.register("Ana", "ana.x.com", "pw1").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["field_errors"]["email"], "Invalid email format");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.post("/login", None, json!({ "email": "ana@x.com" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["senha"].is_string());
    Ok(())
}

#[tokio::test]
async fn non_json_body_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "INVALID_JSON");

    let res = server.client.post(server.url("/login")).body("email=a").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn me_returns_the_token_owner() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.signed_in_user("first@x.com").await?;
    let (id, token) = server.signed_in_user("second@x.com").await?;

    let res = server.get("/me", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "second@x.com");
    Ok(())
}

#[tokio::test]
async fn token_for_missing_user_is_rejected_by_me() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = receitas_api::auth::TokenService::new(
        common::TEST_SECRET,
        common::TEST_ISSUER,
        chrono::Duration::hours(1),
    )
    .issue(999)?
    .token;

    let res = server.get("/me", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
