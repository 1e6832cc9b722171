//! HTTP-level integration tests for prompt style endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn builtin_id(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM prompt_styles WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_includes_builtins(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/prompt-styles").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["narrative", "report", "script", "timeline"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_style_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/prompt-styles",
        json!({"name": "haiku", "instruction": "Write a haiku."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "haiku");
    assert_eq!(json["data"]["is_deletable"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_style_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/prompt-styles",
        json!({"name": "narrative", "instruction": "Again."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_style_with_invalid_name_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/prompt-styles",
        json!({"name": "Bad Name!", "instruction": "Whatever."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_style_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/prompt-styles/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_builtin_instruction_is_editable(pool: PgPool) {
    let id = builtin_id(&pool, "script").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/prompt-styles/{id}"),
        json!({"instruction": "Write a stage play."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "script");
    assert_eq!(json["data"]["instruction"], "Write a stage play.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_renaming_builtin_returns_403(pool: PgPool) {
    let id = builtin_id(&pool, "report").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/prompt-styles/{id}"),
        json!({"name": "memo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_user_style(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/prompt-styles",
            json!({"name": "draft", "instruction": "Draft it."}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/prompt-styles/{id}"),
        json!({"name": "final"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "final");
    assert_eq!(json["data"]["instruction"], "Draft it.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_user_style_returns_204(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/prompt-styles",
            json!({"name": "temp", "instruction": "Temporary."}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/prompt-styles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/prompt-styles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_builtin_returns_403(pool: PgPool) {
    let id = builtin_id(&pool, "narrative").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/prompt-styles/{id}")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Built-in prompt styles cannot be deleted"
    );

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/prompt-styles/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
