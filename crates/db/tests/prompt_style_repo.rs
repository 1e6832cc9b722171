//! Integration tests for the prompt style repository.

use report_engine_db::models::prompt_style::{CreatePromptStyle, UpdatePromptStyle};
use report_engine_db::repositories::PromptStyleRepo;
use sqlx::PgPool;

fn new_style(name: &str) -> CreatePromptStyle {
    CreatePromptStyle {
        name: name.to_string(),
        instruction: "You are a poet. Write verse.".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_puts_builtins_first(pool: PgPool) {
    PromptStyleRepo::create(&pool, &new_style("aaa-custom"))
        .await
        .unwrap();
    let styles = PromptStyleRepo::list(&pool).await.unwrap();
    assert_eq!(styles.len(), 5);
    assert!(styles[..4].iter().all(|s| !s.is_deletable));
    assert_eq!(styles[4].name, "aaa-custom");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_is_deletable(pool: PgPool) {
    let created = PromptStyleRepo::create(&pool, &new_style("poem")).await.unwrap();
    assert!(created.is_deletable);
    let found = PromptStyleRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "poem");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_violates_unique_constraint(pool: PgPool) {
    let err = PromptStyleRepo::create(&pool, &new_style("narrative"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_prompt_styles_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let created = PromptStyleRepo::create(&pool, &new_style("poem")).await.unwrap();
    let updated = PromptStyleRepo::update(
        &pool,
        created.id,
        &UpdatePromptStyle {
            name: None,
            instruction: Some("Write a haiku.".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "poem");
    assert_eq!(updated.instruction, "Write a haiku.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_skips_builtins(pool: PgPool) {
    let builtin = PromptStyleRepo::find_by_name(&pool, "timeline")
        .await
        .unwrap()
        .unwrap();
    assert!(!PromptStyleRepo::delete(&pool, builtin.id).await.unwrap());

    let custom = PromptStyleRepo::create(&pool, &new_style("poem")).await.unwrap();
    assert!(PromptStyleRepo::delete(&pool, custom.id).await.unwrap());
    assert!(PromptStyleRepo::find_by_id(&pool, custom.id)
        .await
        .unwrap()
        .is_none());
}
