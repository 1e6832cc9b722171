use report_engine_core::prompt_style::BUILTIN_STYLES;
use report_engine_db::repositories::PromptStyleRepo;
use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    report_engine_db::health_check(&pool).await.unwrap();

    let expected = [("scenarios", 0), ("prompt_styles", BUILTIN_STYLES.len() as i64)];
    for (table, rows) in expected {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, rows, "{table} should start with {rows} rows");
    }
}

/// The seeded built-in styles match the constants in the core crate.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_builtin_styles_seeded(pool: PgPool) {
    for builtin in BUILTIN_STYLES {
        let row = PromptStyleRepo::find_by_name(&pool, builtin.name)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("built-in style {} missing", builtin.name));
        assert_eq!(row.instruction, builtin.instruction);
        assert!(!row.is_deletable);
    }
}

/// Every table must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    for table in ["scenarios", "prompt_styles"] {
        for col in ["created_at", "updated_at"] {
            let (data_type,): (String,) = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|_| panic!("Table {table} is missing column {col}"));
            assert_eq!(data_type, "timestamp with time zone");
        }
    }
}
