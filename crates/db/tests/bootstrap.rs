use sqlx::PgPool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    stockroom_db::health_check(&pool).await.unwrap();

    let tables = ["containers", "items", "item_tags", "item_tag_links"];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The storage layer refuses non-normalized tag names even when application
/// code is bypassed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_check_constraint_rejects_mixed_case(pool: PgPool) {
    let result = sqlx::query("INSERT INTO item_tags (name) VALUES ('Hardware')")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

/// Unknown container type codes are rejected by the schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_container_type_check_constraint(pool: PgPool) {
    let result = sqlx::query("INSERT INTO containers (name, container_type) VALUES ('x', 'ZZ')")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}
