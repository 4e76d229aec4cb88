use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    cabinet_db::health_check(&pool).await.unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trash_entries")
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("trash_entries query failed: {e}"));
    assert_eq!(count.0, 0, "a fresh database starts with an empty trash");
}

/// Running migrations again on a migrated database is a no-op.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_migrations_are_idempotent(pool: PgPool) {
    cabinet_db::run_migrations(&pool).await.unwrap();
    cabinet_db::health_check(&pool).await.unwrap();
}
