use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table (except _sqlx_migrations) must have created_at as timestamptz.
///
/// Trash entries are immutable, so `updated_at` is not required.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_created_at(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let result: Option<(String,)> = sqlx::query_as(
            "SELECT data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name = 'created_at'",
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .unwrap();

        let (data_type,) =
            result.unwrap_or_else(|| panic!("Table {table} is missing column created_at"));
        assert_eq!(
            data_type, "timestamp with time zone",
            "Table {table}.created_at should be timestamptz, got {data_type}"
        );
    }
}

/// No character varying columns should exist; TEXT is preferred.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// The purge predicate filters on `deleted_at`, which must be indexed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_at_is_indexed(pool: PgPool) {
    let has_index: (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT 1
            FROM pg_indexes
            WHERE schemaname = 'public'
              AND tablename = 'trash_entries'
              AND indexdef LIKE '%(deleted_at)%'
        )",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(has_index.0, "trash_entries.deleted_at should be indexed");
}

/// Snapshots and metadata are stored as JSONB.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_columns_are_jsonb(pool: PgPool) {
    for col in ["item_data", "metadata"] {
        let (data_type,): (String,) = sqlx::query_as(
            "SELECT data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = 'trash_entries'
               AND column_name = $1",
        )
        .bind(col)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(data_type, "jsonb", "trash_entries.{col} should be jsonb");
    }
}
