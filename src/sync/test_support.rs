//! Fixtures shared by sync tests: an in-memory source shaped like the
//! curation database.

use crate::db::SqliteSource;

/// Every table a sync can touch.
pub const TABLES: [&str; 9] = [
    "modules",
    "resources",
    "skills",
    "terms",
    "tracks",
    "module_resource",
    "module_track",
    "resource_term",
    "term_term",
];

/// In-memory source with every table created and empty.
pub async fn empty_source() -> SqliteSource {
    let source = SqliteSource::in_memory().await.unwrap();
    for table in TABLES {
        sqlx::query(&format!(
            "CREATE TABLE {} (id INTEGER PRIMARY KEY, name TEXT, created_at TEXT)",
            table
        ))
        .execute(source.pool())
        .await
        .unwrap();
    }
    source
}

/// Insert `count` rows into `table` with ids `1..=count`.
pub async fn insert_rows(source: &SqliteSource, table: &str, count: i64) {
    for id in 1..=count {
        sqlx::query(&format!(
            "INSERT INTO {} (id, name, created_at) VALUES (?, ?, '2024-01-01 00:00:00')",
            table
        ))
        .bind(id)
        .bind(format!("{}-{}", table, id))
        .execute(source.pool())
        .await
        .unwrap();
    }
}

/// In-memory source with a few rows in every table.
pub async fn populated_source() -> SqliteSource {
    let source = empty_source().await;
    for (i, table) in TABLES.iter().enumerate() {
        insert_rows(&source, table, i as i64 + 1).await;
    }
    source
}
