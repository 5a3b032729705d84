use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Book and system tables. Every statement is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS commodities (
        guid TEXT PRIMARY KEY NOT NULL,
        namespace TEXT NOT NULL,
        mnemonic TEXT NOT NULL,
        UNIQUE (namespace, mnemonic)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS prices (
        guid TEXT PRIMARY KEY NOT NULL,
        from_guid TEXT NOT NULL REFERENCES commodities(guid),
        to_guid TEXT NOT NULL REFERENCES commodities(guid),
        date TEXT NOT NULL,
        value REAL NOT NULL,
        source TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        guid TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        account_type TEXT NOT NULL,
        commodity_guid TEXT REFERENCES commodities(guid),
        parent_guid TEXT REFERENCES accounts(guid),
        hidden INTEGER NOT NULL DEFAULT 0,
        placeholder INTEGER NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        guid TEXT PRIMARY KEY NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL,
        currency_guid TEXT NOT NULL REFERENCES commodities(guid)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS splits (
        guid TEXT PRIMARY KEY NOT NULL,
        tx_guid TEXT NOT NULL REFERENCES transactions(guid),
        account_guid TEXT NOT NULL REFERENCES accounts(guid),
        value REAL NOT NULL,
        quantity REAL NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_splits_account ON splits(account_guid);",
    "CREATE INDEX IF NOT EXISTS idx_splits_tx ON splits(tx_guid);",
    r#"
    CREATE TABLE IF NOT EXISTS sys_users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        created_at TEXT NOT NULL,
        last_login_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL REFERENCES sys_users(id),
        token_hash TEXT NOT NULL,
        expires_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        revoked_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sys_settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
];

/// Open (or create) the book database and bootstrap its schema.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    let conn = open(db_file).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection already initialized"))?;

    tracing::info!("Book database ready");
    Ok(())
}

/// Connection to `db_file` with the schema applied.
pub async fn open(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening book database: {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;

    for statement in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            statement.to_string(),
        ))
        .await?;
    }
    Ok(conn)
}

/// Fresh database file under the temp dir, for tests that need real SQLite.
#[cfg(test)]
pub async fn open_scratch() -> DatabaseConnection {
    let path = std::env::temp_dir().join(format!("ledger-test-{}.db", uuid::Uuid::new_v4()));
    open(&path).await.unwrap()
}

/// Whether the book is open; backs `GET /api/book/status`.
pub fn is_initialized() -> bool {
    DB_CONN.get().is_some()
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
