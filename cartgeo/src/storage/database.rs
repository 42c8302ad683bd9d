use std::path::{Path, PathBuf};

use log::{debug, info};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::{Context, Result};

pub const CREATE_TABLE_FILE: &str = "create_table.sql";
pub const INSERT_USER_FILE: &str = "insert_user_data.sql";
pub const SELECT_USERS_FILE: &str = "select_users.sql";

/// SQL text for the table sink, kept outside the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatements {
    pub create_table: String,
    pub insert_user: String,
    pub select_users: String,
}

impl SqlStatements {
    pub async fn load(dir: &Path) -> Result<Self> {
        info!("Loading SQL statements from {dir:?}");
        Ok(Self {
            create_table: read_statement(dir, CREATE_TABLE_FILE).await?,
            insert_user: read_statement(dir, INSERT_USER_FILE).await?,
            select_users: read_statement(dir, SELECT_USERS_FILE).await?,
        })
    }

    /// The `sql/` directory shipped at the workspace root.
    pub fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../sql")
    }
}

async fn read_statement(dir: &Path, file_name: &str) -> Result<String> {
    let path = dir.join(file_name);
    let sql = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    debug!("loaded {} bytes of SQL from {path:?}", sql.len());
    Ok(sql)
}

pub async fn create_db_pool(db_path: &Path) -> Result<SqlitePool> {
    info!("Opening database at path: {db_path:?}");
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        info!("Creating parent directory for database: {parent:?}");
        tokio::fs::create_dir_all(parent).await?;
    }
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    debug!("Database connection successful.");
    Ok(db_pool)
}

pub async fn create_tables(db_pool: &SqlitePool, statements: &SqlStatements) -> Result<()> {
    sqlx::query(&statements.create_table)
        .execute(db_pool)
        .await?;
    Ok(())
}
