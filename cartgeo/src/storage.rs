#![allow(async_fn_in_trait)]
mod csv_storage;
pub mod database;
mod internal;

use std::path::{Path, PathBuf};

use log::{error, info, warn};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::User;
pub use csv_storage::CsvStorage;
pub use database::SqlStatements;
pub use internal::user::StoredUser;
use internal::user;

pub trait Storage: Send + Sync {
    async fn save_users(&self, users: &[User]) -> Result<()>;
}

/// Table sink backed by a local SQLite file.
///
/// Every call opens its own pool and closes it before returning.
#[derive(Debug, Clone)]
pub struct DbStorage {
    db_path: PathBuf,
    statements: SqlStatements,
}

impl DbStorage {
    pub fn new(db_path: PathBuf, statements: SqlStatements) -> Self {
        Self {
            db_path,
            statements,
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Creates the table if needed, then inserts all users in one transaction.
    pub async fn save_users(&self, users: &[User]) -> Result<()> {
        let db_pool = database::create_db_pool(&self.db_path).await?;
        let res = self.insert_users(&db_pool, users).await;
        db_pool.close().await;
        res?;
        info!("{} users inserted into {:?}", users.len(), self.db_path);
        Ok(())
    }

    async fn insert_users(&self, db_pool: &SqlitePool, users: &[User]) -> Result<()> {
        database::create_tables(db_pool, &self.statements).await?;
        if users.is_empty() {
            warn!("no users to insert into {:?}", self.db_path);
        }

        let mut tx = db_pool.begin().await?;
        for u in users {
            user::save_user(&mut tx, &self.statements.insert_user, u)
                .await
                .map_err(|e| {
                    error!("Failed to insert user {}: {e}", u.id);
                    e
                })?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn load_users(&self) -> Result<Vec<StoredUser>> {
        let db_pool = database::create_db_pool(&self.db_path).await?;
        let users = user::get_users(&db_pool, &self.statements.select_users).await?;
        db_pool.close().await;
        Ok(users)
    }
}

#[derive(Debug, Clone)]
pub struct StorageImpl {
    csv_storage: CsvStorage,
    db_storage: DbStorage,
}

impl StorageImpl {
    pub fn new(csv_storage: CsvStorage, db_storage: DbStorage) -> Self {
        StorageImpl {
            csv_storage,
            db_storage,
        }
    }

    pub fn csv_storage(&self) -> &CsvStorage {
        &self.csv_storage
    }

    pub fn db_storage(&self) -> &DbStorage {
        &self.db_storage
    }
}

impl Storage for StorageImpl {
    async fn save_users(&self, users: &[User]) -> Result<()> {
        self.csv_storage.save_users(users).await?;
        self.db_storage.save_users(users).await
    }
}
