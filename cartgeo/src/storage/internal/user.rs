use sqlx::{FromRow, Sqlite, SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::User;

/// A user row as persisted in the table sink. The table has no id column.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct StoredUser {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub lat: f64,
    pub lng: f64,
    pub country: String,
    pub fav_category_in_cart: Option<String>,
}

impl From<&User> for StoredUser {
    fn from(value: &User) -> Self {
        Self {
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            age: value.age,
            gender: value.gender.clone(),
            email: value.email.clone(),
            lat: value.lat,
            lng: value.lng,
            country: value.country.clone(),
            fav_category_in_cart: value.favorite_category.clone(),
        }
    }
}

// bind order is fixed, the insert statement must list its placeholders accordingly
pub async fn save_user(conn: &mut SqliteConnection, insert_sql: &str, user: &User) -> Result<()> {
    let _ = sqlx::query(insert_sql)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.age)
        .bind(&user.gender)
        .bind(&user.email)
        .bind(user.lat)
        .bind(user.lng)
        .bind(&user.country)
        .bind(user.favorite_category.as_deref())
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn get_users(db: &SqlitePool, select_sql: &str) -> Result<Vec<StoredUser>> {
    Ok(sqlx::query_as::<Sqlite, StoredUser>(select_sql)
        .fetch_all(db)
        .await?)
}
