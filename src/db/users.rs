use sqlx::{SqliteConnection, SqlitePool};

use crate::models::UserRecord;

pub async fn find_user_by_email(
    db: &SqlitePool,
    email: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn email_exists(conn: &mut SqliteConnection, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

pub async fn insert_user(
    conn: &mut SqliteConnection,
    email: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
        .bind(email)
        .bind(password_hash)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}
