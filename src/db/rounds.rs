use sqlx::{SqliteConnection, SqlitePool};

use crate::models::RoundRow;

/// Column-encoded round, ready for insertion.
#[derive(Debug, Clone)]
pub struct RoundInsert {
    pub user_id: i64,
    pub course_id: i64,
    pub tee_box_id: i64,
    pub date: String,
    pub scores: String,
    pub putts: Option<String>,
    pub gir: Option<String>,
    pub fairways: Option<String>,
    pub bunkers: Option<String>,
}

pub async fn insert_round(
    conn: &mut SqliteConnection,
    round: &RoundInsert,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO rounds
            (user_id, course_id, tee_box_id, date, scores, putts, gir, fairways, bunkers)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(round.user_id)
    .bind(round.course_id)
    .bind(round.tee_box_id)
    .bind(&round.date)
    .bind(&round.scores)
    .bind(&round.putts)
    .bind(&round.gir)
    .bind(&round.fairways)
    .bind(&round.bunkers)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn fetch_rounds_for_user(
    db: &SqlitePool,
    user_id: i64,
) -> Result<Vec<RoundRow>, sqlx::Error> {
    sqlx::query_as::<_, RoundRow>(
        r#"
        SELECT
            r.id, r.course_id, c.name AS course_name,
            r.tee_box_id, t.name AS tee_name,
            r.date, r.scores, r.putts, r.gir, r.fairways, r.bunkers
        FROM rounds r
        JOIN courses c ON r.course_id = c.id
        JOIN tee_boxes t ON r.tee_box_id = t.id
        WHERE r.user_id = ?
        ORDER BY r.date DESC, r.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
