use sqlx::SqlitePool;
use tracing::info;

use crate::db::courses::tee_box_belongs_to_course;
use crate::db::rounds::{self, RoundInsert};
use crate::error::AppError;
use crate::models::{NewRoundRequest, RoundRow, RoundSummary, StatSeries, UserIdentity};

/// A round counts once this many holes have a positive score.
pub const MIN_COMPLETED_HOLES: usize = 9;

/// Highest stroke count accepted for a single hole.
pub const MAX_HOLE_SCORE: i64 = 30;

pub struct RoundRecorder {
    db: SqlitePool,
}

impl RoundRecorder {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn record(&self, user: &UserIdentity, req: NewRoundRequest) -> Result<i64, AppError> {
        if req.scores.iter().any(|s| *s > MAX_HOLE_SCORE) {
            return Err(AppError::Validation(format!(
                "Hole scores must not exceed {}",
                MAX_HOLE_SCORE
            )));
        }
        if completed_holes(&req.scores) < MIN_COMPLETED_HOLES {
            return Err(AppError::validation(
                "Round must have at least 9 completed holes",
            ));
        }

        let insert = RoundInsert {
            user_id: user.id,
            course_id: req.course_id,
            tee_box_id: req.tee_box_id,
            date: req.date,
            scores: encode(serde_json::to_string(&req.scores))?,
            putts: encode(req.putts.to_column())?,
            gir: encode(req.gir.to_column())?,
            fairways: encode(req.fairways.to_column())?,
            bunkers: encode(req.bunkers.to_column())?,
        };

        let mut tx = self.db.begin().await?;
        if !tee_box_belongs_to_course(&mut *tx, insert.course_id, insert.tee_box_id).await? {
            return Err(AppError::validation("Unknown course or tee box"));
        }
        let id = rounds::insert_round(&mut *tx, &insert).await?;
        tx.commit().await?;

        info!("user {} recorded round {}", user.id, id);
        Ok(id)
    }

    /// The caller's rounds, newest date first.
    pub async fn list(&self, user: &UserIdentity) -> Result<Vec<RoundSummary>, AppError> {
        let rows = rounds::fetch_rounds_for_user(&self.db, user.id).await?;
        rows.into_iter().map(summarize).collect()
    }
}

pub fn completed_holes(scores: &[i64]) -> usize {
    scores.iter().filter(|s| **s > 0).count()
}

/// Sum of the played holes; zero and negative entries mean "not played".
pub fn total_score(scores: &[i64]) -> i64 {
    scores
        .iter()
        .filter(|s| **s > 0)
        .fold(0i64, |total, s| total.saturating_add(*s))
}

fn summarize(row: RoundRow) -> Result<RoundSummary, AppError> {
    let scores: Vec<i64> = serde_json::from_str(&row.scores).map_err(|e| {
        AppError::Internal(format!("round {} has unreadable scores: {}", row.id, e))
    })?;

    Ok(RoundSummary {
        total_score: total_score(&scores),
        id: row.id,
        course_id: row.course_id,
        course_name: row.course_name,
        tee_box_id: row.tee_box_id,
        tee_name: row.tee_name,
        date: row.date,
        scores,
        putts: StatSeries::from_column(row.putts.as_deref()),
        gir: StatSeries::from_column(row.gir.as_deref()),
        fairways: StatSeries::from_column(row.fairways.as_deref()),
        bunkers: StatSeries::from_column(row.bunkers.as_deref()),
    })
}

fn encode<T>(result: Result<T, serde_json::Error>) -> Result<T, AppError> {
    result.map_err(|e| AppError::Internal(format!("failed to encode round statistics: {}", e)))
}
