use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::extract::{AppJson, CurrentUser};
use crate::error::AppError;
use crate::models::{NewRoundRequest, RoundCreated, RoundSummary};
use crate::services::RoundRecorder;
use crate::state::AppState;

pub async fn create_round(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<NewRoundRequest>,
) -> Result<(StatusCode, Json<RoundCreated>), AppError> {
    let id = RoundRecorder::new(state.db.clone()).record(&user, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(RoundCreated {
            id,
            message: "Round saved successfully".to_string(),
        }),
    ))
}

pub async fn list_rounds(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<RoundSummary>>, AppError> {
    let rounds = RoundRecorder::new(state.db.clone()).list(&user).await?;
    Ok(Json(rounds))
}
