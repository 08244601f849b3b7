use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::extract::{AppForm, AppJson};
use crate::error::AppError;
use crate::models::{AccessToken, LoginForm, RegisterRequest};
use crate::services::AuthService;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccessToken>), AppError> {
    let service = AuthService::new(state.db.clone(), state.config.clone());
    let token = service.register(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

pub async fn login(
    State(state): State<AppState>,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Json<AccessToken>, AppError> {
    let service = AuthService::new(state.db.clone(), state.config.clone());
    let token = service.login(&form.username, &form.password).await?;
    Ok(Json(token))
}
