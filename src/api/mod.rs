pub mod auth;
pub mod courses;
pub mod extract;
pub mod rounds;

use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/register", post(auth::register))
        .route("/token", post(auth::login))
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route("/courses/{id}", get(courses::get_course))
        .route("/courses/json-upload", post(courses::upload_json))
        .route("/courses/csv-upload", post(courses::upload_csv))
        .route("/check-database", get(courses::check_database))
        .route("/seed", post(courses::seed_database))
        .route("/rounds", get(rounds::list_rounds).post(rounds::create_round));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
