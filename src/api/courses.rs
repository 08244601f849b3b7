use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::api::extract::{AppJson, AppMultipart};
use crate::db::courses;
use crate::error::AppError;
use crate::models::{Course, CourseDetail, DatabaseStatus, ImportResult, NewCourseRequest};
use crate::services::{CourseImporter, seed};
use crate::state::AppState;

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = courses::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseDetail>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::validation("Invalid course ID"))?;
    let course = courses::find_course_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    Ok(Json(course))
}

pub async fn create_course(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewCourseRequest>,
) -> Result<(StatusCode, Json<CourseDetail>), AppError> {
    let id = CourseImporter::new(state.db.clone()).create_course(&req).await?;
    let course = courses::find_course_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("course {} vanished after insert", id)))?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn check_database(
    State(state): State<AppState>,
) -> Result<Json<DatabaseStatus>, AppError> {
    let count = courses::count_courses(&state.db).await?;
    Ok(Json(DatabaseStatus {
        initialized: true,
        has_courses: count > 0,
    }))
}

pub async fn seed_database(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    seed::reseed(&state.db).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Database seeded successfully" })),
    ))
}

pub async fn upload_json(
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> Result<(StatusCode, Json<ImportResult>), AppError> {
    let payload = read_upload(multipart).await?;
    let result = CourseImporter::new(state.db.clone()).import_json(&payload).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn upload_csv(
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> Result<(StatusCode, Json<ImportResult>), AppError> {
    let payload = read_upload(multipart).await?;
    let result = CourseImporter::new(state.db.clone()).import_csv(&payload).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Returns the bytes of the multipart field named `file`.
async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            return Ok(field.bytes().await?.to_vec());
        }
    }
    Err(AppError::validation("No file uploaded"))
}
