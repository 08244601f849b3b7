use sqlx::SqlitePool;
use tracing::info;

use crate::db::courses;
use crate::error::AppError;
use crate::models::{NewCourseRequest, NewHole, NewTeeBox};

const SAMPLE_COURSES: [(&str, &str, &str); 5] = [
    ("Bro Hof Slott GC", "Stockholm, Sweden", "Championship level course"),
    ("Ullna Golf Club", "Stockholm, Sweden", "Beautiful lakeside course"),
    ("Halmstad GK (North)", "Halmstad, Sweden", "Classic Swedish course"),
    ("Falsterbo GK", "Falsterbo, Sweden", "Stunning coastal links"),
    ("Barsebäck Golf & CC", "Barsebäck, Sweden", "Former European Tour venue"),
];

const SAMPLE_TEES: [&str; 3] = ["Championship", "Club", "Forward"];

const HOLES_PER_TEE: i64 = 18;

/// The fixed sample catalogue: every course gets the same three tees of 18 holes.
pub fn sample_courses() -> Vec<NewCourseRequest> {
    SAMPLE_COURSES
        .iter()
        .map(|(name, location, description)| NewCourseRequest {
            name: name.to_string(),
            location: Some(location.to_string()),
            description: Some(description.to_string()),
            tee_boxes: (0i64..)
                .zip(SAMPLE_TEES)
                .map(|(tee_idx, tee_name)| NewTeeBox {
                    name: tee_name.to_string(),
                    holes: sample_holes(tee_idx),
                })
                .collect(),
        })
        .collect()
}

fn sample_holes(tee_idx: i64) -> Vec<NewHole> {
    let base_distance = 165 - tee_idx * 15;
    let increment = 15 - tee_idx * 2;

    (1..=HOLES_PER_TEE)
        .map(|number| NewHole {
            number,
            distance: base_distance + (number - 1) * increment,
            par: match number % 4 {
                0 => 5,
                2 => 3,
                _ => 4,
            },
            hcp_index: (number * 7) % 18 + 1,
        })
        .collect()
}

/// Replaces all course data with the sample catalogue. Rounds on replaced courses stay
/// stored but no longer appear in listings.
pub async fn reseed(db: &SqlitePool) -> Result<Vec<i64>, AppError> {
    let mut tx = db.begin().await?;
    courses::delete_all_course_data(&mut *tx).await?;

    let mut ids = Vec::with_capacity(SAMPLE_COURSES.len());
    for course in sample_courses() {
        ids.push(courses::insert_course_tree(&mut *tx, &course).await?);
    }
    tx.commit().await?;

    info!("seeded {} sample courses", ids.len());
    Ok(ids)
}
