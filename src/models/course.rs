use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeeBox {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    #[sqlx(skip)]
    pub holes: Vec<Hole>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hole {
    pub id: i64,
    pub tee_box_id: i64,
    pub number: i64,
    pub distance: i64,
    pub par: i64,
    pub hcp_index: i64,
}

/// A course with its full tee box and hole tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "teeBoxes")]
    pub tee_boxes: Vec<TeeBox>,
}

impl CourseDetail {
    pub fn new(course: Course, tee_boxes: Vec<TeeBox>) -> Self {
        Self {
            id: course.id,
            name: course.name,
            location: course.location,
            description: course.description,
            tee_boxes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "teeBoxes")]
    pub tee_boxes: Vec<NewTeeBox>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeeBox {
    pub name: String,
    pub holes: Vec<NewHole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHole {
    pub number: i64,
    pub distance: i64,
    pub par: i64,
    pub hcp_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub message: String,
    pub course_ids: Vec<i64>,
}

impl ImportResult {
    pub fn new(course_ids: Vec<i64>) -> Self {
        Self {
            message: format!("Successfully added {} courses", course_ids.len()),
            course_ids,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub initialized: bool,
    pub has_courses: bool,
}
