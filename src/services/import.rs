//! Bulk course import from uploaded JSON or CSV files.
//!
//! Both formats are strict about the course level and lenient below it: a malformed tee box
//! or hole is dropped silently so that one bad spreadsheet row never discards a whole course.

use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::courses;
use crate::error::AppError;
use crate::models::{ImportResult, NewCourseRequest, NewHole, NewTeeBox};

const REQUIRED_CSV_COLUMNS: [&str; 6] = [
    "course_name",
    "tee_name",
    "hole_number",
    "distance",
    "par",
    "hcp_index",
];

pub struct CourseImporter {
    db: SqlitePool,
}

impl CourseImporter {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn import_json(&self, payload: &[u8]) -> Result<ImportResult, AppError> {
        let courses = parse_structured(payload)?;
        self.persist(&courses).await
    }

    pub async fn import_csv(&self, payload: &[u8]) -> Result<ImportResult, AppError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| AppError::Internal(format!("CSV upload is not valid UTF-8: {}", e)))?;
        let courses = parse_delimited(text)?;
        self.persist(&courses).await
    }

    /// Creates one course from a fully specified payload, returning its id.
    pub async fn create_course(&self, course: &NewCourseRequest) -> Result<i64, AppError> {
        if course.name.trim().is_empty() {
            return Err(AppError::validation("Course name is required"));
        }
        if course.tee_boxes.is_empty() {
            return Err(AppError::validation("At least one tee box is required"));
        }
        let mut tx = self.db.begin().await?;
        let id = courses::insert_course_tree(&mut *tx, course).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// All courses commit together or not at all.
    async fn persist(&self, batch: &[NewCourseRequest]) -> Result<ImportResult, AppError> {
        let mut tx = self.db.begin().await?;
        let mut course_ids = Vec::with_capacity(batch.len());
        for course in batch {
            course_ids.push(courses::insert_course_tree(&mut *tx, course).await?);
        }
        tx.commit().await?;

        info!("imported {} courses", course_ids.len());
        Ok(ImportResult::new(course_ids))
    }
}

/// Parses a JSON upload holding one course object or an array of them.
pub fn parse_structured(payload: &[u8]) -> Result<Vec<NewCourseRequest>, AppError> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|_| AppError::validation("Invalid JSON format"))?;

    let items = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => return Err(AppError::validation("Invalid JSON format")),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_course(index, item))
        .collect()
}

fn parse_course(index: usize, item: &Value) -> Result<NewCourseRequest, AppError> {
    let obj = item
        .as_object()
        .ok_or_else(|| AppError::Validation(format!("Course at index {} is not an object", index)))?;

    let name = non_empty_str(obj, "name").ok_or_else(|| {
        AppError::Validation(format!("Course at index {} is missing a name", index))
    })?;

    let tee_boxes = obj
        .get("teeBoxes")
        .and_then(Value::as_array)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Validation(format!("Course '{}' is missing teeBoxes", name))
        })?;

    Ok(NewCourseRequest {
        name: name.to_string(),
        location: optional_str(obj, "location"),
        description: optional_str(obj, "description"),
        tee_boxes: tee_boxes.iter().filter_map(parse_tee_box).collect(),
    })
}

fn parse_tee_box(value: &Value) -> Option<NewTeeBox> {
    let obj = value.as_object()?;
    let name = non_empty_str(obj, "name")?;
    let holes = obj.get("holes")?.as_array().filter(|h| !h.is_empty())?;

    Some(NewTeeBox {
        name: name.to_string(),
        holes: holes.iter().filter_map(parse_hole).collect(),
    })
}

fn parse_hole(value: &Value) -> Option<NewHole> {
    let obj = value.as_object()?;
    let field = |key: &str| obj.get(key)?.as_i64().filter(|n| *n >= 1);

    Some(NewHole {
        number: field("number")?,
        distance: field("distance")?,
        par: field("par")?,
        hcp_index: field("hcp_index")?,
    })
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn optional_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Parses a CSV upload with one row per (course, tee, hole).
///
/// Courses and tees keep the order in which they first appear; location and description
/// come from a course's first row.
pub fn parse_delimited(text: &str) -> Result<Vec<NewCourseRequest>, AppError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| AppError::validation("Invalid CSV format"))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    for required in REQUIRED_CSV_COLUMNS {
        if column(required).is_none() {
            return Err(AppError::Validation(format!(
                "Missing required column: {}",
                required
            )));
        }
    }

    let columns = CsvColumns {
        course_name: column("course_name"),
        location: column("location"),
        description: column("description"),
        tee_name: column("tee_name"),
        hole_number: column("hole_number"),
        distance: column("distance"),
        par: column("par"),
        hcp_index: column("hcp_index"),
    };

    let mut grouped: Vec<NewCourseRequest> = Vec::new();
    let mut rows = 0usize;

    for record in reader.records() {
        let record = record.map_err(|_| AppError::validation("Invalid CSV format"))?;
        rows += 1;

        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let course_name = cell(columns.course_name);
        let tee_name = cell(columns.tee_name);
        if course_name.is_empty() || tee_name.is_empty() {
            debug!("skipping CSV row {} without course or tee name", rows);
            continue;
        }

        let course = match grouped.iter().position(|c| c.name == course_name) {
            Some(i) => &mut grouped[i],
            None => {
                grouped.push(NewCourseRequest {
                    name: course_name.to_string(),
                    location: non_empty(cell(columns.location)),
                    description: non_empty(cell(columns.description)),
                    tee_boxes: Vec::new(),
                });
                let last = grouped.len() - 1;
                &mut grouped[last]
            }
        };

        let tee_box = match course.tee_boxes.iter().position(|t| t.name == tee_name) {
            Some(i) => &mut course.tee_boxes[i],
            None => {
                course.tee_boxes.push(NewTeeBox {
                    name: tee_name.to_string(),
                    holes: Vec::new(),
                });
                let last = course.tee_boxes.len() - 1;
                &mut course.tee_boxes[last]
            }
        };

        let positive = |idx: Option<usize>| cell(idx).parse::<i64>().ok().filter(|n| *n >= 1);
        match (
            positive(columns.hole_number),
            positive(columns.distance),
            positive(columns.par),
            positive(columns.hcp_index),
        ) {
            (Some(number), Some(distance), Some(par), Some(hcp_index)) => {
                tee_box.holes.push(NewHole {
                    number,
                    distance,
                    par,
                    hcp_index,
                });
            }
            _ => debug!("skipping hole on CSV row {}", rows),
        }
    }

    if rows == 0 {
        return Err(AppError::validation(
            "CSV file must have a header row and at least one data row",
        ));
    }

    Ok(grouped
        .into_iter()
        .filter_map(|mut course| {
            course.tee_boxes.retain(|t| !t.holes.is_empty());
            (!course.tee_boxes.is_empty()).then_some(course)
        })
        .collect())
}

struct CsvColumns {
    course_name: Option<usize>,
    location: Option<usize>,
    description: Option<usize>,
    tee_name: Option<usize>,
    hole_number: Option<usize>,
    distance: Option<usize>,
    par: Option<usize>,
    hcp_index: Option<usize>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
