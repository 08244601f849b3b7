use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{Course, CourseDetail, Hole, NewCourseRequest, TeeBox};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>("SELECT id, name, location, description FROM courses ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<CourseDetail>, sqlx::Error> {
    let course = match sqlx::query_as::<_, Course>(
        "SELECT id, name, location, description FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    {
        Some(c) => c,
        None => return Ok(None),
    };

    let mut tee_boxes = sqlx::query_as::<_, TeeBox>(
        "SELECT id, course_id, name FROM tee_boxes WHERE course_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(db)
    .await?;

    let holes = sqlx::query_as::<_, Hole>(
        r#"
        SELECT h.id, h.tee_box_id, h.number, h.distance, h.par, h.hcp_index
        FROM holes h
        JOIN tee_boxes t ON h.tee_box_id = t.id
        WHERE t.course_id = ?
        ORDER BY h.id
        "#,
    )
    .bind(id)
    .fetch_all(db)
    .await?;

    for hole in holes {
        if let Some(tee_box) = tee_boxes.iter_mut().find(|t| t.id == hole.tee_box_id) {
            tee_box.holes.push(hole);
        }
    }

    Ok(Some(CourseDetail::new(course, tee_boxes)))
}

pub async fn count_courses(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(db)
        .await
}

/// Inserts a course with all of its tee boxes and holes, returning the new course id.
pub async fn insert_course_tree(
    conn: &mut SqliteConnection,
    course: &NewCourseRequest,
) -> Result<i64, sqlx::Error> {
    let course_id = sqlx::query("INSERT INTO courses (name, location, description) VALUES (?, ?, ?)")
        .bind(&course.name)
        .bind(&course.location)
        .bind(&course.description)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    for tee_box in &course.tee_boxes {
        let tee_box_id = sqlx::query("INSERT INTO tee_boxes (course_id, name) VALUES (?, ?)")
            .bind(course_id)
            .bind(&tee_box.name)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        for hole in &tee_box.holes {
            sqlx::query(
                "INSERT INTO holes (tee_box_id, number, distance, par, hcp_index) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(tee_box_id)
            .bind(hole.number)
            .bind(hole.distance)
            .bind(hole.par)
            .bind(hole.hcp_index)
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(course_id)
}

/// Removes every course together with its tee boxes and holes. Recorded rounds are kept.
pub async fn delete_all_course_data(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for statement in [
        "DELETE FROM holes",
        "DELETE FROM tee_boxes",
        "DELETE FROM courses",
    ] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

pub async fn tee_box_belongs_to_course(
    conn: &mut SqliteConnection,
    course_id: i64,
    tee_box_id: i64,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM tee_boxes WHERE id = ? AND course_id = ?")
            .bind(tee_box_id)
            .bind(course_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(found.is_some())
}
