mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{count, get, post_json, post_upload, send, test_app};

const CSV_HEADER: &str =
    "course_name,location,description,tee_name,hole_number,distance,par,hcp_index";

#[tokio::test]
async fn test_json_upload_creates_courses() {
    let (app, pool) = test_app().await;
    let payload = json!([
        {
            "name": "Links One",
            "location": "Coast",
            "teeBoxes": [
                {"name": "White", "holes": [
                    {"number": 1, "distance": 350, "par": 4, "hcp_index": 5},
                    {"number": 2, "distance": 150, "par": 3, "hcp_index": 17}
                ]}
            ]
        },
        {
            "name": "Parkland Two",
            "teeBoxes": [
                {"name": "Red", "holes": [
                    {"number": 1, "distance": 300, "par": 4, "hcp_index": 1}
                ]}
            ]
        }
    ]);

    let response = send(
        &app,
        post_upload(
            "/api/courses/json-upload",
            "file",
            "courses.json",
            payload.to_string().as_bytes(),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["message"], "Successfully added 2 courses");
    let ids = body["course_ids"].as_array().expect("Missing course_ids");
    assert_eq!(ids.len(), 2);

    let first = ids[0].as_i64().expect("Course id is not an integer");
    let detail = send(&app, get(&format!("/api/courses/{}", first), None))
        .await
        .json();
    assert_eq!(detail["name"], "Links One");
    assert_eq!(detail["location"], "Coast");
    assert_eq!(detail["teeBoxes"][0]["holes"][1]["hcp_index"], 17);

    assert_eq!(count(&pool, "holes").await, 3);
}

#[tokio::test]
async fn test_json_upload_is_all_or_nothing() {
    let (app, pool) = test_app().await;
    let payload = json!([
        {
            "name": "Valid Course",
            "teeBoxes": [
                {"name": "White", "holes": [
                    {"number": 1, "distance": 350, "par": 4, "hcp_index": 5}
                ]}
            ]
        },
        {"name": "No Tees"}
    ]);

    let response = send(
        &app,
        post_upload(
            "/api/courses/json-upload",
            "file",
            "courses.json",
            payload.to_string().as_bytes(),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.json()["detail"]
            .as_str()
            .is_some_and(|d| d.contains("No Tees"))
    );
    assert_eq!(count(&pool, "courses").await, 0);
}

#[tokio::test]
async fn test_json_upload_rejects_invalid_json() {
    let (app, pool) = test_app().await;
    let response = send(
        &app,
        post_upload("/api/courses/json-upload", "file", "courses.json", b"{not json"),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["detail"], "Invalid JSON format");
    assert_eq!(count(&pool, "courses").await, 0);
}

#[tokio::test]
async fn test_csv_upload_skips_only_invalid_holes() {
    let (app, pool) = test_app().await;
    let csv = format!(
        "{}\n{}\n{}\n{}\n",
        CSV_HEADER,
        "Meadow GC,Uppsala,Flat and open,Yellow,1,320,4,7",
        "Meadow GC,Uppsala,Flat and open,Yellow,0,150,3,15",
        "Meadow GC,Uppsala,Flat and open,Yellow,2,410,4,1",
    );

    let response = send(
        &app,
        post_upload("/api/courses/csv-upload", "file", "courses.csv", csv.as_bytes()),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["message"], "Successfully added 1 courses");

    let id = body["course_ids"][0].as_i64().expect("Missing course id");
    let detail = send(&app, get(&format!("/api/courses/{}", id), None))
        .await
        .json();
    assert_eq!(detail["description"], "Flat and open");
    let holes = detail["teeBoxes"][0]["holes"]
        .as_array()
        .expect("Missing holes");
    let numbers: Vec<i64> = holes.iter().filter_map(|h| h["number"].as_i64()).collect();
    assert_eq!(numbers, vec![1, 2]);

    assert_eq!(count(&pool, "tee_boxes").await, 1);
    assert_eq!(count(&pool, "holes").await, 2);
}

#[tokio::test]
async fn test_csv_upload_with_byte_order_mark() {
    let (app, pool) = test_app().await;
    let csv = format!(
        "\u{feff}course_name,tee_name,hole_number,distance,par,hcp_index\n{}\n",
        "Forest GK,Blue,1,380,4,3",
    );

    let response = send(
        &app,
        post_upload("/api/courses/csv-upload", "file", "courses.csv", csv.as_bytes()),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(count(&pool, "courses").await, 1);
}

#[tokio::test]
async fn test_csv_upload_requires_columns() {
    let (app, pool) = test_app().await;
    let csv = "course_name,tee_name,hole_number,distance,par\nForest GK,Blue,1,380,4\n";

    let response = send(
        &app,
        post_upload("/api/courses/csv-upload", "file", "courses.csv", csv.as_bytes()),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["detail"],
        "Missing required column: hcp_index"
    );
    assert_eq!(count(&pool, "courses").await, 0);
}

#[tokio::test]
async fn test_csv_upload_rejects_non_utf8() {
    let (app, pool) = test_app().await;
    let mut csv = b"course_name,tee_name,hole_number,distance,par,hcp_index\n".to_vec();
    csv.extend_from_slice(b"Bj\xf6rkhagen,Gul,1,300,4,1\n");

    let response = send(
        &app,
        post_upload("/api/courses/csv-upload", "file", "courses.csv", &csv),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["detail"], "Internal server error");
    assert_eq!(count(&pool, "courses").await, 0);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let (app, _pool) = test_app().await;
    let response = send(
        &app,
        post_upload("/api/courses/csv-upload", "attachment", "courses.csv", b"x"),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["detail"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_without_multipart_body() {
    let (app, pool) = test_app().await;
    let payload = json!([{ "name": "Links One", "teeBoxes": [] }]);

    let response = send(&app, post_json("/api/courses/json-upload", &payload, None)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["detail"].is_string());
    assert_eq!(count(&pool, "courses").await, 0);
}
