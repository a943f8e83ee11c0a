use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use lcm::api::load_objects;
use lcm::api::client::set_silent;
use lcm::models::{ApiError, ObjectStorageObject};
use lcm::services::object_storage_service::{
    format_last_modified, max_name_width, EMPTY_BUCKET_MESSAGE, EMPTY_FOLDER_MESSAGE,
    OBJECTS_ERROR_MESSAGE,
};
use lcm::services::{extend_object, extend_objects, table_content, ObjectRow, ObjectTableContent};

fn object(name: &str, size: u64) -> ObjectStorageObject {
    ObjectStorageObject {
        name: name.to_string(),
        size: Some(size),
        last_modified: Some("2024-03-05T14:07:00.000Z".to_string()),
        etag: Some("abc".to_string()),
    }
}

fn folder(name: &str) -> ObjectStorageObject {
    ObjectStorageObject {
        name: name.to_string(),
        size: None,
        last_modified: None,
        etag: None,
    }
}

#[test]
fn test_extend_object_under_prefix() {
    let ext = extend_object(object("photos/cat.png", 10), "photos/", false);
    assert_eq!(ext.display_name, "cat.png");
    assert!(!ext.is_folder);
    assert!(ext.should_display);

    let ext = extend_object(folder("photos/2024/"), "photos/", false);
    assert_eq!(ext.display_name, "2024");
    assert!(ext.is_folder);

    let placeholder = extend_object(object("photos/", 0), "photos/", false);
    assert!(!placeholder.should_display);
}

#[test]
fn test_loading_without_data() {
    assert_eq!(table_content(&[], true, None, "", 1024), ObjectTableContent::Loading);
}

#[test]
fn test_error_state() {
    let data = extend_objects(vec![object("a.txt", 1)], "");
    let errors = vec![ApiError::general("boom")];
    assert_eq!(
        table_content(&data, false, Some(errors.as_slice()), "", 1024),
        ObjectTableContent::Error {
            message: OBJECTS_ERROR_MESSAGE.to_string()
        }
    );
}

#[test]
fn test_empty_bucket_and_empty_folder() {
    assert_eq!(
        table_content(&[], false, None, "", 1024),
        ObjectTableContent::Empty {
            message: EMPTY_BUCKET_MESSAGE.to_string()
        }
    );

    let data = extend_objects(vec![object("logs/", 0)], "logs/");
    assert_eq!(
        table_content(&data, false, None, "logs/", 1024),
        ObjectTableContent::Empty {
            message: EMPTY_FOLDER_MESSAGE.to_string()
        }
    );
}

#[test]
fn test_rows_truncate_by_viewport() {
    let long_folder = "a-very-long-folder-name-that-keeps-going/";
    let long_object = "an-extremely-long-object-name-for-testing.tar.gz";
    let data = extend_objects(vec![folder(long_folder), object(long_object, 1536)], "");

    let ObjectTableContent::Rows { rows, loading_more } = table_content(&data, false, None, "", 500) else {
        panic!("expected rows");
    };
    assert!(!loading_more);
    assert_eq!(rows.len(), 2);
    match &rows[0] {
        ObjectRow::Folder { display_name, .. } => {
            assert_eq!(display_name, "a-very-long-folder-n...");
        }
        other => panic!("unexpected row {:?}", other),
    }
    match &rows[1] {
        ObjectRow::Object { display_name, size, last_modified, .. } => {
            assert_eq!(display_name, "an-extreme...ing.tar.gz");
            assert_eq!(size, "1.5 KB");
            assert_eq!(last_modified, "2024-03-05 14:07");
        }
        other => panic!("unexpected row {:?}", other),
    }
}

#[test]
fn test_name_width_breakpoint() {
    assert_eq!(max_name_width(599), 20);
    assert_eq!(max_name_width(600), 40);
}

#[test]
fn test_unparseable_timestamp_is_kept() {
    assert_eq!(format_last_modified("yesterday"), "yesterday");
    assert_eq!(format_last_modified("2024-03-05T14:07:59"), "2024-03-05 14:07");
}

#[tokio::test]
async fn test_listing_stops_when_marker_does_not_advance() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/object-storage/buckets/:cluster/:bucket/object-list",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                let n = hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({
                    "data": [{ "name": format!("file-{}.txt", n) }],
                    "is_truncated": true,
                    "next_marker": "file-0.txt"
                }))
            }),
        )
        .with_state(hits.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    set_silent(true);
    let base = format!("http://{}", addr);
    let objects = load_objects(&reqwest::Client::new(), &base, "", "us-east-1", "media", "")
        .await
        .unwrap();

    let names: Vec<_> = objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["file-0.txt", "file-1.txt"]);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
