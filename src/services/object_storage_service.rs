use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::models::{ApiError, ExtendedObject, ObjectStorageObject};
use crate::utils::{readable_bytes, truncate_end, truncate_middle};

pub const OBJECTS_ERROR_MESSAGE: &str = "We were unable to load your Objects.";
pub const EMPTY_BUCKET_MESSAGE: &str = "This bucket is empty.";
pub const EMPTY_FOLDER_MESSAGE: &str = "This folder is empty.";

/// Viewports narrower than this get shorter display names.
const NARROW_VIEWPORT: u16 = 600;

fn is_folder(object: &ObjectStorageObject) -> bool {
    object.name.ends_with('/') || (object.size.is_none() && object.last_modified.is_none())
}

/// Annotate a raw listing entry for display under `prefix`.
pub fn extend_object(object: ObjectStorageObject, prefix: &str, manually_created: bool) -> ExtendedObject {
    let folder = is_folder(&object);
    let relative = object.name.strip_prefix(prefix).unwrap_or(&object.name);
    let display_name = relative.trim_end_matches('/').to_string();
    // The folder placeholder object shares the prefix's own name.
    let should_display = object.name != prefix;
    ExtendedObject {
        display_name,
        is_folder: folder,
        should_display,
        manually_created,
        object,
    }
}

pub fn extend_objects(objects: Vec<ObjectStorageObject>, prefix: &str) -> Vec<ExtendedObject> {
    objects
        .into_iter()
        .map(|o| extend_object(o, prefix, false))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectRow {
    Folder {
        name: String,
        display_name: String,
        manually_created: bool,
    },
    Object {
        name: String,
        display_name: String,
        size: String,
        last_modified: String,
        manually_created: bool,
    },
}

/// What the bucket table shows for a given listing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ObjectTableContent {
    Loading,
    Error { message: String },
    Empty { message: String },
    Rows {
        rows: Vec<ObjectRow>,
        /// More pages are still being fetched.
        loading_more: bool,
    },
}

/// Render an API timestamp as `YYYY-MM-DD HH:MM` in UTC. Unparseable
/// values come back unchanged.
pub fn format_last_modified(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => naive.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn max_name_width(viewport_width: u16) -> usize {
    if viewport_width < NARROW_VIEWPORT {
        20
    } else {
        40
    }
}

pub fn table_content(
    data: &[ExtendedObject],
    loading: bool,
    error: Option<&[ApiError]>,
    prefix: &str,
    viewport_width: u16,
) -> ObjectTableContent {
    if loading && data.is_empty() {
        return ObjectTableContent::Loading;
    }
    if error.is_some() {
        return ObjectTableContent::Error {
            message: OBJECTS_ERROR_MESSAGE.to_string(),
        };
    }
    if data.is_empty() && prefix.is_empty() {
        return ObjectTableContent::Empty {
            message: EMPTY_BUCKET_MESSAGE.to_string(),
        };
    }
    if data.iter().all(|o| !o.should_display) {
        return ObjectTableContent::Empty {
            message: EMPTY_FOLDER_MESSAGE.to_string(),
        };
    }

    let width = max_name_width(viewport_width);
    let rows = data
        .iter()
        .filter(|o| o.should_display)
        .map(|o| {
            if o.is_folder {
                ObjectRow::Folder {
                    name: o.object.name.clone(),
                    display_name: truncate_end(&o.display_name, width),
                    manually_created: o.manually_created,
                }
            } else {
                ObjectRow::Object {
                    name: o.object.name.clone(),
                    display_name: truncate_middle(&o.display_name, width),
                    size: readable_bytes(o.object.size.unwrap_or(0)),
                    last_modified: o
                        .object
                        .last_modified
                        .as_deref()
                        .map(format_last_modified)
                        .unwrap_or_default(),
                    manually_created: o.manually_created,
                }
            }
        })
        .collect();

    ObjectTableContent::Rows {
        rows,
        loading_more: loading,
    }
}
