use serde::{Deserialize, Serialize};

/// An entry of a bucket's object listing. Folders carry only a name ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStorageObject {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub etag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedObject {
    #[serde(flatten)]
    pub object: ObjectStorageObject,
    pub display_name: String,
    pub is_folder: bool,
    pub should_display: bool,
    pub manually_created: bool,
}
