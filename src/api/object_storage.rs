use serde::Deserialize;

use crate::models::ObjectStorageObject;
use super::client::api_call;
use super::error::ApiCallError;

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectListPage {
    #[serde(default)]
    pub data: Vec<ObjectStorageObject>,
    #[serde(default)]
    pub is_truncated: bool,
    #[serde(default)]
    pub next_marker: Option<String>,
}

/// List the objects directly under `prefix`, following markers until the
/// listing is complete.
pub async fn load_objects(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    cluster: &str,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<ObjectStorageObject>, ApiCallError> {
    let endpoint = format!(
        "/object-storage/buckets/{}/{}/object-list",
        urlencoding::encode(cluster),
        urlencoding::encode(bucket)
    );
    let mut objects = Vec::new();
    let mut marker: Option<String> = None;
    loop {
        let mut params = vec![
            ("delimiter".to_string(), "/".to_string()),
            ("prefix".to_string(), prefix.to_string()),
        ];
        if let Some(ref m) = marker {
            params.push(("marker".to_string(), m.clone()));
        }
        let resp = api_call(client, api_base_url, api_token, "GET", &endpoint, None, Some(params)).await?;
        let page: ObjectListPage = serde_json::from_value(resp)?;
        objects.extend(page.data);
        match page.next_marker {
            Some(next) if page.is_truncated && marker.as_deref() != Some(next.as_str()) => {
                marker = Some(next)
            }
            Some(next) if page.is_truncated => {
                tracing::warn!(marker = %next, "Object listing did not advance; stopping");
                break;
            }
            _ => break,
        }
    }
    Ok(objects)
}
