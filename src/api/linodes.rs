use crate::models::{CreateLinodeRequest, Linode, LinodeType};
use super::client::{api_call, get_all_pages};
use super::error::ApiCallError;

/// Load the account's instances (clone sources and label collision set).
pub async fn load_linodes(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Vec<Linode>, ApiCallError> {
    get_all_pages(client, api_base_url, api_token, "/linode/instances").await
}

pub async fn load_types(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Vec<LinodeType>, ApiCallError> {
    get_all_pages(client, api_base_url, api_token, "/linode/types").await
}

pub async fn create_linode(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    payload: &CreateLinodeRequest,
) -> Result<Linode, ApiCallError> {
    let body = serde_json::to_value(payload)?;
    let resp = api_call(client, api_base_url, api_token, "POST", "/linode/instances", Some(body), None).await?;
    Ok(serde_json::from_value(resp)?)
}

pub async fn clone_linode(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    source_linode_id: u64,
    payload: &CreateLinodeRequest,
) -> Result<Linode, ApiCallError> {
    let endpoint = format!("/linode/instances/{}/clone", source_linode_id);
    let body = serde_json::to_value(payload)?;
    let resp = api_call(client, api_base_url, api_token, "POST", &endpoint, Some(body), None).await?;
    Ok(serde_json::from_value(resp)?)
}
