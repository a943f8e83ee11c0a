use crate::models::StackScript;
use super::client::api_call;
use super::error::ApiCallError;

/// Fetch a StackScript (or Marketplace app script) with its UDFs and compatible images.
pub async fn get_stackscript(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    id: u64,
) -> Result<StackScript, ApiCallError> {
    let endpoint = format!("/linode/stackscripts/{}", id);
    let resp = api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    Ok(serde_json::from_value(resp)?)
}
