use crate::models::PlacementGroup;
use super::client::api_call;
use super::error::ApiCallError;

pub async fn get_placement_group(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    id: u64,
) -> Result<PlacementGroup, ApiCallError> {
    let endpoint = format!("/placement/groups/{}", id);
    let resp = api_call(client, api_base_url, api_token, "GET", &endpoint, None, None).await?;
    Ok(serde_json::from_value(resp)?)
}
