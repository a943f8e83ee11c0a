use crate::models::Region;
use super::client::get_all_pages;
use super::error::ApiCallError;

/// Load all regions with their capabilities.
pub async fn load_regions(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Vec<Region>, ApiCallError> {
    get_all_pages(client, api_base_url, api_token, "/regions").await
}
