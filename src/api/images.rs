use crate::models::Image;
use super::client::get_all_pages;
use super::error::ApiCallError;

/// Load public images and the account's private images.
pub async fn load_images(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Vec<Image>, ApiCallError> {
    get_all_pages(client, api_base_url, api_token, "/images").await
}
