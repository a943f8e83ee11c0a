use serde_json::json;

use crate::models::{AccountAgreements, Profile};
use super::client::api_call;
use super::error::ApiCallError;

pub async fn load_profile(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Profile, ApiCallError> {
    let resp = api_call(client, api_base_url, api_token, "GET", "/profile", None, None).await?;
    Ok(serde_json::from_value(resp)?)
}

pub async fn load_agreements(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<AccountAgreements, ApiCallError> {
    let resp = api_call(client, api_base_url, api_token, "GET", "/account/agreements", None, None).await?;
    Ok(serde_json::from_value(resp)?)
}

/// Record acceptance of the EU model contract and privacy policy.
pub async fn sign_agreement(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<(), ApiCallError> {
    let body = json!({ "eu_model": true, "privacy_policy": true });
    api_call(client, api_base_url, api_token, "POST", "/account/agreements", Some(body), None).await?;
    Ok(())
}
