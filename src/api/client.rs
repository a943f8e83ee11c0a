use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use yansi::Paint;

use super::error::ApiCallError;
use crate::models::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

const PAGE_SIZE: u32 = 500;

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        eprintln!("{}", msg);
    }
}

fn curl_line(
    method: &str,
    url: &str,
    api_token: &str,
    body: Option<&Value>,
) -> String {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));

    if !api_token.is_empty() {
        // The token itself never reaches the log.
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Authorization: Bearer $API_TOKEN'").fg(yansi::Color::Magenta)
        ));
    }
    if let Some(d) = body {
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    parts.join(" ")
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

/// Core HTTP client function for making API calls.
/// Handles authentication, request logging, and the `{"errors": [...]}` envelope.
pub async fn api_call(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    method: &str,
    endpoint: &str,
    body: Option<Value>,
    params: Option<Vec<(String, String)>>,
) -> Result<Value, ApiCallError> {
    let url = format!("{}{}", api_base_url, endpoint);

    let mut url_for_log = url.clone();
    if let Some(ref p) = params {
        if !p.is_empty() {
            let query_string = p
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<String>>()
                .join("&");
            url_for_log = format!("{}?{}", url_for_log, query_string);
        }
    }
    log_output(format!(
        "Request:\n{}",
        curl_line(method, &url_for_log, api_token, body.as_ref())
    ));

    let mut req = match method {
        "POST" => client.post(&url),
        "PUT" => client.put(&url),
        "DELETE" => client.delete(&url),
        _ => client.get(&url),
    };
    if !api_token.is_empty() {
        req = req.bearer_auth(api_token);
    }
    if let Some(ref p) = params {
        req = req.query(p);
    }
    if let Some(ref b) = body {
        req = req.json(b);
    }

    let resp = req.send().await?;
    let status = resp.status();
    let text = resp.text().await?;
    tracing::debug!(%status, endpoint, "API response received");

    let response_str = Paint::new(&text).rgb(100, 100, 100).to_string();
    log_output(format!("Response:\n{}", response_str));

    if !status.is_success() {
        let errors = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|e| e.errors)
            .unwrap_or_default();
        if errors.is_empty() {
            return Err(ApiCallError::Status(status.as_u16()));
        }
        return Err(ApiCallError::Api(errors));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

fn first_page() -> u32 {
    1
}

#[derive(Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "first_page")]
    pages: u32,
}

/// Fetch every page of a collection endpoint.
pub async fn get_all_pages<T: DeserializeOwned>(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    endpoint: &str,
) -> Result<Vec<T>, ApiCallError> {
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let params = vec![
            ("page".to_string(), page.to_string()),
            ("page_size".to_string(), PAGE_SIZE.to_string()),
        ];
        let payload = api_call(client, api_base_url, api_token, "GET", endpoint, None, Some(params)).await?;
        let parsed: Page<T> = serde_json::from_value(payload)?;
        items.extend(parsed.data);
        if parsed.page >= parsed.pages {
            break;
        }
        page += 1;
    }
    Ok(items)
}
