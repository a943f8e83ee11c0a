use std::env;
use std::path::Path;

use crate::models::FeatureFlags;
use crate::utils::parse_flag;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "https://api.linode.com/v4";
pub const DEFAULT_API_TOKEN: &str = "";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

/// Feature flags gating parts of the create flow.
///
/// `LINODE_DISK_ENCRYPTION` enables the `disk_encryption` payload field and
/// `SECURE_VM_NOTICES` enables the firewall acknowledgement gate.
pub fn get_feature_flags() -> FeatureFlags {
    FeatureFlags {
        disk_encryption: parse_flag(env::var("LINODE_DISK_ENCRYPTION").ok().as_deref(), false),
        secure_vm_notices: parse_flag(env::var("SECURE_VM_NOTICES").ok().as_deref(), false),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
