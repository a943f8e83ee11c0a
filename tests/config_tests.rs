use lcm::config;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

// Tests in this file share process environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("https://api.linode.com/v4/"),
        "https://api.linode.com/v4"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("https://api.linode.com/v4beta///"),
        "https://api.linode.com/v4beta"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  https://api.linode.com/v4/  "),
        "https://api.linode.com/v4"
    );
}

#[test]
fn test_sanitize_base_url_empty_uses_default() {
    assert_eq!(config::sanitize_base_url(""), config::DEFAULT_API_BASE_URL);
    assert_eq!(config::sanitize_base_url("   "), config::DEFAULT_API_BASE_URL);
}

#[test]
fn test_get_api_base_url_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("API_BASE_URL", "http://localhost:9000/v4/");

    assert_eq!(config::get_api_base_url(), "http://localhost:9000/v4");

    env::remove_var("API_BASE_URL");
    assert_eq!(config::get_api_base_url(), "https://api.linode.com/v4");
}

#[test]
fn test_feature_flags_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("LINODE_DISK_ENCRYPTION", "yes");
    env::set_var("SECURE_VM_NOTICES", "0");

    let flags = config::get_feature_flags();
    assert!(flags.disk_encryption);
    assert!(!flags.secure_vm_notices);

    env::remove_var("LINODE_DISK_ENCRYPTION");
    env::remove_var("SECURE_VM_NOTICES");
    assert_eq!(config::get_feature_flags(), Default::default());
}

#[test]
fn test_api_token_defaults_to_empty() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var("API_TOKEN");
    assert_eq!(config::get_api_token(), "");

    env::set_var("API_TOKEN", "abc123");
    assert_eq!(config::get_api_token(), "abc123");
    env::remove_var("API_TOKEN");
}
