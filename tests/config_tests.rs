use std::collections::HashMap;
use std::time::Duration;

use promo_relay::config::Config;

fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let config = load(&[]).unwrap();
    assert!(config.bot_token.is_none());
    assert!(config.admin_id.is_none());
    assert_eq!(config.host.to_string(), "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.telegram_api_url, "https://api.telegram.org");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.max_body_size, 26_214_400);
    assert!(!config.require_config);
    assert!(!config.is_telegram_configured());
}

#[test]
fn credentials_are_read() {
    let config = load(&[("BOT_TOKEN", "abc:123"), ("ADMIN_ID", "42")]).unwrap();
    assert!(config.is_telegram_configured());
    let target = config.telegram().unwrap();
    assert_eq!(target.bot_token, "abc:123");
    assert_eq!(target.admin_id, "42");
}

#[test]
fn empty_strings_count_as_unset() {
    let config = load(&[("BOT_TOKEN", ""), ("ADMIN_ID", "   "), ("PORT", "")]).unwrap();
    assert!(config.bot_token.is_none());
    assert!(config.admin_id.is_none());
    assert_eq!(config.port, 3000);
}

#[test]
fn require_config_refuses_missing_credentials() {
    let err = load(&[("PROMO_REQUIRE_CONFIG", "true"), ("BOT_TOKEN", "abc")]).unwrap_err();
    assert!(err.contains("PROMO_REQUIRE_CONFIG"), "{err}");

    let config = load(&[
        ("PROMO_REQUIRE_CONFIG", "true"),
        ("BOT_TOKEN", "abc"),
        ("ADMIN_ID", "42"),
    ])
    .unwrap();
    assert!(config.require_config);
}

#[test]
fn zero_timeout_is_rejected() {
    let err = load(&[("PROMO_REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
    assert!(err.contains("PROMO_REQUEST_TIMEOUT_SECS"), "{err}");
}

#[test]
fn invalid_port_is_rejected() {
    let err = load(&[("PORT", "70000")]).unwrap_err();
    assert!(err.starts_with("Invalid PORT"), "{err}");
}

#[test]
fn invalid_host_is_rejected() {
    let err = load(&[("PROMO_HOST", "not-an-ip")]).unwrap_err();
    assert!(err.starts_with("Invalid PROMO_HOST"), "{err}");
}

#[test]
fn api_url_trailing_slash_is_trimmed() {
    let config = load(&[("TELEGRAM_API_URL", "http://localhost:8081/")]).unwrap();
    assert_eq!(config.telegram_api_url, "http://localhost:8081");
}

#[test]
fn debug_output_redacts_token() {
    let config = load(&[("BOT_TOKEN", "super-secret"), ("ADMIN_ID", "42")]).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}
