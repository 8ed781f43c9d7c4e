use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

#[derive(Clone)]
pub struct Config {
    pub bot_token: Option<String>,
    pub admin_id: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub telegram_api_url: String,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub static_dir: PathBuf,
    pub require_config: bool,
    pub log_level: String,
}

/// Credentials needed to talk to the Bot API, resolved per request.
#[derive(Debug, Clone, Copy)]
pub struct TelegramTarget<'a> {
    pub bot_token: &'a str,
    pub admin_id: &'a str,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_optional = |key: &str| non_empty(lookup(key));
        let env_or = |key: &str, default: &str| {
            env_optional(key).unwrap_or_else(|| default.to_string())
        };

        let bot_token = env_optional("BOT_TOKEN");
        let admin_id = env_optional("ADMIN_ID");

        let host: IpAddr = env_or("PROMO_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PROMO_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let telegram_api_url = env_or("TELEGRAM_API_URL", "https://api.telegram.org")
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = env_or("PROMO_REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid PROMO_REQUEST_TIMEOUT_SECS: {e}"))?;
        if timeout_secs == 0 {
            return Err("PROMO_REQUEST_TIMEOUT_SECS must be greater than zero".to_string());
        }

        let max_body_size: usize = env_or("PROMO_MAX_BODY_SIZE", "26214400")
            .parse()
            .map_err(|e| format!("Invalid PROMO_MAX_BODY_SIZE: {e}"))?;

        let static_dir = PathBuf::from(env_or("PROMO_STATIC_DIR", "static"));

        let require_config = match env_or("PROMO_REQUIRE_CONFIG", "false").as_str() {
            "true" | "1" | "yes" => true,
            _ => false,
        };

        let log_level = env_or("PROMO_LOG_LEVEL", "info");

        let config = Config {
            bot_token,
            admin_id,
            host,
            port,
            telegram_api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            max_body_size,
            static_dir,
            require_config,
            log_level,
        };

        if config.require_config && !config.is_telegram_configured() {
            return Err("BOT_TOKEN and ADMIN_ID are required when PROMO_REQUIRE_CONFIG is set".to_string());
        }

        Ok(config)
    }

    pub fn is_telegram_configured(&self) -> bool {
        self.bot_token.is_some() && self.admin_id.is_some()
    }

    pub fn telegram(&self) -> Result<TelegramTarget<'_>, AppError> {
        match (self.bot_token.as_deref(), self.admin_id.as_deref()) {
            (Some(bot_token), Some(admin_id)) => Ok(TelegramTarget { bot_token, admin_id }),
            (None, _) => Err(AppError::Configuration("BOT_TOKEN is not configured".to_string())),
            (_, None) => Err(AppError::Configuration("ADMIN_ID is not configured".to_string())),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("admin_id", &self.admin_id)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("request_timeout", &self.request_timeout)
            .field("max_body_size", &self.max_body_size)
            .field("static_dir", &self.static_dir)
            .field("require_config", &self.require_config)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
