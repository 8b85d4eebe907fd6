use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
pub const DEFAULT_COOKIE_NAME: &str = "admin_session";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GlobalConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub store: StoreConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// HMAC key for session tokens. A random key is generated at boot when unset,
    /// which invalidates every session on restart.
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    pub ttl_hours: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub login_redirect_delay_ms: u64,
    pub unauthorized_redirect_secs: u64,
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    /// JSON snapshot loaded at boot and rewritten after each mutation.
    pub data_file: Option<PathBuf>,
    /// Plaintext password hashed into a credential document at boot.
    #[serde(skip_serializing)]
    pub bootstrap_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    pub login_attempts_per_minute: u32,
    pub audit_login_attempts: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: false,
            login_redirect_delay_ms: 1500,
            unauthorized_redirect_secs: 10,
            cleanup_interval_secs: 300,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            login_attempts_per_minute: 10,
            audit_login_attempts: false,
        }
    }
}

impl GlobalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig::default();
        let session = SessionConfig::default();
        let security = SecurityConfig::default();

        Ok(GlobalConfig {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(server.host),
                port: env::var("PORT")
                    .or_else(|_| env::var("SERVER_PORT"))
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(server.port),
                cors_allowed_origins: env::var("CORS_ORIGINS")
                    .map(|v| split_list(&v))
                    .unwrap_or(server.cors_allowed_origins),
            },
            session: SessionConfig {
                secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
                ttl_hours: parse_or("SESSION_TTL_HOURS", session.ttl_hours),
                cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or(session.cookie_name),
                cookie_secure: env::var("SESSION_COOKIE_SECURE")
                    .ok()
                    .and_then(|v| parse_bool(&v))
                    .unwrap_or(session.cookie_secure),
                login_redirect_delay_ms: parse_or(
                    "LOGIN_REDIRECT_DELAY_MS",
                    session.login_redirect_delay_ms,
                ),
                unauthorized_redirect_secs: parse_or(
                    "UNAUTHORIZED_REDIRECT_SECS",
                    session.unauthorized_redirect_secs,
                ),
                cleanup_interval_secs: parse_or(
                    "SESSION_CLEANUP_INTERVAL_SECS",
                    session.cleanup_interval_secs,
                ),
            },
            store: StoreConfig {
                data_file: env::var("DATA_FILE").ok().map(PathBuf::from),
                bootstrap_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            },
            security: SecurityConfig {
                login_attempts_per_minute: parse_or(
                    "LOGIN_ATTEMPTS_PER_MINUTE",
                    security.login_attempts_per_minute,
                ),
                audit_login_attempts: env::var("AUDIT_LOGIN_ATTEMPTS")
                    .ok()
                    .and_then(|v| parse_bool(&v))
                    .unwrap_or(security.audit_login_attempts),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_behaviour() {
        let config = GlobalConfig::default();
        assert_eq!(config.session.ttl_hours, 24);
        assert_eq!(config.session.login_redirect_delay_ms, 1500);
        assert_eq!(config.session.unauthorized_redirect_secs, 10);
        assert!(!config.security.audit_login_attempts);
    }

    #[test]
    fn parses_bool_flags() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn splits_origin_list() {
        assert_eq!(
            split_list("http://a.test, ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
