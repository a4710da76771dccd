use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use strum::{AsRefStr, Display, EnumString};
use url::Url;

use crate::infra::error::InfraError;

/// Which implementation serves backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BackendMode {
    /// The organisation's REST backend at `BACKEND_URL`
    Http,
    /// In-process simulation with sample data, for local development
    Dummy,
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Public origin of the dashboard; the checkout return URL is built from it.
    pub app_origin: Url,
    pub backend_mode: BackendMode,
    pub backend_url: Url,
    pub backend_api_token: Option<SecretString>,
    /// In-process pending payment storage is used when unset.
    pub redis_url: Option<String>,
    pub pending_payment_ttl_minutes: i64,
    /// Zero disables the read cache.
    pub read_cache_ttl_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse().unwrap());
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|_| InfraError::ConfigInvalid {
                    var: "CORS_ORIGIN",
                    reason: "is not a valid header value".to_string(),
                })?;
        let app_origin: Url = get_env_default(
            "APP_ORIGIN",
            Url::parse("http://localhost:3000").unwrap(),
        );

        let backend_mode: BackendMode = get_env_default("BACKEND_MODE", BackendMode::Http);
        let backend_url: Url = match backend_mode {
            BackendMode::Http => get_env("BACKEND_URL"),
            BackendMode::Dummy => get_env_default(
                "BACKEND_URL",
                Url::parse("http://127.0.0.1:8000/api/").unwrap(),
            ),
        };
        let backend_api_token: Option<SecretString> = std::env::var("BACKEND_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(|t| SecretString::new(t.into()));

        let redis_url: Option<String> = std::env::var("REDIS_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());
        let pending_payment_ttl_minutes: i64 = get_env_default("PENDING_PAYMENT_TTL_MINUTES", 30);
        let read_cache_ttl_secs: u64 = get_env_default("READ_CACHE_TTL_SECS", 30);
        let secure_cookies: bool = get_env_default("SECURE_COOKIES", true);

        let config = Self {
            bind_addr,
            cors_origin,
            app_origin,
            backend_mode,
            backend_url,
            backend_api_token,
            redis_url,
            pending_payment_ttl_minutes,
            read_cache_ttl_secs,
            secure_cookies,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InfraError> {
        if self.pending_payment_ttl_minutes < 1 {
            return Err(InfraError::ConfigInvalid {
                var: "PENDING_PAYMENT_TTL_MINUTES",
                reason: format!("must be at least 1, got {}", self.pending_payment_ttl_minutes),
            });
        }

        if self.backend_mode == BackendMode::Http
            && !matches!(self.backend_url.scheme(), "http" | "https")
        {
            return Err(InfraError::ConfigInvalid {
                var: "BACKEND_URL",
                reason: format!("must be an http(s) URL, got {}", self.backend_url),
            });
        }

        Ok(())
    }

    /// Page the gateway sends the member back to after checkout.
    pub fn checkout_return_url(&self) -> String {
        format!(
            "{}/payments/return",
            self.app_origin.as_str().trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn backend_mode_parses_case_insensitively() {
        assert_eq!(BackendMode::from_str("dummy").unwrap(), BackendMode::Dummy);
        assert_eq!(BackendMode::from_str("HTTP").unwrap(), BackendMode::Http);
        assert!(BackendMode::from_str("grpc").is_err());
    }

    #[test]
    fn zero_pending_ttl_is_rejected() {
        let mut config = crate::test_utils::test_config();
        config.pending_payment_ttl_minutes = 0;

        let err = config.validate().unwrap_err();

        assert!(matches!(
            err,
            InfraError::ConfigInvalid {
                var: "PENDING_PAYMENT_TTL_MINUTES",
                ..
            }
        ));
    }

    #[test]
    fn http_mode_requires_http_backend_url() {
        let mut config = crate::test_utils::test_config();
        config.backend_mode = BackendMode::Http;
        config.backend_url = Url::parse("ftp://backend.internal/api/").unwrap();

        let err = config.validate().unwrap_err();

        assert!(matches!(
            err,
            InfraError::ConfigInvalid {
                var: "BACKEND_URL",
                ..
            }
        ));
        assert!(crate::test_utils::test_config().validate().is_ok());
    }

    #[test]
    fn return_url_has_single_slash() {
        let config = crate::test_utils::test_config();
        assert_eq!(
            config.checkout_return_url(),
            "http://localhost:3000/payments/return"
        );
    }
}
