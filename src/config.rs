use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::AppError;

/// Stand-in identity until a real auth collaborator supplies one.
pub const PLACEHOLDER_USER_ID: &str = "681f5e03a1e2df137b1f3330";

const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub backend_url: Url,
    pub user_id: Option<String>,
    pub redirect_delay: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("BACKEND_URL")
            .ok_or_else(|| AppError::Config("BACKEND_URL is not set".to_string()))?;
        let backend_url = Url::parse(raw_url.trim())
            .map_err(|e| AppError::Config(format!("BACKEND_URL is invalid: {}", e)))?;

        let user_id = match lookup("TRACKER_USER_ID") {
            Some(value) => Some(value.trim().to_string()).filter(|v| !v.is_empty()),
            None => Some(PLACEHOLDER_USER_ID.to_string()),
        };

        let redirect_delay = Duration::from_millis(parse_number(
            &lookup,
            "REDIRECT_DELAY_MS",
            DEFAULT_REDIRECT_DELAY_MS,
        )?);
        let request_timeout = Duration::from_secs(parse_number(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        Ok(Self {
            backend_url,
            user_id,
            redirect_delay,
            request_timeout,
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: u64) -> Result<u64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a non-negative integer", key))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("BACKEND_URL", "http://localhost:5000")]))
                .unwrap();
        assert_eq!(config.backend_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.user_id.as_deref(), Some(PLACEHOLDER_USER_ID));
        assert_eq!(config.redirect_delay, Duration::from_millis(2000));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_user_id_means_logged_out() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BACKEND_URL", "http://localhost:5000"),
            ("TRACKER_USER_ID", "  "),
            ("REDIRECT_DELAY_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.user_id, None);
        assert_eq!(config.redirect_delay, Duration::from_millis(250));
    }

    #[test]
    fn missing_or_bad_values_are_config_errors() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&[])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&[("BACKEND_URL", "not a url")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&[
                ("BACKEND_URL", "http://localhost:5000"),
                ("REQUEST_TIMEOUT_SECS", "-1"),
            ])),
            Err(AppError::Config(_))
        ));
    }
}
