//! # Server configuration from environment variables
//!
//! Every setting is optional at startup. A route that needs a missing value
//! reports "not configured" itself, so the dashboards still come up without an
//! auth provider or chat key.
//!
//! | Variable | Fallback name | Default |
//! |----------|---------------|---------|
//! | `SUPABASE_URL` | `NEXT_PUBLIC_SUPABASE_URL` | - |
//! | `SUPABASE_ANON_KEY` | `NEXT_PUBLIC_SUPABASE_ANON_KEY` | - |
//! | `SUPABASE_SERVICE_ROLE_KEY` | - | - |
//! | `GEMINI_API_KEY` | - | - |
//! | `GEMINI_MODEL` | - | `gemini-2.0-flash` |
//! | `GEMINI_BASE_URL` | - | `https://generativelanguage.googleapis.com/v1beta` |
//! | `ANALYSIS_BACKEND_URL` | `PYTHON_BACKEND_URL` | - (placeholder mode) |
//! | `ALERT_DELAY_MS` | - | `1500` |
//! | `PASSWORD_RESET_REDIRECT` | - | `http://localhost:8080/reset-password` |

use std::time::Duration;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_ALERT_DELAY_MS: u64 = 1500;
const DEFAULT_RESET_REDIRECT: &str = "http://localhost:8080/reset-password";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub analysis_backend_url: Option<String>,
    pub alert_delay: Duration,
    pub password_reset_redirect: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            supabase_service_role_key: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            analysis_backend_url: None,
            alert_delay: Duration::from_millis(DEFAULT_ALERT_DELAY_MS),
            password_reset_redirect: DEFAULT_RESET_REDIRECT.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Values are trimmed and empty ones ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .filter_map(|key| lookup(*key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let defaults = Self::default();
        let alert_delay = match get(&["ALERT_DELAY_MS"]).map(|v| v.parse::<u64>()) {
            Some(Ok(ms)) => Duration::from_millis(ms),
            Some(Err(_)) => {
                tracing::warn!("ALERT_DELAY_MS is not a number, using default");
                defaults.alert_delay
            }
            None => defaults.alert_delay,
        };

        Self {
            supabase_url: get(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"])
                .map(|url| url.trim_end_matches('/').to_string()),
            supabase_anon_key: get(&["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]),
            supabase_service_role_key: get(&["SUPABASE_SERVICE_ROLE_KEY"]),
            gemini_api_key: get(&["GEMINI_API_KEY"]),
            gemini_model: get(&["GEMINI_MODEL"]).unwrap_or(defaults.gemini_model),
            gemini_base_url: get(&["GEMINI_BASE_URL"]).unwrap_or(defaults.gemini_base_url),
            analysis_backend_url: get(&["ANALYSIS_BACKEND_URL", "PYTHON_BACKEND_URL"])
                .map(|url| url.trim_end_matches('/').to_string()),
            alert_delay,
            password_reset_redirect: get(&["PASSWORD_RESET_REDIRECT"])
                .unwrap_or(defaults.password_reset_redirect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.alert_delay, Duration::from_millis(1500));
        assert!(config.analysis_backend_url.is_none());
    }

    #[test]
    fn test_fallback_names_and_trimming() {
        let config = AppConfig::from_lookup(lookup(&[
            ("NEXT_PUBLIC_SUPABASE_URL", " https://abc.supabase.co/ \n"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "ignored"),
            ("PYTHON_BACKEND_URL", "http://localhost:8000"),
            ("GEMINI_API_KEY", "   "),
        ]));
        assert_eq!(config.supabase_url.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(config.supabase_anon_key.as_deref(), Some("anon"));
        assert_eq!(config.analysis_backend_url.as_deref(), Some("http://localhost:8000"));
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_alert_delay() {
        let config = AppConfig::from_lookup(lookup(&[("ALERT_DELAY_MS", "0")]));
        assert_eq!(config.alert_delay, Duration::ZERO);
        let config = AppConfig::from_lookup(lookup(&[("ALERT_DELAY_MS", "soon")]));
        assert_eq!(config.alert_delay, Duration::from_millis(1500));
    }
}
