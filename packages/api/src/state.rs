//! Shared server state: configuration plus the external-service clients.

use std::sync::{Arc, OnceLock};

use reqwest::Client;

use crate::analysis::Analyzer;
use crate::auth::AuthClient;
use crate::chat::GeminiClient;
use crate::config::AppConfig;

static SHARED: OnceLock<AppState> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthClient,
    pub chat: GeminiClient,
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let http = Client::new();
        Self {
            auth: AuthClient::new(http.clone(), &config),
            chat: GeminiClient::new(http.clone(), &config),
            analyzer: Analyzer::new(http, &config),
            config: Arc::new(config),
        }
    }

    /// Process-wide state, built from the environment on first use.
    pub fn shared() -> &'static AppState {
        SHARED.get_or_init(|| AppState::new(AppConfig::from_env()))
    }
}
