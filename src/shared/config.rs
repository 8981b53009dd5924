//! Application configuration. Provider credential, endpoint, model.
//!
//! Resolved once at start-up and handed to adapters; nothing reads the
//! environment at call time.

use serde::Deserialize;

/// Default Gemini REST endpoint (without path).
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for both summarization and insights.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Gemini API key. Read from NOTES_AI_GEMINI_API_KEY or GEMINI_API_KEY.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini API base URL. Read from NOTES_AI_GEMINI_API_URL or GEMINI_API_URL.
    #[serde(default)]
    pub gemini_api_url: Option<String>,

    /// Model name. Read from NOTES_AI_GEMINI_MODEL or GEMINI_MODEL.
    #[serde(default)]
    pub gemini_model: Option<String>,

    /// Use the scripted mock adapter instead of Gemini (offline demo). Read from NOTES_AI_MOCK.
    #[serde(default)]
    pub mock: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("NOTES_AI").try_parsing(true));
        if let Ok(path) = std::env::var("NOTES_AI_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Unprefixed names are what the web app's .env uses (GEMINI_API_KEY=...)
        if cfg.gemini_api_key.is_none() {
            cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        }
        if cfg.gemini_api_url.is_none() {
            cfg.gemini_api_url = std::env::var("GEMINI_API_URL").ok();
        }
        if cfg.gemini_model.is_none() {
            cfg.gemini_model = std::env::var("GEMINI_MODEL").ok();
        }
        Ok(cfg)
    }

    /// Returns the API key if set and non-empty.
    pub fn gemini_api_key(&self) -> Option<String> {
        non_empty(self.gemini_api_key.as_deref())
    }

    /// Returns the API base URL. Defaults to the public Gemini endpoint.
    pub fn gemini_api_url_or_default(&self) -> String {
        non_empty(self.gemini_api_url.as_deref())
            .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string())
    }

    /// Returns the model name. Defaults to "gemini-2.5-flash".
    pub fn gemini_model_or_default(&self) -> String {
        non_empty(self.gemini_model.as_deref()).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    /// Returns true if an API key is present.
    pub fn is_ai_configured(&self) -> bool {
        self.gemini_api_key().is_some()
    }

    pub fn use_mock(&self) -> bool {
        self.mock.unwrap_or(false)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
