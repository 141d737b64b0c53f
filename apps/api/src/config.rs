use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";
pub const DEFAULT_SITE_URL: &str = "http://localhost:5173";
pub const DEFAULT_PORT: u16 = 3001;

/// Application configuration loaded from environment variables.
/// Read once at startup and shared immutably for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key. Absence is tolerated at startup and rejected per request.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Sent upstream as `HTTP-Referer`.
    pub site_url: String,
    /// Sent upstream as `X-Title`. Falls back to the prompt's own title.
    pub app_title: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            api_key: var("OPENROUTER_API_KEY"),
            base_url: var("AI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: var("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            site_url: var("OPENROUTER_SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            app_title: var("OPENROUTER_APP_TITLE"),
            port,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
