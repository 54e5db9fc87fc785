use crate::logging::parse_level;
use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime settings injected by the hosting page as `window.ENV`.
///
/// ```html
/// <script>window.ENV = { API_URL: "https://blog.example.com/api", LOG_LEVEL: "debug" };</script>
/// ```
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub log_level: LevelFilter,
}

impl EnvConfig {
    pub fn new() -> Self {
        Self::from_lookup(read_window_env)
    }

    /// Upper-case keys are preferred; lower-case ones are accepted for older deployments.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = get("API_URL")
            .or_else(|| get("api_url"))
            .map(|u| normalize_base_url(&u))
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let log_level = get("LOG_LEVEL")
            .or_else(|| get("log_level"))
            .and_then(|l| parse_level(&l))
            .unwrap_or(LevelFilter::Info);

        Self { api_url, log_level }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_window_env(key: &str) -> Option<String> {
    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    js_sys::Reflect::get(&env, &key.into()).ok()?.as_string()
}

/// Paths are appended as `/posts...`, so drop trailing slashes.
pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
