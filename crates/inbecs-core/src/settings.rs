use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_NAVER_SEARCH_URL: &str = "https://openapi.naver.com/v1/search/blog.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Credentials and transport settings read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub naver_client_id: Option<String>,
    pub naver_client_secret: Option<String>,
    pub naver_search_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub http_timeout: Duration,
    pub config_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            naver_client_id: None,
            naver_client_secret: None,
            naver_search_url: DEFAULT_NAVER_SEARCH_URL.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            config_path: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Read settings from environment variables. Call `dotenv` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let http_timeout = match get("INBECS_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        "Ignoring invalid INBECS_HTTP_TIMEOUT_SECS value {:?}, using {}s",
                        raw,
                        DEFAULT_HTTP_TIMEOUT_SECS
                    );
                    defaults.http_timeout
                }
            },
            None => defaults.http_timeout,
        };

        Self {
            naver_client_id: get("NAVER_CLIENT_ID"),
            naver_client_secret: get("NAVER_CLIENT_SECRET"),
            naver_search_url: get("NAVER_SEARCH_URL").unwrap_or(defaults.naver_search_url),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            http_timeout,
            config_path: get("INBECS_CONFIG_PATH").map(PathBuf::from),
            output_dir: get("INBECS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }

    pub fn has_search_credentials(&self) -> bool {
        self.naver_client_id.is_some() && self.naver_client_secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(|_| None);
        assert!(settings.naver_client_id.is_none());
        assert!(settings.openai_api_key.is_none());
        assert_eq!(settings.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(settings.naver_search_url, DEFAULT_NAVER_SEARCH_URL);
        assert_eq!(settings.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert!(!settings.has_search_credentials());
    }

    #[test]
    fn test_reads_credentials_and_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("NAVER_CLIENT_ID", "id"),
            ("NAVER_CLIENT_SECRET", "secret"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1"),
            ("INBECS_HTTP_TIMEOUT_SECS", "15"),
            ("INBECS_OUTPUT_DIR", "/tmp/articles"),
        ]));

        assert!(settings.has_search_credentials());
        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.openai_base_url, "http://localhost:9000/v1");
        assert_eq!(settings.http_timeout, Duration::from_secs(15));
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/articles"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("NAVER_CLIENT_ID", "  "),
            ("NAVER_CLIENT_SECRET", "secret"),
        ]));
        assert!(settings.naver_client_id.is_none());
        assert!(!settings.has_search_credentials());
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        let settings = Settings::from_lookup(lookup_from(&[("INBECS_HTTP_TIMEOUT_SECS", "soon")]));
        assert_eq!(settings.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));

        let settings = Settings::from_lookup(lookup_from(&[("INBECS_HTTP_TIMEOUT_SECS", "0")]));
        assert_eq!(settings.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    }
}
