use std::time::Duration;

/// Default quiet period before a filter change triggers a reload.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, without the `/api` prefix (default: `http://localhost:3000`).
    pub base_url: String,
    /// Debounce window for filter edits (default: 300 ms).
    pub debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `CATALOG_API_URL`     | `http://localhost:3000` |
    /// | `CATALOG_DEBOUNCE_MS` | `300`                   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("CATALOG_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let debounce = lookup("CATALOG_DEBOUNCE_MS")
            .map(|ms| {
                ms.parse()
                    .map(Duration::from_millis)
                    .expect("CATALOG_DEBOUNCE_MS must be a valid u64")
            })
            .unwrap_or(defaults.debounce);

        Self { base_url, debounce }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.debounce, Duration::from_millis(300));
    }

    #[test]
    fn overrides_strip_trailing_slash() {
        let config = ClientConfig::from_lookup(|key| match key {
            "CATALOG_API_URL" => Some("https://catalog.test/".into()),
            "CATALOG_DEBOUNCE_MS" => Some("500".into()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://catalog.test");
        assert_eq!(config.debounce, Duration::from_millis(500));
    }
}
