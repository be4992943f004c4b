//! Client configuration, read from the environment.

/// Where the REST API lives and how much to ask it for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the REST API, without a trailing slash.
    pub api_base: String,
    /// Number of recommendations requested per list.
    pub recs_k: usize,
    /// Number of places offered on the onboarding screen.
    pub sample_n: usize,
}

impl ClientConfig {
    pub const DEFAULT_API_BASE: &'static str = "http://localhost:8000";
    pub const DEFAULT_RECS_K: usize = 12;
    pub const DEFAULT_SAMPLE_N: usize = 18;

    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            recs_k: Self::DEFAULT_RECS_K,
            sample_n: Self::DEFAULT_SAMPLE_N,
        }
    }

    /// Builds the config from environment variables.
    ///
    /// # Environment Variables
    /// - `ECOTOUR_API_BASE`: API origin, defaults to `http://localhost:8000`.
    /// - `ECOTOUR_RECS_K`: recommendations per list, defaults to 12.
    /// - `ECOTOUR_SAMPLE_N`: onboarding sample size, defaults to 18.
    ///
    /// Browser builds have no process environment, so the values baked in
    /// at compile time are used there.
    pub fn from_env() -> Self {
        let api_base = env_setting("ECOTOUR_API_BASE", option_env!("ECOTOUR_API_BASE"))
            .unwrap_or_else(|| Self::DEFAULT_API_BASE.to_string());

        let recs_k = env_setting("ECOTOUR_RECS_K", option_env!("ECOTOUR_RECS_K"))
            .and_then(|v| v.parse().ok())
            .filter(|k| *k > 0)
            .unwrap_or(Self::DEFAULT_RECS_K);

        let sample_n = env_setting("ECOTOUR_SAMPLE_N", option_env!("ECOTOUR_SAMPLE_N"))
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(Self::DEFAULT_SAMPLE_N);

        Self {
            recs_k,
            sample_n,
            ..Self::new(api_base)
        }
    }

    /// Joins an API path (starting with `/`) onto the base.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_API_BASE)
    }
}

/// Looks a setting up in the runtime environment first, then in the value
/// captured at build time. Blank values count as unset.
pub(crate) fn env_setting(name: &str, build_time: Option<&'static str>) -> Option<String> {
    std::env::var(name)
        .ok()
        .or_else(|| build_time.map(str::to_string))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let config = ClientConfig::new("https://api.example.test/");
        assert_eq!(config.api_base, "https://api.example.test");
        assert_eq!(config.url("/api/places/3"), "https://api.example.test/api/places/3");
    }

    #[test]
    fn defaults_point_at_a_local_api() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.recs_k, 12);
        assert_eq!(config.sample_n, 18);
    }

    #[test]
    fn blank_build_time_value_is_unset() {
        assert_eq!(env_setting("ECOTOUR_TEST_SURELY_UNSET", Some("  ")), None);
        assert_eq!(
            env_setting("ECOTOUR_TEST_SURELY_UNSET", Some("x")).as_deref(),
            Some("x")
        );
    }
}
