//! Start-up configuration: API location and page-size bounds
//!
//! Built once in `main` and handed to the pieces that need it. Nothing
//! below reads the environment on its own.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAGE_LIMIT: u32 = 12;
pub const DEFAULT_MIN_PAGE_LIMIT: u32 = 6;
pub const DEFAULT_MAX_PAGE_LIMIT: u32 = 100;

pub const ENV_API_URL: &str = "POKEDEX_API_URL";
pub const ENV_DEFAULT_PAGE_LIMIT: &str = "POKEDEX_DEFAULT_PAGE_LIMIT";
pub const ENV_MIN_PAGE_LIMIT: &str = "POKEDEX_MIN_PAGE_LIMIT";
pub const ENV_MAX_PAGE_LIMIT: &str = "POKEDEX_MAX_PAGE_LIMIT";

/// Page-size bounds shared by the pagination state and the size selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaginationConfig {
    pub default_limit: u32,
    pub min_limit: u32,
    pub max_limit: u32,
}

impl PaginationConfig {
    /// Build validated bounds: `min >= 1`, `max >= min`, default inside.
    pub fn new(default_limit: u32, min_limit: u32, max_limit: u32) -> Self {
        let min_limit = min_limit.max(1);
        let max_limit = max_limit.max(min_limit);
        Self {
            default_limit: default_limit.clamp(min_limit, max_limit),
            min_limit,
            max_limit,
        }
    }

    pub fn clamp_limit(&self, limit: u32) -> u32 {
        limit.clamp(self.min_limit, self.max_limit)
    }

    /// Choices offered by the page-size selector, ascending.
    pub fn limit_options(&self) -> Vec<u32> {
        let mut options: Vec<u32> = [
            self.min_limit,
            self.default_limit,
            self.default_limit.saturating_mul(2),
            self.max_limit,
        ]
        .into_iter()
        .filter(|limit| *limit <= self.max_limit)
        .collect();
        options.sort_unstable();
        options.dedup();
        options
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAGE_LIMIT,
            DEFAULT_MIN_PAGE_LIMIT,
            DEFAULT_MAX_PAGE_LIMIT,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub pagination: PaginationConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`; missing or unparseable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str, fallback: u32| {
            lookup(key)
                .and_then(|value| value.trim().parse::<u32>().ok())
                .unwrap_or(fallback)
        };

        let api_base_url = lookup(ENV_API_URL)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_base_url: normalize_base_url(&api_base_url),
            pagination: PaginationConfig::new(
                number(ENV_DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_LIMIT),
                number(ENV_MIN_PAGE_LIMIT, DEFAULT_MIN_PAGE_LIMIT),
                number(ENV_MAX_PAGE_LIMIT, DEFAULT_MAX_PAGE_LIMIT),
            ),
        }
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }

    /// Override the default page size, still bounded by min/max.
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.pagination.default_limit = self.pagination.clamp_limit(limit);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            pagination: PaginationConfig::default(),
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
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
    fn test_defaults_when_environment_empty() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.pagination.default_limit, 12);
        assert_eq!(config.pagination.min_limit, 6);
        assert_eq!(config.pagination.max_limit, 100);
    }

    #[test]
    fn test_default_limit_is_clamped_into_bounds() {
        let low = Config::from_lookup(lookup_from(&[(ENV_DEFAULT_PAGE_LIMIT, "2")]));
        assert_eq!(low.pagination.default_limit, 6);

        let high = Config::from_lookup(lookup_from(&[(ENV_DEFAULT_PAGE_LIMIT, "500")]));
        assert_eq!(high.pagination.default_limit, 100);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_DEFAULT_PAGE_LIMIT, "twelve"),
            (ENV_MAX_PAGE_LIMIT, ""),
        ]));
        assert_eq!(config.pagination, PaginationConfig::default());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config::from_lookup(lookup_from(&[(ENV_API_URL, "http://api.test/ ")]));
        assert_eq!(config.api_base_url, "http://api.test");
    }

    #[test]
    fn test_inverted_bounds_are_repaired() {
        let config = PaginationConfig::new(10, 0, 0);
        assert_eq!(config.min_limit, 1);
        assert_eq!(config.max_limit, 1);
        assert_eq!(config.default_limit, 1);
    }

    #[test]
    fn test_limit_options_sorted_and_deduplicated() {
        assert_eq!(PaginationConfig::default().limit_options(), vec![6, 12, 24, 100]);

        let tight = PaginationConfig::new(40, 10, 50);
        assert_eq!(tight.limit_options(), vec![10, 40, 50]);

        let same = PaginationConfig::new(6, 6, 6);
        assert_eq!(same.limit_options(), vec![6]);
    }
}
