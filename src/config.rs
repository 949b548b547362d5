//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

/// Default capacity, in caller-defined size units.
pub const DEFAULT_CAPACITY: u64 = 1000;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum total size the cache can hold, in the sizer's units
    pub capacity: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum total size (default: 1000)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
        }
    }

    /// Creates a Config with an explicit capacity.
    pub fn with_capacity(capacity: u64) -> Self {
        Self { capacity }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 1000);
    }

    #[test]
    fn test_config_with_capacity() {
        assert_eq!(Config::with_capacity(42).capacity, 42);
    }

    // Env var access is process-global, so the cases run in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_CAPACITY");
        assert_eq!(Config::from_env().capacity, DEFAULT_CAPACITY);

        env::set_var("CACHE_CAPACITY", "2048");
        assert_eq!(Config::from_env().capacity, 2048);

        env::set_var("CACHE_CAPACITY", "not-a-number");
        assert_eq!(Config::from_env().capacity, DEFAULT_CAPACITY);

        env::remove_var("CACHE_CAPACITY");
    }
}
