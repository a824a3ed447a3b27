//! Batch conversion settings.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// WebP quality factor (0.0–1.0) every conversion is encoded with.
pub const WEBP_QUALITY: f32 = 0.8;

/// Configuration for converting a batch of files.
///
/// The WebP quality factor is fixed at [`WEBP_QUALITY`] and is not part
/// of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of conversions in flight at once.
    ///
    /// `None` sizes the limit to the available parallelism, capped at
    /// [`MAX_AUTO_CONCURRENCY`](Self::MAX_AUTO_CONCURRENCY).
    pub max_concurrency: Option<NonZeroUsize>,
}

impl BatchConfig {
    /// Default for [`max_concurrency`](Self::max_concurrency): automatic.
    pub const DEFAULT_MAX_CONCURRENCY: Option<NonZeroUsize> = None;

    /// Upper bound on the automatically chosen limit.
    pub const MAX_AUTO_CONCURRENCY: usize = 16;

    /// Resolve the concurrency limit given the parallelism the platform
    /// reports (`navigator.hardwareConcurrency` in the browser,
    /// `std::thread::available_parallelism` natively).
    ///
    /// Always at least 1.
    #[must_use]
    pub fn effective_concurrency(&self, available: usize) -> usize {
        self.max_concurrency.map_or_else(
            || available.clamp(1, Self::MAX_AUTO_CONCURRENCY),
            NonZeroUsize::get,
        )
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: Self::DEFAULT_MAX_CONCURRENCY,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn auto_uses_available_parallelism() {
        let config = BatchConfig::default();
        assert_eq!(config.effective_concurrency(4), 4);
    }

    #[test]
    fn auto_is_at_least_one() {
        assert_eq!(BatchConfig::default().effective_concurrency(0), 1);
    }

    #[test]
    fn auto_is_capped() {
        assert_eq!(
            BatchConfig::default().effective_concurrency(128),
            BatchConfig::MAX_AUTO_CONCURRENCY
        );
    }

    #[test]
    fn explicit_limit_wins() {
        let config = BatchConfig {
            max_concurrency: NonZeroUsize::new(3),
        };
        assert_eq!(config.effective_concurrency(64), 3);
        assert_eq!(config.effective_concurrency(1), 3);
    }

    #[test]
    fn deserializes_partial_json() {
        let config: BatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BatchConfig::default());

        let config: BatchConfig = serde_json::from_str(r#"{"max_concurrency": 2}"#).unwrap();
        assert_eq!(config.effective_concurrency(8), 2);
    }

    #[test]
    fn rejects_zero_limit() {
        let result = serde_json::from_str::<BatchConfig>(r#"{"max_concurrency": 0}"#);
        assert!(result.is_err());
    }
}
