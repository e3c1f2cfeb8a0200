//! Runtime configuration.
//!
//! Nothing here is required: every setting has a default, and the
//! environment is only consulted when [`Config::from_env`] is called (the
//! process-wide transform strategy does so once, lazily).
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `BINKIT_STRATEGY`    | `scalar`, `sse2`, `avx2`, `neon` | widest supported |
//! | `BINKIT_SCAN_BUFFER` | window size in bytes, > 0 | [`DEFAULT_SCAN_BUFFER`] |

use std::env;

use crate::transform::Strategy;
use crate::{Error, Result};

/// Default pattern-matcher window, 64 KiB.
pub const DEFAULT_SCAN_BUFFER: usize = 64 * 1024;

/// Environment variable forcing a transform strategy.
pub const STRATEGY_ENV: &str = "BINKIT_STRATEGY";

/// Environment variable overriding the matcher window size.
pub const SCAN_BUFFER_ENV: &str = "BINKIT_SCAN_BUFFER";

/// Tunables for the transform and search layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Transform strategy to prefer; [`None`] means detect.
    pub strategy: Option<Strategy>,
    /// Minimum matcher window in bytes.
    pub scan_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: None,
            scan_buffer: DEFAULT_SCAN_BUFFER,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_scan_buffer(mut self, bytes: usize) -> Self {
        self.scan_buffer = bytes;
        self
    }

    /// Build a config from `BINKIT_*` environment variables.
    ///
    /// Unset variables keep their defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(STRATEGY_ENV) {
            config.strategy = Some(raw.parse()?);
        }
        if let Some(raw) = lookup(SCAN_BUFFER_ENV) {
            let bytes: usize = raw
                .trim()
                .parse()
                .map_err(|_| Error::InvalidArgument("scan buffer size is not a number"))?;
            if bytes == 0 {
                return Err(Error::InvalidArgument("scan buffer size must be non-zero"));
            }
            config.scan_buffer = bytes;
        }
        Ok(config)
    }
}
