//! Runtime ISA detection and strategy selection.
//!
//! Detection runs once per process; the result is cached in a [`OnceLock`]
//! and handed to the kernels as a plain [`Strategy`] value.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::config::Config;
use crate::{Error, Result};

static SELECTED: OnceLock<Strategy> = OnceLock::new();

/// Implementation used for the aligned body of a constant-value transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Byte-at-a-time loop; always available.
    Scalar,
    /// 128-bit SSE2 registers (x86_64).
    Sse2,
    /// 256-bit AVX2 registers (x86_64).
    Avx2,
    /// 128-bit NEON registers (aarch64).
    Neon,
}

impl Strategy {
    /// Every strategy, narrowest first.
    pub const ALL: [Strategy; 4] = [
        Strategy::Scalar,
        Strategy::Sse2,
        Strategy::Neon,
        Strategy::Avx2,
    ];

    /// Bytes processed per vector instruction.
    pub const fn width(self) -> usize {
        match self {
            Strategy::Scalar => 1,
            Strategy::Sse2 | Strategy::Neon => 16,
            Strategy::Avx2 => 32,
        }
    }

    /// Whether the running CPU can execute this strategy.
    pub fn is_supported(self) -> bool {
        match self {
            Strategy::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            Strategy::Sse2 => std::arch::is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Strategy::Avx2 => std::arch::is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "aarch64")]
            Strategy::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            _ => false,
        }
    }

    /// The widest supported strategy.
    pub fn detect() -> Strategy {
        Self::ALL
            .into_iter()
            .rev()
            .find(|s| s.is_supported())
            .unwrap_or(Strategy::Scalar)
    }

    /// All supported strategies, [`Strategy::Scalar`] first.
    pub fn available() -> Vec<Strategy> {
        Self::ALL.into_iter().filter(|s| s.is_supported()).collect()
    }

    /// Pick a strategy for `config`: the configured one when the CPU has it,
    /// detection otherwise.
    pub fn select(config: &Config) -> Strategy {
        if let Some(wanted) = config.strategy {
            if wanted.is_supported() {
                tracing::debug!(
                    strategy = %wanted,
                    width = wanted.width(),
                    source = "configured",
                    "transform strategy selected"
                );
                return wanted;
            }
            tracing::warn!(
                strategy = %wanted,
                "configured transform strategy is not supported, detecting instead"
            );
        }
        let detected = Strategy::detect();
        tracing::debug!(
            strategy = %detected,
            width = detected.width(),
            source = "detected",
            "transform strategy selected"
        );
        detected
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Scalar => "scalar",
            Strategy::Sse2 => "sse2",
            Strategy::Avx2 => "avx2",
            Strategy::Neon => "neon",
        })
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Strategy::Scalar),
            "sse2" => Ok(Strategy::Sse2),
            "avx2" => Ok(Strategy::Avx2),
            "neon" => Ok(Strategy::Neon),
            _ => Err(Error::InvalidArgument("unknown transform strategy")),
        }
    }
}

/// The process-wide strategy, chosen on first use from the environment.
///
/// An unreadable environment configuration is logged and ignored.
pub fn strategy() -> Strategy {
    *SELECTED.get_or_init(|| {
        let config = Config::from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring invalid binkit environment configuration");
            Config::default()
        });
        Strategy::select(&config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_is_always_available_and_first() {
        let available = Strategy::available();
        assert_eq!(available[0], Strategy::Scalar);
        assert!(available.contains(&Strategy::detect()));
        assert!(strategy().is_supported());
    }

    #[test]
    fn parse_names() {
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
        assert_eq!(" AVX2 ".parse::<Strategy>().unwrap(), Strategy::Avx2);
        assert!("avx512".parse::<Strategy>().is_err());
    }

    #[test]
    fn unsupported_configuration_falls_back() {
        let bogus = Strategy::ALL.into_iter().find(|s| !s.is_supported());
        if let Some(bogus) = bogus {
            let config = Config::default().with_strategy(bogus);
            assert_eq!(Strategy::select(&config), Strategy::detect());
        }
        let config = Config::default().with_strategy(Strategy::Scalar);
        assert_eq!(Strategy::select(&config), Strategy::Scalar);
    }
}
