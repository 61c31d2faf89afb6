//! Universe configuration, validation, and error types.
//!
//! [`UniverseConfig`] carries the knobs that are not part of the sector
//! records themselves. [`validate()`](UniverseConfig::validate) checks the
//! structural invariants; [`UniverseBuilder::build`](crate::UniverseBuilder::build)
//! additionally checks the configuration against the milieus actually
//! supplied.

use crate::main_cache::MIN_MAIN_WORLDS;
use std::error::Error;
use std::fmt;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`UniverseConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The placeholder milieu names a milieu with no sectors.
    UnknownPlaceholder {
        /// The configured placeholder tag.
        milieu: String,
    },
    /// `min_main_worlds` is below 2, which would make every world a main.
    MainSizeTooSmall {
        /// The configured minimum.
        configured: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlaceholder { milieu } => {
                write!(f, "placeholder milieu '{milieu}' has no sectors")
            }
            Self::MainSizeTooSmall { configured } => {
                write!(f, "min_main_worlds {configured} is below minimum of 2")
            }
        }
    }
}

impl Error for ConfigError {}

// ── UniverseConfig ─────────────────────────────────────────────────

/// Configuration for a [`Universe`](crate::Universe).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniverseConfig {
    /// Milieu consulted for sectors the queried milieu lacks. Default: none.
    pub placeholder_milieu: Option<String>,
    /// Smallest cluster of adjacent worlds that counts as a main. Default: 5.
    pub min_main_worlds: usize,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            placeholder_milieu: None,
            min_main_worlds: MIN_MAIN_WORLDS,
        }
    }
}

impl UniverseConfig {
    /// Validate invariants that do not depend on the loaded milieus.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_main_worlds < 2 {
            return Err(ConfigError::MainSizeTooSmall {
                configured: self.min_main_worlds,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = UniverseConfig::default();
        assert_eq!(config.min_main_worlds, 5);
        assert!(config.placeholder_milieu.is_none());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn tiny_main_size_rejected() {
        let config = UniverseConfig {
            min_main_worlds: 1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MainSizeTooSmall { configured: 1 })
        );
    }

    #[test]
    fn error_messages() {
        let e = ConfigError::UnknownPlaceholder {
            milieu: "M0".into(),
        };
        assert_eq!(e.to_string(), "placeholder milieu 'M0' has no sectors");
    }
}
