//! Resolver options, settable by name in the style of UCI `setoption`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Piece;
use crate::resolve::StrategyKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownOption { name: String },
    MissingValue { name: String },
    InvalidValue { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownOption { name } => write!(f, "Unknown option '{name}'"),
            ConfigError::MissingValue { name } => write!(f, "Option '{name}' requires a value"),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolverConfig {
    /// Strategies to try, in order.
    pub strategies: Vec<StrategyKind>,
    /// Promotion piece used when coordinate input omits one.
    pub default_promotion: Piece,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            strategies: StrategyKind::ALL.to_vec(),
            default_promotion: Piece::Queen,
        }
    }
}

impl ResolverConfig {
    /// Set an option by name. Names are case-insensitive and ignore spaces,
    /// so `Default Promotion` and `defaultpromotion` are the same option.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let invalid = |value: &str| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        match normalized.as_str() {
            "strategies" => {
                let value = value.ok_or_else(|| ConfigError::MissingValue {
                    name: name.to_string(),
                })?;
                let strategies = value
                    .split(',')
                    .filter(|part| !part.trim().is_empty())
                    .map(|part| part.parse::<StrategyKind>().map_err(|_| invalid(value)))
                    .collect::<Result<Vec<_>, _>>()?;
                if strategies.is_empty() {
                    return Err(invalid(value));
                }
                self.strategies = strategies;
                Ok(())
            }
            "defaultpromotion" => {
                let value = value.ok_or_else(|| ConfigError::MissingValue {
                    name: name.to_string(),
                })?;
                let mut chars = value.trim().chars();
                let piece = match (chars.next(), chars.next()) {
                    (Some(c), None) => Piece::from_char(c).filter(|p| p.is_promotion_target()),
                    _ => None,
                };
                self.default_promotion = piece.ok_or_else(|| invalid(value))?;
                Ok(())
            }
            _ => Err(ConfigError::UnknownOption {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_every_strategy() {
        let config = ResolverConfig::default();
        assert_eq!(config.strategies, StrategyKind::ALL.to_vec());
        assert_eq!(config.default_promotion, Piece::Queen);
    }

    #[test]
    fn test_set_strategies() {
        let mut config = ResolverConfig::default();
        config
            .set_option("Strategies", Some("uci, direct-san"))
            .unwrap();
        assert_eq!(
            config.strategies,
            vec![StrategyKind::UciCoordinate, StrategyKind::DirectSan]
        );
    }

    #[test]
    fn test_bad_strategy_leaves_config_untouched() {
        let mut config = ResolverConfig::default();
        let err = config
            .set_option("strategies", Some("uci,guess"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(config, ResolverConfig::default());
        assert!(config.set_option("strategies", Some(" , ")).is_err());
    }

    #[test]
    fn test_set_default_promotion() {
        let mut config = ResolverConfig::default();
        config.set_option("Default Promotion", Some("N")).unwrap();
        assert_eq!(config.default_promotion, Piece::Knight);
        assert!(config.set_option("DefaultPromotion", Some("k")).is_err());
        assert!(config.set_option("DefaultPromotion", Some("qq")).is_err());
        assert!(matches!(
            config.set_option("DefaultPromotion", None),
            Err(ConfigError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_unknown_option() {
        let err = ResolverConfig::default()
            .set_option("Hash", Some("64"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown option 'Hash'");
    }
}
