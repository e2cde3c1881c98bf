//! Board configuration.
//!
//! Defaults come from the constants in `solari-types`; the binary may override
//! them from the environment:
//!
//! - `SOLARI_SEED`: RNG seed (default: derived by the caller)
//! - `SOLARI_FLIP_MS`: duration of a fresh flip
//! - `SOLARI_CHAIN_FLIP_MS`: duration of a chained flip
//! - `SOLARI_STAGGER_MS`: per-tile reveal delay
//! - `SOLARI_STRATEGY`: `words` or `destinations`

use thiserror::Error;

use crate::grid::GridPlanner;
use crate::text_layout::LayoutStrategy;
use crate::tile::FlipTiming;
use crate::types::{CharacterSet, CHAIN_FLIP_MS, FLIP_MS, STAGGER_MS};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("flip durations must be non-zero")]
    ZeroDuration,

    /// Chained flips must be strictly faster than fresh ones.
    #[error("chained flip ({chain_ms}ms) must be faster than a fresh flip ({flip_ms}ms)")]
    ChainNotFaster { flip_ms: u32, chain_ms: u32 },

    #[error(
        "invalid grid planner: tile width {min_tile_width}..{max_tile_width}, \
         divisor {width_divisor}, aspect {aspect}"
    )]
    InvalidPlanner {
        min_tile_width: f32,
        max_tile_width: f32,
        width_divisor: f32,
        aspect: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    pub seed: u32,
    pub timing: FlipTiming,
    pub stagger_ms: u32,
    pub strategy: LayoutStrategy,
    pub charset: CharacterSet,
    pub planner: GridPlanner,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            timing: FlipTiming {
                flip_ms: FLIP_MS,
                chain_flip_ms: CHAIN_FLIP_MS,
            },
            stagger_ms: STAGGER_MS,
            strategy: LayoutStrategy::Words,
            charset: CharacterSet::STANDARD,
            planner: GridPlanner::default(),
        }
    }
}

impl BoardConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_strategy(mut self, strategy: LayoutStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_stagger_ms(mut self, stagger_ms: u32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    /// Overlay environment overrides on `self`, then validate.
    pub fn from_env(self) -> Result<Self, ConfigError> {
        self.from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BoardConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(seed) = parse_var(&lookup, "SOLARI_SEED")? {
            self.seed = seed;
        }
        if let Some(ms) = parse_var(&lookup, "SOLARI_FLIP_MS")? {
            self.timing.flip_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "SOLARI_CHAIN_FLIP_MS")? {
            self.timing.chain_flip_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "SOLARI_STAGGER_MS")? {
            self.stagger_ms = ms;
        }
        if let Some(raw) = lookup("SOLARI_STRATEGY") {
            self.strategy = LayoutStrategy::from_str(raw.trim()).ok_or(
                ConfigError::InvalidValue {
                    key: "SOLARI_STRATEGY",
                    value: raw,
                },
            )?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let FlipTiming {
            flip_ms,
            chain_flip_ms,
        } = self.timing;
        if flip_ms == 0 || chain_flip_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if chain_flip_ms >= flip_ms {
            return Err(ConfigError::ChainNotFaster {
                flip_ms,
                chain_ms: chain_flip_ms,
            });
        }
        self.planner.validate()
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u32>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(BoardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn env_overrides_apply() {
        let config = BoardConfig::default()
            .from_lookup(lookup(&[
                ("SOLARI_SEED", "99"),
                ("SOLARI_STAGGER_MS", " 30 "),
                ("SOLARI_STRATEGY", "Destinations"),
            ]))
            .unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.stagger_ms, 30);
        assert_eq!(config.strategy, LayoutStrategy::Destinations);
    }

    #[test]
    fn unparsable_values_are_reported() {
        let err = BoardConfig::default()
            .from_lookup(lookup(&[("SOLARI_FLIP_MS", "fast")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "SOLARI_FLIP_MS",
                value: "fast".to_string()
            }
        );
        assert!(BoardConfig::default()
            .from_lookup(lookup(&[("SOLARI_STRATEGY", "spiral")]))
            .is_err());
    }

    #[test]
    fn chained_flips_must_be_faster() {
        let err = BoardConfig::default()
            .from_lookup(lookup(&[("SOLARI_CHAIN_FLIP_MS", "400")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ChainNotFaster {
                flip_ms: FLIP_MS,
                chain_ms: 400
            }
        );
    }

    #[test]
    fn inverted_tile_width_range_is_rejected() {
        let mut config = BoardConfig::default();
        config.planner.min_tile_width = 200.0;
        config.planner.max_tile_width = 100.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPlanner { .. })
        ));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let err = BoardConfig::default()
            .from_lookup(lookup(&[("SOLARI_FLIP_MS", "0")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDuration);
    }
}
