use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::Count;

/// How the top-match selector settles equal counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the first maximum in arrival order.
    FirstSeen,
    /// Keep the lexicographically smallest partner.
    Lexicographic,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::FirstSeen
    }
}

impl TieBreak {
    /// Accepts the same names as the `tie_break` config key.
    pub fn parse(name: &str) -> PipelineResult<Self> {
        toml::Value::String(name.to_owned())
            .try_into()
            .map_err(|_| PipelineError::InvalidConfig(format!("unknown tie_break '{}'", name)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run map and reduce phases on rayon workers
    pub parallel: bool,
    /// Size of a dedicated pool; `None` uses the global rayon pool
    pub num_threads: Option<usize>,
    pub tie_break: TieBreak,
    /// Pair counts below this are not emitted
    pub min_count: Count,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            num_threads: None,
            tie_break: TieBreak::default(),
            min_count: 1,
        }
    }
}

impl PipelineConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> PipelineResult<Self> {
        let config: PipelineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.min_count == 0 {
            return Err(PipelineError::InvalidConfig(
                "min_count must be at least 1".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(PipelineError::InvalidConfig(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert!(config.parallel);
        assert_eq!(config.min_count, 1);
        assert_eq!(config.tie_break, TieBreak::FirstSeen);
    }

    #[test]
    fn parse_full_toml() {
        let config = PipelineConfig::from_toml_str(
            r#"
            parallel = false
            num_threads = 4
            tie_break = "lexicographic"
            min_count = 2
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            PipelineConfig {
                parallel: false,
                num_threads: Some(4),
                tie_break: TieBreak::Lexicographic,
                min_count: 2,
            }
        );
    }

    #[test]
    fn reject_zero_min_count() {
        let err = PipelineConfig::from_toml_str("min_count = 0").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn reject_zero_threads() {
        let config = PipelineConfig {
            num_threads: Some(0),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_tie_break() {
        let err = PipelineConfig::from_toml_str(r#"tie_break = "random""#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(TieBreak::parse("random").is_err());
        assert_eq!(TieBreak::parse("first_seen").unwrap(), TieBreak::FirstSeen);
    }

    #[test]
    fn tie_break_names_match_config_keys() {
        for &tie_break in &[TieBreak::FirstSeen, TieBreak::Lexicographic] {
            let name = match toml::Value::try_from(tie_break).unwrap() {
                toml::Value::String(name) => name,
                other => panic!("expected a string, got {:?}", other),
            };
            assert_eq!(TieBreak::parse(&name).unwrap(), tie_break);

            let config =
                PipelineConfig::from_toml_str(&format!("tie_break = \"{}\"", name)).unwrap();
            assert_eq!(config.tie_break, tie_break);
        }
    }

    #[test]
    fn load_missing_file() {
        let err = PipelineConfig::load("/nonexistent/basket.toml").unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
