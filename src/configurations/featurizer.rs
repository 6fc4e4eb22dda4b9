use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::language::Language;

pub const DEFAULT_PVALUE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturizerConfiguration {
    pub pvalue_threshold: f64,
    pub word_clusters: WordClustersConfiguration,
}

impl Default for FeaturizerConfiguration {
    fn default() -> Self {
        Self {
            pvalue_threshold: DEFAULT_PVALUE_THRESHOLD,
            word_clusters: WordClustersConfiguration::default(),
        }
    }
}

impl FeaturizerConfiguration {
    pub fn validate(&self) -> Result<()> {
        validate_pvalue_threshold(self.pvalue_threshold)
    }
}

pub fn validate_pvalue_threshold(pvalue_threshold: f64) -> Result<()> {
    if pvalue_threshold > 0. && pvalue_threshold <= 1. {
        Ok(())
    } else {
        Err(FeaturizerError::InvalidState(format!(
            "pvalue threshold must be in (0, 1] but found {}",
            pvalue_threshold
        ))
        .into())
    }
}

/// Name of the word clusters used for each language.
///
/// Languages which are not configured do not produce any word cluster feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordClustersConfiguration(BTreeMap<Language, String>);

impl WordClustersConfiguration {
    pub fn with_clusters<S: Into<String>>(mut self, language: Language, clusters_name: S) -> Self {
        self.0.insert(language, clusters_name.into());
        self
    }

    pub fn clusters_name(&self, language: Language) -> Option<&str> {
        self.0.get(&language).map(|name| name.as_str())
    }
}

impl FromIterator<(Language, String)> for WordClustersConfiguration {
    fn from_iter<T: IntoIterator<Item = (Language, String)>>(iter: T) -> Self {
        WordClustersConfiguration(BTreeMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_works() {
        // When
        let config = FeaturizerConfiguration::default();

        // Then
        assert_eq!(0.4, config.pvalue_threshold);
        assert_eq!(None, config.word_clusters.clusters_name(Language::EN));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn word_clusters_configuration_works() {
        // When
        let config = WordClustersConfiguration::default()
            .with_clusters(Language::EN, "brown_clusters")
            .with_clusters(Language::FR, "fr_clusters");

        // Then
        assert_eq!(Some("brown_clusters"), config.clusters_name(Language::EN));
        assert_eq!(Some("fr_clusters"), config.clusters_name(Language::FR));
        assert_eq!(None, config.clusters_name(Language::DE));
    }

    #[test]
    fn validate_rejects_out_of_range_thresholds() {
        for threshold in &[0., -0.1, 1.5, ::std::f64::NAN] {
            let config = FeaturizerConfiguration {
                pvalue_threshold: *threshold,
                ..FeaturizerConfiguration::default()
            };
            assert!(config.validate().is_err());
        }
        assert!(validate_pvalue_threshold(1.).is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        // When
        let config: FeaturizerConfiguration = serde_json::from_str("{}").unwrap();

        // Then
        assert_eq!(FeaturizerConfiguration::default(), config);
    }
}
