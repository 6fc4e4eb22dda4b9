use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use failure::format_err;
use itertools::Itertools;

use crate::configurations::WordClustersConfiguration;
use crate::errors::*;
use crate::language::Language;
use crate::models::{Dataset, Entity};
use crate::preprocessing::{compute_all_ngrams, normalize, tokenize_light};
use crate::resources::stemmer::Stemmer;
use crate::resources::word_clusterer::WordClusterer;
use crate::resources::SharedResources;
use crate::utils::{is_builtin_entity, EntityName};

/// Maps normalized and stemmed entity utterances to the names of the entities they may refer to
pub type EntityUtteranceIndex = BTreeMap<String, BTreeSet<EntityName>>;

/// Converts raw queries into the pseudo-documents fed to the tf-idf vectorizer
pub struct QueryPreprocessor {
    language: Language,
    stemmer: Option<Arc<dyn Stemmer>>,
    word_clusterer: Option<Arc<dyn WordClusterer>>,
}

impl QueryPreprocessor {
    pub fn new(
        language: Language,
        shared_resources: &SharedResources,
        word_clusters: &WordClustersConfiguration,
    ) -> Result<Self> {
        let word_clusterer = if let Some(clusters_name) = word_clusters.clusters_name(language) {
            Some(
                shared_resources
                    .word_clusterers
                    .get(clusters_name)
                    .cloned()
                    .ok_or_else(|| {
                        format_err!(
                            "Cannot find word clusters '{}' in shared resources",
                            clusters_name
                        )
                    })?,
            )
        } else {
            None
        };

        Ok(Self {
            language,
            stemmer: shared_resources.stemmer.clone(),
            word_clusterer,
        })
    }

    pub fn preprocess(&self, query: &str, entity_utterances: &EntityUtteranceIndex) -> String {
        let tokens = tokenize_light(query, self.language);
        let word_cluster_features = self
            .word_clusterer
            .as_ref()
            .map(|clusterer| get_word_cluster_features(&tokens, clusterer.as_ref()))
            .unwrap_or_else(|| vec![]);
        let normalized_stemmed_tokens = normalize_stem(&tokens, self.stemmer.as_ref());
        let entities_features =
            get_dataset_entities_features(&normalized_stemmed_tokens, entity_utterances);

        let mut features = normalized_stemmed_tokens.join(self.language.default_sep());
        if !entities_features.is_empty() {
            features.push(' ');
            features.push_str(&entities_features.join(" "));
        }
        if !word_cluster_features.is_empty() {
            features.push(' ');
            features.push_str(&word_cluster_features.join(" "));
        }
        features
    }

    /// Normalizes and stems a text the same way query tokens are, so that the result can be
    /// matched against n-grams of preprocessed queries
    pub fn normalize_stem(&self, text: &str) -> String {
        let tokens = tokenize_light(text, self.language);
        normalize_stem(&tokens, self.stemmer.as_ref()).join(" ")
    }

    /// Indexes the values of all the custom entities of the dataset, along with their synonyms
    /// when the entity uses them
    pub fn build_entity_utterances_index(&self, dataset: &Dataset) -> EntityUtteranceIndex {
        let mut index = EntityUtteranceIndex::new();
        for (entity_name, entity) in dataset.entities.iter() {
            if is_builtin_entity(entity_name) {
                continue;
            }
            if let Entity::Custom(custom_entity) = entity {
                for utterance in custom_entity.utterances() {
                    let key = self.normalize_stem(utterance);
                    if key.is_empty() {
                        continue;
                    }
                    index
                        .entry(key)
                        .or_insert_with(BTreeSet::new)
                        .insert(entity_name.clone());
                }
            }
        }
        index
    }
}

/// Entity features are always tokenized with english rules, whatever the language of the
/// featurizer, so that persisted vocabularies remain compatible
pub fn get_custom_entity_feature_name(entity_name: &str) -> String {
    let e = tokenize_light(&entity_name.to_lowercase(), Language::EN).join("");
    format!("entityfeature{}", e)
}

fn get_word_cluster_features(query_tokens: &[String], word_clusterer: &dyn WordClusterer) -> Vec<String> {
    let tokens_ref = query_tokens.iter().map(|t| t.as_ref()).collect_vec();
    compute_all_ngrams(tokens_ref.as_ref(), tokens_ref.len())
        .into_iter()
        .filter_map(|ngram| word_clusterer.get_cluster(&ngram.0.to_lowercase()))
        .collect()
}

fn get_dataset_entities_features(
    normalized_stemmed_tokens: &[String],
    entity_utterances: &EntityUtteranceIndex,
) -> Vec<String> {
    let tokens_ref = normalized_stemmed_tokens.iter().map(|t| t.as_ref()).collect_vec();
    compute_all_ngrams(tokens_ref.as_ref(), tokens_ref.len())
        .into_iter()
        .filter_map(|ngram| entity_utterances.get(&ngram.0))
        .flat_map(|entity_names| entity_names.iter())
        .map(|entity_name| get_custom_entity_feature_name(entity_name))
        .collect()
}

fn normalize_stem(tokens: &[String], opt_stemmer: Option<&Arc<dyn Stemmer>>) -> Vec<String> {
    opt_stemmer
        .map(|stemmer| tokens.iter().map(|t| stemmer.stem(&normalize(t))).collect())
        .unwrap_or_else(|| tokens.iter().map(|t| normalize(t)).collect())
}

#[cfg(test)]
mod tests {
    use std::iter::FromIterator;

    use maplit::{btreemap, btreeset};

    use super::*;
    use crate::models::{BuiltinEntity, CustomEntity, EntityValue};
    use crate::resources::stemmer::HashMapStemmer;
    use crate::resources::word_clusterer::HashMapWordClusterer;
    use crate::testutils::SharedResourcesBuilder;

    fn custom_entity(use_synonyms: bool, values: Vec<(&str, Vec<&str>)>) -> Entity {
        Entity::Custom(CustomEntity {
            use_synonyms,
            automatically_extensible: true,
            data: values
                .into_iter()
                .map(|(value, synonyms)| EntityValue {
                    value: value.to_string(),
                    synonyms: synonyms.into_iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        })
    }

    #[test]
    fn get_word_cluster_features_works() {
        // Given
        let query_tokens = tokenize_light("I, love House, muSic", Language::EN);
        let word_clusterer = HashMapWordClusterer::from_iter(vec![
            ("love".to_string(), "cluster_love".to_string()),
            ("house".to_string(), "cluster_house".to_string()),
            ("house music".to_string(), "cluster_house_music".to_string()),
        ]);

        // When
        let cluster_features = get_word_cluster_features(&query_tokens, &word_clusterer);

        // Then
        let expected_features = vec![
            "cluster_love".to_string(),
            "cluster_house".to_string(),
        ];
        assert_eq!(expected_features, cluster_features)
    }

    #[test]
    fn get_custom_entity_feature_name_works() {
        assert_eq!("entityfeaturecity", get_custom_entity_feature_name("City"));
        assert_eq!(
            "entityfeaturepickuplocation",
            get_custom_entity_feature_name("Pickup Location")
        );
        assert_eq!(
            "entityfeaturepick-up_location",
            get_custom_entity_feature_name("pick-up_location")
        );
    }

    #[test]
    fn preprocess_works() {
        // Given
        let stemmer = HashMapStemmer::from_iter(vec![("flights".to_string(), "flight".to_string())]);
        let word_clusterer =
            HashMapWordClusterer::from_iter(vec![("paris".to_string(), "cluster_1".to_string())]);
        let resources = SharedResourcesBuilder::default()
            .stemmer(stemmer)
            .word_clusterer("brown_clusters", word_clusterer)
            .build();
        let config = WordClustersConfiguration::default().with_clusters(Language::EN, "brown_clusters");
        let preprocessor = QueryPreprocessor::new(Language::EN, &resources, &config).unwrap();
        let entity_utterances = btreemap! {
            "paris".to_string() => btreeset!{"city".to_string()},
            "new york".to_string() => btreeset!{"city".to_string(), "location".to_string()},
        };

        // When
        let processed_query = preprocessor.preprocess("Book flïghts to Paris", &entity_utterances);

        // Then
        assert_eq!("book flight to paris entityfeaturecity cluster_1", processed_query);
    }

    #[test]
    fn preprocess_emits_one_feature_per_matching_entity() {
        // Given
        let resources = SharedResourcesBuilder::default().build();
        let preprocessor =
            QueryPreprocessor::new(Language::EN, &resources, &WordClustersConfiguration::default())
                .unwrap();
        let entity_utterances = btreemap! {
            "new york".to_string() => btreeset!{"city".to_string(), "location".to_string()},
            "york".to_string() => btreeset!{"city".to_string()},
        };

        // When
        let processed_query = preprocessor.preprocess("to New York", &entity_utterances);

        // Then
        assert_eq!(
            "to new york entityfeaturecity entityfeaturelocation entityfeaturecity",
            processed_query
        );
    }

    #[test]
    fn preprocess_without_features_works() {
        // Given
        let resources = SharedResourcesBuilder::default().build();
        let preprocessor =
            QueryPreprocessor::new(Language::EN, &resources, &WordClustersConfiguration::default())
                .unwrap();

        // When
        let processed_query = preprocessor.preprocess("Hëllo World!", &EntityUtteranceIndex::new());

        // Then
        assert_eq!("hello world !", processed_query);
    }

    #[test]
    fn preprocess_uses_language_separator() {
        // Given
        let resources = SharedResourcesBuilder::default().build();
        let preprocessor =
            QueryPreprocessor::new(Language::JA, &resources, &WordClustersConfiguration::default())
                .unwrap();

        // When
        let processed_query = preprocessor.preprocess("東京 に 行く", &EntityUtteranceIndex::new());

        // Then
        assert_eq!("東京に行く", processed_query);
    }

    #[test]
    fn new_fails_when_configured_clusters_are_missing() {
        // Given
        let resources = SharedResourcesBuilder::default().build();
        let config = WordClustersConfiguration::default().with_clusters(Language::EN, "brown_clusters");

        // When
        let preprocessor = QueryPreprocessor::new(Language::EN, &resources, &config);

        // Then
        assert!(preprocessor.is_err());
    }

    #[test]
    fn build_entity_utterances_index_works() {
        // Given
        let stemmer = HashMapStemmer::from_iter(vec![("lights".to_string(), "light".to_string())]);
        let resources = SharedResourcesBuilder::default().stemmer(stemmer).build();
        let preprocessor =
            QueryPreprocessor::new(Language::EN, &resources, &WordClustersConfiguration::default())
                .unwrap();
        let dataset = Dataset {
            language: "en".to_string(),
            intents: BTreeMap::new(),
            entities: btreemap! {
                "city".to_string() => custom_entity(
                    true,
                    vec![("paris", vec!["Paris", "City of Lights"]), ("london", vec![])],
                ),
                "destination".to_string() => custom_entity(false, vec![("Pâris", vec!["lutece"])]),
                "snips/city".to_string() => custom_entity(true, vec![("rome", vec![])]),
                "snips/datetime".to_string() => Entity::Builtin(BuiltinEntity {}),
            },
        };

        // When
        let index = preprocessor.build_entity_utterances_index(&dataset);

        // Then
        let expected_index = btreemap! {
            "paris".to_string() => btreeset!{"city".to_string(), "destination".to_string()},
            "city of light".to_string() => btreeset!{"city".to_string()},
            "london".to_string() => btreeset!{"city".to_string()},
        };
        assert_eq!(expected_index, index);
    }
}
