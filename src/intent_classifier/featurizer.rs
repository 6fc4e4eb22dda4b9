use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use failure::ResultExt;
use log::{debug, info, warn};
use ndarray::prelude::*;

use crate::configurations::{validate_pvalue_threshold, FeaturizerConfiguration, WordClustersConfiguration};
use crate::errors::*;
use crate::language::Language;
use crate::models::{Dataset, FeaturizerModel};
use crate::preprocessing::tokenize_light;
use crate::resources::SharedResources;
use crate::sparse::SparseMatrix;

use super::feature_selection::select_best_features;
use super::query_preprocessor::{EntityUtteranceIndex, QueryPreprocessor};
use super::tfidf_vectorizer::TfidfVectorizer;

const FEATURIZER_FILENAME: &str = "featurizer.json";

/// Outcome of `Featurizer::fit`
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOutcome {
    Fitted,
    /// None of the training queries contains any token, the featurizer is left untrained
    EmptyCorpus,
}

/// Converts queries into tf-idf features restricted to the ones most correlated with the
/// intents
pub struct Featurizer {
    language: Language,
    pvalue_threshold: f64,
    preprocessor: QueryPreprocessor,
    tfidf_vectorizer: TfidfVectorizer,
    best_features: Option<Vec<usize>>,
    entity_utterances_to_entity_names: EntityUtteranceIndex,
    shared_resources: Arc<SharedResources>,
}

impl Featurizer {
    pub fn new(
        language: Language,
        shared_resources: Arc<SharedResources>,
        config: FeaturizerConfiguration,
    ) -> Result<Self> {
        config.validate()?;
        let preprocessor = QueryPreprocessor::new(language, &shared_resources, &config.word_clusters)?;
        Ok(Self {
            language,
            pvalue_threshold: config.pvalue_threshold,
            preprocessor,
            tfidf_vectorizer: TfidfVectorizer::new(language),
            best_features: None,
            entity_utterances_to_entity_names: EntityUtteranceIndex::new(),
            shared_resources,
        })
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        shared_resources: Arc<SharedResources>,
        word_clusters: &WordClustersConfiguration,
    ) -> Result<Self> {
        let featurizer_model_path = path.as_ref().join(FEATURIZER_FILENAME);
        let model_file = File::open(&featurizer_model_path).with_context(|_| {
            format!("Cannot open Featurizer file '{:?}'", &featurizer_model_path)
        })?;
        let model: FeaturizerModel = serde_json::from_reader(model_file)
            .with_context(|_| "Cannot deserialize FeaturizerModel json data")?;
        Self::from_portable_state(model, shared_resources, word_clusters)
    }

    /// Rebuilds a fitted featurizer, after checking the consistency of its persisted state
    pub fn from_portable_state(
        model: FeaturizerModel,
        shared_resources: Arc<SharedResources>,
        word_clusters: &WordClustersConfiguration,
    ) -> Result<Self> {
        let language = Language::from_str(&model.language_code)?;
        validate_pvalue_threshold(model.pvalue_threshold)?;
        let tfidf_vectorizer = TfidfVectorizer::from_model(model.tfidf_vectorizer, language)?;
        validate_best_features(&model.best_features, tfidf_vectorizer.vocabulary_size())?;
        let entity_utterances_to_entity_names: EntityUtteranceIndex = model
            .entity_utterances_to_entity_names
            .into_iter()
            .map(|(utterance, entity_names)| (utterance, entity_names.into_iter().collect()))
            .collect();
        let preprocessor = QueryPreprocessor::new(language, &shared_resources, word_clusters)?;

        Ok(Self {
            language,
            pvalue_threshold: model.pvalue_threshold,
            preprocessor,
            tfidf_vectorizer,
            best_features: Some(model.best_features),
            entity_utterances_to_entity_names,
            shared_resources,
        })
    }
}

impl Featurizer {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn pvalue_threshold(&self) -> f64 {
        self.pvalue_threshold
    }

    pub fn is_fitted(&self) -> bool {
        self.best_features.is_some()
    }

    pub fn best_features(&self) -> Option<&[usize]> {
        self.best_features.as_ref().map(|features| features.as_slice())
    }

    /// Vocabulary terms of the selected features, in output column order
    pub fn feature_names(&self) -> Option<Vec<&str>> {
        let terms = self.tfidf_vectorizer.terms();
        self.best_features
            .as_ref()
            .map(|features| features.iter().map(|ix| terms[*ix]).collect())
    }

    pub fn entity_utterances_to_entity_names(&self) -> &EntityUtteranceIndex {
        &self.entity_utterances_to_entity_names
    }

    /// Learns the featurizer parameters from the training queries and their labels.
    ///
    /// Any previously learned state is replaced.
    pub fn fit<S: AsRef<str>>(
        &mut self,
        dataset: &Dataset,
        queries: &[S],
        labels: &[usize],
    ) -> Result<FitOutcome> {
        if queries.len() != labels.len() {
            return Err(FeaturizerError::InvalidLabels {
                nb_labels: labels.len(),
                nb_queries: queries.len(),
            }
            .into());
        }
        if Language::from_str(&dataset.language).ok() != Some(self.language) {
            warn!(
                "Dataset language '{}' differs from featurizer language '{}'",
                dataset.language, self.language
            );
        }
        info!("Fitting featurizer on {} queries ...", queries.len());

        self.entity_utterances_to_entity_names =
            self.preprocessor.build_entity_utterances_index(dataset);
        debug!(
            "{} entity utterances indexed",
            self.entity_utterances_to_entity_names.len()
        );

        let is_empty_corpus = queries
            .iter()
            .all(|query| tokenize_light(query.as_ref(), self.language).join("").is_empty());
        if is_empty_corpus {
            info!("All training queries are empty, featurizer left untrained");
            return Ok(self.reset());
        }

        let preprocessed_queries = self.preprocess_queries(queries);
        let mut tfidf_vectorizer = TfidfVectorizer::new(self.language);
        let tfidf_matrix = tfidf_vectorizer.fit_transform(&preprocessed_queries);
        if tfidf_vectorizer.vocabulary_size() == 0 {
            info!("No term found in the preprocessed queries, featurizer left untrained");
            return Ok(self.reset());
        }

        let best_features = select_best_features(
            &tfidf_matrix,
            labels,
            &tfidf_vectorizer.terms(),
            &self.shared_resources.stop_words,
            self.pvalue_threshold,
        );
        info!(
            "Featurizer fitted: {} features selected out of {}",
            best_features.len(),
            tfidf_vectorizer.vocabulary_size()
        );

        self.tfidf_vectorizer = tfidf_vectorizer;
        self.best_features = Some(best_features);
        Ok(FitOutcome::Fitted)
    }

    /// Computes the features of the queries, as a matrix of shape
    /// `(queries.len(), best_features.len())`
    pub fn transform<S: AsRef<str>>(&self, queries: &[S]) -> Result<SparseMatrix> {
        let best_features = self
            .best_features
            .as_ref()
            .ok_or_else(|| FeaturizerError::NotFitted)?;
        let preprocessed_queries = self.preprocess_queries(queries);
        Ok(self
            .tfidf_vectorizer
            .transform(&preprocessed_queries)
            .select_columns(best_features))
    }

    pub fn transform_one(&self, query: &str) -> Result<Array1<f64>> {
        Ok(self.transform(&[query])?.row_to_dense(0))
    }

    /// Fits the featurizer and transforms the training queries, returns `None` when the
    /// training queries are all empty
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        dataset: &Dataset,
        queries: &[S],
        labels: &[usize],
    ) -> Result<Option<SparseMatrix>> {
        match self.fit(dataset, queries, labels)? {
            FitOutcome::Fitted => Ok(Some(self.transform(queries)?)),
            FitOutcome::EmptyCorpus => Ok(None),
        }
    }

    pub fn to_portable_state(&self) -> Result<FeaturizerModel> {
        let best_features = self
            .best_features
            .as_ref()
            .ok_or_else(|| FeaturizerError::NotFitted)?;
        Ok(FeaturizerModel {
            language_code: self.language.iso_code().to_string(),
            tfidf_vectorizer: self.tfidf_vectorizer.to_model(),
            best_features: best_features.clone(),
            pvalue_threshold: self.pvalue_threshold,
            entity_utterances_to_entity_names: self
                .entity_utterances_to_entity_names
                .iter()
                .map(|(utterance, entity_names)| {
                    (utterance.clone(), entity_names.iter().cloned().collect())
                })
                .collect(),
        })
    }

    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let model = self.to_portable_state()?;
        fs::create_dir_all(path.as_ref())
            .with_context(|_| format!("Cannot create featurizer directory {:?}", path.as_ref()))?;
        let featurizer_model_path = path.as_ref().join(FEATURIZER_FILENAME);
        let model_file = File::create(&featurizer_model_path).with_context(|_| {
            format!("Cannot create Featurizer file '{:?}'", &featurizer_model_path)
        })?;
        serde_json::to_writer(model_file, &model)
            .with_context(|_| "Cannot serialize FeaturizerModel json data")?;
        info!("Featurizer persisted in {:?}", path.as_ref());
        Ok(())
    }

    fn preprocess_queries<S: AsRef<str>>(&self, queries: &[S]) -> Vec<String> {
        queries
            .iter()
            .map(|query| {
                self.preprocessor
                    .preprocess(query.as_ref(), &self.entity_utterances_to_entity_names)
            })
            .collect()
    }

    fn reset(&mut self) -> FitOutcome {
        self.tfidf_vectorizer = TfidfVectorizer::new(self.language);
        self.best_features = None;
        FitOutcome::EmptyCorpus
    }
}

fn validate_best_features(best_features: &[usize], vocabulary_size: usize) -> Result<()> {
    if best_features.is_empty() {
        return Err(FeaturizerError::InvalidState("no feature selected".to_string()).into());
    }
    if let Some(feature) = best_features.iter().find(|ix| **ix >= vocabulary_size) {
        return Err(FeaturizerError::InvalidState(format!(
            "selected feature {} is out of the vocabulary of size {}",
            feature, vocabulary_size
        ))
        .into());
    }
    let distinct_features: BTreeSet<&usize> = best_features.iter().collect();
    if distinct_features.len() != best_features.len() {
        return Err(
            FeaturizerError::InvalidState("selected features must be distinct".to_string()).into(),
        );
    }
    Ok(())
}
