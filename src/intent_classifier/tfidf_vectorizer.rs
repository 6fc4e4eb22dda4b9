use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use itertools::Itertools;

use crate::errors::*;
use crate::language::Language;
use crate::models::TfidfVectorizerModel;
use crate::preprocessing::tokenize_light;
use crate::sparse::SparseMatrix;

/// Term frequency - inverse document frequency vectorizer, with smoothed idf and l2
/// normalization
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfVectorizer {
    language: Language,
    vocabulary: HashMap<String, usize>,
    idf_diag: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            vocabulary: HashMap::new(),
            idf_diag: vec![],
        }
    }

    pub fn from_model(model: TfidfVectorizerModel, language: Language) -> Result<Self> {
        let vocabulary_size = model.vocab.len();
        if vocabulary_size != model.idf_diag.len() {
            return Err(FeaturizerError::StateMismatch {
                vocabulary_size,
                idf_size: model.idf_diag.len(),
            }
            .into());
        }
        let indices: HashSet<usize> = model.vocab.values().cloned().collect();
        if indices.len() != vocabulary_size || indices.iter().any(|ix| *ix >= vocabulary_size) {
            return Err(FeaturizerError::InvalidState(
                "vocabulary indices must be distinct and lower than the vocabulary size"
                    .to_string(),
            )
            .into());
        }
        Ok(Self {
            language,
            vocabulary: model.vocab.into_iter().collect(),
            idf_diag: model.idf_diag,
        })
    }

    pub fn to_model(&self) -> TfidfVectorizerModel {
        TfidfVectorizerModel {
            vocab: self
                .vocabulary
                .iter()
                .map(|(term, ix)| (term.clone(), *ix))
                .collect(),
            idf_diag: self.idf_diag.clone(),
        }
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf_diag(&self) -> &[f64] {
        &self.idf_diag
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms of the vocabulary ordered by column index
    pub fn terms(&self) -> Vec<&str> {
        self.vocabulary
            .iter()
            .sorted_by_key(|(_, ix)| **ix)
            .into_iter()
            .map(|(term, _)| term.as_str())
            .collect()
    }

    /// Learns the vocabulary and the idf weights of the corpus.
    ///
    /// Terms are indexed in lexicographic order and `idf = ln((1 + n) / (1 + df)) + 1` where
    /// `n` is the number of documents and `df` the number of documents containing the term.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        let mut document_frequencies: HashMap<String, usize> = HashMap::new();
        for document in documents {
            let unique_terms: HashSet<String> = self.analyze(document.as_ref()).into_iter().collect();
            for term in unique_terms {
                *document_frequencies.entry(term).or_insert(0) += 1;
            }
        }
        let terms: BTreeSet<&String> = document_frequencies.keys().collect();
        let nb_documents = documents.len() as f64;

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(ix, term)| ((*term).clone(), ix))
            .collect();
        self.idf_diag = terms
            .iter()
            .map(|term| {
                let df = document_frequencies[*term] as f64;
                ((1. + nb_documents) / (1. + df)).ln() + 1.
            })
            .collect();
    }

    /// Computes the l2-normalized tf-idf vectors of the documents, terms missing from the
    /// vocabulary being ignored.
    ///
    /// The norm is accumulated in column order so that identical inputs give bitwise identical
    /// rows.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> SparseMatrix {
        let mut matrix = SparseMatrix::new(self.vocabulary.len());
        for document in documents {
            let mut term_counts: BTreeMap<usize, f64> = BTreeMap::new();
            for term in self.analyze(document.as_ref()) {
                if let Some(ix) = self.vocabulary.get(&term) {
                    *term_counts.entry(*ix).or_insert(0.) += 1.;
                }
            }
            let weights = term_counts
                .into_iter()
                .map(|(ix, count)| (ix, count * self.idf_diag[ix]))
                .collect_vec();
            let l2_norm: f64 = weights
                .iter()
                .fold(0., |norm, (_, v)| norm + v * v)
                .sqrt();
            let safe_l2_norm = if l2_norm > 0. { l2_norm } else { 1. };
            matrix.push_row(weights.into_iter().map(|(ix, v)| (ix, v / safe_l2_norm)));
        }
        matrix
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> SparseMatrix {
        self.fit(documents);
        self.transform(documents)
    }

    fn analyze(&self, document: &str) -> Vec<String> {
        tokenize_light(&document.to_lowercase(), self.language)
    }
}
