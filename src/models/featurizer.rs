use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Portable representation of a fitted `Featurizer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturizerModel {
    pub language_code: String,
    pub tfidf_vectorizer: TfidfVectorizerModel,
    pub best_features: Vec<usize>,
    pub pvalue_threshold: f64,
    pub entity_utterances_to_entity_names: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizerModel {
    pub vocab: BTreeMap<String, usize>,
    pub idf_diag: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let data = r#"{
            "language_code": "en",
            "tfidf_vectorizer": {
                "vocab": {"flight": 0, "paris": 1},
                "idf_diag": [1.4054651081081644, 1.0]
            },
            "best_features": [1],
            "pvalue_threshold": 0.4,
            "entity_utterances_to_entity_names": {"paris": ["city"]}
        }"#;

        let model: FeaturizerModel = serde_json::from_str(data).unwrap();

        assert_eq!("en", model.language_code);
        assert_eq!(Some(&1), model.tfidf_vectorizer.vocab.get("paris"));
        assert_eq!(vec![1.4054651081081644, 1.0], model.tfidf_vectorizer.idf_diag);
        assert_eq!(vec![1], model.best_features);
        assert_eq!(
            Some(&vec!["city".to_string()]),
            model.entity_utterances_to_entity_names.get("paris")
        );
    }
}
