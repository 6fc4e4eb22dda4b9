mod configurations;
pub mod errors;
mod intent_classifier;
mod language;
pub mod models;
mod preprocessing;
pub mod resources;
mod sparse;
mod stats;
#[cfg(test)]
mod testutils;
mod utils;

pub use crate::configurations::*;
pub use crate::errors::*;
pub use crate::intent_classifier::{
    get_custom_entity_feature_name, EntityUtteranceIndex, Featurizer, FitOutcome,
    QueryPreprocessor, TfidfVectorizer,
};
pub use crate::language::Language;
pub use crate::models::*;
pub use crate::preprocessing::{compute_all_ngrams, normalize, tokenize_light, Ngram};
pub use crate::resources::loading::load_shared_resources;
pub use crate::resources::SharedResources;
pub use crate::sparse::SparseMatrix;
pub use crate::utils::{is_builtin_entity, EntityName, IntentName};
