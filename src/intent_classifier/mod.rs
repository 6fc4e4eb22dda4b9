mod feature_selection;
mod featurizer;
mod query_preprocessor;
mod tfidf_vectorizer;

pub use self::featurizer::{Featurizer, FitOutcome};
pub use self::query_preprocessor::{
    get_custom_entity_feature_name, EntityUtteranceIndex, QueryPreprocessor,
};
pub use self::tfidf_vectorizer::TfidfVectorizer;
