use failure::Fail;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum FeaturizerError {
    #[fail(display = "Featurizer must be fitted before calling transform")]
    NotFitted,
    #[fail(
        display = "Vocabulary size ({}) does not match idf vector size ({})",
        vocabulary_size, idf_size
    )]
    StateMismatch {
        vocabulary_size: usize,
        idf_size: usize,
    },
    #[fail(display = "Unknown language: '{}'", _0)]
    UnknownLanguage(String),
    #[fail(display = "Invalid featurizer state: {}", _0)]
    InvalidState(String),
    #[fail(
        display = "Expected one label per query but found {} labels for {} queries",
        nb_labels, nb_queries
    )]
    InvalidLabels { nb_labels: usize, nb_queries: usize },
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;
