mod normalization;
mod tokenization;

pub use self::normalization::normalize;
pub use self::tokenization::{compute_all_ngrams, tokenize_light, Ngram};
