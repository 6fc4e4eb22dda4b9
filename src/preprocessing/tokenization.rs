use lazy_static::lazy_static;
use regex::Regex;

use crate::language::Language;

/// An n-gram text along with the indexes of the tokens it spans
pub type Ngram = (String, Vec<usize>);

/// Splits the input into word tokens, every punctuation or symbol character being kept as a
/// token of its own
pub fn tokenize_light(input: &str, _language: Language) -> Vec<String> {
    lazy_static! {
        static ref TOKEN_REGEX: Regex = Regex::new(r"\w+|[^\w\s]").unwrap();
    }
    TOKEN_REGEX
        .find_iter(input)
        .map(|token| token.as_str().to_string())
        .collect()
}

/// Computes all the contiguous n-grams of `tokens` having at most `max_ngram_size` tokens.
///
/// N-grams are enumerated by increasing start index, then by increasing length.
pub fn compute_all_ngrams(tokens: &[&str], max_ngram_size: usize) -> Vec<Ngram> {
    let mut ngrams: Vec<Ngram> = Vec::new();
    for start in 0..tokens.len() {
        let max_end = ::std::cmp::min(tokens.len(), start + max_ngram_size);
        for end in start..max_end {
            let ngram = tokens[start..=end].join(" ");
            ngrams.push((ngram, (start..=end).collect()));
        }
    }
    ngrams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_light_works() {
        // When
        let tokens = tokenize_light("I, love House, muSic!?", Language::EN);

        // Then
        let expected_tokens = vec!["I", ",", "love", "House", ",", "muSic", "!", "?"];
        assert_eq!(expected_tokens, tokens);
    }

    #[test]
    fn tokenize_light_handles_whitespaces() {
        assert!(tokenize_light("", Language::EN).is_empty());
        assert!(tokenize_light("  \t \n ", Language::FR).is_empty());
        assert_eq!(
            vec!["entityfeaturecity", "12"],
            tokenize_light(" entityfeaturecity  12 ", Language::EN)
        );
    }

    #[test]
    fn compute_all_ngrams_works() {
        // Given
        let tokens = vec!["a", "b", "c"];

        // When
        let ngrams = compute_all_ngrams(&tokens, tokens.len());

        // Then
        let expected_ngrams = vec![
            ("a".to_string(), vec![0]),
            ("a b".to_string(), vec![0, 1]),
            ("a b c".to_string(), vec![0, 1, 2]),
            ("b".to_string(), vec![1]),
            ("b c".to_string(), vec![1, 2]),
            ("c".to_string(), vec![2]),
        ];
        assert_eq!(expected_ngrams, ngrams);
    }

    #[test]
    fn compute_all_ngrams_respects_max_size() {
        // Given
        let tokens = vec!["a", "b", "c"];

        // When
        let ngrams: Vec<String> = compute_all_ngrams(&tokens, 1)
            .into_iter()
            .map(|ngram| ngram.0)
            .collect();

        // Then
        assert_eq!(vec!["a", "b", "c"], ngrams);
    }
}
