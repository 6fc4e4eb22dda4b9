use std::collections::HashMap;
use std::io::Read;
use std::iter::FromIterator;

use failure::format_err;

use crate::errors::*;
use crate::preprocessing::normalize;

/// Maps a normalized word to its stem
pub trait Stemmer: Send + Sync {
    fn stem(&self, value: &str) -> String;
}

/// Lookup stemmer whose inflections and stems are stored normalized, so that it can be applied
/// directly on normalized query tokens
pub struct HashMapStemmer {
    stems: HashMap<String, String>,
}

impl HashMapStemmer {
    /// Reads lines of the form `stem,inflection_1,inflection_2,...`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut inflections = vec![];
        for (line_ix, record) in csv_reader.records().enumerate() {
            let record = record?;
            let mut fields = record.iter();
            let stem = fields
                .next()
                .filter(|stem| !stem.is_empty())
                .ok_or_else(|| format_err!("Missing stem on line {} of stems file", line_ix + 1))?;
            inflections.extend(fields.map(|inflection| (inflection.to_string(), stem.to_string())));
        }
        Ok(Self::from_iter(inflections))
    }
}

impl FromIterator<(String, String)> for HashMapStemmer {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            stems: iter
                .into_iter()
                .map(|(inflection, stem)| (normalize(&inflection), normalize(&stem)))
                .collect(),
        }
    }
}

impl Stemmer for HashMapStemmer {
    fn stem(&self, value: &str) -> String {
        self.stems
            .get(value)
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_reader_works() {
        // Given
        let stems: &[u8] = r#"
fly,flies,flying,flew
book,booking,booked,books"#
            .as_ref();

        // When
        let stemmer = HashMapStemmer::from_reader(stems).unwrap();

        // Then
        assert_eq!("fly", stemmer.stem("flies"));
        assert_eq!("fly", stemmer.stem("flew"));
        assert_eq!("book", stemmer.stem("booking"));
        assert_eq!("book", stemmer.stem("book"));
        assert_eq!("plane", stemmer.stem("plane"));
    }

    #[test]
    fn from_reader_normalizes_inflections_and_stems() {
        // Given
        let stems: &[u8] = "réserver,Réservé,réservées\nÉté,étés".as_bytes();

        // When
        let stemmer = HashMapStemmer::from_reader(stems).unwrap();

        // Then
        assert_eq!("reserver", stemmer.stem(&normalize("réservé")));
        assert_eq!("reserver", stemmer.stem(&normalize("RÉSERVÉES")));
        assert_eq!("ete", stemmer.stem(&normalize("étés")));
    }

    #[test]
    fn from_reader_fails_with_missing_stem() {
        // Given
        let stems: &[u8] = "fly,flies\n,booking".as_bytes();

        // When
        let stemmer = HashMapStemmer::from_reader(stems);

        // Then
        assert!(stemmer.is_err());
    }
}
