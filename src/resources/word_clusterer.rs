use std::collections::HashMap;
use std::io::Read;
use std::iter::FromIterator;

use failure::format_err;

use crate::errors::*;

/// Maps a lowercased word, or n-gram, to the name of its cluster
pub trait WordClusterer: Send + Sync {
    fn get_cluster(&self, word: &str) -> Option<String>;
}

pub struct HashMapWordClusterer {
    clusters: HashMap<String, String>,
}

impl HashMapWordClusterer {
    /// Reads lines of the form `word<TAB>cluster`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut clusters = HashMap::new();
        for (line_ix, record) in csv_reader.records().enumerate() {
            let record = record?;
            match (record.get(0), record.get(1), record.len()) {
                (Some(word), Some(cluster), 2) if !word.is_empty() && !cluster.is_empty() => {
                    clusters.insert(word.to_string(), cluster.to_string());
                }
                _ => {
                    return Err(format_err!(
                        "Expected 'word<TAB>cluster' on line {} of word clusters file but found {:?}",
                        line_ix + 1,
                        record.iter().collect::<Vec<_>>()
                    ))
                }
            }
        }
        Ok(Self { clusters })
    }
}

impl FromIterator<(String, String)> for HashMapWordClusterer {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            clusters: iter.into_iter().collect(),
        }
    }
}

impl WordClusterer for HashMapWordClusterer {
    fn get_cluster(&self, word: &str) -> Option<String> {
        self.clusters.get(word).cloned()
    }
}
