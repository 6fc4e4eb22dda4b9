use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use failure::ResultExt;
use log::info;
use serde::Deserialize;

use crate::errors::*;
use crate::language::Language;
use crate::resources::stemmer::{HashMapStemmer, Stemmer};
use crate::resources::word_clusterer::{HashMapWordClusterer, WordClusterer};
use crate::resources::SharedResources;

#[derive(Debug, Deserialize, Clone)]
struct ResourcesMetadata {
    language: String,
    word_clusters: Option<Vec<String>>,
    stems: Option<String>,
    stop_words: Option<String>,
}

/// Loads the language resources stored in `resources_dir`, as described by its
/// `metadata.json` file
pub fn load_shared_resources<P: AsRef<Path>>(resources_dir: P) -> Result<Arc<SharedResources>> {
    let metadata_file_path = resources_dir.as_ref().join("metadata.json");
    let metadata_file = File::open(&metadata_file_path).with_context(|_| {
        format!(
            "Cannot open resources metadata file '{:?}'",
            metadata_file_path
        )
    })?;
    let metadata: ResourcesMetadata =
        serde_json::from_reader(metadata_file).with_context(|_| {
            format!(
                "Cannot deserialize resources metadata file '{:?}'",
                metadata_file_path
            )
        })?;
    let language = Language::from_str(&metadata.language)?;
    info!("Loading resources for language '{}' ...", language);
    let stemmer = load_stemmer(&resources_dir, &metadata)?;
    let word_clusterers = load_word_clusterers(&resources_dir, &metadata)?;
    let stop_words = load_stop_words(&resources_dir, &metadata)?;
    info!("Resources for language '{}' loaded", language);

    Ok(Arc::new(SharedResources {
        stemmer,
        word_clusterers,
        stop_words,
    }))
}

fn load_stemmer<P: AsRef<Path>>(
    resources_dir: &P,
    metadata: &ResourcesMetadata,
) -> Result<Option<Arc<dyn Stemmer>>> {
    if let Some(stems) = metadata.stems.as_ref() {
        let stemming_directory = resources_dir.as_ref().join("stemming");
        let stems_path = stemming_directory.join(stems).with_extension("txt");
        info!("Loading stemmer ({:?}) ...", stems_path);
        let stems_reader = File::open(&stems_path)
            .with_context(|_| format!("Cannot open stems file {:?}", stems_path))?;
        let stemmer = HashMapStemmer::from_reader(stems_reader)
            .with_context(|_| format!("Cannot read stems file {:?}", stems_path))?;
        info!("Stemmer loaded");
        Ok(Some(Arc::new(stemmer)))
    } else {
        Ok(None)
    }
}

fn load_word_clusterers<P: AsRef<Path>>(
    resources_dir: &P,
    metadata: &ResourcesMetadata,
) -> Result<HashMap<String, Arc<dyn WordClusterer>>> {
    let mut word_clusterers: HashMap<String, Arc<dyn WordClusterer>> = HashMap::new();
    if let Some(word_clusters) = metadata.word_clusters.as_ref() {
        let word_clusters_directory = resources_dir.as_ref().join("word_clusters");
        for clusters_name in word_clusters {
            let clusters_path = word_clusters_directory
                .join(clusters_name.clone())
                .with_extension("txt");
            info!(
                "Loading word clusters '{}' ({:?}) ...",
                clusters_name, clusters_path
            );
            let word_clusters_reader = File::open(&clusters_path)
                .with_context(|_| format!("Cannot open word clusters file {:?}", clusters_path))?;
            let word_clusterer = HashMapWordClusterer::from_reader(word_clusters_reader)
                .with_context(|_| format!("Cannot read word clusters file {:?}", clusters_path))?;
            word_clusterers.insert(clusters_name.to_string(), Arc::new(word_clusterer));
            info!("Word clusters '{}' loaded", clusters_name);
        }
    }
    Ok(word_clusterers)
}

fn load_stop_words<P: AsRef<Path>>(
    resources_dir: &P,
    metadata: &ResourcesMetadata,
) -> Result<HashSet<String>> {
    if let Some(stop_words_name) = metadata.stop_words.as_ref() {
        let stop_words_path = resources_dir
            .as_ref()
            .join(stop_words_name)
            .with_extension("txt");
        info!("Loading stop words ({:?}) ...", stop_words_path);
        let file = File::open(&stop_words_path)
            .with_context(|_| format!("Cannot open stop words file {:?}", stop_words_path))?;
        let reader = BufReader::new(file);
        let mut stop_words = HashSet::<String>::new();
        for line in reader.lines() {
            let stop_word = line?;
            if !stop_word.is_empty() {
                stop_words.insert(stop_word);
            }
        }
        info!("Stop words loaded");
        Ok(stop_words)
    } else {
        Ok(HashSet::new())
    }
}
