pub mod loading;
pub mod stemmer;
pub mod word_clusterer;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use self::stemmer::Stemmer;
use self::word_clusterer::WordClusterer;

/// Language resources consumed when preprocessing queries
#[derive(Default)]
pub struct SharedResources {
    pub stemmer: Option<Arc<dyn Stemmer>>,
    pub word_clusterers: HashMap<String, Arc<dyn WordClusterer>>,
    pub stop_words: HashSet<String>,
}
