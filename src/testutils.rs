use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ndarray::prelude::*;

use crate::resources::stemmer::Stemmer;
use crate::resources::word_clusterer::WordClusterer;
use crate::resources::SharedResources;

pub fn assert_epsilon_eq_array1(a: &Array1<f64>, b: &Array1<f64>, epsilon: f64) {
    assert_eq!(a.dim(), b.dim());
    for (index, elem_a) in a.indexed_iter() {
        assert!(
            epsilon_eq(*elem_a, b[index], epsilon),
            "{} != {} at index {}",
            elem_a,
            b[index],
            index
        )
    }
}

pub fn assert_epsilon_eq_array2(a: &Array2<f64>, b: &Array2<f64>, epsilon: f64) {
    assert_eq!(a.dim(), b.dim());
    for (index, elem_a) in a.indexed_iter() {
        assert!(
            epsilon_eq(*elem_a, b[index], epsilon),
            "{} != {} at index {:?}",
            elem_a,
            b[index],
            index
        )
    }
}

pub fn epsilon_eq(a: f64, b: f64, epsilon: f64) -> bool {
    let diff = a - b;
    diff < epsilon && diff > -epsilon
}

#[derive(Default)]
pub struct SharedResourcesBuilder {
    stemmer: Option<Arc<dyn Stemmer>>,
    word_clusterers: HashMap<String, Arc<dyn WordClusterer>>,
    stop_words: HashSet<String>,
}

impl SharedResourcesBuilder {
    pub fn stemmer<S: Stemmer + 'static>(mut self, stemmer: S) -> Self {
        self.stemmer = Some(Arc::new(stemmer) as _);
        self
    }

    pub fn word_clusterer<W: WordClusterer + 'static>(
        mut self,
        clusters_name: &str,
        word_clusterer: W,
    ) -> Self {
        self.word_clusterers
            .insert(clusters_name.to_string(), Arc::new(word_clusterer) as _);
        self
    }

    pub fn stop_words(mut self, stop_words: HashSet<String>) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn build(self) -> SharedResources {
        SharedResources {
            stemmer: self.stemmer,
            word_clusterers: self.word_clusterers,
            stop_words: self.stop_words,
        }
    }
}
