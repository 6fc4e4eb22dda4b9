use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;

use crate::sparse::SparseMatrix;
use crate::stats::chi2_survival;

/// Chi-squared statistics and p-values of each column of `matrix` with respect to the class
/// labels.
///
/// P-values which cannot be computed, for instance when there is a single class, are set to 1.
pub fn chi2(matrix: &SparseMatrix, labels: &[usize]) -> (Vec<f64>, Vec<f64>) {
    let classes: BTreeMap<usize, usize> = labels
        .iter()
        .cloned()
        .collect::<BTreeSet<usize>>()
        .into_iter()
        .enumerate()
        .map(|(class_index, label)| (label, class_index))
        .collect();
    let nb_classes = classes.len();
    let nb_columns = matrix.ncols();

    let mut observed = vec![vec![0.; nb_columns]; nb_classes];
    let mut class_counts = vec![0.; nb_classes];
    for (row, label) in labels.iter().enumerate() {
        let class_index = classes[label];
        class_counts[class_index] += 1.;
        for (col, value) in matrix.row(row) {
            observed[class_index][col] += value;
        }
    }
    let nb_samples = labels.len() as f64;
    let feature_counts = matrix.column_sums();

    let statistics: Vec<f64> = (0..nb_columns)
        .map(|col| {
            (0..nb_classes)
                .map(|class_index| {
                    let expected = class_counts[class_index] / nb_samples * feature_counts[col];
                    let diff = observed[class_index][col] - expected;
                    diff * diff / expected
                })
                .sum::<f64>()
        })
        .collect();
    let pvalues = statistics
        .iter()
        .map(|statistic| {
            let pvalue = chi2_survival(*statistic, nb_classes.saturating_sub(1));
            if pvalue.is_nan() {
                1.
            } else {
                pvalue
            }
        })
        .collect();
    (statistics, pvalues)
}

/// Selects the columns of the tf-idf matrix which are the most related to the labels
pub fn select_best_features(
    matrix: &SparseMatrix,
    labels: &[usize],
    terms: &[&str],
    stop_words: &HashSet<String>,
    pvalue_threshold: f64,
) -> Vec<usize> {
    let (_, pvalues) = chi2(matrix, labels);
    select_features(&pvalues, terms, stop_words, pvalue_threshold)
}

/// Keeps the features whose p-value is lower than the threshold, or the ones with the minimum
/// p-value when none passes it.
///
/// Stop words are kept only when their p-value is lower than half of the threshold. When every
/// selected feature is such a weak stop word, the selection made before demotion is returned
/// unchanged: a fitted featurizer must select at least one feature, so weak stop words are
/// tolerated in that single case.
pub fn select_features(
    pvalues: &[f64],
    terms: &[&str],
    stop_words: &HashSet<String>,
    pvalue_threshold: f64,
) -> Vec<usize> {
    let mut best_features: Vec<usize> = pvalues
        .iter()
        .enumerate()
        .filter(|(_, pvalue)| **pvalue < pvalue_threshold)
        .map(|(ix, _)| ix)
        .collect();

    if best_features.is_empty() {
        let min_pvalue = pvalues.iter().cloned().fold(::std::f64::INFINITY, f64::min);
        debug!(
            "No feature has a p-value lower than {}, keeping the ones with p-value {}",
            pvalue_threshold, min_pvalue
        );
        best_features = pvalues
            .iter()
            .enumerate()
            .filter(|(_, pvalue)| **pvalue == min_pvalue)
            .map(|(ix, _)| ix)
            .collect();
    }

    let candidates: Vec<(usize, &str, f64)> = best_features
        .iter()
        .map(|ix| (*ix, terms[*ix], pvalues[*ix]))
        .collect();
    let kept_features: Vec<usize> = candidates
        .iter()
        .filter(|(_, term, pvalue)| {
            !(stop_words.contains(*term) && *pvalue > pvalue_threshold / 2.)
        })
        .map(|(ix, _, _)| *ix)
        .collect();

    if kept_features.is_empty() {
        debug!("All the selected features are weak stop words, keeping them");
        best_features
    } else {
        kept_features
    }
}
