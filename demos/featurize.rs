use std::fs::File;
use std::io;
use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{App, Arg};
use snips_nlu_featurizer::{
    load_shared_resources, Dataset, Featurizer, FeaturizerConfiguration, FitOutcome, Language,
    SharedResources,
};

fn main() {
    env_logger::Builder::from_default_env()
        .default_format_timestamp_nanos(true)
        .init();

    let matches = App::new("snips-nlu-featurize")
        .about("Fits an intent classification featurizer on a dataset and featurizes queries")
        .arg(
            Arg::with_name("DATASET")
                .required(true)
                .takes_value(true)
                .index(1)
                .help("path to the json training dataset"),
        )
        .arg(
            Arg::with_name("resources")
                .short("r")
                .long("--resources")
                .takes_value(true)
                .help("path to the language resources directory"),
        )
        .arg(
            Arg::with_name("pvalue_threshold")
                .short("t")
                .long("--pvalue-threshold")
                .takes_value(true)
                .help("p-value under which features are selected"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("--output")
                .takes_value(true)
                .help("directory in which the fitted featurizer is persisted"),
        )
        .get_matches();
    let dataset_path = matches.value_of("DATASET").unwrap();
    let shared_resources = matches
        .value_of("resources")
        .map(|dir| load_shared_resources(dir).unwrap())
        .unwrap_or_else(|| Arc::new(SharedResources::default()));
    let pvalue_threshold = matches
        .value_of("pvalue_threshold")
        .map(|v| v.to_string().parse::<f64>().unwrap())
        .unwrap_or(snips_nlu_featurizer::DEFAULT_PVALUE_THRESHOLD);

    println!("\nLoading the dataset...");
    let dataset: Dataset = serde_json::from_reader(File::open(dataset_path).unwrap()).unwrap();
    let language: Language = dataset.language.parse().unwrap();
    let labeled_queries = dataset.labeled_queries();

    let config = FeaturizerConfiguration {
        pvalue_threshold,
        ..FeaturizerConfiguration::default()
    };
    let mut featurizer = Featurizer::new(language, shared_resources, config).unwrap();
    let outcome = featurizer
        .fit(&dataset, &labeled_queries.queries, &labeled_queries.labels)
        .unwrap();
    if outcome == FitOutcome::EmptyCorpus {
        println!("The dataset contains no usable query");
        return;
    }
    let feature_names = featurizer.feature_names().unwrap();
    println!(
        "Featurizer fitted on {} queries, {} features selected",
        labeled_queries.queries.len(),
        feature_names.len()
    );
    if let Some(output_dir) = matches.value_of("output") {
        featurizer.persist(output_dir).unwrap();
        println!("Featurizer persisted in {}", output_dir);
    }

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush().unwrap();
    for line in stdin.lock().lines() {
        let query = line.unwrap();
        let features = featurizer.transform_one(query.trim()).unwrap();
        let active_features: Vec<(&str, f64)> = feature_names
            .iter()
            .zip(features.iter())
            .filter(|(_, value)| **value != 0.)
            .map(|(name, value)| (*name, *value))
            .collect();
        println!("{}", serde_json::to_string_pretty(&active_features).unwrap());
        print!("> ");
        io::stdout().flush().unwrap();
    }
}
