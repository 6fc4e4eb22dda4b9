mod featurizer;

pub use self::featurizer::*;
