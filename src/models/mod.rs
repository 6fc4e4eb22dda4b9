pub mod dataset;
pub mod featurizer;

pub use self::dataset::*;
pub use self::featurizer::*;
