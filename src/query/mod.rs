pub mod parser;
pub mod scorer;

pub use parser::parse_query;
pub use scorer::{Scorer, ScoringWeights};
