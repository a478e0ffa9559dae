pub mod inverted;
pub mod trigram;
pub mod types;

pub use inverted::InvertedIndex;
pub use trigram::{CandidateSet, TrigramIndex};
pub use types::*;
