pub mod corpus;
pub mod error;
pub mod ranker;
pub mod tfidf;
pub mod tokenizer;

pub use corpus::{build_corpus, combined_text, MovieRecord};
pub use error::{Error, Result};
pub use ranker::{recommend, ScoredResult};
pub use tfidf::{SparseVec, TermWeightSpace};
