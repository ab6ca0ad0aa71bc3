pub mod eval;
pub mod search;

pub use eval::{Evaluator, PositionalEvaluator};
pub use search::{INF, SearchResult, SearchStats, Searcher};
