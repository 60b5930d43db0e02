//! Reciprocal Rank Fusion of ranked result sets.
//!
//! Several retrievers (a lexical BM25 store, a dense embedding store, ...)
//! each produce their own ranking. This module merges those rankings into a
//! single list, scoring every document by
//!
//! ```text
//! score(d) = sum over lists L containing d of 1 / (k + rank_L(d) + 1)
//! ```
//!
//! where `rank_L(d)` is the 0-based position of `d` in `L` and `k` is the
//! fusion constant. Only positions matter; retriever scores are ignored.
//!
//! # Architecture
//!
//! - **Configuration**: `config` - result limit, fusion constant, tie-break rule
//! - **Types**: `result` - ranked input sets and the fused output
//! - **Core**: `rrf` - the stateless `RankFusion` combiner
//!
//! # Example
//!
//! ```
//! use rankfuse::fusion::result::RankedResultSet;
//! use rankfuse::fusion::rrf::combine;
//!
//! # fn main() -> rankfuse::error::Result<()> {
//! let sparse = RankedResultSet::from_ids(["doc1", "doc2", "doc3"]);
//! let dense = RankedResultSet::from_ids(["doc2", "doc1", "doc4"]);
//!
//! let fused = combine(&[sparse, dense], 3, 60.0)?;
//! assert_eq!(fused.ids(), vec!["doc1", "doc2", "doc3"]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod result;
pub mod rrf;
