//! # rankfuse
//!
//! Reciprocal Rank Fusion of ranked retrieval result sets.
//!
//! ## Features
//!
//! - Pure, stateless RRF combiner with an explicit tie-break rule
//! - Any number of upstream retrievers behind one capability trait
//! - Concurrent retrieval, deterministic fusion order
//! - Command line tool for fusing result files

pub mod cli;
pub mod document;
pub mod error;
pub mod fusion;
pub mod retriever;

pub mod prelude {
    pub use crate::document::{DocumentRef, Node, QueryResult};
    pub use crate::error::{RankFuseError, Result};
    pub use crate::fusion::config::{FusionConfig, TieBreak};
    pub use crate::fusion::result::{FusedHit, FusedResultSet, RankedResultSet};
    pub use crate::fusion::rrf::{RankFusion, combine};
    pub use crate::retriever::hybrid::HybridSearch;
    pub use crate::retriever::provider::{RankedResultProvider, StaticResultProvider};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
