//! Upstream retrievers and the hybrid search composite.
//!
//! Retrievers are external collaborators: a sparse store, a dense store, or
//! anything else that can answer a query with a ranked list. They plug in
//! through the [`provider::RankedResultProvider`] trait, and
//! [`hybrid::HybridSearch`] queries any number of them before handing their
//! lists to the fusion core.
//!
//! # Example
//!
//! ```
//! use rankfuse::fusion::config::FusionConfig;
//! use rankfuse::fusion::result::RankedResultSet;
//! use rankfuse::retriever::hybrid::HybridSearch;
//! use rankfuse::retriever::provider::StaticResultProvider;
//!
//! # async fn example() -> rankfuse::error::Result<()> {
//! let sparse = StaticResultProvider::new("sparse", RankedResultSet::from_ids(["a", "b"]));
//! let dense = StaticResultProvider::new("dense", RankedResultSet::from_ids(["b", "c"]));
//!
//! let search = HybridSearch::new(FusionConfig::default())?
//!     .with_provider(sparse)
//!     .with_provider(dense);
//!
//! let fused = search.search("ownership").await?;
//! assert_eq!(fused.ids()[0], "b");
//! # Ok(())
//! # }
//! ```

pub mod hybrid;
pub mod provider;
