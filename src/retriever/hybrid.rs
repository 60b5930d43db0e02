//! Hybrid search over an injected collection of retrievers.

use std::time::Instant;

use futures::future::try_join_all;

use crate::error::{RankFuseError, Result};
use crate::fusion::config::FusionConfig;
use crate::fusion::result::{ExplainedHit, FusedResultSet, RankedResultSet};
use crate::fusion::rrf::RankFusion;
use crate::retriever::provider::RankedResultProvider;

/// Default number of documents requested from each provider.
pub const DEFAULT_PROVIDER_TOP_K: usize = 10;

/// Queries several retrievers and fuses their rankings.
///
/// Providers run concurrently, but their lists reach the fusion core in the
/// order the providers were added, so results do not depend on which
/// retriever answers first.
pub struct HybridSearch {
    /// Retrievers in fusion order.
    providers: Vec<Box<dyn RankedResultProvider>>,
    /// Fusion core.
    fusion: RankFusion,
    /// Documents requested from each provider.
    provider_top_k: usize,
}

impl HybridSearch {
    /// Create a hybrid search with no providers.
    pub fn new(config: FusionConfig) -> Result<Self> {
        Ok(Self {
            providers: Vec::new(),
            fusion: RankFusion::new(config)?,
            provider_top_k: DEFAULT_PROVIDER_TOP_K,
        })
    }

    /// Add a provider, builder style.
    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: RankedResultProvider + 'static,
    {
        self.providers.push(Box::new(provider));
        self
    }

    /// Set how many documents each provider is asked for.
    pub fn with_provider_top_k(mut self, top_k: usize) -> Self {
        self.provider_top_k = top_k;
        self
    }

    /// Append a provider.
    pub fn add_provider(&mut self, provider: Box<dyn RankedResultProvider>) {
        self.providers.push(provider);
    }

    /// The registered providers in fusion order.
    pub fn providers(&self) -> &[Box<dyn RankedResultProvider>] {
        &self.providers
    }

    /// Ask every provider for its ranking of `query`.
    ///
    /// The first provider error aborts the whole retrieval.
    pub async fn retrieve_all(&self, query: &str) -> Result<Vec<RankedResultSet>> {
        let top_k = self.provider_top_k;
        try_join_all(self.providers.iter().map(|provider| async move {
            let start = Instant::now();
            let results = provider.retrieve(query, top_k).await.inspect_err(|e| {
                log::warn!("provider {} failed: {e}", provider.name());
            })?;
            log::debug!(
                "provider {} returned {} documents in {} ms",
                provider.name(),
                results.len(),
                start.elapsed().as_millis()
            );
            Ok::<_, RankFuseError>(results)
        }))
        .await
    }

    /// Retrieve from every provider and fuse the rankings.
    pub async fn search(&self, query: &str) -> Result<FusedResultSet> {
        let result_sets = self.retrieve_all(query).await?;
        self.fusion.combine(&result_sets)
    }

    /// Retrieve from every provider and return fused hits with their score
    /// terms.
    pub async fn explain(&self, query: &str) -> Result<Vec<ExplainedHit>> {
        let result_sets = self.retrieve_all(query).await?;
        self.fusion.explain(&result_sets)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::retriever::provider::StaticResultProvider;

    struct FailingProvider;

    #[async_trait]
    impl RankedResultProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn retrieve(&self, _query: &str, _top_k: usize) -> Result<RankedResultSet> {
            Err(RankFuseError::retriever("index not loaded"))
        }
    }

    #[tokio::test]
    async fn test_search_without_providers() {
        let search = HybridSearch::new(FusionConfig::default()).unwrap();
        assert!(search.providers().is_empty());
        assert!(search.search("q").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_fuses_in_provider_order() {
        let search = HybridSearch::new(FusionConfig::default())
            .unwrap()
            .with_provider(StaticResultProvider::new(
                "sparse",
                RankedResultSet::from_ids(["doc1", "doc2", "doc3"]),
            ))
            .with_provider(StaticResultProvider::new(
                "dense",
                RankedResultSet::from_ids(["doc2", "doc1", "doc4"]),
            ));

        let fused = search.search("q").await.unwrap();
        assert_eq!(fused.ids(), vec!["doc1", "doc2", "doc3"]);
        assert_eq!(search.providers()[1].name(), "dense");
    }

    #[tokio::test]
    async fn test_provider_top_k_limits_input() {
        let search = HybridSearch::new(FusionConfig::new().with_max_results(10))
            .unwrap()
            .with_provider_top_k(1)
            .with_provider(StaticResultProvider::new(
                "sparse",
                RankedResultSet::from_ids(["a", "b"]),
            ));

        let fused = search.search("q").await.unwrap();
        assert_eq!(fused.ids(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_provider_error_aborts() {
        let mut search = HybridSearch::new(FusionConfig::default())
            .unwrap()
            .with_provider(StaticResultProvider::new(
                "sparse",
                RankedResultSet::from_ids(["a"]),
            ));
        search.add_provider(Box::new(FailingProvider));

        let err = search.search("q").await.unwrap_err();
        assert!(matches!(err, RankFuseError::Retriever(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(HybridSearch::new(FusionConfig::new().with_fusion_constant(0.0)).is_err());
    }
}
