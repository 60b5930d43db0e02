//! Ranked result provider capability.

use std::fs;
use std::path::Path;

use async_trait::async_trait;

use crate::document::QueryResult;
use crate::error::Result;
use crate::fusion::result::RankedResultSet;

/// Anything that can answer a query with a ranked list of documents.
///
/// Implementations own their I/O; the fusion core never calls them itself.
/// The returned set's order is its ranking.
///
/// # Custom implementation
///
/// ```
/// use async_trait::async_trait;
/// use rankfuse::error::Result;
/// use rankfuse::fusion::result::RankedResultSet;
/// use rankfuse::retriever::provider::RankedResultProvider;
///
/// struct PrefixStore {
///     ids: Vec<String>,
/// }
///
/// #[async_trait]
/// impl RankedResultProvider for PrefixStore {
///     fn name(&self) -> &str {
///         "prefix"
///     }
///
///     async fn retrieve(&self, query: &str, top_k: usize) -> Result<RankedResultSet> {
///         Ok(RankedResultSet::from_ids(
///             self.ids.iter().filter(|id| id.starts_with(query)).take(top_k).cloned(),
///         ))
///     }
/// }
/// ```
#[async_trait]
pub trait RankedResultProvider: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Retrieve at most `top_k` documents for `query`, best first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<RankedResultSet>;
}

/// Provider that answers every query with the same pre-ranked list.
///
/// Useful for fusing results that were computed elsewhere, such as result
/// files handed to the command line tool.
#[derive(Debug, Clone)]
pub struct StaticResultProvider {
    name: String,
    results: RankedResultSet,
}

impl StaticResultProvider {
    /// Create a provider returning `results`.
    pub fn new(name: impl Into<String>, results: RankedResultSet) -> Self {
        Self {
            name: name.into(),
            results,
        }
    }

    /// Create a provider from a retriever's parallel-sequence answer.
    pub fn from_query_result(name: impl Into<String>, result: QueryResult) -> Result<Self> {
        Ok(Self::new(name, RankedResultSet::try_from(result)?))
    }

    /// Load the ranked list from a JSON file.
    ///
    /// The file holds either an array of document references or a query
    /// result object with parallel `nodes`, `similarities` and `ids`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let results = RankedResultSet::from_json_str(&content)?;
        log::debug!("loaded {} ranked documents from {}", results.len(), path.display());
        Ok(Self::new(path.display().to_string(), results))
    }

    /// The full ranked list.
    pub fn results(&self) -> &RankedResultSet {
        &self.results
    }
}

#[async_trait]
impl RankedResultProvider for StaticResultProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn retrieve(&self, _query: &str, top_k: usize) -> Result<RankedResultSet> {
        let mut results = self.results.clone();
        results.truncate(top_k);
        Ok(results)
    }
}
