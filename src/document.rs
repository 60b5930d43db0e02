//! Document references exchanged between retrievers and the fusion core.
//!
//! A [`DocumentRef`] is what a retriever hands back for one hit: an opaque
//! identifier, the node payload, and optionally the retriever's own
//! similarity. Fusion only ever looks at the identifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RankFuseError, Result};

/// Content of a retrieved document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Text content.
    #[serde(default)]
    pub text: String,
    /// Free-form metadata attached by the indexer.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Node {
    /// Create a node holding the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A reference to one retrieved document.
///
/// Two references with the same `id` denote the same logical document, no
/// matter which retriever produced them.
///
/// # Examples
///
/// ```
/// use rankfuse::document::{DocumentRef, Node};
///
/// let doc = DocumentRef::new("doc-1", Node::new("rust ownership"))
///     .with_similarity(0.82);
/// assert_eq!(doc.id, "doc-1");
/// assert!(doc.has_id());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Document identifier. Empty means missing.
    #[serde(default)]
    pub id: String,
    /// Document payload.
    #[serde(default)]
    pub node: Node,
    /// Similarity reported by the producing retriever, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl DocumentRef {
    /// Create a new document reference without similarity metadata.
    pub fn new(id: impl Into<String>, node: Node) -> Self {
        Self {
            id: id.into(),
            node,
            similarity: None,
        }
    }

    /// Set the retriever similarity.
    pub fn with_similarity(mut self, similarity: f64) -> Self {
        self.similarity = Some(similarity);
        self
    }

    /// Whether the reference carries a usable identifier.
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// Raw answer of a retriever as three parallel sequences.
///
/// This is also the shape fused output is handed back in: `similarities`
/// then holds the fused scores at full precision.
///
/// When deserializing, `nodes` and `ids` are required and unknown keys are
/// rejected, so a stray object never reads as an empty result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryResult {
    /// Retrieved payloads, best first.
    pub nodes: Vec<Node>,
    /// Scores aligned with `nodes`. May be empty.
    #[serde(default)]
    pub similarities: Vec<f64>,
    /// Identifiers aligned with `nodes`.
    pub ids: Vec<String>,
}

impl QueryResult {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the result holds no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Zip the parallel sequences into document references.
    ///
    /// `nodes` and `ids` must have equal length; `similarities` must either be
    /// empty or match them too.
    pub fn into_documents(self) -> Result<Vec<DocumentRef>> {
        if self.nodes.len() != self.ids.len() {
            return Err(RankFuseError::malformed(format!(
                "query result has {} nodes but {} ids",
                self.nodes.len(),
                self.ids.len()
            )));
        }
        if !self.similarities.is_empty() && self.similarities.len() != self.nodes.len() {
            return Err(RankFuseError::malformed(format!(
                "query result has {} nodes but {} similarities",
                self.nodes.len(),
                self.similarities.len()
            )));
        }

        let mut similarities = self.similarities.into_iter();
        Ok(self
            .ids
            .into_iter()
            .zip(self.nodes)
            .map(|(id, node)| DocumentRef {
                id,
                node,
                similarity: similarities.next(),
            })
            .collect())
    }
}
