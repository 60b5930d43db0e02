//! Ranked inputs and fused outputs.

use serde::{Deserialize, Serialize};

use crate::document::{DocumentRef, Node, QueryResult};
use crate::error::Result;

/// An ordered list of document references as produced by one retriever.
///
/// Rank is the position in the list; retriever scores are carried along in
/// [`DocumentRef::similarity`] but never consulted by fusion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResultSet {
    documents: Vec<DocumentRef>,
}

/// Accepted JSON shapes for a ranked result set.
#[derive(Deserialize)]
#[serde(untagged)]
enum RankedResultSetWire {
    Documents(Vec<DocumentRef>),
    Query(QueryResult),
}

impl RankedResultSet {
    /// Create a result set from documents in rank order.
    pub fn new(documents: Vec<DocumentRef>) -> Self {
        Self { documents }
    }

    /// Create a result set of bare identifiers with empty payloads.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: ids
                .into_iter()
                .map(|id| DocumentRef::new(id, Node::default()))
                .collect(),
        }
    }

    /// Parse either a JSON array of documents or a JSON query result object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<RankedResultSetWire>(json)? {
            RankedResultSetWire::Documents(documents) => Ok(Self::new(documents)),
            RankedResultSetWire::Query(result) => Self::try_from(result),
        }
    }

    /// Documents in rank order.
    pub fn documents(&self) -> &[DocumentRef] {
        &self.documents
    }

    /// Iterate over documents in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRef> {
        self.documents.iter()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Keep only the first `len` documents.
    pub fn truncate(&mut self, len: usize) {
        self.documents.truncate(len);
    }

    /// Consume the set, returning its documents.
    pub fn into_documents(self) -> Vec<DocumentRef> {
        self.documents
    }
}

impl From<Vec<DocumentRef>> for RankedResultSet {
    fn from(documents: Vec<DocumentRef>) -> Self {
        Self::new(documents)
    }
}

impl TryFrom<QueryResult> for RankedResultSet {
    type Error = crate::error::RankFuseError;

    fn try_from(result: QueryResult) -> Result<Self> {
        Ok(Self::new(result.into_documents()?))
    }
}

impl<'a> IntoIterator for &'a RankedResultSet {
    type Item = &'a DocumentRef;
    type IntoIter = std::slice::Iter<'a, DocumentRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// One document of the fused ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedHit {
    /// The document, as first seen across the inputs.
    pub document: DocumentRef,
    /// Fused RRF score.
    pub score: f64,
}

/// A single RRF term: where a document appeared and what it added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Index of the input result set.
    pub set_index: usize,
    /// 0-based position within that set.
    pub position: usize,
    /// `1 / (k + position + 1)`.
    pub value: f64,
}

/// A fused hit together with the terms its score was summed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedHit {
    /// The fused hit.
    pub hit: FusedHit,
    /// Contributions in input order.
    pub contributions: Vec<Contribution>,
}

/// Fused ranking, best first, at most `max_results` long.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FusedResultSet {
    /// Hits ordered by descending score.
    pub hits: Vec<FusedHit>,
}

impl FusedResultSet {
    /// Create a fused result set from already ordered hits.
    pub fn new(hits: Vec<FusedHit>) -> Self {
        Self { hits }
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether no document survived fusion.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Iterate over hits, best first.
    pub fn iter(&self) -> std::slice::Iter<'_, FusedHit> {
        self.hits.iter()
    }

    /// Payloads in fused order.
    pub fn nodes(&self) -> Vec<&Node> {
        self.hits.iter().map(|hit| &hit.document.node).collect()
    }

    /// Fused scores in fused order.
    pub fn scores(&self) -> Vec<f64> {
        self.hits.iter().map(|hit| hit.score).collect()
    }

    /// Identifiers in fused order.
    pub fn ids(&self) -> Vec<&str> {
        self.hits.iter().map(|hit| hit.document.id.as_str()).collect()
    }

    /// Split into the three parallel sequences callers expect from a
    /// retriever, with fused scores in place of similarities.
    pub fn into_query_result(self) -> QueryResult {
        let mut result = QueryResult {
            nodes: Vec::with_capacity(self.hits.len()),
            similarities: Vec::with_capacity(self.hits.len()),
            ids: Vec::with_capacity(self.hits.len()),
        };
        for hit in self.hits {
            result.similarities.push(hit.score);
            result.ids.push(hit.document.id);
            result.nodes.push(hit.document.node);
        }
        result
    }
}

impl<'a> IntoIterator for &'a FusedResultSet {
    type Item = &'a FusedHit;
    type IntoIter = std::slice::Iter<'a, FusedHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}
