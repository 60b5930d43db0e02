//! Stateless Reciprocal Rank Fusion combiner.

use std::cmp::Ordering;

use ahash::AHashMap;

use crate::document::DocumentRef;
use crate::error::{RankFuseError, Result};
use crate::fusion::config::{FusionConfig, TieBreak};
use crate::fusion::result::{
    Contribution, ExplainedHit, FusedHit, FusedResultSet, RankedResultSet,
};

/// Merges ranked result sets with Reciprocal Rank Fusion.
///
/// The combiner only holds its validated configuration, so one instance can
/// be shared freely between threads and reused across calls.
///
/// # Examples
///
/// ```
/// use rankfuse::fusion::config::FusionConfig;
/// use rankfuse::fusion::result::RankedResultSet;
/// use rankfuse::fusion::rrf::RankFusion;
///
/// # fn main() -> rankfuse::error::Result<()> {
/// let fusion = RankFusion::new(FusionConfig::new().with_max_results(2))?;
///
/// let fused = fusion.combine(&[
///     RankedResultSet::from_ids(["a", "b", "c"]),
///     RankedResultSet::from_ids(["c", "b"]),
/// ])?;
/// assert_eq!(fused.ids(), vec!["b", "c"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RankFusion {
    config: FusionConfig,
}

/// Accumulated state for one distinct document.
struct Slot<'a> {
    document: &'a DocumentRef,
    score: f64,
    first_seen: usize,
    last_set: Option<usize>,
    contributions: Vec<Contribution>,
}

impl<'a> Slot<'a> {
    fn new(document: &'a DocumentRef, first_seen: usize) -> Self {
        Self {
            document,
            score: 0.0,
            first_seen,
            last_set: None,
            contributions: Vec::new(),
        }
    }

    /// Add one term to the score. Returns `true` if the document already
    /// scored in the same set.
    fn accumulate(&mut self, contribution: Contribution, record: bool) -> bool {
        let repeated = self.last_set == Some(contribution.set_index);
        self.score += contribution.value;
        self.last_set = Some(contribution.set_index);
        if record {
            self.contributions.push(contribution);
        }
        repeated
    }
}

impl RankFusion {
    /// Create a combiner, rejecting an invalid configuration.
    pub fn new(config: FusionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Fuse the given result sets into one ranking.
    ///
    /// An empty slice yields an empty result. A document missing its id
    /// aborts the whole call with [`RankFuseError::MalformedInput`].
    pub fn combine(&self, result_sets: &[RankedResultSet]) -> Result<FusedResultSet> {
        let hits = self
            .rank(result_sets, false)?
            .into_iter()
            .map(|(hit, _)| hit)
            .collect();
        Ok(FusedResultSet::new(hits))
    }

    /// Like [`combine`](Self::combine) but keeps the per-set terms of every
    /// score.
    pub fn explain(&self, result_sets: &[RankedResultSet]) -> Result<Vec<ExplainedHit>> {
        Ok(self
            .rank(result_sets, true)?
            .into_iter()
            .map(|(hit, contributions)| ExplainedHit { hit, contributions })
            .collect())
    }

    fn rank(
        &self,
        result_sets: &[RankedResultSet],
        record: bool,
    ) -> Result<Vec<(FusedHit, Vec<Contribution>)>> {
        if self.config.max_results == 0 || result_sets.is_empty() {
            return Ok(Vec::new());
        }

        let k = self.config.fusion_constant;
        let mut index: AHashMap<&str, usize> = AHashMap::new();
        let mut slots: Vec<Slot<'_>> = Vec::new();

        for (set_index, set) in result_sets.iter().enumerate() {
            for (position, document) in set.iter().enumerate() {
                if !document.has_id() {
                    return Err(RankFuseError::malformed(format!(
                        "document at position {position} of result set {set_index} has no id"
                    )));
                }

                let value = 1.0 / (k + position as f64 + 1.0);
                let slot_index = *index.entry(document.id.as_str()).or_insert_with(|| {
                    let first_seen = slots.len();
                    slots.push(Slot::new(document, first_seen));
                    first_seen
                });

                let contribution = Contribution {
                    set_index,
                    position,
                    value,
                };
                if slots[slot_index].accumulate(contribution, record) {
                    log::warn!(
                        "document {} appears more than once in result set {set_index}",
                        document.id
                    );
                }
                log::trace!("{} += {value} (set {set_index}, position {position})", document.id);
            }
        }

        let distinct = slots.len();
        let tie_break = self.config.tie_break;
        slots.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| match tie_break {
                    TieBreak::FirstOccurrence => Ordering::Equal,
                    TieBreak::DocumentId => a.document.id.cmp(&b.document.id),
                })
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        slots.truncate(self.config.max_results);

        log::debug!(
            "fused {} result sets: {distinct} distinct documents, returning {}",
            result_sets.len(),
            slots.len()
        );

        Ok(slots
            .into_iter()
            .map(|slot| {
                let hit = FusedHit {
                    document: slot.document.clone(),
                    score: slot.score,
                };
                (hit, slot.contributions)
            })
            .collect())
    }
}

/// Fuse `result_sets` with RRF constant `fusion_constant`, keeping at most
/// `max_results` documents. Ties go to the earliest first occurrence.
pub fn combine(
    result_sets: &[RankedResultSet],
    max_results: usize,
    fusion_constant: f64,
) -> Result<FusedResultSet> {
    let config = FusionConfig::new()
        .with_max_results(max_results)
        .with_fusion_constant(fusion_constant);
    RankFusion::new(config)?.combine(result_sets)
}
