use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rankfuse::document::{DocumentRef, Node};
use rankfuse::error::RankFuseError;
use rankfuse::fusion::config::{FusionConfig, TieBreak};
use rankfuse::fusion::result::RankedResultSet;
use rankfuse::fusion::rrf::{RankFusion, combine};

/// Random ranked lists drawn from a small id pool so documents overlap.
fn random_sets(rng: &mut StdRng) -> Vec<RankedResultSet> {
    let num_sets = rng.random_range(0..5usize);
    (0..num_sets)
        .map(|_| {
            let len = rng.random_range(0..12usize);
            let mut seen = HashSet::new();
            let ids: Vec<String> = (0..len)
                .map(|_| format!("doc{}", rng.random_range(0..20u32)))
                .filter(|id| seen.insert(id.clone()))
                .collect();
            RankedResultSet::from_ids(ids)
        })
        .collect()
}

/// Straightforward reference scoring.
fn reference_scores(sets: &[RankedResultSet], k: f64) -> HashMap<String, f64> {
    let mut scores = HashMap::new();
    for set in sets {
        for (position, document) in set.iter().enumerate() {
            *scores.entry(document.id.clone()).or_insert(0.0) += 1.0 / (k + position as f64 + 1.0);
        }
    }
    scores
}

#[test]
fn test_two_retriever_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let sparse = RankedResultSet::from_ids(["doc1", "doc2", "doc3"]);
    let dense = RankedResultSet::from_ids(["doc2", "doc1", "doc4"]);

    let fused = combine(&[sparse, dense], 3, 60.0)?;

    assert_eq!(fused.ids(), vec!["doc1", "doc2", "doc3"]);
    let scores = fused.scores();
    assert!((scores[0] - (1.0 / 61.0 + 1.0 / 62.0)).abs() < 1e-12);
    assert_eq!(scores[0], scores[1]);
    assert!((scores[2] - 1.0 / 63.0).abs() < 1e-12);

    let result = fused.into_query_result();
    assert_eq!(result.nodes.len(), 3);
    assert_eq!(result.similarities.len(), 3);
    assert_eq!(result.ids.len(), 3);
    Ok(())
}

#[test]
fn test_deterministic_output() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let sets = random_sets(&mut rng);
        let first = combine(&sets, 10, 60.0).unwrap();
        let second = combine(&sets, 10, 60.0).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_no_duplicates_and_top_selection() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let sets = random_sets(&mut rng);
        let max_results = rng.random_range(0..15usize);
        let k = rng.random_range(1.0..100.0f64);

        let fused = combine(&sets, max_results, k).unwrap();
        let reference = reference_scores(&sets, k);

        let ids: Vec<&str> = fused.ids();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate id in {ids:?}");
        assert_eq!(fused.len(), max_results.min(reference.len()));

        for hit in fused.iter() {
            let expected = reference[&hit.document.id];
            assert!((hit.score - expected).abs() < 1e-12);
        }

        // Scores are non-increasing and nothing left out beats the last kept hit.
        for pair in fused.scores().windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        if let Some(last) = fused.hits.last() {
            for (id, score) in &reference {
                if !unique.contains(id.as_str()) {
                    assert!(*score <= last.score + 1e-12);
                }
            }
        }
    }
}

#[test]
fn test_single_list_keeps_order() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let mut sets = random_sets(&mut rng);
        sets.truncate(1);
        let Some(list) = sets.first() else {
            continue;
        };

        let fused = combine(&sets, list.len(), 60.0).unwrap();
        let expected: Vec<&str> = list.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(fused.ids(), expected);
        for (position, score) in fused.scores().into_iter().enumerate() {
            assert!((score - 1.0 / (60.0 + position as f64 + 1.0)).abs() < 1e-12);
        }
    }
}

#[test]
fn test_larger_constant_compresses_scores() {
    let a = RankedResultSet::from_ids(["top", "x1", "x2", "x3", "x4", "bottom"]);
    let b = RankedResultSet::from_ids(["y1", "top", "y2", "y3", "y4", "y5", "bottom"]);
    let sets = [a, b];

    let spread = |k: f64| {
        let fused = combine(&sets, 20, k).unwrap();
        let score = |id: &str| {
            fused
                .iter()
                .find(|hit| hit.document.id == id)
                .map(|hit| hit.score)
                .unwrap()
        };
        // top: positions 0 and 1, bottom: positions 5 and 6
        let top = score("top");
        assert!((top - (1.0 / (k + 1.0) + 1.0 / (k + 2.0))).abs() < 1e-12);
        top / score("bottom")
    };

    let small = spread(1.0);
    let default = spread(60.0);
    let large = spread(1000.0);
    assert!(small > default);
    assert!(default > large);
    assert!(large > 1.0);
}

#[test]
fn test_tie_break_rules() {
    let a = RankedResultSet::from_ids(["m", "b"]);
    let b = RankedResultSet::from_ids(["b", "m", "a"]);
    let c = RankedResultSet::from_ids(["z"]);

    let first = RankFusion::new(FusionConfig::new().with_max_results(10)).unwrap();
    let fused = first.combine(&[a.clone(), b.clone(), c.clone()]).unwrap();
    // m and b tie at 1/61 + 1/62; z (1/61) beats a (1/63).
    assert_eq!(fused.ids(), vec!["m", "b", "z", "a"]);

    let by_id = RankFusion::new(
        FusionConfig::new()
            .with_max_results(10)
            .with_tie_break(TieBreak::DocumentId),
    )
    .unwrap();
    let fused = by_id.combine(&[a, b, c]).unwrap();
    assert_eq!(fused.ids(), vec!["b", "m", "z", "a"]);
}

#[test]
fn test_boundaries() {
    assert!(combine(&[], 3, 60.0).unwrap().is_empty());
    assert!(
        combine(&[RankedResultSet::from_ids(["a", "b"])], 0, 60.0)
            .unwrap()
            .is_empty()
    );
    assert!(matches!(
        combine(&[RankedResultSet::from_ids(["a"])], 3, 0.0),
        Err(RankFuseError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        FusionConfig::from_signed(-1, 60.0),
        Err(RankFuseError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_malformed_document_aborts() {
    let sets = [RankedResultSet::new(vec![
        DocumentRef::new("ok", Node::new("fine")),
        DocumentRef::new("", Node::new("no id")),
    ])];
    assert!(matches!(
        combine(&sets, 3, 60.0),
        Err(RankFuseError::MalformedInput(_))
    ));
}

#[test]
fn test_payload_is_not_part_of_score() {
    let plain = [
        RankedResultSet::from_ids(["a", "b"]),
        RankedResultSet::from_ids(["b"]),
    ];
    let rich = [
        RankedResultSet::new(vec![
            DocumentRef::new("a", Node::new("a much longer body").with_metadata("lang", "en")),
            DocumentRef::new("b", Node::new("b")).with_similarity(0.01),
        ]),
        RankedResultSet::new(vec![DocumentRef::new("b", Node::new("other b")).with_similarity(9.0)]),
    ];

    let plain = combine(&plain, 5, 60.0).unwrap();
    let rich = combine(&rich, 5, 60.0).unwrap();
    assert_eq!(plain.ids(), rich.ids());
    assert_eq!(plain.scores(), rich.scores());
    assert_eq!(rich.hits[0].document.node.text, "b");
}
