//! Top-K recommendation
//!
//! Scores every recommendable vertex against a source item and keeps the best
//! `limit`, ordered by score and then by descending id.

use crate::score::{Scorer, Similarity};
use crate::weighting::ScorePolicy;
use diettree_core::{Error, Result, Vertex, WeightedGraph};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// A recommended item with its score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedItem {
    pub id: String,
    pub kind: String,
    pub score: f64,
    /// Per-kind contributions to `score`
    pub contributions: HashMap<String, f64>,
}

impl RankedItem {
    fn new(vertex: &Vertex, similarity: Similarity) -> Self {
        Self {
            id: vertex.id().to_string(),
            kind: vertex.kind().name().to_string(),
            score: similarity.score,
            contributions: similarity.contributions,
        }
    }
}

/// Ranking order: score descending, then id descending
fn rank_order(a: &RankedItem, b: &RankedItem) -> Ordering {
    OrderedFloat(b.score)
        .cmp(&OrderedFloat(a.score))
        .then_with(|| b.id.cmp(&a.id))
}

/// Produces recommendations from a built graph
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'g> {
    scorer: Scorer<'g>,
}

impl<'g> Recommender<'g> {
    pub fn new(graph: &'g WeightedGraph) -> Self {
        Self {
            scorer: Scorer::new(graph),
        }
    }

    pub fn scorer(&self) -> &Scorer<'g> {
        &self.scorer
    }

    /// Number of candidates a recommendation for any item considers
    pub fn candidate_count(&self) -> usize {
        self.scorer.graph().items().count().saturating_sub(1)
    }

    /// Ids of up to `limit` items most similar to `source`
    pub fn recommend(&self, source: &str, limit: usize, policy: &ScorePolicy) -> Result<Vec<String>> {
        Ok(self
            .rank(source, limit, policy)?
            .into_iter()
            .map(|item| item.id)
            .collect())
    }

    /// Score all candidates against `source` and return the best `limit`.
    ///
    /// Candidates are every recommendable vertex except `source`. Items
    /// scoring zero are dropped, so fewer than `limit` entries come back only
    /// when fewer candidates qualify.
    ///
    /// If scoring fails, the error reported is the one for the smallest
    /// failing candidate id.
    pub fn rank(&self, source: &str, limit: usize, policy: &ScorePolicy) -> Result<Vec<RankedItem>> {
        if limit == 0 {
            return Err(Error::InvalidLimit(limit));
        }
        policy.validate()?;
        let graph = self.scorer.graph();
        let src = graph.require(source)?;
        if !src.is_recommendable() {
            return Err(Error::NotRecommendable {
                id: source.to_string(),
                kind: src.kind().name().to_string(),
            });
        }

        let mut candidates: Vec<&Vertex> = graph.items().filter(|v| v.id() != source).collect();
        candidates.sort_unstable_by(|a, b| a.id().cmp(b.id()));

        // Indexed collect keeps candidate order, so the first error is stable
        let scored = candidates
            .par_iter()
            .map(|v| {
                self.scorer
                    .similarity(src, v, policy)
                    .map(|s| RankedItem::new(v, s))
            })
            .collect::<Vec<Result<RankedItem>>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let mut ranked: Vec<RankedItem> = scored.into_iter().filter(|r| r.score > 0.0).collect();
        let qualifying = ranked.len();

        if ranked.len() > limit {
            ranked.select_nth_unstable_by(limit - 1, rank_order);
            ranked.truncate(limit);
        }
        ranked.sort_unstable_by(rank_order);

        debug!(
            source,
            policy = %policy.score_type(),
            candidates = candidates.len(),
            qualifying,
            returned = ranked.len(),
            "ranked recommendations"
        );

        Ok(ranked)
    }
}
