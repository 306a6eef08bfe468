//! Similarity between two vertices
//!
//! All policies compare neighbour sets, so they are symmetric and return
//! `0.0` whenever either vertex is isolated.

use crate::weighting::{ScorePolicy, Weighting};
use diettree_core::{Result, Vertex, WeightedGraph};
use std::collections::{BTreeMap, HashMap};

/// A similarity score with its per-kind breakdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Similarity {
    /// Overall score
    pub score: f64,
    /// Contribution of each shared category kind to the score
    pub contributions: HashMap<String, f64>,
}

/// Shared neighbour counts keyed by the neighbour's kind
#[derive(Debug, Default)]
struct Overlap {
    union: usize,
    shared: BTreeMap<String, usize>,
}

impl Overlap {
    fn total(&self) -> usize {
        self.shared.values().sum()
    }
}

/// Count shared neighbours of `a` and `b`, grouped by kind.
///
/// With `exact_weights` only neighbours reached with the same edge weight
/// from both sides count as shared. The union is always the full union.
fn overlap(graph: &WeightedGraph, a: &Vertex, b: &Vertex, exact_weights: bool) -> Overlap {
    let (small, large) = if a.degree() <= b.degree() { (a, b) } else { (b, a) };

    let mut intersection = 0;
    let mut shared: BTreeMap<String, usize> = BTreeMap::new();
    for (id, weight) in small.neighbours() {
        let Some(other) = large.weight_to(id) else {
            continue;
        };
        intersection += 1;
        if exact_weights && other != weight {
            continue;
        }
        let kind = graph
            .get_vertex(id)
            .map(|v| v.kind().name().to_string())
            .unwrap_or_default();
        *shared.entry(kind).or_default() += 1;
    }

    Overlap {
        union: a.degree() + b.degree() - intersection,
        shared,
    }
}

fn jaccard(overlap: &Overlap) -> Similarity {
    if overlap.union == 0 {
        return Similarity::default();
    }
    let union = overlap.union as f64;
    Similarity {
        score: overlap.total() as f64 / union,
        contributions: overlap
            .shared
            .iter()
            .map(|(kind, n)| (kind.clone(), *n as f64 / union))
            .collect(),
    }
}

fn weighted_sum(overlap: &Overlap, weighting: &Weighting) -> Result<Similarity> {
    let mut score = 0.0;
    let mut contributions = HashMap::with_capacity(overlap.shared.len());
    // BTreeMap order keeps the float sum identical for (a, b) and (b, a)
    for (kind, n) in &overlap.shared {
        let contribution = *n as f64 * weighting.require(kind)?;
        score += contribution;
        contributions.insert(kind.clone(), contribution);
    }
    Ok(Similarity { score, contributions })
}

/// Scores pairs of vertices of one graph
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'g> {
    graph: &'g WeightedGraph,
}

impl<'g> Scorer<'g> {
    pub fn new(graph: &'g WeightedGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g WeightedGraph {
        self.graph
    }

    /// Score two vertices by id. Fails if either id is unknown, if the
    /// weighting is invalid, or if a category-weighted policy lacks a weight
    /// for a shared kind.
    pub fn score(&self, a: &str, b: &str, policy: &ScorePolicy) -> Result<f64> {
        Ok(self.explain(a, b, policy)?.score)
    }

    /// Like [`Scorer::score`] but keeps the per-kind breakdown. Rejects a
    /// weighting with non-positive or non-finite weights.
    pub fn explain(&self, a: &str, b: &str, policy: &ScorePolicy) -> Result<Similarity> {
        policy.validate()?;
        let va = self.graph.require(a)?;
        let vb = self.graph.require(b)?;
        self.similarity(va, vb, policy)
    }

    /// Score two resolved vertices. The weighting is not validated here;
    /// callers go through [`Scorer::explain`] or validate the policy once.
    pub fn similarity(&self, a: &Vertex, b: &Vertex, policy: &ScorePolicy) -> Result<Similarity> {
        match policy {
            ScorePolicy::Unweighted => Ok(jaccard(&overlap(self.graph, a, b, false))),
            ScorePolicy::Strict => Ok(jaccard(&overlap(self.graph, a, b, true))),
            ScorePolicy::CategoryWeighted(weighting) => {
                weighted_sum(&overlap(self.graph, a, b, false), weighting)
            }
        }
    }
}
