use crate::{KindSet, Result, VertexKind};
use ahash::AHashMap;

/// A vertex in the item/category graph
///
/// Neighbours map the adjacent vertex id to the edge weight. Unweighted use
/// stores the unit weight, so one representation serves both cases.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: String,
    kind: VertexKind,
    neighbours: AHashMap<String, f64>,
}

impl Vertex {
    /// Create an isolated vertex. Fails if `kind` is not declared in `kinds`.
    pub fn new(id: impl Into<String>, kind: &str, kinds: &KindSet) -> Result<Self> {
        Ok(Self::with_kind(id.into(), kinds.resolve(kind)?))
    }

    #[inline]
    #[must_use]
    pub(crate) fn with_kind(id: String, kind: VertexKind) -> Self {
        Self {
            id,
            kind,
            neighbours: AHashMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn kind(&self) -> &VertexKind {
        &self.kind
    }

    #[inline]
    pub fn is_recommendable(&self) -> bool {
        self.kind.is_recommendable()
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Weight of the edge to `other`, if adjacent
    #[inline]
    pub fn weight_to(&self, other: &str) -> Option<f64> {
        self.neighbours.get(other).copied()
    }

    #[inline]
    pub fn is_adjacent(&self, other: &str) -> bool {
        self.neighbours.contains_key(other)
    }

    /// Iterate over `(neighbour id, weight)` pairs
    pub fn neighbours(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.neighbours.iter().map(|(id, w)| (id.as_str(), *w))
    }

    pub fn neighbour_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.neighbours.keys().map(String::as_str)
    }

    pub(crate) fn set_weight(&mut self, other: &str, weight: f64) {
        self.neighbours.insert(other.to_string(), weight);
    }
}
