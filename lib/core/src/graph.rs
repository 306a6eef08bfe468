//! Weighted item/category graph
//!
//! The graph owns every vertex and is the only way to mutate adjacency, which
//! keeps edges symmetric and free of self-loops. It is filled once during a
//! load and only read afterwards.

use crate::{Error, KindSet, Result, Vertex};
use ahash::AHashMap;
use std::collections::BTreeSet;

/// Default edge weight used by [`WeightedGraph::add_edge`]
pub const UNIT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    kinds: KindSet,
    vertices: AHashMap<String, Vertex>,
}

impl WeightedGraph {
    /// Create an empty graph accepting only the kinds declared in `kinds`
    #[must_use]
    pub fn new(kinds: KindSet) -> Self {
        Self {
            kinds,
            vertices: AHashMap::new(),
        }
    }

    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }

    /// Add a vertex with no neighbours.
    ///
    /// Returns `Ok(false)` without touching the graph if `id` is already
    /// present. Fails only if `kind` is not declared.
    pub fn add_vertex(&mut self, id: impl Into<String>, kind: &str) -> Result<bool> {
        let id = id.into();
        if self.vertices.contains_key(&id) {
            return Ok(false);
        }
        let kind = self.kinds.resolve(kind)?;
        self.vertices.insert(id.clone(), Vertex::with_kind(id, kind));
        Ok(true)
    }

    /// Connect two existing vertices with the unit weight
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.add_weighted_edge(a, b, UNIT_WEIGHT)
    }

    /// Connect two existing vertices. Re-adding an edge overwrites its weight.
    pub fn add_weighted_edge(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        if a == b {
            return Err(Error::SelfLoop(a.to_string()));
        }
        if !(weight.is_finite() && weight > 0.0) {
            return Err(Error::InvalidWeight {
                from: a.to_string(),
                to: b.to_string(),
                weight,
            });
        }
        self.require(a)?;
        self.require(b)?;

        if let Some(v) = self.vertices.get_mut(a) {
            v.set_weight(b, weight);
        }
        if let Some(v) = self.vertices.get_mut(b) {
            v.set_weight(a, weight);
        }
        Ok(())
    }

    /// Weight of the edge between `a` and `b`, or `0.0` if they are not adjacent
    pub fn get_weight(&self, a: &str, b: &str) -> Result<f64> {
        let va = self.require(a)?;
        self.require(b)?;
        Ok(va.weight_to(b).unwrap_or(0.0))
    }

    /// Look up a vertex. The only lookup that tolerates an unknown id.
    #[inline]
    pub fn get_vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Ids of all vertices, optionally restricted to one kind
    pub fn get_all_vertices(&self, kind: Option<&str>) -> BTreeSet<&str> {
        self.vertices
            .values()
            .filter(|v| kind.map_or(true, |k| v.kind().name() == k))
            .map(Vertex::id)
            .collect()
    }

    /// Whether `a` and `b` are adjacent. Unknown ids are never adjacent.
    pub fn adjacent(&self, a: &str, b: &str) -> bool {
        self.vertices
            .get(a)
            .map_or(false, |v| v.is_adjacent(b))
    }

    pub fn get_neighbours(&self, id: &str) -> Result<BTreeSet<&str>> {
        Ok(self.require(id)?.neighbour_ids().collect())
    }

    /// Mean weight of the edges incident to `id`
    pub fn average_weight(&self, id: &str) -> Result<f64> {
        let v = self.require(id)?;
        if v.degree() == 0 {
            return Err(Error::IsolatedVertex(id.to_string()));
        }
        let total: f64 = v.neighbours().map(|(_, w)| w).sum();
        Ok(total / v.degree() as f64)
    }

    /// Iterate over all vertices in arbitrary order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// Iterate over vertices of a recommendable kind
    pub fn items(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values().filter(|v| v.is_recommendable())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::degree).sum::<usize>() / 2
    }

    /// Resolve `id` or fail with [`Error::VertexNotFound`]
    pub fn require(&self, id: &str) -> Result<&Vertex> {
        self.vertices
            .get(id)
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))
    }
}
