//! # DietTree Core
//!
//! Core graph library for DietTree.
//!
//! This crate provides the bipartite graph that links items to the discretized
//! buckets of their attributes:
//!
//! - [`KindSet`] - The closed set of vertex kinds a graph accepts
//! - [`Vertex`] - An item or category vertex with weighted adjacency
//! - [`WeightedGraph`] - Owner of all vertices, with symmetric edges
//!
//! ## Example
//!
//! ```rust
//! use diettree_core::{KindSet, WeightedGraph};
//!
//! let kinds = KindSet::new().with_item("food").with_category("Calories");
//! let mut graph = WeightedGraph::new(kinds);
//!
//! graph.add_vertex("Big Mac", "food").unwrap();
//! graph.add_vertex("Calories_500", "Calories").unwrap();
//! graph.add_edge("Big Mac", "Calories_500").unwrap();
//!
//! assert_eq!(graph.get_weight("Calories_500", "Big Mac").unwrap(), 1.0);
//! assert_eq!(graph.get_vertex("Big Mac").unwrap().degree(), 1);
//! ```

pub mod error;
pub mod kind;
pub mod vertex;
pub mod graph;

pub use error::{Error, Result};
pub use kind::{KindRole, KindSet, VertexKind};
pub use vertex::Vertex;
pub use graph::{WeightedGraph, UNIT_WEIGHT};
