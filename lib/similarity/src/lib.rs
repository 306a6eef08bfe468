//! # DietTree Similarity
//!
//! Similarity scoring and top-K recommendation over a DietTree graph.
//!
//! ## Features
//!
//! - **Three policies**: unweighted Jaccard, strict Jaccard (edge weights must
//!   match) and a category-weighted sum driven by a caller-supplied [`Weighting`]
//! - **Deterministic ranking**: score descending, ties broken by descending id
//! - **Explainability**: per-kind contribution breakdown for every result
//!
//! ## Example
//!
//! ```rust
//! use diettree_core::{KindSet, WeightedGraph};
//! use diettree_similarity::{Recommender, ScorePolicy, Weighting};
//!
//! let kinds = KindSet::new()
//!     .with_item("food")
//!     .with_category("calories")
//!     .with_category("protein");
//! let mut graph = WeightedGraph::new(kinds);
//! for item in ["A", "B", "C"] {
//!     graph.add_vertex(item, "food").unwrap();
//! }
//! graph.add_vertex("Calories_500", "calories").unwrap();
//! graph.add_vertex("Protein_20", "protein").unwrap();
//! for item in ["A", "B", "C"] {
//!     graph.add_edge(item, "Calories_500").unwrap();
//! }
//! graph.add_edge("A", "Protein_20").unwrap();
//! graph.add_edge("B", "Protein_20").unwrap();
//!
//! let weighting = Weighting::uniform(["calories"]).with("protein", 2.0);
//! let policy = ScorePolicy::CategoryWeighted(weighting);
//! let ids = Recommender::new(&graph).recommend("A", 2, &policy).unwrap();
//! assert_eq!(ids, vec!["B", "C"]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Weighting  │────>│   Scorer    │<────│    Graph    │
//! │ (per kind)  │     │ (pairwise)  │     │ (adjacency) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │ Recommender │
//!                     │   (top-K)   │
//!                     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │   Explain   │
//!                     │  (results)  │
//!                     └─────────────┘
//! ```

pub mod weighting;
pub mod score;
pub mod recommend;
pub mod explain;

// Re-export main types for convenience
pub use weighting::{ScorePolicy, ScoreType, Weighting};
pub use score::{Scorer, Similarity};
pub use recommend::{RankedItem, Recommender};
pub use explain::{RecommendResponse, RecommendationStats};
