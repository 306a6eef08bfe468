//! # DietTree
//!
//! Item recommendations from structural similarity in a bipartite graph.
//!
//! Each item (a menu item, a book) is linked to the discretized buckets of its
//! attributes, such as a calorie range or a protein range. Two items are
//! similar when they share buckets.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! diettree recommend --data menu.csv --item "Big Mac" --limit 5 \
//!     --policy category-weighted --weight Calories=3 --weight "Protein (g)=2"
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use diettree::prelude::*;
//!
//! let records = vec![
//!     Record::from_pairs([("Item", "Big Mac"), ("Category", "Food"), ("Calories", "540"), ("Protein (g)", "25")]),
//!     Record::from_pairs([("Item", "Whopper"), ("Category", "Food"), ("Calories", "510"), ("Protein (g)", "21")]),
//!     Record::from_pairs([("Item", "Latte"), ("Category", "Drink"), ("Calories", "470"), ("Protein (g)", "9")]),
//! ];
//! let catalog = Catalog::build(records, &BuildConfig::default()).unwrap();
//!
//! let weighting = Weighting::uniform(["Calories"]).with("Protein (g)", 2.0);
//! let policy = ScorePolicy::CategoryWeighted(weighting);
//! let ids = Recommender::new(catalog.graph()).recommend("Big Mac", 5, &policy).unwrap();
//! assert_eq!(ids, vec!["Whopper", "Latte"]);
//! ```
//!
//! ## Crate Structure
//!
//! - `diettree-core` - Vertex kinds, vertices and the weighted graph
//! - `diettree-similarity` - Scoring policies, recommender and explanations
//! - `diettree-builder` - Value parsing, CSV loading, graph construction, search

// Re-export core types
pub use diettree_core::{
    Error, Result,
    KindRole, KindSet, VertexKind,
    Vertex, WeightedGraph,
};

// Re-export similarity
pub use diettree_similarity::{
    RankedItem, RecommendResponse, RecommendationStats, Recommender,
    ScorePolicy, ScoreType, Scorer, Similarity, Weighting,
};

// Re-export builder
pub use diettree_builder::{
    index_records, load_records, search, BuildConfig, BuildError, BuildStats, Catalog, Record,
    SearchQuery, SideTable,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Error, Result,
        KindSet, Vertex, WeightedGraph,
        Recommender, ScorePolicy, ScoreType, Scorer, Weighting,
        BuildConfig, Catalog, Record, SearchQuery,
    };
}
