//! # DietTree Builder
//!
//! Turns tabular records into a DietTree graph.
//!
//! **How it works:**
//! 1. Rows are read from CSV into [`Record`]s
//! 2. Each declared attribute is parsed (units, `NA`, `<1` markers) and
//!    rounded to its bucket increment
//! 3. Every item is linked to one `"<attribute>_<bucket>"` category vertex per
//!    usable attribute
//! 4. The original rows are kept in a side table for display
//!
//! ## Example
//!
//! ```rust
//! use diettree_builder::{BuildConfig, Catalog, Record};
//!
//! let records = vec![
//!     Record::from_pairs([("Item", "Big Mac"), ("Category", "Food"), ("Calories", "540")]),
//!     Record::from_pairs([("Item", "Mystery"), ("Category", "Food"), ("Calories", "NA")]),
//! ];
//! let catalog = Catalog::build(records, &BuildConfig::default()).unwrap();
//!
//! assert!(catalog.graph().adjacent("Big Mac", "Calories_500"));
//! assert!(catalog.graph().get_vertex("Mystery").is_none());
//! ```

pub mod error;
pub mod value;
pub mod config;
pub mod record;
pub mod builder;
pub mod search;

pub use error::{BuildError, Result};
pub use value::{bucketize, category_key, parse_value};
pub use config::BuildConfig;
pub use record::{load_records, read_records, require_any_column, require_columns, Record};
pub use builder::{BuildStats, Catalog, SideTable};
pub use search::{index_records, search, SearchQuery};
