//! Graph construction from records
//!
//! Each surviving record becomes an item vertex linked to one category vertex
//! per successfully bucketed attribute. The original records are kept in a
//! side table next to the graph so callers can render results.

use crate::config::BuildConfig;
use crate::error::Result;
use crate::record::{load_records, require_any_column, require_columns, Record};
use crate::value::{bucketize, category_key, parse_value};
use diettree_core::WeightedGraph;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Item id to the record it was built from
pub type SideTable = BTreeMap<String, Record>;

/// Counters describing one build
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BuildStats {
    pub records_seen: usize,
    pub items: usize,
    pub categories: usize,
    pub edges: usize,
    /// Records without an id
    pub missing_id: usize,
    /// Records whose kind is not a declared item kind
    pub skipped_kind: usize,
    /// Records with no parseable attribute
    pub unparseable: usize,
    /// Records repeating an id already in the graph
    pub duplicates: usize,
    /// Bucketed attributes that no record carries
    pub missing_attributes: Vec<String>,
}

/// A built graph together with its side table
#[derive(Debug, Clone)]
pub struct Catalog {
    graph: WeightedGraph,
    records: SideTable,
    stats: BuildStats,
}

impl Catalog {
    /// Load a CSV file and build a catalog from it.
    ///
    /// Fails before any graph exists if the file cannot be read, lacks the
    /// id or kind column, or carries none of the bucketed attributes.
    pub fn from_csv(path: impl AsRef<Path>, config: &BuildConfig) -> Result<Self> {
        let path = path.as_ref();
        let records = load_records(path)?;
        info!("Loaded {} records from {:?}", records.len(), path);
        require_columns(&records, &[config.id_column.as_str(), config.kind_column.as_str()])?;
        let attributes: Vec<&str> = config.increments.keys().map(String::as_str).collect();
        require_any_column(&records, &attributes)?;
        Self::build(records, config)
    }

    /// Build a catalog from in-memory records
    pub fn build<I>(records: I, config: &BuildConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        config.validate()?;

        let mut graph = WeightedGraph::new(config.kinds()?);
        let mut side_table = SideTable::new();
        let mut stats = BuildStats::default();
        let mut seen_attributes: BTreeSet<&str> = BTreeSet::new();

        for record in records {
            stats.records_seen += 1;
            seen_attributes.extend(
                config
                    .increments
                    .keys()
                    .map(String::as_str)
                    .filter(|a| record.get(a).is_some()),
            );

            let Some(id) = record
                .get(&config.id_column)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
            else {
                stats.missing_id += 1;
                continue;
            };

            let kind = record
                .get(&config.kind_column)
                .map(|k| k.trim().to_lowercase())
                .unwrap_or_default();
            if !config.is_item_kind(&kind) {
                debug!(item = %id, kind = %kind, "skipping record of undeclared kind");
                stats.skipped_kind += 1;
                continue;
            }

            let buckets: Vec<(&str, f64)> = config
                .increments
                .iter()
                .filter_map(|(attribute, increment)| {
                    let value = parse_value(record.get(attribute)?)?;
                    Some((attribute.as_str(), bucketize(value, *increment)))
                })
                .collect();
            if buckets.is_empty() {
                debug!(item = %id, "dropping record with no parseable attributes");
                stats.unparseable += 1;
                continue;
            }

            match graph.get_vertex(&id) {
                Some(existing) if !existing.is_recommendable() => {
                    warn!(item = %id, "item id collides with a category vertex, skipping");
                    stats.skipped_kind += 1;
                    continue;
                }
                Some(_) => stats.duplicates += 1,
                None => {
                    graph.add_vertex(id.clone(), &kind)?;
                }
            }

            for (attribute, bucket) in buckets {
                let key = category_key(attribute, bucket);
                if graph.get_vertex(&key).is_some_and(|v| v.is_recommendable()) {
                    warn!(item = %id, category = %key, "category key collides with an item, skipping");
                    continue;
                }
                graph.add_vertex(key.clone(), attribute)?;
                graph.add_weighted_edge(&id, &key, config.edge_weight(attribute))?;
            }

            side_table.entry(id).or_insert(record);
        }

        if stats.records_seen > 0 {
            stats.missing_attributes = config
                .increments
                .keys()
                .filter(|a| !seen_attributes.contains(a.as_str()))
                .cloned()
                .collect();
            for attribute in &stats.missing_attributes {
                warn!(attribute = %attribute, "no record has this attribute column");
            }
        }

        stats.items = graph.items().count();
        stats.categories = graph.len() - stats.items;
        stats.edges = graph.edge_count();

        info!(
            records = stats.records_seen,
            items = stats.items,
            categories = stats.categories,
            edges = stats.edges,
            dropped = stats.unparseable,
            "Graph built"
        );

        Ok(Self {
            graph,
            records: side_table,
            stats,
        })
    }

    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    /// Original record for an item
    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn records(&self) -> &SideTable {
        &self.records
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn into_parts(self) -> (WeightedGraph, SideTable) {
        (self.graph, self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::record::read_records;

    const MENU: &str = "\
Company,Item,Category,Calories,Protein (g),Sugars (g)
A,Big Mac,Food,540,25 g,9
A,Quarter Pounder,Food,520,26,10
B,Latte,Drink,190,13,<1
B,Mystery,Food,NA,n/a,
C,Salad Kit,Produce,100,2,1
,,Food,100,2,1
D,Cookie,Dessert,170,2,15
";

    fn config() -> BuildConfig {
        BuildConfig::new(BTreeMap::from([
            ("Calories".to_string(), 100.0),
            ("Protein (g)".to_string(), 10.0),
            ("Sugars (g)".to_string(), 5.0),
        ]))
    }

    fn catalog() -> Catalog {
        Catalog::build(read_records(MENU.as_bytes()).unwrap(), &config()).unwrap()
    }

    #[test]
    fn test_build_links_items_to_buckets() {
        let catalog = catalog();
        let g = catalog.graph();

        let mut neighbours: Vec<_> = g.get_neighbours("Big Mac").unwrap().into_iter().collect();
        neighbours.sort_unstable();
        assert_eq!(neighbours, vec!["Calories_500", "Protein (g)_20", "Sugars (g)_10"]);

        assert!(g.adjacent("Quarter Pounder", "Calories_500"));
        assert_eq!(g.get_vertex("Calories_500").unwrap().kind().name(), "Calories");
        assert_eq!(g.get_vertex("Latte").unwrap().kind().name(), "drink");
        assert!(g.adjacent("Latte", "Sugars (g)_0"));
    }

    #[test]
    fn test_unparseable_record_is_excluded() {
        let catalog = catalog();
        assert!(catalog.graph().get_vertex("Mystery").is_none());
        assert!(catalog.record("Mystery").is_none());
        assert_eq!(catalog.stats().unparseable, 1);
    }

    #[test]
    fn test_undeclared_kind_and_missing_id_skipped() {
        let catalog = catalog();
        assert!(catalog.graph().get_vertex("Salad Kit").is_none());
        assert_eq!(catalog.stats().skipped_kind, 1);
        assert_eq!(catalog.stats().missing_id, 1);
        assert_eq!(catalog.stats().records_seen, 7);
        assert_eq!(catalog.stats().items, 4);
    }

    #[test]
    fn test_side_table_keeps_original_values() {
        let catalog = catalog();
        let record = catalog.record("Big Mac").unwrap();
        assert_eq!(record.get("Protein (g)"), Some("25 g"));
        assert_eq!(record.get("Company"), Some("A"));
        assert_eq!(catalog.records().len(), 4);
    }

    #[test]
    fn test_edge_weights_from_config() {
        let config = config().with_edge_weight("Calories", 3.0);
        let catalog = Catalog::build(read_records(MENU.as_bytes()).unwrap(), &config).unwrap();
        let g = catalog.graph();
        assert_eq!(g.get_weight("Big Mac", "Calories_500").unwrap(), 3.0);
        assert_eq!(g.get_weight("Big Mac", "Protein (g)_20").unwrap(), 1.0);
    }

    #[test]
    fn test_partially_parseable_record_kept() {
        let records = vec![Record::from_pairs([
            ("Item", "Water"),
            ("Category", "drink"),
            ("Calories", "0"),
            ("Protein (g)", "NA"),
        ])];
        let catalog = Catalog::build(records, &config()).unwrap();
        let water = catalog.graph().get_vertex("Water").unwrap();
        assert_eq!(water.degree(), 1);
    }

    #[test]
    fn test_duplicate_item_keeps_first_record() {
        let records = vec![
            Record::from_pairs([("Item", "Fries"), ("Category", "food"), ("Calories", "320")]),
            Record::from_pairs([("Item", "Fries"), ("Category", "drink"), ("Calories", "480")]),
        ];
        let catalog = Catalog::build(records, &config()).unwrap();
        let g = catalog.graph();
        assert_eq!(g.get_vertex("Fries").unwrap().kind().name(), "food");
        assert_eq!(catalog.record("Fries").unwrap().get("Calories"), Some("320"));
        assert_eq!(catalog.stats().duplicates, 1);
        assert_eq!(g.get_vertex("Fries").unwrap().degree(), 2);
    }

    #[test]
    fn test_invalid_config_fails_before_building() {
        let config = BuildConfig::new(BTreeMap::new());
        let err = Catalog::build(Vec::new(), &config).unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }

    #[test]
    fn test_absent_attribute_is_reported() {
        let mut config = config();
        config.increments.insert("Calroies".to_string(), 100.0);

        let catalog = Catalog::build(read_records(MENU.as_bytes()).unwrap(), &config).unwrap();
        assert_eq!(catalog.stats().missing_attributes, vec!["Calroies"]);
        assert_eq!(catalog.stats().items, 4);
    }

    #[test]
    fn test_from_csv_rejects_misspelt_attributes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, MENU.as_bytes()).unwrap();
        let config = BuildConfig::new(BTreeMap::from([("Calroies".to_string(), 100.0)]));
        let err = Catalog::from_csv(file.path(), &config).unwrap_err();
        assert!(matches!(err, BuildError::MissingColumn { ref column, .. } if column == "Calroies"));
    }

    #[test]
    fn test_item_kind_clashing_with_attribute_is_rejected() {
        let config = BuildConfig {
            item_kinds: vec!["Calories".to_string(), "food".to_string()],
            ..BuildConfig::new(BTreeMap::from([("calories".to_string(), 100.0)]))
        };
        let records = vec![
            Record::from_pairs([("Item", "X"), ("Category", "Calories"), ("calories", "500")]),
            Record::from_pairs([("Item", "Y"), ("Category", "Calories"), ("calories", "510")]),
        ];
        let err = Catalog::build(records, &config).unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }

    #[test]
    fn test_from_csv_requires_id_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Name,Category,Calories\nFries,Food,320\n").unwrap();
        let err = Catalog::from_csv(file.path(), &config()).unwrap_err();
        assert!(matches!(err, BuildError::MissingColumn { .. }));
    }
}
