//! Record search by name and nutrient window
//!
//! Finds records whose id contains a name fragment and whose attribute values
//! fall within a tolerance of the requested targets. A target of zero means
//! "don't care" for that attribute.

use crate::builder::SideTable;
use crate::record::Record;
use crate::value::parse_value;
use std::collections::{BTreeMap, HashMap};

/// Search criteria
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    name: Option<String>,
    targets: BTreeMap<String, f64>,
    tolerances: HashMap<String, f64>,
}

impl SearchQuery {
    /// Empty query with the menu nutrition tolerances
    pub fn new() -> Self {
        Self {
            tolerances: default_tolerances(),
            ..Self::default()
        }
    }

    /// Match ids containing `name`, case-insensitively
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into().trim().to_lowercase();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    #[must_use]
    pub fn with_target(mut self, attribute: impl Into<String>, value: f64) -> Self {
        self.targets.insert(attribute.into(), value);
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, attribute: impl Into<String>, tolerance: f64) -> Self {
        self.tolerances.insert(attribute.into(), tolerance.abs());
        self
    }

    /// Allowed distance from a target. Attributes without a tolerance must
    /// match exactly.
    pub fn tolerance(&self, attribute: &str) -> f64 {
        self.tolerances.get(attribute).copied().unwrap_or(0.0)
    }

    fn matches(&self, id: &str, record: &Record) -> bool {
        if let Some(name) = &self.name {
            if !id.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }
        self.targets
            .iter()
            .filter(|(_, target)| **target != 0.0)
            .all(|(attribute, target)| {
                let value = record.get(attribute).and_then(parse_value).unwrap_or(0.0);
                (value - target).abs() <= self.tolerance(attribute)
            })
    }
}

/// Window half-widths used by the menu search
pub fn default_tolerances() -> HashMap<String, f64> {
    HashMap::from([
        ("Calories".to_string(), 100.0),
        ("Protein (g)".to_string(), 5.0),
        ("Carbs (g)".to_string(), 10.0),
        ("Sugars (g)".to_string(), 5.0),
        ("Total Fat (g)".to_string(), 10.0),
    ])
}

/// Index raw records by `id_column`, keeping the first record for each id.
/// Records without an id are left out.
pub fn index_records<I>(records: I, id_column: &str) -> SideTable
where
    I: IntoIterator<Item = Record>,
{
    let mut table = SideTable::new();
    for record in records {
        let Some(id) = record.get(id_column).map(str::trim).filter(|id| !id.is_empty()) else {
            continue;
        };
        let id = id.to_string();
        table.entry(id).or_insert(record);
    }
    table
}

/// Records matching `query`, in id order
pub fn search<'a>(records: &'a SideTable, query: &SearchQuery) -> Vec<(&'a str, &'a Record)> {
    records
        .iter()
        .filter(|(id, record)| query.matches(id, record))
        .map(|(id, record)| (id.as_str(), record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SideTable {
        let rows = [
            ("Big Mac", "540", "25"),
            ("Double Big Mac", "740", "44"),
            ("McChicken", "400", "14"),
            ("Apple Slices", "15", "NA"),
        ];
        rows.iter()
            .map(|(item, calories, protein)| {
                (
                    item.to_string(),
                    Record::from_pairs([
                        ("Item", *item),
                        ("Calories", *calories),
                        ("Protein (g)", *protein),
                    ]),
                )
            })
            .collect()
    }

    fn ids<'a>(hits: &[(&'a str, &'a Record)]) -> Vec<&'a str> {
        hits.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn test_index_records_keeps_first() {
        let records = vec![
            Record::from_pairs([("Item", " Fries "), ("Calories", "320")]),
            Record::from_pairs([("Item", "Fries"), ("Calories", "480")]),
            Record::from_pairs([("Item", ""), ("Calories", "0")]),
        ];
        let table = index_records(records, "Item");
        assert_eq!(table.len(), 1);
        assert_eq!(table["Fries"].get("Calories"), Some("320"));
    }

    #[test]
    fn test_name_search_is_case_insensitive() {
        let table = table();
        let hits = search(&table, &SearchQuery::new().with_name("big mac"));
        assert_eq!(ids(&hits), vec!["Big Mac", "Double Big Mac"]);
    }

    #[test]
    fn test_empty_query_returns_everything_sorted() {
        let table = table();
        let hits = search(&table, &SearchQuery::new().with_name("  "));
        assert_eq!(
            ids(&hits),
            vec!["Apple Slices", "Big Mac", "Double Big Mac", "McChicken"]
        );
    }

    #[test]
    fn test_target_window() {
        let table = table();
        let query = SearchQuery::new().with_target("Calories", 500.0);
        assert_eq!(ids(&search(&table, &query)), vec!["Big Mac", "McChicken"]);

        let query = query.with_target("Protein (g)", 20.0);
        assert_eq!(ids(&search(&table, &query)), vec!["Big Mac"]);
    }

    #[test]
    fn test_zero_target_is_ignored() {
        let table = table();
        let query = SearchQuery::new().with_name("mac").with_target("Calories", 0.0);
        assert_eq!(search(&table, &query).len(), 2);
    }

    #[test]
    fn test_unparseable_value_counts_as_zero() {
        let table = table();
        let query = SearchQuery::new()
            .with_target("Protein (g)", 3.0)
            .with_tolerance("Protein (g)", 3.0);
        assert_eq!(ids(&search(&table, &query)), vec!["Apple Slices"]);
    }

    #[test]
    fn test_attribute_without_tolerance_matches_exactly() {
        let table = table();
        let query = SearchQuery::new().with_target("Sodium", 10.0);
        assert!(search(&table, &query).is_empty());
    }
}
