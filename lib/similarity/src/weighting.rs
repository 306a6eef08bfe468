//! Scoring policy and category weighting
//!
//! A [`Weighting`] maps a category kind (an attribute name such as
//! `"Calories"`) to the importance of agreeing on it. It is passed to the
//! scorer at call time and never stored on the graph.

use diettree_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Importance weight per category kind
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Weighting {
    weights: HashMap<String, f64>,
}

impl Weighting {
    pub fn new(weights: HashMap<String, f64>) -> Self {
        Self { weights }
    }

    /// Give every listed kind the same weight of 1
    pub fn uniform<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            weights: kinds.into_iter().map(|k| (k.into(), 1.0)).collect(),
        }
    }

    #[must_use]
    pub fn with(mut self, kind: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(kind.into(), weight);
        self
    }

    /// Validate the weighting
    /// - Must name at least one kind
    /// - Every weight must be positive and finite
    pub fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(Error::InvalidConfig("weighting cannot be empty".to_string()));
        }
        for (kind, weight) in &self.weights {
            if !(weight.is_finite() && *weight > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "weight for '{kind}' must be positive, got {weight}"
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, kind: &str) -> Option<f64> {
        self.weights.get(kind).copied()
    }

    /// Weight for `kind`, failing closed when it is not configured
    pub fn require(&self, kind: &str) -> Result<f64> {
        self.get(kind)
            .ok_or_else(|| Error::MissingWeight(kind.to_string()))
    }

    /// Return a copy with `overrides` applied on top.
    ///
    /// Unlike a schema, overrides may introduce kinds that were not present.
    pub fn with_overrides(&self, overrides: &HashMap<String, f64>) -> Weighting {
        let mut weights = self.weights.clone();
        weights.extend(overrides.iter().map(|(k, w)| (k.clone(), *w)));
        Weighting { weights }
    }

    /// Configured kinds in sorted order
    pub fn sorted_kinds(&self) -> Vec<&String> {
        let mut kinds: Vec<_> = self.weights.keys().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Name of a scoring policy, as accepted on the command line and in config
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreType {
    /// Jaccard index of the neighbour sets
    #[default]
    Unweighted,
    /// Jaccard index counting only shared neighbours with equal edge weights
    Strict,
    /// Sum of the importance of each shared neighbour's kind
    CategoryWeighted,
}

impl ScoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreType::Unweighted => "unweighted",
            ScoreType::Strict => "strict",
            ScoreType::CategoryWeighted => "category-weighted",
        }
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unweighted" => Ok(ScoreType::Unweighted),
            "strict" => Ok(ScoreType::Strict),
            "category-weighted" | "weighted" => Ok(ScoreType::CategoryWeighted),
            other => Err(Error::InvalidConfig(format!("unknown score type '{other}'"))),
        }
    }
}

/// A scoring policy together with whatever configuration it needs
#[derive(Debug, Clone, PartialEq)]
pub enum ScorePolicy {
    Unweighted,
    Strict,
    CategoryWeighted(Weighting),
}

impl ScorePolicy {
    /// Build a policy from its name. `weighting` is only used by
    /// [`ScoreType::CategoryWeighted`] and is validated there.
    pub fn from_type(score_type: ScoreType, weighting: Weighting) -> Result<Self> {
        match score_type {
            ScoreType::Unweighted => Ok(ScorePolicy::Unweighted),
            ScoreType::Strict => Ok(ScorePolicy::Strict),
            ScoreType::CategoryWeighted => {
                weighting.validate()?;
                Ok(ScorePolicy::CategoryWeighted(weighting))
            }
        }
    }

    /// Check the weighting of a category-weighted policy. The other policies
    /// carry no configuration and are always valid.
    pub fn validate(&self) -> Result<()> {
        match self {
            ScorePolicy::CategoryWeighted(weighting) => weighting.validate(),
            ScorePolicy::Unweighted | ScorePolicy::Strict => Ok(()),
        }
    }

    pub fn score_type(&self) -> ScoreType {
        match self {
            ScorePolicy::Unweighted => ScoreType::Unweighted,
            ScorePolicy::Strict => ScoreType::Strict,
            ScorePolicy::CategoryWeighted(_) => ScoreType::CategoryWeighted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_weighting() {
        let w = Weighting::uniform(["Calories", "Protein (g)"]);
        assert_eq!(w.len(), 2);
        assert_eq!(w.get("Calories"), Some(1.0));
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_require_missing_kind_fails_closed() {
        let w = Weighting::uniform(["Calories"]);
        assert_eq!(
            w.require("Sugars (g)"),
            Err(Error::MissingWeight("Sugars (g)".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_non_positive() {
        assert!(matches!(
            Weighting::default().validate(),
            Err(Error::InvalidConfig(_))
        ));
        let w = Weighting::uniform(["Calories"]).with("Protein (g)", 0.0);
        assert!(matches!(w.validate(), Err(Error::InvalidConfig(_))));
        let w = Weighting::uniform(["Calories"]).with("Protein (g)", -2.0);
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_overrides_replace_and_extend() {
        let base = Weighting::uniform(["Calories", "Protein (g)"]);
        let overrides = HashMap::from([
            ("Protein (g)".to_string(), 4.0),
            ("Sugars (g)".to_string(), 2.0),
        ]);
        let w = base.with_overrides(&overrides);
        assert_eq!(w.get("Calories"), Some(1.0));
        assert_eq!(w.get("Protein (g)"), Some(4.0));
        assert_eq!(w.get("Sugars (g)"), Some(2.0));
        assert_eq!(base.get("Protein (g)"), Some(1.0));
    }

    #[test]
    fn test_score_type_parsing() {
        assert_eq!("strict".parse::<ScoreType>().unwrap(), ScoreType::Strict);
        assert_eq!(
            "category-weighted".parse::<ScoreType>().unwrap(),
            ScoreType::CategoryWeighted
        );
        assert!("cosine".parse::<ScoreType>().is_err());
        assert_eq!(ScoreType::CategoryWeighted.to_string(), "category-weighted");
    }

    #[test]
    fn test_policy_from_type_validates_weighting() {
        let policy = ScorePolicy::from_type(ScoreType::Strict, Weighting::default()).unwrap();
        assert_eq!(policy, ScorePolicy::Strict);

        assert!(ScorePolicy::from_type(ScoreType::CategoryWeighted, Weighting::default()).is_err());

        let policy = ScorePolicy::from_type(
            ScoreType::CategoryWeighted,
            Weighting::uniform(["Calories"]),
        )
        .unwrap();
        assert_eq!(policy.score_type(), ScoreType::CategoryWeighted);
    }

    #[test]
    fn test_weighting_serde_is_plain_map() {
        let w: Weighting = serde_json::from_str(r#"{"Calories": 10, "Fat": 2.5}"#).unwrap();
        assert_eq!(w.get("Calories"), Some(10.0));
        assert_eq!(w.get("Fat"), Some(2.5));
    }
}
