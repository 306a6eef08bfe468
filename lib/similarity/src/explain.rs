//! Explainability for recommendation results
//!
//! Summarizes a ranking so callers can show how the scores came about.

use crate::recommend::RankedItem;
use crate::weighting::ScoreType;
use serde::Serialize;

/// Response structure for a recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    /// Item the recommendations are for
    pub source: String,
    /// Policy used for scoring
    pub policy: ScoreType,
    /// Ranked items with per-kind explanations
    pub result: Vec<RankedItem>,
    pub stats: RecommendationStats,
}

impl RecommendResponse {
    pub fn new(
        source: impl Into<String>,
        policy: ScoreType,
        result: Vec<RankedItem>,
        candidates_count: usize,
    ) -> Self {
        let stats = RecommendationStats::compute(&result, candidates_count);
        Self {
            source: source.into(),
            policy,
            result,
            stats,
        }
    }
}

/// Summary statistics for a recommendation query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Average score of results
    pub avg_score: f64,
    /// Score of best result
    pub best_score: f64,
    /// Category kind that contributed most to the best result
    pub top_contributing_kind: Option<String>,
}

impl RecommendationStats {
    /// Compute stats from ranked results, which must already be sorted
    pub fn compute(results: &[RankedItem], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_kind: None,
            };
        };

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

        // Ties go to the alphabetically first kind
        let top_contributing_kind = best
            .contributions
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(kind, _)| kind.clone());

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score,
            best_score: best.score,
            top_contributing_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ranked(id: &str, score: f64) -> RankedItem {
        RankedItem {
            id: id.to_string(),
            kind: "food".to_string(),
            score,
            contributions: HashMap::from([
                ("Calories".to_string(), score * 0.5),
                ("Protein (g)".to_string(), score * 0.3),
                ("Sugars (g)".to_string(), score * 0.2),
            ]),
        }
    }

    #[test]
    fn test_recommendation_stats() {
        let results = vec![ranked("1", 6.0), ranked("2", 4.0), ranked("3", 2.0)];
        let stats = RecommendationStats::compute(&results, 10);

        assert_eq!(stats.candidates_count, 10);
        assert_eq!(stats.results_count, 3);
        assert_eq!(stats.best_score, 6.0);
        assert!((stats.avg_score - 4.0).abs() < 1e-9);
        assert_eq!(stats.top_contributing_kind, Some("Calories".to_string()));
    }

    #[test]
    fn test_top_kind_tie_is_deterministic() {
        let mut item = ranked("1", 2.0);
        item.contributions = HashMap::from([
            ("b".to_string(), 1.0),
            ("a".to_string(), 1.0),
        ]);
        let stats = RecommendationStats::compute(&[item], 1);
        assert_eq!(stats.top_contributing_kind, Some("a".to_string()));
    }

    #[test]
    fn test_empty_stats() {
        let stats = RecommendationStats::compute(&[], 5);
        assert_eq!(stats.candidates_count, 5);
        assert_eq!(stats.results_count, 0);
        assert_eq!(stats.best_score, 0.0);
        assert_eq!(stats.top_contributing_kind, None);
    }

    #[test]
    fn test_response_serialization() {
        let response = RecommendResponse::new(
            "Big Mac",
            ScoreType::CategoryWeighted,
            vec![ranked("Whopper", 3.0)],
            42,
        );
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"source\":\"Big Mac\""));
        assert!(json.contains("\"policy\":\"category-weighted\""));
        assert!(json.contains("\"contributions\""));
        assert!(json.contains("\"candidates_count\":42"));
    }
}
