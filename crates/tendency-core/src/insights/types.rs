//! Core insight value

use serde::{Deserialize, Serialize};

/// A single mined correlation.
///
/// The key uniquely identifies the insight so it can be tracked across
/// generation runs on the same dataset; it is what the suppression store
/// operates on. Insights are never mutated, only regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Canonical identity, e.g. `primary_os = Windows -> study_time = Night`
    pub key: String,
    /// Human-readable sentence
    pub description: String,
    /// 0-100 quality score
    pub score: u8,
    /// Records in the cohort exhibiting the chosen Y-value
    pub support: usize,
    /// Size of the X-cohort evaluated
    pub population: usize,
}

impl Insight {
    /// Share of the cohort the pattern covers; 0.0 for an empty cohort
    pub fn confidence(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.support as f64 / self.population as f64
    }
}

/// Order a batch for display: score desc, support desc, description asc.
///
/// The final description comparison makes the order total, so repeated runs
/// over the same data produce identical listings.
pub fn sort_insights(insights: &mut [Insight]) {
    insights.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.support.cmp(&a.support))
            .then_with(|| a.description.cmp(&b.description))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(key: &str, score: u8, support: usize, population: usize) -> Insight {
        Insight {
            key: key.to_string(),
            description: format!("desc {}", key),
            score,
            support,
            population,
        }
    }

    #[test]
    fn test_confidence() {
        assert_eq!(insight("a", 50, 3, 4).confidence(), 0.75);
        assert_eq!(insight("b", 0, 0, 0).confidence(), 0.0);
    }

    #[test]
    fn test_sort_is_total() {
        let mut batch = vec![
            insight("a", 70, 3, 6),
            insight("b", 80, 2, 4),
            insight("c", 70, 5, 10),
            insight("d", 70, 5, 10),
        ];
        sort_insights(&mut batch);

        assert_eq!(batch[0].key, "b"); // highest score first
        assert_eq!(batch[1].key, "c"); // same score, higher support
        assert_eq!(batch[2].key, "d"); // tie broken by description
        assert_eq!(batch[3].key, "a");
    }
}
