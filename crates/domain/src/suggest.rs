//! "Did you mean" ranking.

/// How many suggestions to offer and how similar they must be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionPolicy {
    pub limit: usize,
    /// Minimum Jaro-Winkler similarity for a non-substring candidate.
    pub threshold: f64,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            limit: 5,
            threshold: 0.80,
        }
    }
}

/// Shortest query that counts as a substring match.
const MIN_SUBSTRING_LEN: usize = 3;

impl SuggestionPolicy {
    pub fn new(limit: usize, threshold: f64) -> Self {
        Self { limit, threshold }
    }

    /// Candidates similar to `query`, best first. Substring matches rank above
    /// fuzzy ones; ties break on similarity, then name.
    pub fn rank<'a>(
        &self,
        query: &str,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || self.limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(bool, f64, &str)> = Vec::new();
        for candidate in candidates {
            let lower = candidate.to_lowercase();
            if lower == query || scored.iter().any(|(_, _, c)| c.eq_ignore_ascii_case(candidate)) {
                continue;
            }
            let substring = query.len() >= MIN_SUBSTRING_LEN
                && (lower.contains(&query) || query.contains(&lower));
            let similarity = strsim::jaro_winkler(&query, &lower);
            if substring || similarity >= self.threshold {
                scored.push((substring, similarity, candidate));
            }
        }

        scored.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.1.total_cmp(&a.1))
                .then_with(|| a.2.cmp(b.2))
        });
        scored
            .into_iter()
            .take(self.limit)
            .map(|(_, _, c)| c.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_misspellings_rank_first() {
        let policy = SuggestionPolicy::default();
        let ranked = policy.rank("Bruja", ["Brujah", "Tremere", "True Brujah", "Toreador"]);
        assert_eq!(ranked.first().map(String::as_str), Some("Brujah"));
        assert!(ranked.contains(&"True Brujah".to_string()));
        assert!(!ranked.contains(&"Tremere".to_string()));
    }

    #[test]
    fn limit_and_exact_matches() {
        let policy = SuggestionPolicy::new(1, 0.5);
        let ranked = policy.rank("Sire", ["Sire", "Prestigious Sire", "Infamous Sire"]);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].ends_with(" Sire"));
    }

    #[test]
    fn nothing_for_empty_query() {
        assert!(SuggestionPolicy::default().rank(" ", ["Strength"]).is_empty());
    }
}
