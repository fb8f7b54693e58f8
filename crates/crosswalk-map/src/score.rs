//! Word-set similarity between a source term and a classification title.

use std::collections::HashSet;

/// Highest confidence a mapping suggestion may carry.
pub const MAX_MAPPING_CONFIDENCE: u8 = 95;

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Jaccard index of the lower-cased whitespace-separated word sets.
pub fn jaccard(left: &str, right: &str) -> f64 {
    let left = word_set(left);
    let right = word_set(right);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(&right).count();
    let union = left.union(&right).count();
    shared as f64 / union as f64
}

/// `min(95, round(similarity * 100))`.
pub fn mapping_confidence(similarity: f64) -> u8 {
    let scaled = (similarity * 100.0).round();
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0;
    }
    scaled.min(f64::from(MAX_MAPPING_CONFIDENCE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jaccard_ignores_case_and_duplicates() {
        assert_eq!(jaccard("Vata Disorders", "vata disorders vata"), 1.0);
        assert!((jaccard("vata imbalance", "Vata disorders") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(jaccard("", "fever"), 0.0);
    }

    #[test]
    fn confidence_caps_at_95() {
        assert_eq!(mapping_confidence(1.0), 95);
        assert_eq!(mapping_confidence(0.5), 50);
        assert_eq!(mapping_confidence(1.0 / 3.0), 33);
    }
}
