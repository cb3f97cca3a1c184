//! Category-conditioned closing sentences.
//!
//! Each chart family has an ordered rule table of (keyword, sentence) pairs
//! matched case-insensitively against the indicator category. The first
//! matching keyword wins; a category matching nothing gets the fallback.

use crate::processing::TrendDirection;

const BAR_CLOSINGS: &[(&str, &str)] = &[
    (
        "economic",
        "This economic indicator reveals significant regional disparities that may reflect differences in development levels, policy effectiveness, or market conditions.",
    ),
    (
        "social",
        "This social indicator highlights variations in living standards and social outcomes across different regions.",
    ),
    (
        "environment",
        "This environmental metric shows regional differences in sustainability practices and environmental conditions.",
    ),
];

const PIE_CLOSINGS: &[(&str, &str)] = &[
    (
        "welfare",
        "This distribution pattern reveals which regions are most affected by welfare losses, providing crucial insights for policy intervention and resource allocation.",
    ),
    (
        "loss",
        "This distribution pattern reveals which regions are most affected by welfare losses, providing crucial insights for policy intervention and resource allocation.",
    ),
    (
        "economic",
        "This economic distribution highlights regional economic contributions and potential areas for development focus.",
    ),
];

fn first_match(rules: &[(&str, &'static str)], category: &str) -> Option<&'static str> {
    let lowered = category.to_lowercase();
    rules
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, sentence)| sentence)
}

/// Closing sentence for bar chart summaries.
pub fn bar_closing(category: &str) -> String {
    match first_match(BAR_CLOSINGS, category) {
        Some(sentence) => sentence.to_string(),
        None => format!(
            "These variations in {} metrics provide insights into regional performance and development patterns.",
            category.to_lowercase()
        ),
    }
}

/// Closing sentence for pie/radial chart summaries.
pub fn pie_closing(category: &str) -> String {
    match first_match(PIE_CLOSINGS, category) {
        Some(sentence) => sentence.to_string(),
        None => {
            "Understanding this distribution helps identify regional patterns and inform targeted policy decisions."
                .to_string()
        }
    }
}

/// Closing sentence for line/area chart summaries, conditioned on both the
/// category and the trend direction.
pub fn line_closing(category: &str, direction: TrendDirection) -> String {
    let lowered = category.to_lowercase();
    if lowered.contains("economic") {
        let verdict = match direction {
            TrendDirection::Increasing => "suggests positive economic development",
            TrendDirection::Decreasing => "may indicate economic challenges",
            TrendDirection::Stable => "shows economic stability",
        };
        format!(
            "This {} economic trend {} across the analyzed regions.",
            direction.label(),
            verdict
        )
    } else if lowered.contains("social") {
        let verdict = match direction {
            TrendDirection::Increasing => "reflects improving social conditions",
            TrendDirection::Decreasing => "may signal declining social outcomes",
            TrendDirection::Stable => "indicates consistent social conditions",
        };
        format!(
            "The {} pattern in this social indicator {}.",
            direction.label(),
            verdict
        )
    } else {
        format!(
            "This temporal pattern provides valuable insights into how {} conditions have evolved over time.",
            lowered
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_rules_match_on_substring_case_insensitively() {
        assert!(bar_closing("Macro-Economic Policy").contains("economic indicator"));
        assert!(bar_closing("SOCIAL").contains("social indicator"));
        assert!(bar_closing("Environmental").contains("environmental metric"));
    }

    #[test]
    fn bar_fallback_embeds_the_category() {
        let s = bar_closing("Trade");
        assert!(s.contains("variations in trade metrics"));
    }

    #[test]
    fn pie_welfare_beats_economic() {
        // "welfare" is listed first, so a category matching both keywords
        // gets the welfare sentence.
        let s = pie_closing("Economic Welfare Loss");
        assert!(s.contains("welfare losses"));
    }

    #[test]
    fn pie_loss_alias_matches() {
        assert!(pie_closing("Deadweight Loss").contains("welfare losses"));
    }

    #[test]
    fn line_closing_tracks_direction() {
        let up = line_closing("Economic", TrendDirection::Increasing);
        assert!(up.contains("increasing") && up.contains("positive economic development"));

        let down = line_closing("Social", TrendDirection::Decreasing);
        assert!(down.contains("declining social outcomes"));

        let generic = line_closing("Energy", TrendDirection::Stable);
        assert!(generic.contains("energy conditions"));
    }
}
