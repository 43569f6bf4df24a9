//! Tolerant parsing of model output
//!
//! Models wrap JSON in Markdown fences and pad numbers with prose even when
//! told not to. Everything here degrades to a safe default instead of
//! erroring.

use packcraft_core::{PackAnalysis, SuggestedItem};
use regex::Regex;
use tracing::warn;

/// Strip a surrounding Markdown code fence, if any
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Language tag on the opening fence, e.g. ```json
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse a structured pack analysis; malformed input yields the empty default
pub fn analysis(text: &str) -> PackAnalysis {
    let body = strip_code_fences(text);
    match serde_json::from_str::<PackAnalysis>(body) {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!(error = %err, "malformed analysis JSON, using empty default");
            PackAnalysis::unknown()
        }
    }
}

/// Parse a suggestion list; malformed input yields an empty list
pub fn suggestions(text: &str) -> Vec<SuggestedItem> {
    let body = strip_code_fences(text);
    match serde_json::from_str::<Vec<SuggestedItem>>(body) {
        Ok(items) => items,
        Err(err) => {
            warn!(error = %err, "malformed suggestions JSON, dropping");
            Vec::new()
        }
    }
}

/// Extract a weight in grams from free text
///
/// Values under 5 are almost certainly kilograms, so scale them up.
/// Anything non-numeric or non-positive comes back as 0.
pub fn grams(text: &str) -> f64 {
    let re = Regex::new(r"\d+(?:\.\d+)?").unwrap();
    let Some(m) = re.find(strip_code_fences(text)) else {
        return 0.0;
    };
    let Ok(value) = m.as_str().parse::<f64>() else {
        return 0.0;
    };
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    if value < 5.0 {
        value * 1000.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packcraft_core::Category;

    #[test]
    fn strips_json_fences() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
        assert_eq!(strip_code_fences("plain"), "plain");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
    }

    #[test]
    fn parses_fenced_suggestions() {
        let text = r#"```json
[{"name": "Rain Jacket", "category": "Clothing", "weight": 250, "weightDisplay": "200-300g", "reason": "Storms forecast"}]
```"#;
        let items = suggestions(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Rain Jacket");
        assert_eq!(items[0].category, Category::Clothing);
        assert_eq!(items[0].weight_g, 250.0);
        assert_eq!(items[0].weight_display.as_deref(), Some("200-300g"));
    }

    #[test]
    fn malformed_suggestions_become_empty() {
        assert!(suggestions("sorry, I can't help with that").is_empty());
        assert!(suggestions("{\"not\": \"an array\"}").is_empty());
    }

    #[test]
    fn malformed_analysis_becomes_unknown() {
        let a = analysis("no json here");
        assert_eq!(a, PackAnalysis::unknown());
    }

    #[test]
    fn parses_valid_analysis() {
        let text = r#"{"essentialItemIds": ["x"], "missingCategories": [], "redFlags": ["No shelter"], "weightAssessment": "Heavy"}"#;
        let a = analysis(text);
        assert_eq!(a.essential_item_ids, vec!["x"]);
        assert_eq!(a.red_flags, vec!["No shelter"]);
    }

    #[test]
    fn grams_applies_kilogram_heuristic() {
        assert_eq!(grams("850"), 850.0);
        assert_eq!(grams("The weight is about 1.2"), 1200.0);
        assert_eq!(grams("0.8"), 800.0);
        assert_eq!(grams("5"), 5.0);
    }

    #[test]
    fn grams_defaults_to_zero() {
        assert_eq!(grams("no idea"), 0.0);
        assert_eq!(grams(""), 0.0);
        assert_eq!(grams("0"), 0.0);
    }
}
