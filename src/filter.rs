//! Compound tier / module / keyword filter over the detection timeline.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::classify::RiskTier;
use crate::types::{DetectionEvent, ModuleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TierFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl TierFilter {
    fn matches(self, tier: RiskTier) -> bool {
        match self {
            TierFilter::All => true,
            TierFilter::Low => tier == RiskTier::Low,
            TierFilter::Medium => tier == RiskTier::Medium,
            TierFilter::High => tier == RiskTier::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFilter {
    #[default]
    All,
    Text,
    Url,
    Voice,
}

impl ModuleFilter {
    fn matches(self, kind: ModuleKind) -> bool {
        match self {
            ModuleFilter::All => true,
            ModuleFilter::Text => kind == ModuleKind::Text,
            ModuleFilter::Url => kind == ModuleKind::Url,
            ModuleFilter::Voice => kind == ModuleKind::Voice,
        }
    }
}

/// Session-local filter selection over the timeline. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub tier: TierFilter,
    pub module: ModuleFilter,
    pub query: String,
}

impl FilterState {
    pub fn new(tier: TierFilter, module: ModuleFilter, query: impl Into<String>) -> Self {
        Self {
            tier,
            module,
            query: query.into(),
        }
    }

    /// True when the filter passes every event through unchanged.
    pub fn is_identity(&self) -> bool {
        self.tier == TierFilter::All
            && self.module == ModuleFilter::All
            && self.query.trim().is_empty()
    }

    /// Apply all three predicates conjunctively.
    ///
    /// Pure and stable: survivors keep their input order. Cheap enough to
    /// re-run on every keystroke over realistic audit-log sizes.
    pub fn apply(&self, events: &[DetectionEvent]) -> Vec<DetectionEvent> {
        let query = self.query.trim().to_lowercase();

        events
            .iter()
            .filter(|event| {
                self.tier.matches(event.tier)
                    && self.module.matches(event.kind)
                    && query_matches(&query, event)
            })
            .cloned()
            .collect()
    }
}

/// Case-folded substring match over label, summary, type, and tier.
/// `query` must already be trimmed and lowercased; empty matches everything.
fn query_matches(query: &str, event: &DetectionEvent) -> bool {
    if query.is_empty() {
        return true;
    }

    event.label.to_lowercase().contains(query)
        || event.summary.to_lowercase().contains(query)
        || event.kind.label().contains(query)
        || event.tier.label().to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::fallback_events;

    #[test]
    fn test_identity_filter_passes_everything() {
        let events = fallback_events();
        let filter = FilterState::default();

        assert!(filter.is_identity());
        assert_eq!(filter.apply(&events), events);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let events = fallback_events();
        let filter = FilterState::new(TierFilter::All, ModuleFilter::All, "phish");

        let once = filter.apply(&events);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tier_filter_exact_match() {
        let events = fallback_events();
        let filter = FilterState::new(TierFilter::High, ModuleFilter::All, "");

        let out = filter.apply(&events);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "Phishing");
    }

    #[test]
    fn test_module_filter_exact_match() {
        let events = fallback_events();
        let filter = FilterState::new(TierFilter::All, ModuleFilter::Voice, "");

        let out = filter.apply(&events);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ModuleKind::Voice);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let events = fallback_events();
        let filter = FilterState::new(TierFilter::All, ModuleFilter::All, "PHISH");

        let out = filter.apply(&events);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "Phishing");
    }

    #[test]
    fn test_query_matches_any_of_the_four_fields() {
        let events = fallback_events();

        // tier name as keyword
        let by_tier = FilterState::new(TierFilter::All, ModuleFilter::All, "medium");
        assert_eq!(by_tier.apply(&events).len(), 1);

        // module name as keyword
        let by_type = FilterState::new(TierFilter::All, ModuleFilter::All, "voice");
        assert_eq!(by_type.apply(&events).len(), 1);

        // summary text
        let by_summary = FilterState::new(TierFilter::All, ModuleFilter::All, "typosquat");
        assert_eq!(by_summary.apply(&events).len(), 1);
    }

    #[test]
    fn test_query_is_trimmed() {
        let events = fallback_events();
        let filter = FilterState::new(TierFilter::All, ModuleFilter::All, "   ");
        assert_eq!(filter.apply(&events).len(), events.len());
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let events = fallback_events();
        // The only HIGH event is a text event, so this pair must exclude it
        let filter = FilterState::new(TierFilter::High, ModuleFilter::Url, "");
        assert!(filter.apply(&events).is_empty());
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let mut events = fallback_events();
        events.extend(fallback_events());
        let filter = FilterState::new(TierFilter::All, ModuleFilter::All, "");

        let out = filter.apply(&events);
        let ids: Vec<&str> = out.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "1", "2", "3"]);
    }

    #[test]
    fn test_empty_fields_do_not_match_but_do_not_fail() {
        let event: DetectionEvent = serde_json::from_str(r#"{"id": "x", "type": "text"}"#).unwrap();
        let filter = FilterState::new(TierFilter::All, ModuleFilter::All, "phish");
        assert!(filter.apply(&[event]).is_empty());
    }
}
