//! Audit timeline rows as served by the log endpoint.

use serde::{Deserialize, Serialize};

use crate::classify::RiskTier;

/// Detection module a sample was scanned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Text,
    Url,
    Voice,
}

impl ModuleKind {
    pub fn label(self) -> &'static str {
        match self {
            ModuleKind::Text => "text",
            ModuleKind::Url => "url",
            ModuleKind::Voice => "voice",
        }
    }
}

/// One row in the detection timeline.
///
/// The server is authoritative for every field, `tier` included. Optional
/// fields default on deserialization because the backend is loosely typed;
/// a row only fails to parse when `id` or `type` is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Opaque identifier, stable across re-fetches.
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ModuleKind,

    /// Short classification string, e.g. "Phishing".
    #[serde(default)]
    pub label: String,

    /// Raw risk score in 0-100.
    #[serde(default)]
    pub score: i64,

    /// Risk tier the server derived from `score`.
    #[serde(default)]
    pub tier: RiskTier,

    /// Display-formatted timestamp; opaque beyond display.
    #[serde(default)]
    pub time: String,

    /// Human-readable evidence synopsis.
    #[serde(default)]
    pub summary: String,
}

impl DetectionEvent {
    /// Whether the persisted tier agrees with the canonical threshold rule.
    /// A disagreement is a data-integrity violation on the server side.
    pub fn tier_is_consistent(&self) -> bool {
        self.tier == RiskTier::from_score(self.score as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserialization() {
        let json = r#"{
            "id": "1",
            "type": "text",
            "label": "Phishing",
            "score": 82,
            "tier": "HIGH",
            "time": "Today • 14:02",
            "summary": "Urgency language + suspicious URL"
        }"#;

        let event: DetectionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, ModuleKind::Text);
        assert_eq!(event.score, 82);
        assert_eq!(event.tier, RiskTier::High);
        assert!(event.tier_is_consistent());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id": "7", "type": "url"}"#;

        let event: DetectionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.label, "");
        assert_eq!(event.score, 0);
        assert_eq!(event.tier, RiskTier::Low);
        assert!(event.tier_is_consistent());
    }

    #[test]
    fn test_tier_inconsistency_is_detected() {
        let json = r#"{"id": "9", "type": "voice", "score": 90, "tier": "LOW"}"#;

        let event: DetectionEvent = serde_json::from_str(json).unwrap();
        assert!(!event.tier_is_consistent());
    }

    #[test]
    fn test_event_round_trip() {
        let event = DetectionEvent {
            id: "2".to_string(),
            kind: ModuleKind::Url,
            label: "Spoofing".to_string(),
            score: 67,
            tier: RiskTier::Medium,
            time: "Today • 13:41".to_string(),
            summary: "Typosquat domain + http protocol".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: DetectionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
        assert!(json.contains("\"type\":\"url\""));
    }
}
