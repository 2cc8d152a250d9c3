//! Analyze responses, retained verbatim and projected for display.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classify::{classify, Classification};

/// Response of a single analyze call.
///
/// Held only in UI state and discarded on reset; the client never persists
/// it. Unknown fields ride along in `extra` so an export reproduces the
/// response exactly as the service sent it. Projection helpers read from
/// the raw value and never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_risk_score: Option<f64>,

    /// Older voice responses carry the score under this name instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud: Option<FraudSection>,

    /// Ordered evidence strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<CredentialSection>,

    /// URL scans surface the scanned domain here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Voice scans surface audio descriptors here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<AudioMeta>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_label: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialSection {
    #[serde(default)]
    pub findings: Vec<CredentialFinding>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One class of exposed credential, e.g. `Password` seen twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialFinding {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
}

/// Audio descriptors attached to voice scan responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfcc_var_mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectral_centroid_mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectral_rolloff_mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zcr_mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rms_std: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// The raw risk score: `final_risk_score`, falling back to the voice
    /// module's `risk_score`, else zero.
    pub fn score(&self) -> f64 {
        self.final_risk_score.or(self.risk_score).unwrap_or(0.0)
    }

    /// Tier and display confidence derived from the score.
    pub fn classification(&self) -> Classification {
        classify(self.score())
    }

    pub fn top_label(&self) -> Option<&str> {
        self.fraud.as_ref().and_then(|f| f.top_label.as_deref())
    }

    pub fn reasons(&self) -> &[String] {
        self.reasons.as_deref().unwrap_or(&[])
    }

    pub fn credential_findings(&self) -> &[CredentialFinding] {
        self.credentials
            .as_ref()
            .map(|c| c.findings.as_slice())
            .unwrap_or(&[])
    }
}
