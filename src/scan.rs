//! Per-module scan lifecycle: validate, call the service, retain the result.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::client::{ClientError, ScanClient};
use crate::types::{AnalysisResult, ModuleKind};

/// Analyst-provided sample for one scan.
#[derive(Debug, Clone)]
pub enum ScanInput {
    Text(String),
    Url(String),
    Voice(PathBuf),
}

impl ScanInput {
    pub fn module(&self) -> ModuleKind {
        match self {
            ScanInput::Text(_) => ModuleKind::Text,
            ScanInput::Url(_) => ModuleKind::Url,
            ScanInput::Voice(_) => ModuleKind::Voice,
        }
    }

    /// Pre-flight check. A rejection here never reaches the network.
    pub fn validate(&self) -> Result<(), ClientError> {
        match self {
            ScanInput::Text(text) if text.trim().is_empty() => Err(ClientError::Validation(
                "paste an email, SMS, or chat message first".to_string(),
            )),
            ScanInput::Url(url) if url.trim().is_empty() => {
                Err(ClientError::Validation("paste a URL first".to_string()))
            }
            ScanInput::Voice(path) if !path.is_file() => Err(ClientError::Validation(format!(
                "audio file not found: {}",
                path.display()
            ))),
            _ => Ok(()),
        }
    }
}

/// Scan lifecycle state. One scan at a time is meaningful per module.
#[derive(Debug, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Analyzing,
    Complete(AnalysisResult),
}

/// Drives the `Idle -> Analyzing -> Complete | Idle` state machine for one
/// detection view. The raw response is retained verbatim; all display
/// fields are derived on read.
#[derive(Debug, Default)]
pub struct ScanController {
    state: ScanState,
}

impl ScanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ScanState::Analyzing)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ScanState::Complete(result) => Some(result),
            _ => None,
        }
    }

    /// Enter `Analyzing` for a validated input. The prior result is
    /// discarded here, before the network call, so a stale result never
    /// shows next to a new scan.
    pub fn begin(&mut self, input: &ScanInput) -> Result<(), ClientError> {
        if self.is_busy() {
            return Err(ClientError::Validation(
                "a scan is already in progress".to_string(),
            ));
        }
        input.validate()?;
        self.state = ScanState::Analyzing;
        Ok(())
    }

    /// Apply the outcome of the analyze call. A failure drops back to
    /// `Idle` with nothing retained.
    pub fn finish(
        &mut self,
        module: ModuleKind,
        outcome: Result<AnalysisResult, ClientError>,
    ) -> Result<(), ClientError> {
        match outcome {
            Ok(result) => {
                let c = result.classification();
                info!(
                    module = module.label(),
                    score = result.score(),
                    tier = c.tier.label(),
                    "scan complete"
                );
                self.state = ScanState::Complete(result);
                Ok(())
            }
            Err(err) => {
                warn!(module = module.label(), error = %err, "scan failed");
                self.state = ScanState::Idle;
                Err(err)
            }
        }
    }

    /// Run one scan to completion against the service.
    pub async fn run(&mut self, client: &ScanClient, input: ScanInput) -> Result<(), ClientError> {
        self.begin(&input)?;

        let outcome = match &input {
            ScanInput::Text(text) => client.analyze_text(text).await,
            ScanInput::Url(url) => client.analyze_url(url).await,
            ScanInput::Voice(path) => client.analyze_voice(path).await,
        };

        self.finish(input.module(), outcome)
    }

    /// Discard any held result and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }
}

/// Canned demo samples from the product tour. `None` for an unknown name.
pub fn demo_text(name: &str) -> Option<&'static str> {
    match name {
        "bank-phishing" => Some(
            "Dear Customer,\n\nYour Barclays account has been temporarily suspended due to unusual activity.\nPlease verify your details immediately to avoid permanent closure.\n\nVerify now: http://barclays-secure-verification.com/login\n\nRegards,\nSecurity Team",
        ),
        "otp-scam" => Some(
            "Hi, this is your bank.\nWe detected a suspicious transaction.\nPlease share the OTP you received to cancel it.\n\nURGENT: Respond within 5 minutes.",
        ),
        "credential-leak" => Some(
            "Hey team,\nHere are the credentials for the staging server:\n\nusername: admin\npassword: Admin@12345\n\nPlease don't share externally.",
        ),
        _ => None,
    }
}

pub fn demo_url(name: &str) -> Option<&'static str> {
    match name {
        "legit-bank" => Some("https://www.barclays.co.uk"),
        "phishing" => Some("http://barclays-secure-verification.com/login"),
        "typosquat" => Some("https://paypaI.com.security-checking.info/login"),
        "support-scam" => Some("https://microsoft-support-alerts.com/verify"),
        _ => None,
    }
}

pub const TEXT_DEMO_NAMES: &[&str] = &["bank-phishing", "otp-scam", "credential-leak"];
pub const URL_DEMO_NAMES: &[&str] = &["legit-bank", "phishing", "typosquat", "support-scam"];
