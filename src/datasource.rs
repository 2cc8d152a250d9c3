//! Audit log retrieval with a local fallback snapshot.
//!
//! The log service is best-effort from the client's point of view: any
//! transport or decode failure is swallowed at this boundary and the fixed
//! fallback collection is substituted, so the timeline always has rows to
//! render. Failures here are never surfaced to the analyst.

use tracing::{debug, warn};

use crate::classify::RiskTier;
use crate::client::{ClientError, ScanClient};
use crate::types::{DetectionEvent, ModuleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Where the current collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataOrigin {
    #[default]
    Remote,
    Fallback,
}

/// In-memory audit log collection.
///
/// Mutated only by `load` / `ingest`, and each ingest fully replaces the
/// prior collection; nothing is ever merged. The single-threaded event flow
/// serializes all mutation, so no locking lives here.
#[derive(Debug, Default)]
pub struct LogStore {
    events: Vec<DetectionEvent>,
    state: LoadState,
    origin: DataOrigin,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DetectionEvent] {
        &self.events
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// Fetch the collection from the service, replacing whatever is held.
    /// Safe to call repeatedly; never fails past this boundary.
    pub async fn load(&mut self, client: &ScanClient) {
        self.state = LoadState::Loading;
        let fetched = client.fetch_logs().await;
        self.ingest(fetched);
    }

    /// Replace the collection with a fetch outcome. A failed fetch
    /// substitutes the fallback snapshot instead of propagating.
    pub fn ingest(&mut self, fetched: Result<Vec<DetectionEvent>, ClientError>) {
        let (events, origin) = match fetched {
            Ok(events) => (events, DataOrigin::Remote),
            Err(err) => {
                warn!(error = %err, "log fetch failed, serving fallback snapshot");
                (fallback_events(), DataOrigin::Fallback)
            }
        };

        for event in &events {
            if !event.tier_is_consistent() {
                warn!(
                    id = %event.id,
                    score = event.score,
                    tier = event.tier.label(),
                    "event tier disagrees with its score under the threshold rule"
                );
            }
        }

        debug!(count = events.len(), origin = ?origin, "timeline replaced");
        self.events = events;
        self.origin = origin;
        self.state = LoadState::Ready;
    }
}

/// Fixed snapshot served when the log service is unreachable or returns an
/// invalid body. One sample per module, tiers consistent with scores.
pub fn fallback_events() -> Vec<DetectionEvent> {
    vec![
        DetectionEvent {
            id: "1".to_string(),
            kind: ModuleKind::Text,
            label: "Phishing".to_string(),
            score: 82,
            tier: RiskTier::High,
            time: "Today • 14:02".to_string(),
            summary: "Urgency language + suspicious URL + credential request".to_string(),
        },
        DetectionEvent {
            id: "2".to_string(),
            kind: ModuleKind::Url,
            label: "Spoofing".to_string(),
            score: 67,
            tier: RiskTier::Medium,
            time: "Today • 13:41".to_string(),
            summary: "Typosquat domain + http protocol".to_string(),
        },
        DetectionEvent {
            id: "3".to_string(),
            kind: ModuleKind::Voice,
            label: "Deepfake".to_string(),
            score: 28,
            tier: RiskTier::Low,
            time: "Today • 12:18".to_string(),
            summary: "No strong MFCC anomalies detected".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fallback_snapshot_is_consistent() {
        let events = fallback_events();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.tier_is_consistent()));
    }

    #[test]
    fn test_failed_fetch_substitutes_fallback() {
        let mut store = LogStore::new();
        store.ingest(Err(ClientError::Validation("boom".to_string())));

        assert_eq!(store.events(), fallback_events());
        assert_eq!(store.origin(), DataOrigin::Fallback);
        assert_eq!(store.state(), LoadState::Ready);
    }

    #[test]
    fn test_ingest_replaces_rather_than_merges() {
        let mut store = LogStore::new();
        store.ingest(Ok(fallback_events()));
        assert_eq!(store.events().len(), 3);

        let single = vec![fallback_events().remove(0)];
        store.ingest(Ok(single.clone()));
        assert_eq!(store.events(), single);
        assert_eq!(store.origin(), DataOrigin::Remote);
    }

    #[test]
    fn test_successful_fetch_marks_remote_origin() {
        let mut store = LogStore::new();
        store.ingest(Err(ClientError::Validation("down".to_string())));
        assert_eq!(store.origin(), DataOrigin::Fallback);

        store.ingest(Ok(vec![]));
        assert_eq!(store.origin(), DataOrigin::Remote);
        assert!(store.events().is_empty());
    }

    #[tokio::test]
    async fn test_load_against_unreachable_service_falls_back() {
        let client = ScanClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let mut store = LogStore::new();

        store.load(&client).await;

        assert_eq!(store.events(), fallback_events());
        assert_eq!(store.origin(), DataOrigin::Fallback);
        assert_eq!(store.state(), LoadState::Ready);
    }
}
