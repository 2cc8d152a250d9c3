//! JSON artifacts for audit review.
//!
//! Log exports operate on the filtered view the analyst is looking at, not
//! the raw collection; report exports dump exactly the retained analyze
//! response. Artifacts are pretty-printed UTF-8 JSON with fixed,
//! module-specific names.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::types::{AnalysisResult, DetectionEvent, ModuleKind};

/// Which artifact a write produces; fixes the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    AuditLogs,
    Text,
    Url,
    Voice,
}

impl ReportKind {
    pub fn file_name(self, prefix: &str) -> String {
        let suffix = match self {
            ReportKind::AuditLogs => "audit_logs",
            ReportKind::Text => "text_report",
            ReportKind::Url => "url_report",
            ReportKind::Voice => "voice_report",
        };
        format!("{prefix}_{suffix}.json")
    }
}

impl From<ModuleKind> for ReportKind {
    fn from(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::Text => ReportKind::Text,
            ModuleKind::Url => ReportKind::Url,
            ModuleKind::Voice => ReportKind::Voice,
        }
    }
}

/// Write the currently filtered timeline to `<prefix>_audit_logs.json`.
///
/// An empty collection is refused; callers guard before offering the
/// export action.
pub fn export_events(dir: &Path, prefix: &str, events: &[DetectionEvent]) -> Result<PathBuf> {
    if events.is_empty() {
        bail!("nothing to export: the filtered timeline is empty");
    }
    write_artifact(dir, ReportKind::AuditLogs.file_name(prefix), events)
}

/// Write exactly one retained analyze result to its module's report file.
pub fn export_report(
    dir: &Path,
    prefix: &str,
    module: ModuleKind,
    result: &AnalysisResult,
) -> Result<PathBuf> {
    write_artifact(dir, ReportKind::from(module).file_name(prefix), result)
}

fn write_artifact<T: Serialize + ?Sized>(dir: &Path, name: String, payload: &T) -> Result<PathBuf> {
    let path = dir.join(name);
    let json =
        serde_json::to_string_pretty(payload).context("failed to serialize export payload")?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::fallback_events;

    #[test]
    fn test_file_names_are_fixed_per_module() {
        assert_eq!(
            ReportKind::AuditLogs.file_name("fraudlens"),
            "fraudlens_audit_logs.json"
        );
        assert_eq!(
            ReportKind::from(ModuleKind::Text).file_name("fraudlens"),
            "fraudlens_text_report.json"
        );
        assert_eq!(
            ReportKind::from(ModuleKind::Url).file_name("fraudlens"),
            "fraudlens_url_report.json"
        );
        assert_eq!(
            ReportKind::from(ModuleKind::Voice).file_name("fraudlens"),
            "fraudlens_voice_report.json"
        );
    }

    #[test]
    fn test_empty_collection_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_events(dir.path(), "fraudlens", &[]).unwrap_err();
        assert!(err.to_string().contains("nothing to export"));
        assert!(!dir.path().join("fraudlens_audit_logs.json").exists());
    }

    #[test]
    fn test_events_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let events = fallback_events();

        let path = export_events(dir.path(), "fraudlens", &events).unwrap();
        assert_eq!(path.file_name().unwrap(), "fraudlens_audit_logs.json");

        let written = fs::read_to_string(&path).unwrap();
        // pretty-printed, not a single line
        assert!(written.contains('\n'));
        let back: Vec<DetectionEvent> = serde_json::from_str(&written).unwrap();
        assert_eq!(back, events);
    }

    #[test]
    fn test_report_export_dumps_the_result_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let result: AnalysisResult = serde_json::from_str(
            r#"{"final_risk_score": 82, "reasons": ["Urgency language"], "beta": true}"#,
        )
        .unwrap();

        let path = export_report(dir.path(), "fraudlens", ModuleKind::Text, &result).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(written["final_risk_score"], 82.0);
        assert_eq!(written["reasons"][0], "Urgency language");
        assert_eq!(written["beta"], true);
    }
}
