//! Terminal rendering of the timeline and scan result panels.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::classify::RiskTier;
use crate::types::{AnalysisResult, DetectionEvent, ModuleKind};

#[derive(Tabled)]
struct TimelineRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Time")]
    time: String,
}

fn tier_colored(tier: RiskTier, text: &str) -> String {
    match tier {
        RiskTier::High => text.red().bold().to_string(),
        RiskTier::Medium => text.yellow().to_string(),
        RiskTier::Low => text.green().to_string(),
    }
}

/// Print the filtered timeline: a tally line and one row per event.
pub fn print_timeline(events: &[DetectionEvent]) {
    if events.is_empty() {
        println!(
            "{}",
            "No logs found. Try changing filters or run a scan in any module.".dimmed()
        );
        return;
    }

    let (mut low, mut medium, mut high) = (0usize, 0usize, 0usize);
    for event in events {
        match event.tier {
            RiskTier::Low => low += 1,
            RiskTier::Medium => medium += 1,
            RiskTier::High => high += 1,
        }
    }
    println!(
        "{} events   {}   {}   {}",
        events.len(),
        tier_colored(RiskTier::High, &format!("high {high}")),
        tier_colored(RiskTier::Medium, &format!("medium {medium}")),
        tier_colored(RiskTier::Low, &format!("low {low}")),
    );

    let rows: Vec<TimelineRow> = events
        .iter()
        .map(|event| TimelineRow {
            event: format!("{} - {}", event.label, event.summary),
            kind: event.kind.label().to_uppercase(),
            risk: format!("{}% • {}", event.score, event.tier.label()),
            time: event.time.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

/// Stamp printed before each auto-refresh pass in watch mode.
pub fn print_refresh_stamp() {
    let now = chrono::Local::now().format("%b %d • %H:%M");
    println!("{}", format!("refreshed {now}").dimmed());
}

/// Twenty-cell risk meter for a 0-100 score.
fn risk_meter(score: f64) -> String {
    let filled = ((score / 5.0).round() as usize).min(20);
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

/// Print one scan result panel: meter, tier, confidence, evidence, and the
/// module-specific sections.
pub fn print_result(module: ModuleKind, result: &AnalysisResult) {
    let score = result.score();
    let c = result.classification();

    println!();
    println!(
        "  {}  {}% risk • {} • confidence {:.2}",
        risk_meter(score),
        score.round() as i64,
        tier_colored(c.tier, c.tier.label()),
        c.confidence,
    );

    if let Some(label) = result.top_label() {
        println!();
        println!("  Threat category: {}", label.bold());
    }

    print_evidence(module, result.reasons());

    match module {
        ModuleKind::Text => print_credentials(result),
        ModuleKind::Url => print_domain_summary(result, c.tier),
        ModuleKind::Voice => print_voice_summary(result, c.tier),
    }
    println!();
}

fn print_evidence(module: ModuleKind, reasons: &[String]) {
    println!();
    println!("  Evidence:");
    if reasons.is_empty() {
        let empty_state = match module {
            ModuleKind::Text => "No strong scam signals detected.",
            ModuleKind::Url => "No strong spoof signals detected.",
            ModuleKind::Voice => "No strong MFCC anomalies detected.",
        };
        println!("    {}", empty_state.dimmed());
        return;
    }
    for reason in reasons {
        println!("    • {reason}");
    }
}

fn print_credentials(result: &AnalysisResult) {
    println!();
    println!("  Credential exposure:");
    let findings = result.credential_findings();
    if findings.is_empty() {
        println!("    {}", "No exposed credentials detected.".dimmed());
        return;
    }
    for finding in findings {
        println!(
            "    {}",
            format!("{} — {}", finding.kind, finding.count).red()
        );
    }
}

fn print_domain_summary(result: &AnalysisResult, tier: RiskTier) {
    if let Some(domain) = &result.domain {
        println!();
        println!("  Domain: {domain}");
    }

    let recommendation = match tier {
        RiskTier::High => "Do not open this link. Block the domain and alert the user.",
        RiskTier::Medium => "Use caution. Verify sender identity and domain authenticity.",
        RiskTier::Low => "Low risk detected. Still verify context if unexpected.",
    };
    println!();
    println!("  Recommendation: {recommendation}");
}

fn print_voice_summary(result: &AnalysisResult, tier: RiskTier) {
    let summary = match tier {
        RiskTier::High => "High likelihood of synthetic voice patterns detected.",
        RiskTier::Medium => "Some synthetic indicators detected. Verify caller identity.",
        RiskTier::Low => "Low deepfake likelihood detected.",
    };
    println!();
    println!("  Summary: {summary}");

    if let Some(meta) = &result.meta {
        println!();
        println!("  Audio metadata:");
        if let Some(filename) = &meta.filename {
            println!("    file          {filename}");
        }
        if let Some(duration) = meta.duration_sec {
            println!("    duration      {duration}s");
        }
        if let Some(rate) = meta.sample_rate {
            println!("    sample rate   {rate} Hz");
        }
        if let Some(var) = meta.mfcc_var_mean {
            println!("    mfcc var mean {var}");
        }
        if let Some(centroid) = meta.spectral_centroid_mean {
            println!("    centroid mean {centroid}");
        }
        if let Some(rolloff) = meta.spectral_rolloff_mean {
            println!("    rolloff mean  {rolloff}");
        }
        if let Some(zcr) = meta.zcr_mean {
            println!("    zcr mean      {zcr}");
        }
        if let Some(rms) = meta.rms_std {
            println!("    rms std       {rms}");
        }
    }
}

/// Local, no-visit preview of a URL about to be scanned.
pub fn print_url_preview(raw: &str) {
    match url::Url::parse(raw.trim()) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            let scheme_display = if scheme == "https" {
                scheme.green().to_string()
            } else {
                format!("{scheme} (not https)").yellow().to_string()
            };
            println!("  Safe preview (no visiting):");
            println!("    protocol  {scheme_display}");
            if let Some(host) = parsed.host_str() {
                println!("    domain    {host}");
            }
            println!("    path      {}{}", parsed.path(), parsed.query().map(|q| format!("?{q}")).unwrap_or_default());
        }
        Err(_) => {
            println!(
                "  {}",
                "Enter a valid URL to preview domain + structure.".dimmed()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_meter_is_bounded() {
        assert_eq!(risk_meter(0.0), "░".repeat(20));
        assert_eq!(risk_meter(100.0), "█".repeat(20));
        // out-of-range scores stay inside the meter
        assert_eq!(risk_meter(400.0), "█".repeat(20));
        assert_eq!(risk_meter(50.0).chars().filter(|&c| c == '█').count(), 10);
    }
}
