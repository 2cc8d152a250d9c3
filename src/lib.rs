//! FraudLens Client Library
//!
//! Client-side core of the FraudLens analyst console: shared risk tier
//! classification, audit log retrieval with local fallback, compound
//! timeline filtering, auto-refresh polling, and JSON report export.

pub mod classify;
pub mod client;
pub mod config;
pub mod datasource;
pub mod export;
pub mod filter;
pub mod poller;
pub mod render;
pub mod scan;
pub mod types;

pub use classify::{classify, Classification, RiskTier};
pub use client::{ClientError, ScanClient};
pub use config::AppConfig;
pub use datasource::{DataOrigin, LoadState, LogStore};
pub use filter::{FilterState, ModuleFilter, TierFilter};
pub use poller::Poller;
pub use scan::{ScanController, ScanInput, ScanState};
pub use types::{AnalysisResult, DetectionEvent, ModuleKind};
