//! Type definitions for the FraudLens client

pub mod analysis;
pub mod event;

pub use analysis::{AnalysisResult, AudioMeta, CredentialFinding};
pub use event::{DetectionEvent, ModuleKind};
