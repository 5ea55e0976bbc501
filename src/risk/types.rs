use serde::Serialize;
use thiserror::Error;

use crate::models::RiskLevel;

/// Result of a risk classification with the count that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Number of (note, trigger term) matches.
    pub trigger_count: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// Missing patient, gender or notes. Carries the message shown to clients.
    #[error("{0}")]
    InvalidInput(String),
}
