//! Diabetes risk classification.
//!
//! Counts trigger terms across a patient's clinical notes and maps the
//! count, age and gender onto a four-tier risk level. Pure and synchronous;
//! safe to call from any number of request handlers at once.

pub mod classifier;
pub mod thresholds;
pub mod types;
pub mod vocabulary;

pub use classifier::{assess, assess_record, classify};
pub use types::{RiskAssessment, RiskError};
pub use vocabulary::{count_triggers, matched_terms, TRIGGER_TERMS};
