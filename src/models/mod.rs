pub mod enums;
pub mod patient;

pub use enums::{Gender, RiskLevel};
pub use patient::{PatientInput, PatientRecord};
