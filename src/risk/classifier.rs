use crate::models::{Gender, PatientInput, PatientRecord, RiskLevel};

const MISSING_PATIENT: &str = "Le patient ne peut pas être null.";
const MISSING_GENDER: &str = "Le genre (gender) ne peut pas être null.";
const MISSING_NOTES: &str = "Les notes médicales (note) ne peuvent pas être null.";

use super::thresholds::risk_for;
use super::types::{RiskAssessment, RiskError};
use super::vocabulary::count_triggers;

impl TryFrom<&PatientRecord> for PatientInput {
    type Error = RiskError;

    fn try_from(record: &PatientRecord) -> Result<Self, Self::Error> {
        let gender = record
            .gender
            .as_deref()
            .ok_or_else(|| RiskError::InvalidInput(MISSING_GENDER.into()))?;
        let notes = record
            .notes
            .as_ref()
            .ok_or_else(|| RiskError::InvalidInput(MISSING_NOTES.into()))?;

        Ok(PatientInput::new(
            record.age,
            Gender::from_token(gender),
            notes.clone(),
        ))
    }
}

/// Classify a patient record.
///
/// Fails with `InvalidInput` when the record, its gender or its notes are
/// absent. Empty notes are valid and classify as `None`.
pub fn classify(record: Option<&PatientRecord>) -> Result<RiskLevel, RiskError> {
    assess_record(record).map(|assessment| assessment.risk_level)
}

/// Same validation as [`classify`], keeping the trigger count.
pub fn assess_record(record: Option<&PatientRecord>) -> Result<RiskAssessment, RiskError> {
    let record =
        record.ok_or_else(|| RiskError::InvalidInput(MISSING_PATIENT.into()))?;
    let input = PatientInput::try_from(record)?;
    Ok(assess(&input))
}

/// Classify a validated input. Total and side-effect free.
pub fn assess(input: &PatientInput) -> RiskAssessment {
    let trigger_count = count_triggers(input.notes.as_slice());
    RiskAssessment {
        risk_level: risk_for(trigger_count, input.age, input.gender),
        trigger_count,
    }
}
