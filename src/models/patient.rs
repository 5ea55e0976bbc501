use serde::{Deserialize, Deserializer, Serialize};

use super::enums::Gender;

/// Patient record as received at the service boundary.
///
/// Field aliases accept the clinic front-end's French payloads
/// (`nom`, `genre`, `note`). A missing or `null` age reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default, alias = "nom")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub age: u32,
    #[serde(default, alias = "genre")]
    pub gender: Option<String>,
    #[serde(default, alias = "note")]
    pub notes: Option<Vec<String>>,
}

impl PatientRecord {
    /// Replace absent notes with an empty list. Applied by the HTTP layer
    /// before classification.
    pub fn with_default_notes(mut self) -> Self {
        if self.notes.is_none() {
            self.notes = Some(Vec::new());
        }
        self
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Validated classifier input. Gender and notes are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientInput {
    pub age: u32,
    pub gender: Gender,
    pub notes: Vec<String>,
}

impl PatientInput {
    pub fn new(age: u32, gender: Gender, notes: Vec<String>) -> Self {
        Self { age, gender, notes }
    }
}
