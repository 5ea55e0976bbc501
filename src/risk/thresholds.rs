//! Age and gender conditioned decision table.
//!
//! Rules are evaluated in order and the first match wins:
//! 1. no triggers → NONE
//! 2. 2..=5 triggers and older than 30 → BORDERLINE
//! 3. IN_DANGER bands
//! 4. EARLY_ONSET bands
//!
//! Anything left over is NONE. Gender only matters for patients aged 30 or
//! younger; `Gender::Other` never satisfies those branches.

use crate::models::{Gender, RiskLevel};

/// Age at or below which the gender-specific bands apply.
pub const YOUNG_PATIENT_MAX_AGE: u32 = 30;

/// Map a trigger count to a risk level for the given demographics.
pub fn risk_for(trigger_count: usize, age: u32, gender: Gender) -> RiskLevel {
    if is_none(trigger_count) {
        return RiskLevel::None;
    }
    if is_borderline(trigger_count, age) {
        return RiskLevel::Borderline;
    }
    if is_in_danger(trigger_count, age, gender) {
        return RiskLevel::InDanger;
    }
    if is_early_onset(trigger_count, age, gender) {
        return RiskLevel::EarlyOnset;
    }
    RiskLevel::None
}

fn is_none(count: usize) -> bool {
    count == 0
}

fn is_borderline(count: usize, age: u32) -> bool {
    (2..=5).contains(&count) && age > YOUNG_PATIENT_MAX_AGE
}

fn is_in_danger(count: usize, age: u32, gender: Gender) -> bool {
    if age <= YOUNG_PATIENT_MAX_AGE {
        match gender {
            Gender::Male => (3..5).contains(&count),
            Gender::Female => (4..7).contains(&count),
            Gender::Other => false,
        }
    } else {
        (6..=7).contains(&count)
    }
}

fn is_early_onset(count: usize, age: u32, gender: Gender) -> bool {
    if age <= YOUNG_PATIENT_MAX_AGE {
        match gender {
            Gender::Male => count >= 5,
            Gender::Female => count >= 7,
            Gender::Other => false,
        }
    } else {
        count >= 8
    }
}
