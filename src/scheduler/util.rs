use super::types::InputError;
use crate::model::Roster;
use chrono::{Days, NaiveDate};
use std::collections::HashSet;

pub(super) fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

/// Date de début de la semaine `week` (départ + 7 jours × week).
pub(super) fn week_start(start: NaiveDate, week: u32) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::from(week) * 7))
}

/// Parse une date de départ `YYYY-MM-DD`.
pub fn parse_start_date(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidStartDate(raw.to_string()))
}

/// Vérifie qu'un roster est utilisable : non vide, noms non vides et uniques.
pub fn validate_roster(roster: &Roster) -> Result<(), InputError> {
    if roster.is_empty() {
        return Err(InputError::EmptyRoster);
    }
    let mut seen = HashSet::with_capacity(roster.len());
    for person in &roster.people {
        if person.name().trim().is_empty() {
            return Err(InputError::EmptyName);
        }
        if !seen.insert(&person.id) {
            return Err(InputError::DuplicatePerson(person.name().to_string()));
        }
    }
    Ok(())
}
