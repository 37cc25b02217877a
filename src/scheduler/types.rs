use crate::model::Role;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Horizon par défaut (en semaines)
pub const DEFAULT_WEEKS: u32 = 26;

/// Options de rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOptions {
    /// Espacement minimal entre deux permanences d'une même personne.
    pub min_interval_days: u32,
    /// Semaines écoulées depuis le départ avant qu'un nouveau puisse être planifié.
    pub newcomer_wait_weeks: u32,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            min_interval_days: 30,
            newcomer_wait_weeks: 26,
        }
    }
}

/// File(s) sans candidat éligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhausted {
    Primary,
    Secondary,
    Both,
}

impl Exhausted {
    pub(crate) fn from_counts(eligible_first: usize, eligible_second: usize) -> Option<Self> {
        match (eligible_first, eligible_second) {
            (0, 0) => Some(Exhausted::Both),
            (0, _) => Some(Exhausted::Primary),
            (_, 0) => Some(Exhausted::Secondary),
            _ => None,
        }
    }

    pub fn includes(self, role: Role) -> bool {
        matches!(
            (self, role),
            (Exhausted::Both, _)
                | (Exhausted::Primary, Role::Primary)
                | (Exhausted::Secondary, Role::Secondary)
        )
    }
}

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exhausted::Primary => f.write_str("first priority queue"),
            Exhausted::Secondary => f.write_str("second priority queue"),
            Exhausted::Both => f.write_str("both queues"),
        }
    }
}

/// Entrées refusées avant toute génération.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("roster is empty")]
    EmptyRoster,
    #[error("roster contains an empty person name")]
    EmptyName,
    #[error("duplicate person name in roster: {0}")]
    DuplicatePerson(String),
    #[error("week count must be positive")]
    NonPositiveWeeks,
    #[error("invalid start date (expected YYYY-MM-DD): {0}")]
    InvalidStartDate(String),
    #[error("horizon of {weeks} week(s) starting {start} is out of calendar range")]
    HorizonOverflow { start: NaiveDate, weeks: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(
        "queue invariant broken at week {}: in both queues {duplicated:?}, in neither {missing:?}",
        .week + 1
    )]
    Consistency {
        week: u32,
        duplicated: Vec<String>,
        missing: Vec<String>,
    },
    #[error(
        "not enough eligible personnel at week {} ({exhausted} exhausted; eligible first={eligible_first}, second={eligible_second})",
        .week + 1
    )]
    InsufficientPersonnel {
        week: u32,
        exhausted: Exhausted,
        eligible_first: usize,
        eligible_second: usize,
    },
    #[error("week {} starting {date} runs past the supported calendar range", .week + 1)]
    CalendarOverflow { week: u32, date: NaiveDate },
}

impl SchedError {
    /// `false` pour les erreurs d'entrée corrigeables par l'appelant.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SchedError::Input(_))
    }
}
