use super::util;
use crate::model::PersonId;
use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fmt;

/// Attente depuis la dernière permanence.
///
/// `Never` (jamais planifié) est plus grand que toute attente en jours, ce qui
/// rend la personne toujours éligible pour l'espacement et prioritaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WaitInterval {
    Days(i64),
    Never,
}

impl WaitInterval {
    pub fn since(last_assigned: Option<NaiveDate>, today: NaiveDate) -> Self {
        match last_assigned {
            Some(last) => WaitInterval::Days(util::days_between(last, today)),
            None => WaitInterval::Never,
        }
    }

    pub fn at_least(self, min_days: u32) -> bool {
        match self {
            WaitInterval::Never => true,
            WaitInterval::Days(days) => days >= i64::from(min_days),
        }
    }

    pub fn days(self) -> Option<i64> {
        match self {
            WaitInterval::Days(days) => Some(days),
            WaitInterval::Never => None,
        }
    }
}

impl fmt::Display for WaitInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitInterval::Days(days) => write!(f, "{days} days"),
            WaitInterval::Never => f.write_str("never assigned"),
        }
    }
}

/// Personne éligible pour un rôle, avec son attente courante.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: PersonId,
    pub wait: WaitInterval,
}

impl Candidate {
    pub fn new(id: PersonId, wait: WaitInterval) -> Self {
        Self { id, wait }
    }
}

/// Choisit la personne qui attend depuis le plus longtemps.
///
/// Le tirage aléatoire ne sert qu'à départager les égalités exactes, de façon
/// uniforme. `None` seulement si `candidates` est vide.
pub fn select_longest_waiting<'a, R: Rng + ?Sized>(
    candidates: &'a [Candidate],
    rng: &mut R,
) -> Option<&'a Candidate> {
    let longest = candidates.iter().map(|c| c.wait).max()?;
    let tied: Vec<&Candidate> = candidates.iter().filter(|c| c.wait == longest).collect();
    tied.choose(rng).copied()
}
