use super::selection::WaitInterval;
use super::util;
use crate::model::PersonId;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Historique des intervalles (en jours) entre permanences successives, par personne.
///
/// Seules les personnes replanifiées au moins une fois y figurent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct IntervalHistory {
    by_person: BTreeMap<PersonId, Vec<i64>>,
}

impl IntervalHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, person: PersonId, days: i64) {
        self.by_person.entry(person).or_default().push(days);
    }

    pub fn get(&self, person: &PersonId) -> &[i64] {
        self.by_person.get(person).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_person.is_empty()
    }

    /// Parcours par ordre de nom.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &[i64])> {
        self.by_person.iter().map(|(id, v)| (id, v.as_slice()))
    }

    /// Plus long et plus court intervalle observés sur tout l'horizon.
    ///
    /// En cas d'égalité, la première personne (ordre des noms) est conservée.
    pub fn summary(&self) -> IntervalSummary {
        let mut longest: Option<IntervalExtreme> = None;
        let mut shortest: Option<IntervalExtreme> = None;

        for (person, intervals) in self.iter() {
            let (Some(&max), Some(&min)) = (intervals.iter().max(), intervals.iter().min())
            else {
                continue;
            };
            if longest.as_ref().map_or(true, |l| max > l.days) {
                longest = Some(IntervalExtreme::new(person.clone(), max));
            }
            if shortest.as_ref().map_or(true, |s| min < s.days) {
                shortest = Some(IntervalExtreme::new(person.clone(), min));
            }
        }

        IntervalSummary { longest, shortest }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntervalExtreme {
    pub person: PersonId,
    pub days: i64,
}

impl IntervalExtreme {
    pub fn new(person: PersonId, days: i64) -> Self {
        Self { person, days }
    }
}

/// Synthèse remise à la présentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntervalSummary {
    pub longest: Option<IntervalExtreme>,
    pub shortest: Option<IntervalExtreme>,
}

/// Dernières dates de permanence et historique, pour une génération.
#[derive(Debug, Clone, Default)]
pub(super) struct IntervalTracker {
    last_assigned: HashMap<PersonId, NaiveDate>,
    history: IntervalHistory,
}

impl IntervalTracker {
    pub(super) fn wait(&self, person: &PersonId, today: NaiveDate) -> WaitInterval {
        WaitInterval::since(self.last_assigned.get(person).copied(), today)
    }

    /// Enregistre une permanence à `today` ; renvoie l'intervalle ajouté, s'il y en a un.
    pub(super) fn record(&mut self, person: &PersonId, today: NaiveDate) -> Option<i64> {
        let previous = self.last_assigned.insert(person.clone(), today);
        let days = previous.map(|last| util::days_between(last, today))?;
        self.history.push(person.clone(), days);
        Some(days)
    }

    pub(super) fn history(&self) -> &IntervalHistory {
        &self.history
    }

    pub(super) fn into_history(self) -> IntervalHistory {
        self.history
    }
}
