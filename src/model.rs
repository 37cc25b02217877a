use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifiant fort pour Person (le nom, unique dans le roster)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Personne (membre de la permanence)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Person {
    pub id: PersonId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_new: bool,
}

impl Person {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            id: PersonId::new(name),
            is_new: false,
        }
    }

    /// Nouvel arrivant : soumis à la période d'intégration.
    pub fn newcomer<S: AsRef<str>>(name: S) -> Self {
        Self {
            id: PersonId::new(name),
            is_new: true,
        }
    }

    pub fn name(&self) -> &str {
        self.id.as_str()
    }
}

/// Les deux rôles pourvus chaque semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// First priority
    Primary,
    /// Second priority
    Secondary,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Primary => "first priority",
            Role::Secondary => "second priority",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roster d'entrée, dans l'ordre fourni par le chargeur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    pub people: Vec<Person>,
}

impl Roster {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }
    pub fn len(&self) -> usize {
        self.people.len()
    }
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
    pub fn find_person<'a>(&'a self, id: &PersonId) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn find_person_by_name<'a>(&'a self, name: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.name() == name)
    }
    pub fn newcomers(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|p| p.is_new)
    }
}

impl FromIterator<Person> for Roster {
    fn from_iter<I: IntoIterator<Item = Person>>(iter: I) -> Self {
        Self {
            people: iter.into_iter().collect(),
        }
    }
}

/// Une semaine du tableau : date de début et les deux titulaires.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleWeek {
    /// Index de semaine (0 = semaine de départ)
    pub week: u32,
    pub date: NaiveDate,
    pub first_priority: PersonId,
    pub second_priority: PersonId,
}

impl ScheduleWeek {
    pub fn assignee(&self, role: Role) -> &PersonId {
        match role {
            Role::Primary => &self.first_priority,
            Role::Secondary => &self.second_priority,
        }
    }

    /// Rôle tenu par `person` cette semaine, s'il y en a un.
    pub fn role_of(&self, person: &PersonId) -> Option<Role> {
        if &self.first_priority == person {
            Some(Role::Primary)
        } else if &self.second_priority == person {
            Some(Role::Secondary)
        } else {
            None
        }
    }
}

/// Tableau complet, ordonné chronologiquement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Schedule {
    pub weeks: Vec<ScheduleWeek>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.weeks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleWeek> {
        self.weeks.iter()
    }
    pub(crate) fn push(&mut self, week: ScheduleWeek) {
        self.weeks.push(week);
    }

    /// Semaines où `person` est de permanence, avec le rôle tenu.
    pub fn assignments_of<'a>(
        &'a self,
        person: &'a PersonId,
    ) -> impl Iterator<Item = (&'a ScheduleWeek, Role)> + 'a {
        self.weeks
            .iter()
            .filter_map(move |w| w.role_of(person).map(|role| (w, role)))
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleWeek;
    type IntoIter = std::slice::Iter<'a, ScheduleWeek>;

    fn into_iter(self) -> Self::IntoIter {
        self.weeks.iter()
    }
}
