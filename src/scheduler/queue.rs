use super::types::SchedError;
use crate::model::{Person, PersonId, Role, Roster};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};

/// File FIFO de personnes, avec retrait par valeur.
///
/// Chaque entrée porte un ticket ; l'index `members` donne le ticket vivant
/// de chaque personne. Un retrait ne touche que l'index, les entrées mortes
/// sont purgées en tête ou par compaction.
#[derive(Debug, Clone, Default)]
pub struct RotationQueue {
    entries: VecDeque<(u64, PersonId)>,
    members: HashMap<PersonId, u64>,
    next_ticket: u64,
}

impl RotationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.members.contains_key(id)
    }

    /// Ajoute en fin de file. Renvoie `false` si la personne y est déjà.
    pub fn push_back(&mut self, id: PersonId) -> bool {
        if self.members.contains_key(&id) {
            return false;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.members.insert(id.clone(), ticket);
        self.entries.push_back((ticket, id));
        true
    }

    /// Retire `id` où qu'il soit dans la file. Renvoie `false` s'il était absent.
    pub fn remove(&mut self, id: &PersonId) -> bool {
        if self.members.remove(id).is_none() {
            return false;
        }
        self.compact();
        true
    }

    /// Membres vivants, dans l'ordre FIFO.
    pub fn iter(&self) -> impl Iterator<Item = &PersonId> + '_ {
        self.entries
            .iter()
            .filter(move |(ticket, id)| self.members.get(id) == Some(ticket))
            .map(|(_, id)| id)
    }

    pub fn to_vec(&self) -> Vec<PersonId> {
        self.iter().cloned().collect()
    }

    fn is_live(&self, ticket: u64, id: &PersonId) -> bool {
        self.members.get(id) == Some(&ticket)
    }

    fn compact(&mut self) {
        while let Some((ticket, id)) = self.entries.front() {
            if self.is_live(*ticket, id) {
                break;
            }
            self.entries.pop_front();
        }
        if self.entries.len() > 2 * self.members.len() + 8 {
            let members = &self.members;
            self.entries.retain(|(ticket, id)| members.get(id) == Some(ticket));
        }
    }
}

/// État des deux files pendant une génération.
#[derive(Debug, Clone)]
pub struct RotationState {
    roster: Vec<PersonId>,
    primary: RotationQueue,
    secondary: RotationQueue,
    newcomers: HashSet<PersonId>,
    served_secondary: HashSet<PersonId>,
}

impl RotationState {
    /// Mélange le roster puis le coupe en deux. Les nouveaux tirés dans la
    /// première moitié rejoignent la fin de la file secondaire.
    pub(super) fn initialize<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Self {
        let mut shuffled: Vec<&Person> = roster.people.iter().collect();
        shuffled.shuffle(rng);
        let (first_half, second_half) = shuffled.split_at(shuffled.len() / 2);

        let mut primary = RotationQueue::new();
        let mut secondary = RotationQueue::new();
        for person in second_half {
            secondary.push_back(person.id.clone());
        }
        for person in first_half {
            if person.is_new {
                secondary.push_back(person.id.clone());
            } else {
                primary.push_back(person.id.clone());
            }
        }

        Self {
            roster: roster.people.iter().map(|p| p.id.clone()).collect(),
            primary,
            secondary,
            newcomers: roster.newcomers().map(|p| p.id.clone()).collect(),
            served_secondary: HashSet::new(),
        }
    }

    pub fn queue(&self, role: Role) -> &RotationQueue {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
        }
    }

    pub(super) fn queue_mut(&mut self, role: Role) -> &mut RotationQueue {
        match role {
            Role::Primary => &mut self.primary,
            Role::Secondary => &mut self.secondary,
        }
    }

    pub fn is_newcomer(&self, id: &PersonId) -> bool {
        self.newcomers.contains(id)
    }

    pub fn has_served_secondary(&self, id: &PersonId) -> bool {
        self.served_secondary.contains(id)
    }

    /// Bascule le verrou d'un nouveau. Renvoie `true` si la bascule a lieu maintenant.
    pub(super) fn mark_served_secondary(&mut self, id: &PersonId) -> bool {
        self.is_newcomer(id) && self.served_secondary.insert(id.clone())
    }

    /// Aucun nom dans les deux files, aucun nom hors des deux files.
    pub(super) fn check_consistency(&self, week: u32) -> Result<(), SchedError> {
        let mut duplicated: Vec<String> = self
            .primary
            .iter()
            .filter(|id| self.secondary.contains(id))
            .map(|id| id.as_str().to_string())
            .collect();
        let mut missing: Vec<String> = self
            .roster
            .iter()
            .filter(|id| !self.primary.contains(id) && !self.secondary.contains(id))
            .map(|id| id.as_str().to_string())
            .collect();

        if duplicated.is_empty() && missing.is_empty() {
            return Ok(());
        }
        duplicated.sort();
        missing.sort();
        Err(SchedError::Consistency {
            week,
            duplicated,
            missing,
        })
    }
}
