use super::intervals::IntervalTracker;
use super::queue::RotationState;
use crate::model::{PersonId, Role};
use chrono::NaiveDate;
use tracing::debug;

/// Destination du titulaire second priority après sa semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SecondaryOutcome {
    /// Passage normal en file primaire.
    Promoted,
    /// Nouveau : première permanence secondaire, reste en file secondaire.
    Qualified,
}

/// Met à jour dates, historiques et files après la sélection de la semaine.
pub(super) fn rotate(
    state: &mut RotationState,
    tracker: &mut IntervalTracker,
    first: &PersonId,
    second: &PersonId,
    today: NaiveDate,
) -> SecondaryOutcome {
    for person in [first, second] {
        if let Some(days) = tracker.record(person, today) {
            debug!(person = %person, days, "interval recorded");
        }
    }

    let removed_first = state.queue_mut(Role::Primary).remove(first);
    debug_assert!(removed_first, "{first} selected outside the first priority queue");
    let removed_second = state.queue_mut(Role::Secondary).remove(second);
    debug_assert!(removed_second, "{second} selected outside the second priority queue");

    state.queue_mut(Role::Secondary).push_back(first.clone());

    // le verrou bascule ici : la permanence en cours est celle qui qualifie
    if state.mark_served_secondary(second) {
        state.queue_mut(Role::Secondary).push_back(second.clone());
        SecondaryOutcome::Qualified
    } else {
        state.queue_mut(Role::Primary).push_back(second.clone());
        SecondaryOutcome::Promoted
    }
}
