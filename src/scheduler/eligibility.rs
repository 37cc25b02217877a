use super::intervals::IntervalTracker;
use super::queue::RotationState;
use super::selection::{Candidate, WaitInterval};
use super::RotationOptions;
use crate::model::{PersonId, Role};
use chrono::NaiveDate;
use std::fmt;
use tracing::trace;

/// Raison d'inéligibilité, dans l'ordre d'évaluation des règles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Ineligibility {
    AwaitingSecondaryService,
    Onboarding { weeks_elapsed: u32, required: u32 },
    TooRecent { days: i64, required: u32 },
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::AwaitingSecondaryService => {
                f.write_str("newcomer has not served second priority yet")
            }
            Ineligibility::Onboarding {
                weeks_elapsed,
                required,
            } => write!(
                f,
                "newcomer onboarding ({weeks_elapsed}/{required} weeks elapsed)"
            ),
            Ineligibility::TooRecent { days, required } => {
                write!(f, "last assigned {days} days ago (minimum {required})")
            }
        }
    }
}

/// Semaine en cours d'évaluation.
#[derive(Debug, Clone, Copy)]
pub(super) struct WeekContext {
    pub week: u32,
    pub today: NaiveDate,
    pub opts: RotationOptions,
}

pub(super) fn assess(
    state: &RotationState,
    tracker: &IntervalTracker,
    person: &PersonId,
    role: Role,
    ctx: WeekContext,
) -> Result<WaitInterval, Ineligibility> {
    let newcomer = state.is_newcomer(person);

    if newcomer && role == Role::Primary && !state.has_served_secondary(person) {
        return Err(Ineligibility::AwaitingSecondaryService);
    }
    if newcomer && ctx.week < ctx.opts.newcomer_wait_weeks {
        return Err(Ineligibility::Onboarding {
            weeks_elapsed: ctx.week,
            required: ctx.opts.newcomer_wait_weeks,
        });
    }

    let wait = tracker.wait(person, ctx.today);
    match wait {
        WaitInterval::Days(days) if !wait.at_least(ctx.opts.min_interval_days) => {
            Err(Ineligibility::TooRecent {
                days,
                required: ctx.opts.min_interval_days,
            })
        }
        _ => Ok(wait),
    }
}

/// Membres éligibles de la file `role`, dans l'ordre de la file.
pub(super) fn eligible_candidates(
    state: &RotationState,
    tracker: &IntervalTracker,
    role: Role,
    ctx: WeekContext,
) -> Vec<Candidate> {
    state
        .queue(role)
        .iter()
        .filter_map(|person| match assess(state, tracker, person, role, ctx) {
            Ok(wait) => {
                trace!(week = ctx.week, %role, person = %person, %wait, "eligible");
                Some(Candidate::new(person.clone(), wait))
            }
            Err(reason) => {
                trace!(week = ctx.week, %role, person = %person, %reason, "not eligible");
                None
            }
        })
        .collect()
}
