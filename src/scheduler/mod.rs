mod eligibility;
mod intervals;
mod queue;
mod rotation;
mod selection;
mod types;
mod util;

pub use intervals::{IntervalExtreme, IntervalHistory, IntervalSummary};
pub use queue::RotationQueue;
pub use selection::{select_longest_waiting, Candidate, WaitInterval};
pub use types::{Exhausted, InputError, RotationOptions, SchedError, DEFAULT_WEEKS};
pub use util::{parse_start_date, validate_roster};

use crate::model::{PersonId, Role, Roster, Schedule, ScheduleWeek};
use chrono::NaiveDate;
use eligibility::WeekContext;
use intervals::IntervalTracker;
use queue::RotationState;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Résultat d'une génération complète.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Generation {
    pub schedule: Schedule,
    pub intervals: IntervalHistory,
}

impl Generation {
    pub fn summary(&self) -> IntervalSummary {
        self.intervals.summary()
    }
}

/// Scheduler : options de rotation, sans état entre deux générations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    opts: RotationOptions,
}

impl Scheduler {
    pub fn new(opts: RotationOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> RotationOptions {
        self.opts
    }

    /// Génère `weeks` semaines à partir de `start`.
    ///
    /// Les entrées invalides sont refusées avant tout tirage. Une erreur fatale
    /// en cours de route interrompt la génération sans tableau partiel.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        start: NaiveDate,
        weeks: u32,
        rng: &mut R,
    ) -> Result<Generation, SchedError> {
        if weeks == 0 {
            return Err(InputError::NonPositiveWeeks.into());
        }
        if util::week_start(start, weeks).is_none() {
            return Err(InputError::HorizonOverflow { start, weeks }.into());
        }

        let mut rotation = Rotation::new(roster, start, self.opts, rng)?;
        info!(
            people = roster.len(),
            newcomers = roster.newcomers().count(),
            %start,
            weeks,
            "generating rotation"
        );
        while rotation.schedule().len() < weeks as usize {
            rotation.advance(rng)?;
        }
        Ok(rotation.finish())
    }
}

/// Génération en cours, avançable semaine par semaine.
#[derive(Debug, Clone)]
pub struct Rotation {
    opts: RotationOptions,
    week: u32,
    today: NaiveDate,
    state: RotationState,
    tracker: IntervalTracker,
    schedule: Schedule,
}

impl Rotation {
    /// Valide le roster puis construit les deux files initiales.
    pub fn new<R: Rng + ?Sized>(
        roster: &Roster,
        start: NaiveDate,
        opts: RotationOptions,
        rng: &mut R,
    ) -> Result<Self, SchedError> {
        validate_roster(roster)?;
        let state = RotationState::initialize(roster, rng);
        debug!(
            primary = ?state.queue(Role::Primary).to_vec(),
            secondary = ?state.queue(Role::Secondary).to_vec(),
            "initial queues"
        );
        Ok(Self {
            opts,
            week: 0,
            today: start,
            state,
            tracker: IntervalTracker::default(),
            schedule: Schedule::default(),
        })
    }

    /// Index de la prochaine semaine à produire.
    pub fn week(&self) -> u32 {
        self.week
    }

    /// Date de la prochaine semaine à produire.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn queue(&self, role: Role) -> &RotationQueue {
        self.state.queue(role)
    }

    pub fn has_served_secondary(&self, person: &PersonId) -> bool {
        self.state.has_served_secondary(person)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn intervals(&self) -> &IntervalHistory {
        self.tracker.history()
    }

    /// Produit une semaine : contrôle des files, filtrage, sélection, rotation.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&ScheduleWeek, SchedError> {
        let week = self.week;
        if let Err(err) = self.state.check_consistency(week) {
            warn!(week, error = %err, "queue invariant broken");
            return Err(err);
        }
        let Some(next_date) = util::week_start(self.today, 1) else {
            let err = SchedError::CalendarOverflow {
                week,
                date: self.today,
            };
            warn!(week, error = %err, "calendar exhausted");
            return Err(err);
        };

        let ctx = WeekContext {
            week,
            today: self.today,
            opts: self.opts,
        };
        let eligible_first =
            eligibility::eligible_candidates(&self.state, &self.tracker, Role::Primary, ctx);
        let eligible_second =
            eligibility::eligible_candidates(&self.state, &self.tracker, Role::Secondary, ctx);

        let (first, second) = match (
            select_longest_waiting(&eligible_first, rng),
            select_longest_waiting(&eligible_second, rng),
        ) {
            (Some(first), Some(second)) => (first.clone(), second.clone()),
            _ => {
                let err = SchedError::InsufficientPersonnel {
                    week,
                    exhausted: Exhausted::from_counts(eligible_first.len(), eligible_second.len())
                        .unwrap_or(Exhausted::Both),
                    eligible_first: eligible_first.len(),
                    eligible_second: eligible_second.len(),
                };
                warn!(week, error = %err, "no eligible candidate");
                return Err(err);
            }
        };

        let outcome = rotation::rotate(
            &mut self.state,
            &mut self.tracker,
            &first.id,
            &second.id,
            self.today,
        );
        debug!(
            week,
            date = %self.today,
            first = %first.id,
            first_wait = %first.wait,
            second = %second.id,
            second_wait = %second.wait,
            ?outcome,
            "week assigned"
        );

        self.schedule.push(ScheduleWeek {
            week,
            date: self.today,
            first_priority: first.id,
            second_priority: second.id,
        });
        self.week += 1;
        self.today = next_date;

        let produced = self.schedule.weeks.len() - 1;
        Ok(&self.schedule.weeks[produced])
    }

    pub fn finish(self) -> Generation {
        Generation {
            schedule: self.schedule,
            intervals: self.tracker.into_history(),
        }
    }
}
