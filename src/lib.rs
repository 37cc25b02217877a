#![forbid(unsafe_code)]
//! Permanence — génération de tableaux de permanence hebdomadaires à deux rôles.
//!
//! - Deux files (first / second priority) qui tournent chaque semaine.
//! - Sélection équitable : la plus longue attente d'abord, tirage seulement en cas d'égalité.
//! - Espacement minimal entre deux permanences ; intégration progressive des nouveaux.
//! - Source aléatoire injectée : même graine, même tableau.
//! - Import CSV / export CSV-JSON et rendu texte en dehors du cœur.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;

pub use model::{Person, PersonId, Role, Roster, Schedule, ScheduleWeek};
pub use report::{ReportRenderer, TextReport};
pub use scheduler::{
    select_longest_waiting, Candidate, Exhausted, Generation, InputError, IntervalExtreme,
    IntervalHistory, IntervalSummary, Rotation, RotationOptions, RotationQueue, SchedError,
    Scheduler, WaitInterval, DEFAULT_WEEKS,
};
