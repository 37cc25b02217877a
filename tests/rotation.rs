#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate};
use permanence::{
    scheduler::parse_start_date, Exhausted, InputError, Person, PersonId, Role, Roster, Rotation,
    RotationOptions, SchedError, Scheduler,
};
use rand::rngs::{SmallRng, StdRng};
use rand::SeedableRng;
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn staff(old: usize, new: usize) -> Roster {
    (0..old)
        .map(|i| Person::new(format!("p{i:02}")))
        .chain((0..new).map(|i| Person::newcomer(format!("n{i:02}"))))
        .collect()
}

#[test]
fn every_week_names_two_distinct_people() {
    let roster = staff(22, 2);
    let scheduler = Scheduler::default();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let generation = scheduler
            .generate(&roster, date(2024, 1, 1), 52, &mut rng)
            .unwrap();
        assert_eq!(generation.schedule.len(), 52);
        for (i, week) in generation.schedule.iter().enumerate() {
            assert_eq!(week.week as usize, i);
            assert_eq!(week.date, date(2024, 1, 1) + Duration::weeks(i as i64));
            assert_ne!(week.first_priority, week.second_priority);
        }
    }
}

#[test]
fn assignments_respect_min_spacing_and_match_history() {
    let roster = staff(22, 2);
    let scheduler = Scheduler::default();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let generation = scheduler
            .generate(&roster, date(2024, 3, 4), 52, &mut rng)
            .unwrap();
        for person in &roster.people {
            let dates: Vec<NaiveDate> = generation
                .schedule
                .assignments_of(&person.id)
                .map(|(w, _)| w.date)
                .collect();
            let gaps: Vec<i64> = dates
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).num_days())
                .collect();
            assert!(gaps.iter().all(|g| *g >= 30), "{}: {gaps:?}", person.name());
            assert_eq!(generation.intervals.get(&person.id), gaps.as_slice());
        }
    }
}

#[test]
fn newcomers_wait_for_onboarding_and_serve_second_first() {
    let roster = staff(22, 2);
    let scheduler = Scheduler::default();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let generation = scheduler
            .generate(&roster, date(2024, 1, 1), 52, &mut rng)
            .unwrap();
        for newcomer in roster.newcomers() {
            let assignments: Vec<_> = generation.schedule.assignments_of(&newcomer.id).collect();
            assert!(!assignments.is_empty(), "{} never assigned", newcomer.name());
            assert!(assignments.iter().all(|(w, _)| w.week >= 26));
            assert_eq!(assignments[0].1, Role::Secondary);
        }
    }
}

#[test]
fn queues_cover_roster_at_every_week_boundary() {
    let roster = staff(20, 3);
    let everyone: HashSet<PersonId> = roster.people.iter().map(|p| p.id.clone()).collect();
    let opts = RotationOptions {
        newcomer_wait_weeks: 4,
        ..RotationOptions::default()
    };

    for seed in 0..10 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut rotation = Rotation::new(&roster, date(2024, 1, 1), opts, &mut rng).unwrap();
        for _ in 0..40 {
            let primary: HashSet<PersonId> =
                rotation.queue(Role::Primary).iter().cloned().collect();
            let secondary: HashSet<PersonId> =
                rotation.queue(Role::Secondary).iter().cloned().collect();
            assert!(primary.is_disjoint(&secondary));
            assert_eq!(&primary | &secondary, everyone);
            assert_eq!(
                rotation.queue(Role::Primary).len() + rotation.queue(Role::Secondary).len(),
                roster.len()
            );

            rotation.advance(&mut rng).unwrap();
        }
    }
}

#[test]
fn same_seed_same_schedule() {
    let roster = staff(18, 2);
    let scheduler = Scheduler::default();
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        scheduler
            .generate(&roster, date(2024, 1, 1), 40, &mut rng)
            .unwrap()
    };
    let a = run(42);
    let b = run(42);
    assert_eq!(a, b);
    assert_eq!(a.summary(), b.summary());
}

#[test]
fn newcomer_is_kept_out_of_week_one() {
    let roster: Roster = [
        Person::new("A"),
        Person::new("B"),
        Person::newcomer("C"),
        Person::new("D"),
    ]
    .into_iter()
    .collect();
    let regulars = ["A", "B", "D"].map(PersonId::new);
    let scheduler = Scheduler::default();

    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let generation = scheduler
            .generate(&roster, date(2024, 1, 1), 1, &mut rng)
            .unwrap();
        let week = &generation.schedule.weeks[0];
        assert!(regulars.contains(&week.first_priority));
        assert!(regulars.contains(&week.second_priority));
    }
}

#[test]
fn spacing_shortage_fails_at_first_unsatisfiable_week() {
    let roster: Roster = ["A", "B", "C", "D"].into_iter().map(Person::new).collect();
    let scheduler = Scheduler::default();

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert!(scheduler
            .generate(&roster, date(2024, 1, 1), 2, &mut rng)
            .is_ok());

        let mut rng = StdRng::seed_from_u64(seed);
        let err = scheduler
            .generate(&roster, date(2024, 1, 1), 3, &mut rng)
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(
            err,
            SchedError::InsufficientPersonnel {
                week: 2,
                exhausted: Exhausted::Both,
                eligible_first: 0,
                eligible_second: 0,
            }
        );
    }
}

#[test]
fn single_exhausted_queue_is_identified() {
    let roster: Roster = ["A", "B", "C"].into_iter().map(Person::new).collect();
    let scheduler = Scheduler::default();

    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let err = scheduler
            .generate(&roster, date(2024, 1, 1), 2, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            SchedError::InsufficientPersonnel {
                week: 1,
                exhausted: Exhausted::Primary,
                eligible_first: 0,
                eligible_second: 1,
            }
        );
    }

    // une seule ancienne et un nouveau encore en intégration
    let pair: Roster = [Person::new("A"), Person::newcomer("N")].into_iter().collect();
    let opts = RotationOptions {
        min_interval_days: 0,
        ..RotationOptions::default()
    };
    let mut seen_secondary = false;
    for seed in 0..32 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut rotation = Rotation::new(&pair, date(2024, 1, 1), opts, &mut rng).unwrap();
        let expected = if rotation.queue(Role::Primary).is_empty() {
            SchedError::InsufficientPersonnel {
                week: 0,
                exhausted: Exhausted::Primary,
                eligible_first: 0,
                eligible_second: 1,
            }
        } else {
            seen_secondary = true;
            SchedError::InsufficientPersonnel {
                week: 0,
                exhausted: Exhausted::Secondary,
                eligible_first: 1,
                eligible_second: 0,
            }
        };
        assert_eq!(rotation.advance(&mut rng).unwrap_err(), expected);
        assert!(rotation.schedule().is_empty());
    }
    assert!(seen_secondary);
}

#[test]
fn stepping_past_the_calendar_is_fatal() {
    let roster = staff(6, 0);
    let mut rng = SmallRng::seed_from_u64(5);
    let mut rotation =
        Rotation::new(&roster, NaiveDate::MAX, RotationOptions::default(), &mut rng).unwrap();

    let err = rotation.advance(&mut rng).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(
        err,
        SchedError::CalendarOverflow {
            week: 0,
            date: NaiveDate::MAX,
        }
    );
    assert!(rotation.schedule().is_empty());
}

#[test]
fn newcomer_stays_secondary_until_second_service() {
    let mut roster = staff(16, 0);
    roster.people.push(Person::newcomer("rookie"));
    let rookie = PersonId::new("rookie");
    let opts = RotationOptions {
        newcomer_wait_weeks: 0,
        ..RotationOptions::default()
    };

    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut rotation = Rotation::new(&roster, date(2024, 1, 1), opts, &mut rng).unwrap();
        let mut services = 0;

        while services < 2 && rotation.week() < 80 {
            assert!(!rotation.queue(Role::Primary).contains(&rookie));
            let week = rotation.advance(&mut rng).unwrap().clone();
            match week.role_of(&rookie) {
                Some(Role::Secondary) => services += 1,
                Some(Role::Primary) => panic!("rookie promoted before qualifying"),
                None => continue,
            }
            if services == 1 {
                assert!(rotation.has_served_secondary(&rookie));
                assert!(rotation.queue(Role::Secondary).contains(&rookie));
            }
        }

        assert_eq!(services, 2, "seed {seed}");
        assert!(rotation.queue(Role::Primary).contains(&rookie));
        assert!(!rotation.queue(Role::Secondary).contains(&rookie));
    }
}

#[test]
fn invalid_input_is_rejected_before_generation() {
    let scheduler = Scheduler::default();
    let mut rng = SmallRng::seed_from_u64(0);
    let start = date(2024, 1, 1);

    let err = scheduler
        .generate(&Roster::default(), start, 4, &mut rng)
        .unwrap_err();
    assert_eq!(err, SchedError::Input(InputError::EmptyRoster));
    assert!(!err.is_fatal());

    let dupes: Roster = ["a", "b", "a"].into_iter().map(Person::new).collect();
    let err = scheduler.generate(&dupes, start, 4, &mut rng).unwrap_err();
    assert_eq!(
        err,
        SchedError::Input(InputError::DuplicatePerson("a".into()))
    );

    let blank: Roster = ["a", " "].into_iter().map(Person::new).collect();
    let err = scheduler.generate(&blank, start, 4, &mut rng).unwrap_err();
    assert_eq!(err, SchedError::Input(InputError::EmptyName));

    let err = scheduler.generate(&staff(6, 0), start, 0, &mut rng).unwrap_err();
    assert_eq!(err, SchedError::Input(InputError::NonPositiveWeeks));

    let err = scheduler
        .generate(&staff(6, 0), NaiveDate::MAX, 1, &mut rng)
        .unwrap_err();
    assert!(matches!(
        err,
        SchedError::Input(InputError::HorizonOverflow { weeks: 1, .. })
    ));

    assert_eq!(parse_start_date(" 2024-01-01 "), Ok(start));
    assert_eq!(
        parse_start_date("2024-13-01"),
        Err(InputError::InvalidStartDate("2024-13-01".into()))
    );
}
