//! Planning stats service integration tests
//!
//! Exercises the composed capacity + workload pipeline against in-memory
//! repositories.

mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use support::repositories::{
    MockAbsenceRepository, MockEmployeeRepository, MockInterventionRepository,
};
use support::{absence, admin_ctx, employee, intervention};
use vitraplan_core::PlanningService;
use vitraplan_domain::{DayLoadStatus, VitraError};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn service(
    employees: Vec<vitraplan_domain::Employee>,
    absences: Vec<vitraplan_domain::Absence>,
    interventions: Vec<vitraplan_domain::Intervention>,
) -> PlanningService {
    PlanningService::new(
        Arc::new(MockEmployeeRepository::new(employees)),
        Arc::new(MockAbsenceRepository::new(absences)),
        Arc::new(MockInterventionRepository::new(interventions)),
    )
}

#[tokio::test]
async fn daily_stats_for_a_quiet_day() {
    // 35h + 40h contracts, two short jobs: 2.5 planned against 10.71 capacity
    let planning = service(
        vec![employee(35.0), employee(40.0)],
        vec![],
        vec![
            intervention("2024-06-10 09:00", "2024-06-10 11:00"),
            intervention("2024-06-10 13:00", "2024-06-10 13:30"),
        ],
    );

    let stats = planning.daily_stats(&admin_ctx(3.0), date("2024-06-10")).await.unwrap();

    assert!((stats.capacity_hours - (35.0 / 7.0 + 40.0 / 7.0)).abs() < 1e-9);
    assert!((stats.planned_hours - 2.5).abs() < 1e-9);
    assert_eq!(stats.present_employees, 2);
    assert_eq!(stats.tolerance, 3.0);
    assert_eq!(stats.status, DayLoadStatus::Ok);
}

#[tokio::test]
async fn status_moves_through_the_tolerance_band() {
    // Two 35h contracts -> capacity exactly 10h; tolerance 2h
    let roster = vec![employee(35.0), employee(35.0)];
    let ctx = admin_ctx(2.0);

    let cases = [
        ("2024-06-10 08:00", "2024-06-10 17:00", DayLoadStatus::Ok),       // 9h
        ("2024-06-10 08:00", "2024-06-10 19:00", DayLoadStatus::Warning),  // 11h
        ("2024-06-10 07:00", "2024-06-10 20:00", DayLoadStatus::Overload), // 13h
    ];

    for (start, end, expected) in cases {
        let planning = service(roster.clone(), vec![], vec![intervention(start, end)]);
        let stats = planning.daily_stats(&ctx, date("2024-06-10")).await.unwrap();
        assert_eq!(stats.status, expected, "planned {} - {}", start, end);
    }
}

#[tokio::test]
async fn absent_employee_disappears_from_capacity() {
    let away = employee(38.0);
    let present = employee(35.0);
    let absences = vec![absence(away.id, "2024-06-10", "2024-06-14")];

    let planning = service(vec![away, present], absences, vec![]);
    let stats = planning.daily_stats(&admin_ctx(3.0), date("2024-06-12")).await.unwrap();

    assert!((stats.capacity_hours - 5.0).abs() < 1e-9);
    assert_eq!(stats.present_employees, 1);
}

#[tokio::test]
async fn range_stats_key_set_is_exactly_the_range() {
    let planning = service(vec![employee(35.0)], vec![], vec![]);

    let by_date = planning
        .range_stats(&admin_ctx(3.0), date("2024-06-10"), date("2024-06-13"))
        .await
        .unwrap();

    let keys: Vec<NaiveDate> = by_date.keys().copied().collect();
    assert_eq!(
        keys,
        vec![date("2024-06-10"), date("2024-06-11"), date("2024-06-12"), date("2024-06-13")]
    );
}

#[tokio::test]
async fn single_day_range_agrees_with_daily_stats() {
    let planning = service(
        vec![employee(35.0), employee(40.0)],
        vec![],
        vec![intervention("2024-06-10 09:00", "2024-06-10 11:00")],
    );
    let ctx = admin_ctx(3.0);
    let day = date("2024-06-10");

    let daily = planning.daily_stats(&ctx, day).await.unwrap();
    let ranged = planning.range_stats(&ctx, day, day).await.unwrap();

    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[&day], daily);
}

#[tokio::test]
async fn repeated_queries_are_identical() {
    let planning = service(
        vec![employee(35.0), employee(40.0)],
        vec![],
        vec![intervention("2024-06-10 09:00", "2024-06-10 11:00")],
    );
    let ctx = admin_ctx(3.0);
    let day = date("2024-06-10");

    let first = planning.daily_stats(&ctx, day).await.unwrap();
    let second = planning.daily_stats(&ctx, day).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let planning = service(vec![employee(35.0)], vec![], vec![]);

    let result =
        planning.range_stats(&admin_ctx(3.0), date("2024-06-13"), date("2024-06-10")).await;

    assert!(matches!(result, Err(VitraError::Validation(_))));
}

#[tokio::test]
async fn late_evening_jobs_stay_on_their_local_day() {
    // 23:00-23:45 Brussels is 21:00 UTC; a UTC-bucketing bug would misplace it
    let planning = service(
        vec![employee(35.0)],
        vec![],
        vec![intervention("2024-06-10 23:00", "2024-06-10 23:45")],
    );
    let ctx = admin_ctx(3.0);

    let on_day = planning.daily_stats(&ctx, date("2024-06-10")).await.unwrap();
    let next_day = planning.daily_stats(&ctx, date("2024-06-11")).await.unwrap();

    assert!((on_day.planned_hours - 0.75).abs() < 1e-9);
    assert_eq!(next_day.planned_hours, 0.0);
}
