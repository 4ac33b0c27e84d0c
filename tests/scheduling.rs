use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use fuzzy_schedule::fuzzy::{knowledge, InferenceEngine};
use fuzzy_schedule::models::{hours_to_duration, Job, JobStatus, Machine};
use fuzzy_schedule::{workload, FuzzyScheduler, ScheduleError, SchedulingMode};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 8)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn engine() -> Arc<InferenceEngine> {
    Arc::new(knowledge::scheduling_engine().unwrap())
}

fn reference_scheduler() -> FuzzyScheduler {
    let (jobs, machines) = workload::reference_workload(t0()).unwrap();
    FuzzyScheduler::from_parts(engine(), jobs, machines, t0()).unwrap()
}

fn assert_consistent(jobs: &[Job]) {
    for job in jobs {
        let start = job.start_time().expect("start time");
        let completion = job.completion_time().expect("completion time");
        assert_eq!(completion, start + hours_to_duration(job.processing_time()));
        assert!(start >= job.arrival_time());
        assert!(job.assigned_machine_id().is_some());
    }
}

#[test]
fn test_end_to_end_three_jobs_two_machines() {
    let mut scheduler = FuzzyScheduler::new(engine(), t0());
    scheduler.add_machine(Machine::new("M1", "CNC Machine 1")).unwrap();
    scheduler.add_machine(Machine::new("M2", "CNC Machine 2")).unwrap();
    scheduler
        .add_jobs(vec![
            // Short and due soon.
            Job::new("A", "Urgent bracket", 10.0, t0() + Duration::hours(12), t0(), "M1").unwrap(),
            // Long with plenty of time.
            Job::new("B", "Large frame", 80.0, t0() + Duration::days(60), t0(), "M1").unwrap(),
            Job::new("C", "Housing", 30.0, t0() + Duration::hours(90), t0(), "M2").unwrap(),
        ])
        .unwrap();

    let placed = scheduler.schedule(SchedulingMode::FuzzyPriority);
    assert_eq!(placed.len(), 3);
    assert_consistent(&placed);

    let a = scheduler.job("A").unwrap();
    let b = scheduler.job("B").unwrap();
    assert!(a.priority_score() >= b.priority_score());
    // A ranks first on the shared machine.
    assert_eq!(a.start_time(), Some(t0()));
    assert_eq!(b.start_time(), Some(t0() + Duration::hours(10)));

    for job in scheduler.jobs() {
        assert_eq!(job.status(), JobStatus::Scheduled);
        assert!((0.0..=100.0).contains(&job.priority_score()));
    }
}

#[test]
fn test_fcfs_emits_arrival_order() {
    let mut scheduler = reference_scheduler();
    let placed = scheduler.schedule(SchedulingMode::Fcfs);
    assert_eq!(placed.len(), 8);
    assert!(placed
        .windows(2)
        .all(|w| w[0].arrival_time() <= w[1].arrival_time()));
    assert!(placed.iter().all(|j| j.priority_score() == 50.0));
    assert_consistent(&placed);
}

#[test]
fn test_edd_emits_due_date_order() {
    let mut scheduler = reference_scheduler();
    let placed = scheduler.schedule(SchedulingMode::Edd);
    assert_eq!(placed.len(), 8);
    assert!(placed.windows(2).all(|w| w[0].due_date() <= w[1].due_date()));
    assert_eq!(placed[0].id(), "J005");
    for job in &placed {
        assert_eq!(job.priority_score(), job.urgency(t0()) * 10.0);
    }
}

#[test]
fn test_fuzzy_emits_descending_priority() {
    let mut scheduler = reference_scheduler();
    let placed = scheduler.schedule(SchedulingMode::FuzzyPriority);
    assert_eq!(placed.len(), 8);
    assert!(placed
        .windows(2)
        .all(|w| w[0].priority_score() >= w[1].priority_score()));
}

#[test]
fn test_machines_never_overlap() {
    let mut scheduler = reference_scheduler();
    scheduler.schedule(SchedulingMode::FuzzyPriority);
    for machine in scheduler.machines() {
        let mut slots: Vec<_> = machine
            .job_ids()
            .iter()
            .map(|id| scheduler.job(id).unwrap())
            .map(|j| (j.start_time().unwrap(), j.completion_time().unwrap()))
            .collect();
        slots.sort();
        assert!(slots.windows(2).all(|w| w[0].1 <= w[1].0), "{}", machine.id());
    }
}

#[test]
fn test_reschedule_reproduces_count() {
    let mut scheduler = reference_scheduler();
    let first = scheduler.schedule(SchedulingMode::FuzzyPriority);
    let loads: Vec<f64> = scheduler
        .machines()
        .iter()
        .map(|m| m.total_processing_time())
        .collect();

    let second = scheduler.reschedule();
    assert_eq!(first.len(), second.len());
    assert_consistent(&second);
    let reloaded: Vec<f64> = scheduler
        .machines()
        .iter()
        .map(|m| m.total_processing_time())
        .collect();
    assert_eq!(loads, reloaded);
}

#[test]
fn test_unknown_mode_is_reported() {
    let mut scheduler = reference_scheduler();
    let err = scheduler.schedule_named("shortest_first").unwrap_err();
    assert_eq!(err, ScheduleError::UnknownMode("shortest_first".into()));
    assert_eq!(scheduler.summary().pending_jobs, 8);
}

#[test]
fn test_urgency_reference_points() {
    let job = Job::new("J", "x", 4.0, t0() + Duration::hours(200), t0(), "M1").unwrap();
    assert_eq!(job.urgency(t0() + Duration::hours(200)), 10.0);
    assert_eq!(job.urgency(t0() + Duration::hours(196)), 9.0);
    assert_eq!(job.urgency(t0()), 1.0);
}

#[test]
fn test_summary_of_reference_shop() {
    let mut scheduler = reference_scheduler();
    scheduler.schedule(SchedulingMode::FuzzyPriority);
    let summary = scheduler.summary();
    assert_eq!(summary.total_jobs, 8);
    assert_eq!(summary.scheduled_jobs, 8);
    assert_eq!(summary.pending_jobs, 0);
    assert_eq!(summary.total_machines, 3);
    assert!(summary.makespan_hours > 0.0);
    // M1 carries J001, J004, J006: 32 h of a 40 h horizon.
    assert!((summary.machine_utilization["M1"] - 0.8).abs() < 1e-10);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_jobs"], 8);
}

#[test]
fn test_compare_modes_on_random_workload() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let jobs = workload::random_workload(&mut rng, 30, &["M1", "M2", "M3"], t0()).unwrap();
    let machines = vec![
        Machine::new("M1", "CNC Machine 1"),
        Machine::new("M2", "CNC Machine 2"),
        Machine::new("M3", "Assembly Line 1").with_capacity(1.5),
    ];
    let scheduler = FuzzyScheduler::from_parts(engine(), jobs, machines, t0()).unwrap();

    let comparison = scheduler.compare_modes();
    assert_eq!(comparison.entries.len(), 3);
    for entry in &comparison.entries {
        assert_eq!(entry.summary.scheduled_jobs, 30);
        assert_eq!(entry.metrics.scheduled_jobs, 30);
        assert!((0.0..=100.0).contains(&entry.metrics.on_time_rate));
        assert!(entry.metrics.makespan_hours > 0.0);
    }
    assert!(comparison.best_by_makespan().is_some());
    assert_eq!(scheduler.summary().scheduled_jobs, 0);
}

#[test]
fn test_decoded_jobs_follow_construction_rules() {
    let bad = r#"{
        "id": "X1", "name": "Broken", "processing_time": -5.0,
        "due_date": "2024-01-08T00:00:00", "arrival_time": "2024-01-09T00:00:00",
        "required_machine_id": "M1"
    }"#;
    assert!(serde_json::from_str::<Job>(bad).is_err());

    let good = r#"{
        "id": "X2", "name": "Bracket", "processing_time": 5.0,
        "due_date": "2024-01-10T00:00:00", "arrival_time": "2024-01-08T08:00:00",
        "required_machine_id": "M1"
    }"#;
    let job: Job = serde_json::from_str(good).unwrap();
    let machine: Machine =
        serde_json::from_str(r#"{"id": "M1", "name": "CNC", "capacity": 1.0, "total_processing_time": 90.0}"#)
            .unwrap();

    let mut scheduler = FuzzyScheduler::new(engine(), t0());
    scheduler.add_machine(machine).unwrap();
    scheduler.add_job(job).unwrap();
    let placed = scheduler.schedule(SchedulingMode::Fcfs);
    assert_consistent(&placed);
    assert!((scheduler.machine("M1").unwrap().total_processing_time() - 5.0).abs() < 1e-10);
}

#[test]
fn test_unrepresentable_processing_time_is_rejected() {
    let err = Job::new("J", "x", 3.0e9, t0() + Duration::hours(1), t0(), "M1").unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidProcessingTime { .. }));
}
