//! Sample workloads.
//!
//! [`reference_workload`] is a small fixed shop (three machines, eight jobs)
//! for demos and regression checks. [`random_workload`] generates larger
//! reproducible job sets for comparing modes.

use chrono::{Duration, NaiveDateTime};
use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::error::Result;
use crate::models::{hours_to_duration, Job, Machine};

/// (id, name, processing h, arrival offset h, due offset h, machine)
const REFERENCE_JOBS: [(&str, &str, f64, i64, i64, &str); 8] = [
    ("J001", "Engine Block Machining", 15.0, 0, 48, "M1"),
    ("J002", "Gear Assembly", 8.0, 2, 24, "M3"),
    ("J003", "Frame Welding", 20.0, 1, 72, "M2"),
    ("J004", "Component Finishing", 5.0, 3, 16, "M1"),
    ("J005", "Quality Inspection", 3.0, 4, 12, "M3"),
    ("J006", "Precision Cutting", 12.0, 5, 36, "M1"),
    ("J007", "Surface Treatment", 6.0, 6, 20, "M2"),
    ("J008", "Final Assembly", 10.0, 7, 30, "M3"),
];

/// The reference shop: machines M1..M3 and jobs J001..J008, timed relative
/// to `now`.
pub fn reference_workload(now: NaiveDateTime) -> Result<(Vec<Job>, Vec<Machine>)> {
    let machines = vec![
        Machine::new("M1", "CNC Machine 1"),
        Machine::new("M2", "CNC Machine 2"),
        Machine::new("M3", "Assembly Line 1").with_capacity(1.5),
    ];

    let jobs = REFERENCE_JOBS
        .iter()
        .map(|&(id, name, pt, arrival, due, machine)| {
            Job::new(
                id,
                name,
                pt,
                now + Duration::hours(due),
                now + Duration::hours(arrival),
                machine,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((jobs, machines))
}

/// Generates `count` jobs spread over `machine_ids`.
///
/// - processing time: 1..40 h, one decimal
/// - arrival: within 24 h of `now`, minute resolution
/// - due date: 1.5..6 × processing time after arrival
///
/// Ids are `G0001`, `G0002`, ... The same seeded `rng` yields the same jobs.
pub fn random_workload<R: Rng>(
    rng: &mut R,
    count: usize,
    machine_ids: &[&str],
    now: NaiveDateTime,
) -> Result<Vec<Job>> {
    (1..=count)
        .map(|n| {
            let pt = (rng.random_range(1.0..=40.0_f64) * 10.0).round() / 10.0;
            let arrival = now + Duration::minutes(rng.random_range(0..=24 * 60));
            let due = arrival + hours_to_duration(pt * rng.random_range(1.5..=6.0_f64));
            let machine = machine_ids.choose(&mut *rng).copied().unwrap_or("");
            Job::new(format!("G{n:04}"), format!("Generated {n}"), pt, due, arrival, machine)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hours_between;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_reference_workload() {
        let (jobs, machines) = reference_workload(t0()).unwrap();
        assert_eq!(jobs.len(), 8);
        assert_eq!(machines.len(), 3);
        assert_eq!(machines[2].name(), "Assembly Line 1");
        assert_eq!(machines[2].capacity(), 1.5);

        let j2 = &jobs[1];
        assert_eq!(j2.id(), "J002");
        assert_eq!(j2.required_machine_id(), "M3");
        assert_eq!(j2.arrival_time(), t0() + Duration::hours(2));
        assert_eq!(j2.due_date(), t0() + Duration::hours(24));

        let total: f64 = jobs.iter().map(|j| j.processing_time()).sum();
        assert!((total - 79.0).abs() < 1e-10);
    }

    #[test]
    fn test_random_workload_bounds() {
        let mut rng = SmallRng::seed_from_u64(42);
        let jobs = random_workload(&mut rng, 50, &["M1", "M2"], t0()).unwrap();
        assert_eq!(jobs.len(), 50);
        assert_eq!(jobs[0].id(), "G0001");
        for job in &jobs {
            assert!((1.0..=40.0).contains(&job.processing_time()));
            let arrival = hours_between(t0(), job.arrival_time());
            assert!((0.0..=24.0).contains(&arrival));
            let window = hours_between(job.arrival_time(), job.due_date());
            assert!(window >= 1.5 * job.processing_time() - 1e-3);
            assert!(window <= 6.0 * job.processing_time() + 1e-3);
            assert!(["M1", "M2"].contains(&job.required_machine_id()));
        }
    }

    #[test]
    fn test_random_workload_is_reproducible() {
        let a = random_workload(&mut SmallRng::seed_from_u64(7), 10, &["M1"], t0()).unwrap();
        let b = random_workload(&mut SmallRng::seed_from_u64(7), 10, &["M1"], t0()).unwrap();
        assert_eq!(a, b);
    }
}
