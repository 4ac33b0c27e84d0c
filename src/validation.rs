//! Input validation for scheduling problems.
//!
//! Checks structural integrity of jobs and machines before they enter a
//! scheduler. Detects:
//! - Duplicate IDs
//! - Jobs assigned to machines that don't exist
//! - Committed jobs with an incomplete placement
//! - Completion times that disagree with the processing time
//! - Job fields that [`Job::new`] would have rejected

use crate::models::{hours_to_duration, Job, Machine};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A job is assigned to a machine that doesn't exist.
    InvalidMachineReference,
    /// A scheduled, running or completed job lacks its machine or times.
    IncompletePlacement,
    /// `completion_time != start_time + processing_time`.
    InconsistentTimes,
    /// Non-positive processing time or due date before arrival.
    InvalidJob,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates jobs and machines for a scheduler.
///
/// Checks:
/// 1. No duplicate machine IDs
/// 2. No duplicate job IDs
/// 3. Every job field satisfies the construction rules
/// 4. Every assigned machine exists
/// 5. Committed jobs have a machine, a start and a completion time
/// 6. Completion equals start plus processing time
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], machines: &[Machine]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut machine_ids = HashSet::new();
    for m in machines {
        if !machine_ids.insert(m.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate machine ID: {}", m.id()),
            ));
        }
    }

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id()),
            ));
        }

        let pt = job.processing_time();
        if !(pt.is_finite() && pt > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJob,
                format!("Job '{}' has non-positive processing time {}", job.id(), pt),
            ));
        }
        if job.due_date() < job.arrival_time() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJob,
                format!("Job '{}' is due before it arrives", job.id()),
            ));
        }

        if let Some(machine_id) = job.assigned_machine_id() {
            if !machine_ids.contains(machine_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMachineReference,
                    format!(
                        "Job '{}' is assigned to unknown machine '{}'",
                        job.id(),
                        machine_id
                    ),
                ));
            }
        }

        if job.status().is_committed() {
            let placed = job.assigned_machine_id().is_some()
                && job.start_time().is_some()
                && job.completion_time().is_some();
            if !placed {
                errors.push(ValidationError::new(
                    ValidationErrorKind::IncompletePlacement,
                    format!(
                        "Job '{}' is {} but has no complete placement",
                        job.id(),
                        job.status()
                    ),
                ));
            }
        }

        if let (Some(start), Some(completion)) = (job.start_time(), job.completion_time()) {
            if pt.is_finite() && start.checked_add_signed(hours_to_duration(pt)) != Some(completion) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InconsistentTimes,
                    format!(
                        "Job '{}' completes at {} but starts at {} with {}h of work",
                        job.id(),
                        completion,
                        start,
                        pt
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobStatus;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn make_job(id: &str) -> Job {
        Job::new(id, id, 4.0, t0() + Duration::hours(24), t0(), "M1").unwrap()
    }

    fn machines() -> Vec<Machine> {
        vec![Machine::new("M1", "CNC 1"), Machine::new("M2", "CNC 2")]
    }

    #[test]
    fn test_valid_input() {
        let mut placed = make_job("J2");
        placed.assign("M2", t0());
        assert!(validate_input(&[make_job("J1"), placed], &machines()).is_ok());
    }

    #[test]
    fn test_duplicate_job_id() {
        let errors = validate_input(&[make_job("J1"), make_job("J1")], &machines()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("J1"));
    }

    #[test]
    fn test_duplicate_machine_id() {
        let ms = vec![Machine::new("M1", "a"), Machine::new("M1", "b")];
        let errors = validate_input(&[], &ms).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].to_string(), "Duplicate machine ID: M1");
    }

    #[test]
    fn test_unknown_machine_reference() {
        let mut job = make_job("J1");
        job.assign("M9", t0());
        let errors = validate_input(&[job], &machines()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidMachineReference);
    }

    #[test]
    fn test_incomplete_placement() {
        let mut job = make_job("J1");
        job.status = JobStatus::Scheduled;
        let errors = validate_input(&[job], &machines()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::IncompletePlacement);
    }

    #[test]
    fn test_inconsistent_times() {
        let mut job = make_job("J1");
        job.assign("M1", t0());
        job.completion_time = Some(t0() + Duration::hours(5));
        let errors = validate_input(&[job], &machines()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InconsistentTimes);
    }

    #[test]
    fn test_invalid_job_fields() {
        let mut job = make_job("J1");
        job.processing_time = -2.0;
        job.due_date = t0() - Duration::hours(1);
        let errors = validate_input(&[job], &machines()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidJob));
    }

    #[test]
    fn test_multiple_errors() {
        let mut orphan = make_job("J2");
        orphan.assign("M7", t0());
        let ms = vec![Machine::new("M1", "a"), Machine::new("M1", "b")];
        let errors = validate_input(&[make_job("J1"), make_job("J1"), orphan], &ms).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
