//! Job model.
//!
//! A job is a single manufacturing order: one operation of known duration
//! that must run on a machine between its arrival and its due date.
//!
//! # Time Representation
//! Timestamps are wall-clock [`NaiveDateTime`] values; durations are real
//! hours. Conversions go through [`hours_to_duration`] and [`hours_between`],
//! both at millisecond precision, so that `completion = start + processing`
//! holds exactly for every scheduled job.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScheduleError};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Converts real hours to a duration, rounded to the millisecond.
///
/// Saturates at [`Duration::MIN`] / [`Duration::MAX`].
pub fn hours_to_duration(hours: f64) -> Duration {
    let ms = (hours * MS_PER_HOUR).round() as i64;
    Duration::try_milliseconds(ms).unwrap_or(if ms < 0 { Duration::MIN } else { Duration::MAX })
}

/// Signed hours from `from` to `to`.
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Lifecycle state of a job.
///
/// `Pending → Scheduled` is driven by the scheduler; `Scheduled →
/// InProgress → Completed` is reported by the shop floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Scheduled,
    InProgress,
    Completed,
}

impl JobStatus {
    /// Whether the job holds a machine slot (scheduled, running or done).
    pub fn is_committed(self) -> bool {
        !matches!(self, JobStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Scheduled => "scheduled",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A manufacturing job.
///
/// Identity and timing are fixed at construction. Scheduling state
/// (priority score, status, assignment) is owned by the scheduler and only
/// readable from outside the crate.
///
/// Deserialization goes through [`Job::new`], so a decoded job satisfies the
/// same rules as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JobRecord")]
pub struct Job {
    pub(crate) id: String,
    pub(crate) name: String,
    /// Hours.
    pub(crate) processing_time: f64,
    pub(crate) due_date: NaiveDateTime,
    pub(crate) arrival_time: NaiveDateTime,
    pub(crate) required_machine_id: String,
    pub(crate) priority_score: f64,
    pub(crate) status: JobStatus,
    pub(crate) assigned_machine_id: Option<String>,
    pub(crate) start_time: Option<NaiveDateTime>,
    pub(crate) completion_time: Option<NaiveDateTime>,
}

impl Job {
    /// Creates a pending job.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidProcessingTime`] if `processing_time` is not
    ///   a positive finite number of hours, or runs past the calendar when
    ///   started at `arrival_time`.
    /// - [`ScheduleError::DueBeforeArrival`] if `due_date < arrival_time`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        processing_time: f64,
        due_date: NaiveDateTime,
        arrival_time: NaiveDateTime,
        required_machine_id: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let representable = processing_time.is_finite()
            && processing_time > 0.0
            && arrival_time
                .checked_add_signed(hours_to_duration(processing_time))
                .is_some();
        if !representable {
            return Err(ScheduleError::InvalidProcessingTime {
                job_id: id,
                processing_time,
            });
        }
        if due_date < arrival_time {
            return Err(ScheduleError::DueBeforeArrival { job_id: id });
        }
        Ok(Self {
            id,
            name: name.into(),
            processing_time,
            due_date,
            arrival_time,
            required_machine_id: required_machine_id.into(),
            priority_score: 0.0,
            status: JobStatus::Pending,
            assigned_machine_id: None,
            start_time: None,
            completion_time: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Processing time in hours.
    pub fn processing_time(&self) -> f64 {
        self.processing_time
    }

    pub fn due_date(&self) -> NaiveDateTime {
        self.due_date
    }

    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    /// Machine the job should preferably run on.
    pub fn required_machine_id(&self) -> &str {
        &self.required_machine_id
    }

    /// Score from the last scheduling pass (0 before any).
    pub fn priority_score(&self) -> f64 {
        self.priority_score
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn assigned_machine_id(&self) -> Option<&str> {
        self.assigned_machine_id.as_deref()
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    pub fn completion_time(&self) -> Option<NaiveDateTime> {
        self.completion_time
    }

    /// Bucketed urgency in `{1, 3, 5, 7, 9, 10}`.
    ///
    /// | Hours until due | Urgency |
    /// |-----------------|---------|
    /// | ≤ 0 | 10 |
    /// | ≤ 1 × pt | 9 |
    /// | ≤ 2 × pt | 7 |
    /// | ≤ 5 × pt | 5 |
    /// | ≤ 10 × pt | 3 |
    /// | otherwise | 1 |
    pub fn urgency(&self, now: NaiveDateTime) -> f64 {
        let remaining = hours_between(now, self.due_date);
        let pt = self.processing_time;
        if remaining <= 0.0 {
            10.0
        } else if remaining <= pt {
            9.0
        } else if remaining <= 2.0 * pt {
            7.0
        } else if remaining <= 5.0 * pt {
            5.0
        } else if remaining <= 10.0 * pt {
            3.0
        } else {
            1.0
        }
    }

    /// `now` is past the due date and the job is not completed.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        now > self.due_date && self.status != JobStatus::Completed
    }

    /// Hours to spare: time until due minus processing time (negative when late).
    pub fn slack_hours(&self, now: NaiveDateTime) -> f64 {
        hours_between(now, self.due_date) - self.processing_time
    }

    /// Hours the planned completion exceeds the due date.
    ///
    /// 0 when on time or not scheduled.
    pub fn tardiness_hours(&self) -> f64 {
        self.completion_time
            .map(|c| hours_between(self.due_date, c).max(0.0))
            .unwrap_or(0.0)
    }

    pub(crate) fn processing_duration(&self) -> Duration {
        hours_to_duration(self.processing_time)
    }

    /// Places the job on a machine starting at `start`.
    ///
    /// Returns `false` and leaves the job untouched when the completion
    /// would fall outside the calendar.
    pub(crate) fn assign(&mut self, machine_id: &str, start: NaiveDateTime) -> bool {
        let Some(completion) = start.checked_add_signed(self.processing_duration()) else {
            return false;
        };
        self.assigned_machine_id = Some(machine_id.to_string());
        self.start_time = Some(start);
        self.completion_time = Some(completion);
        self.status = JobStatus::Scheduled;
        true
    }

    /// Returns the job to the pending pool.
    pub(crate) fn release(&mut self) {
        self.assigned_machine_id = None;
        self.start_time = None;
        self.completion_time = None;
        self.status = JobStatus::Pending;
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job({}: {}, PT={}h, Priority={:.2}, Status={})",
            self.id, self.name, self.processing_time, self.priority_score, self.status
        )
    }
}

/// Wire form of [`Job`]; scheduling state is optional.
#[derive(Deserialize)]
struct JobRecord {
    id: String,
    name: String,
    processing_time: f64,
    due_date: NaiveDateTime,
    arrival_time: NaiveDateTime,
    required_machine_id: String,
    #[serde(default)]
    priority_score: f64,
    #[serde(default)]
    status: JobStatus,
    #[serde(default)]
    assigned_machine_id: Option<String>,
    #[serde(default)]
    start_time: Option<NaiveDateTime>,
    #[serde(default)]
    completion_time: Option<NaiveDateTime>,
}

impl TryFrom<JobRecord> for Job {
    type Error = ScheduleError;

    fn try_from(record: JobRecord) -> Result<Self> {
        let mut job = Job::new(
            record.id,
            record.name,
            record.processing_time,
            record.due_date,
            record.arrival_time,
            record.required_machine_id,
        )?;
        job.priority_score = record.priority_score;
        job.status = record.status;
        job.assigned_machine_id = record.assigned_machine_id;
        job.start_time = record.start_time;
        job.completion_time = record.completion_time;
        Ok(job)
    }
}
