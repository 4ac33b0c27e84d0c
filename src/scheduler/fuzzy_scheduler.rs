//! Greedy, rule-ordered job scheduler.
//!
//! # Algorithm
//!
//! 1. Collect pending jobs in registration order.
//! 2. Score every job with the mode's dispatching rule, then stable-sort.
//! 3. Place each job on its required machine (or the first registered
//!    machine when the required one is unknown) at the earliest slot not
//!    before `max(now, arrival)`.
//!
//! Slot search queues behind existing work without bound, so every job is
//! placed as long as at least one machine is registered.
//!
//! # Complexity
//! O(n log n + n · k log k) where n = pending jobs, k = jobs per machine.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Arc;

use super::{ModeComparison, ModeOutcome, PerformanceMetrics, ScheduleSummary};
use crate::config::SchedulerConfig;
use crate::dispatching::{rules::FuzzyPriority, SchedulingContext, SchedulingMode};
use crate::error::{Result, ScheduleError};
use crate::fuzzy::InferenceEngine;
use crate::models::{Job, JobStatus, Machine};
use crate::validation::validate_input;

/// Job scheduler driven by fuzzy priority or a classic baseline rule.
///
/// Owns its jobs and machines; callers read them through `&Job` /
/// `&Machine` views. The inference engine is shared and read-only.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::{Duration, NaiveDate};
/// use fuzzy_schedule::fuzzy::knowledge;
/// use fuzzy_schedule::models::{Job, Machine};
/// use fuzzy_schedule::{FuzzyScheduler, SchedulingMode};
///
/// let now = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let engine = Arc::new(knowledge::scheduling_engine().unwrap());
///
/// let mut scheduler = FuzzyScheduler::new(engine, now);
/// scheduler.add_machine(Machine::new("M1", "CNC Machine 1")).unwrap();
/// scheduler
///     .add_job(Job::new("J1", "Bracket", 4.0, now + Duration::hours(24), now, "M1").unwrap())
///     .unwrap();
///
/// let placed = scheduler.schedule(SchedulingMode::FuzzyPriority);
/// assert_eq!(placed.len(), 1);
/// assert_eq!(placed[0].start_time(), Some(now));
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyScheduler {
    engine: Arc<InferenceEngine>,
    config: SchedulerConfig,
    now: NaiveDateTime,
    jobs: Vec<Job>,
    job_index: HashMap<String, usize>,
    machines: Vec<Machine>,
    machine_index: HashMap<String, usize>,
}

impl FuzzyScheduler {
    /// Creates an empty scheduler with the default configuration.
    pub fn new(engine: Arc<InferenceEngine>, now: NaiveDateTime) -> Self {
        Self::with_config(engine, now, SchedulerConfig::default())
    }

    /// Creates an empty scheduler.
    pub fn with_config(
        engine: Arc<InferenceEngine>,
        now: NaiveDateTime,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            engine,
            config,
            now,
            jobs: Vec::new(),
            job_index: HashMap::new(),
            machines: Vec::new(),
            machine_index: HashMap::new(),
        }
    }

    /// Creates a scheduler from an existing job / machine snapshot.
    ///
    /// Machine job lists and loads are rebuilt from the jobs' placements.
    ///
    /// # Errors
    /// [`ScheduleError::Validation`] listing every problem found by
    /// [`validate_input`].
    pub fn from_parts(
        engine: Arc<InferenceEngine>,
        jobs: Vec<Job>,
        machines: Vec<Machine>,
        now: NaiveDateTime,
    ) -> Result<Self> {
        validate_input(&jobs, &machines).map_err(ScheduleError::Validation)?;

        let mut scheduler = Self::new(engine, now);
        for machine in machines {
            scheduler.add_machine(machine)?;
        }
        scheduler.add_jobs(jobs)?;
        Ok(scheduler)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn engine(&self) -> &Arc<InferenceEngine> {
        &self.engine
    }

    /// Scheduling clock.
    pub fn current_time(&self) -> NaiveDateTime {
        self.now
    }

    pub fn set_current_time(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    /// Registers a machine.
    ///
    /// The machine starts idle; its job list and load only reflect jobs
    /// placed through this scheduler.
    ///
    /// # Errors
    /// [`ScheduleError::DuplicateId`] if the id is taken.
    pub fn add_machine(&mut self, mut machine: Machine) -> Result<()> {
        if self.machine_index.contains_key(machine.id()) {
            return Err(ScheduleError::DuplicateId {
                kind: "machine",
                id: machine.id().to_string(),
            });
        }
        machine.clear();
        self.machine_index
            .insert(machine.id().to_string(), self.machines.len());
        self.machines.push(machine);
        Ok(())
    }

    /// Registers a job.
    ///
    /// A scheduled, running or completed job keeps its placement and is
    /// added to its machine's load; a pending job drops any stale placement.
    ///
    /// # Errors
    /// - [`ScheduleError::DuplicateId`] if the id is taken.
    /// - [`ScheduleError::Validation`] if the job fails [`validate_input`]
    ///   against the registered machines.
    pub fn add_job(&mut self, mut job: Job) -> Result<()> {
        if self.job_index.contains_key(job.id()) {
            return Err(ScheduleError::DuplicateId {
                kind: "job",
                id: job.id().to_string(),
            });
        }
        validate_input(std::slice::from_ref(&job), &self.machines)
            .map_err(ScheduleError::Validation)?;

        if job.status().is_committed() {
            let placed_on = job
                .assigned_machine_id()
                .and_then(|id| self.machine_index.get(id).copied());
            if let Some(m) = placed_on {
                self.machines[m].attach(&job);
            }
        } else {
            job.release();
        }
        self.job_index.insert(job.id().to_string(), self.jobs.len());
        self.jobs.push(job);
        Ok(())
    }

    /// Registers jobs in order, stopping at the first duplicate id.
    pub fn add_jobs(&mut self, jobs: impl IntoIterator<Item = Job>) -> Result<()> {
        jobs.into_iter().try_for_each(|job| self.add_job(job))
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.job_index.get(id).map(|&i| &self.jobs[i])
    }

    /// All jobs, in registration order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn machine(&self, id: &str) -> Option<&Machine> {
        self.machine_index.get(id).map(|&i| &self.machines[i])
    }

    /// All machines, in registration order.
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// Jobs currently in `Scheduled` state, ordered by start time.
    pub fn scheduled_jobs(&self) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self
            .jobs
            .iter()
            .filter(|j| j.status() == JobStatus::Scheduled)
            .collect();
        jobs.sort_by_key(|j| j.start_time());
        jobs
    }

    /// Fuzzy priority of `job` against `machine`'s current load.
    pub fn job_priority(&self, job: &Job, machine: &Machine) -> f64 {
        FuzzyPriority::new(Arc::clone(&self.engine)).score(job, machine, self.now)
    }

    /// Schedules every pending job with the given mode.
    ///
    /// Returns clones of the newly placed jobs, in placement order. Jobs that
    /// cannot be placed (no machine registered, or no slot before the end of
    /// the calendar) stay pending.
    pub fn schedule(&mut self, mode: SchedulingMode) -> Vec<Job> {
        let rule = mode.rule(&self.engine);
        let mut pending: Vec<usize> = (0..self.jobs.len())
            .filter(|&i| self.jobs[i].status() == JobStatus::Pending)
            .collect();

        tracing::info!(
            "Scheduling {} pending jobs on {} machines ({})",
            pending.len(),
            self.machines.len(),
            mode
        );

        let context = SchedulingContext::new(self.now, &self.machines, &self.config);
        let scores: Vec<f64> = pending
            .iter()
            .map(|&i| rule.priority(&self.jobs[i], &context))
            .collect();
        for (&i, score) in pending.iter().zip(scores) {
            self.jobs[i].priority_score = score;
            tracing::debug!("Job {} priority {:.2}", self.jobs[i].id(), score);
        }

        pending.sort_by(|&a, &b| rule.compare(&self.jobs[a], &self.jobs[b]));

        let mut placed = Vec::with_capacity(pending.len());
        for i in pending {
            if self.assign(i) {
                placed.push(self.jobs[i].clone());
            } else {
                tracing::warn!("Job {} could not be assigned to any machine", self.jobs[i].id());
            }
        }

        tracing::info!("Scheduled {} jobs ({})", placed.len(), mode);
        placed
    }

    /// Schedules with a mode given by name.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownMode`] before any job is touched.
    pub fn schedule_named(&mut self, mode: &str) -> Result<Vec<Job>> {
        let mode: SchedulingMode = mode.parse()?;
        Ok(self.schedule(mode))
    }

    /// Detaches every `Scheduled` job and runs fuzzy-priority scheduling again.
    ///
    /// Jobs already in progress or completed keep their slots.
    pub fn reschedule(&mut self) -> Vec<Job> {
        let scheduled: Vec<usize> = (0..self.jobs.len())
            .filter(|&i| self.jobs[i].status() == JobStatus::Scheduled)
            .collect();
        tracing::info!("Rescheduling: releasing {} jobs", scheduled.len());
        for i in scheduled {
            self.detach(i);
        }
        self.schedule(SchedulingMode::FuzzyPriority)
    }

    /// Returns a `Scheduled` job to the pending pool.
    ///
    /// Returns `Ok(false)` when the job is not in `Scheduled` state.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownJob`] if no job has this id.
    pub fn unassign(&mut self, job_id: &str) -> Result<bool> {
        let i = self.index_of(job_id)?;
        if self.jobs[i].status() != JobStatus::Scheduled {
            return Ok(false);
        }
        self.detach(i);
        Ok(true)
    }

    /// Marks a scheduled job as started.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownJob`], or [`ScheduleError::InvalidTransition`]
    /// unless the job is `Scheduled`.
    pub fn mark_in_progress(&mut self, job_id: &str) -> Result<()> {
        self.transition(job_id, &[JobStatus::Scheduled], JobStatus::InProgress)
    }

    /// Marks a scheduled or running job as finished.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownJob`], or [`ScheduleError::InvalidTransition`]
    /// unless the job is `Scheduled` or `InProgress`.
    pub fn mark_completed(&mut self, job_id: &str) -> Result<()> {
        self.transition(
            job_id,
            &[JobStatus::Scheduled, JobStatus::InProgress],
            JobStatus::Completed,
        )
    }

    /// Summary of the current state.
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::build(&self.jobs, &self.machines, self.now)
    }

    /// Delivery metrics over all registered jobs.
    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::calculate(&self.jobs)
    }

    /// Runs every mode on a copy of the current state.
    ///
    /// `self` is left untouched.
    pub fn compare_modes(&self) -> ModeComparison {
        let entries = SchedulingMode::ALL
            .into_iter()
            .map(|mode| {
                let mut trial = self.clone();
                trial.schedule(mode);
                ModeOutcome {
                    mode,
                    summary: trial.summary(),
                    metrics: trial.metrics(),
                }
            })
            .collect();
        ModeComparison { entries }
    }

    fn index_of(&self, job_id: &str) -> Result<usize> {
        self.job_index
            .get(job_id)
            .copied()
            .ok_or_else(|| ScheduleError::UnknownJob(job_id.to_string()))
    }

    fn transition(&mut self, job_id: &str, from: &[JobStatus], to: JobStatus) -> Result<()> {
        let i = self.index_of(job_id)?;
        let job = &mut self.jobs[i];
        if !from.contains(&job.status) {
            return Err(ScheduleError::InvalidTransition {
                job_id: job_id.to_string(),
                from: job.status,
                to,
            });
        }
        job.status = to;
        Ok(())
    }

    /// Places job `index` on its required machine, or else on the first
    /// registered machine with a slot. `false` when none has one.
    fn assign(&mut self, index: usize) -> bool {
        let job = &self.jobs[index];
        let candidates: Vec<usize> = match self.machine_index.get(job.required_machine_id()) {
            Some(&m) => vec![m],
            None => (0..self.machines.len()).collect(),
        };
        let earliest = self.now.max(job.arrival_time());

        let slot = candidates.into_iter().find_map(|m| {
            let machine = &self.machines[m];
            let on_machine = machine
                .job_ids()
                .iter()
                .filter_map(|id| self.job_index.get(id).map(|&k| &self.jobs[k]));
            machine
                .available_slot(on_machine, job.processing_time(), earliest)
                .map(|start| (m, start))
        });
        let Some((m, start)) = slot else {
            return false;
        };

        let machine_id = self.machines[m].id().to_string();
        if !self.jobs[index].assign(&machine_id, start) {
            return false;
        }
        self.machines[m].attach(&self.jobs[index]);
        tracing::debug!("Job {} → machine {} at {}", self.jobs[index].id(), machine_id, start);
        true
    }

    /// Reverses a placement and returns the job to pending.
    fn detach(&mut self, index: usize) {
        if let Some(m) = self.jobs[index]
            .assigned_machine_id()
            .and_then(|id| self.machine_index.get(id).copied())
        {
            self.machines[m].detach(&self.jobs[index]);
        }
        self.jobs[index].release();
    }
}
