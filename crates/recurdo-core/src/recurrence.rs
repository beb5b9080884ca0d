//! The convergence loop.
//!
//! A pass fetches a fresh snapshot, validates every recurrence root, then
//! for each root due before the cutoff copies its subtree one period ahead
//! and strips the label from the original. Passes repeat until one does
//! nothing, which is how a root gets shifted several times when the cutoff
//! is more than one period away.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::forest::Forest;
use crate::period::Period;
use crate::propagation::{clone_subtree, strip_label};
use crate::repository::Repository;
use crate::selection::{decode_rules, select, validate_all, Candidate, RuleMap};

/// Computes the cutoff date `period` after `today`.
pub fn cutoff_from(today: NaiveDate, period: Period) -> Result<NaiveDate, CoreError> {
    if period.is_negative() {
        return Err(CoreError::InvalidInput(format!(
            "cutoff period {period} must not be negative"
        )));
    }
    period.add_to(today)
}

/// One fetched and decoded view of the remote service.
#[derive(Debug)]
pub struct Snapshot {
    pub forest: Forest,
    pub rules: RuleMap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Passes run, the final empty one included.
    pub passes: usize,
    /// Candidates copied and stripped across all passes.
    pub processed: usize,
}

#[derive(Debug)]
pub struct RecurrenceEngine<R> {
    repo: R,
    cutoff: NaiveDate,
}

impl<R: Repository> RecurrenceEngine<R> {
    pub fn new(repo: R, cutoff: NaiveDate) -> Self {
        Self { repo, cutoff }
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub async fn snapshot(&self) -> Result<Snapshot, CoreError> {
        let rules = decode_rules(&self.repo.list_labels().await?)?;
        let forest = Forest::build(self.repo.list_tasks().await?);
        debug!(tasks = forest.len(), rules = rules.len(), "fetched snapshot");
        Ok(Snapshot { forest, rules })
    }

    /// Validates the current snapshot without changing anything remotely.
    ///
    /// Returns every valid candidate, including those not yet due.
    pub async fn check(&self) -> Result<(Snapshot, Vec<Candidate>), CoreError> {
        let snapshot = self.snapshot().await?;
        let candidates = validate_all(&snapshot.forest, &snapshot.rules)?;
        Ok((snapshot, candidates))
    }

    /// Runs one pass and returns how many candidates it processed.
    pub async fn run_pass(&self) -> Result<usize, CoreError> {
        let Snapshot { forest, rules } = self.snapshot().await?;
        let candidates = select(&forest, &rules, self.cutoff)?;

        for candidate in &candidates {
            let task = &forest.node(candidate.node).task;
            info!(
                "Processing {} @ {} ({})",
                task.content, candidate.due_date, task.url
            );
            let copies = clone_subtree(
                &self.repo,
                &forest,
                candidate.node,
                candidate.rule.period,
                None,
            )
            .await?;
            strip_label(&self.repo, task, &candidate.rule).await?;
            debug!(task_id = %task.id, copies = copies.len(), "candidate done");
        }

        Ok(candidates.len())
    }

    /// Runs passes until one processes nothing.
    pub async fn run_until_converged(&self) -> Result<RunSummary, CoreError> {
        let mut summary = RunSummary::default();
        loop {
            let processed = self.run_pass().await?;
            summary.passes += 1;
            summary.processed += processed;
            debug!(pass = summary.passes, processed, "pass finished");
            if processed == 0 {
                return Ok(summary);
            }
        }
    }
}
