use chrono::NaiveDate;
use thiserror::Error;

use crate::models::TaskRef;
use crate::period::Period;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Bad label name {label}: {reason}")]
    InvalidRecurrenceLabel { label: String, reason: String },

    #[error("Invalid period '{input}': {reason}")]
    InvalidPeriod { input: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Date out of range: {0} shifted by {1}")]
    DateOutOfRange(NaiveDate, Period),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A structural invariant violated by data in the remote service.
///
/// These are never retried: they need a human to fix the offending task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task has multiple recur labels ({}): {task}", labels.join(", "))]
    MultipleRecurrenceLabels { task: TaskRef, labels: Vec<String> },

    #[error("Labeled task has no due date: {task}")]
    MissingDueDate { task: TaskRef },

    #[error("Task with recur label nested under another one: {task} under {root}")]
    NestedRecurrenceLabel { task: TaskRef, root: TaskRef },

    #[error("Task under labeled task cannot be recurring: {task} (under {root})")]
    RecurringDueDate { task: TaskRef, root: TaskRef },

    #[error("Task under labeled task cannot have a specific time of day: {task} (under {root})")]
    TimeOfDayDueDate { task: TaskRef, root: TaskRef },
}

impl ValidationError {
    /// The task a human has to correct.
    pub fn task(&self) -> &TaskRef {
        match self {
            ValidationError::MultipleRecurrenceLabels { task, .. }
            | ValidationError::MissingDueDate { task }
            | ValidationError::NestedRecurrenceLabel { task, .. }
            | ValidationError::RecurringDueDate { task, .. }
            | ValidationError::TimeOfDayDueDate { task, .. } => task,
        }
    }
}
