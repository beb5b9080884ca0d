use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::period::Period;

/// Label names starting with this marker declare a recurrence period.
pub const LABEL_PREFIX: &str = "recur_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A label as the engine sees it.
///
/// `key` is the opaque value tasks carry in their label list; `name` is what
/// users see and what encodes the recurrence period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub key: String,
    pub name: String,
}

impl Label {
    /// Decodes the recurrence rule declared by this label, if any.
    ///
    /// Labels without [`LABEL_PREFIX`] declare nothing. A prefixed label whose
    /// remainder is not a strictly positive ISO-8601 period is an error.
    pub fn recurrence_rule(&self) -> Result<Option<RecurrenceRule>, CoreError> {
        let Some(encoded) = self.name.strip_prefix(LABEL_PREFIX) else {
            return Ok(None);
        };

        let period: Period = encoded.parse().map_err(|e| match e {
            CoreError::InvalidPeriod { reason, .. } => CoreError::InvalidRecurrenceLabel {
                label: self.name.clone(),
                reason,
            },
            other => other,
        })?;

        if !period.is_positive() {
            return Err(CoreError::InvalidRecurrenceLabel {
                label: self.name.clone(),
                reason: format!("period {period} must move dates forward"),
            });
        }

        Ok(Some(RecurrenceRule {
            label: self.key.clone(),
            name: self.name.clone(),
            period,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Key of the label that declared this rule.
    pub label: String,
    pub name: String,
    pub period: Period,
}

/// Due or deadline information. Only `date` is interpreted; the rest is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Due {
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

impl Due {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            is_recurring: false,
            datetime: None,
            string: None,
            timezone: None,
            lang: None,
        }
    }

    pub fn has_time_of_day(&self) -> bool {
        self.datetime.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: String,
    #[serde(default)]
    pub section_id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub parent_id: Option<TaskId>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default)]
    pub deadline: Option<Due>,
    #[serde(default)]
    pub url: String,
}

fn default_priority() -> u8 {
    1
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: TaskId::default(),
            project_id: String::new(),
            section_id: None,
            content: String::new(),
            description: String::new(),
            labels: Vec::new(),
            parent_id: None,
            order: 0,
            priority: default_priority(),
            due: None,
            deadline: None,
            url: String::new(),
        }
    }
}

impl Task {
    pub fn task_ref(&self) -> TaskRef {
        TaskRef {
            id: self.id.clone(),
            content: self.content.clone(),
            url: self.url.clone(),
        }
    }

    /// Builds the creation request for a copy of this task shifted by `period`.
    ///
    /// `parent_id` replaces the task's own parent when given.
    pub fn to_new_task(
        &self,
        period: Period,
        parent_id: Option<TaskId>,
    ) -> Result<NewTaskData, CoreError> {
        let shift = |due: &Option<Due>| due.as_ref().map(|d| period.add_to(d.date)).transpose();

        Ok(NewTaskData {
            content: self.content.clone(),
            description: self.description.clone(),
            project_id: self.project_id.clone(),
            section_id: self.section_id.clone(),
            parent_id: parent_id.or_else(|| self.parent_id.clone()),
            order: self.order,
            priority: self.priority,
            labels: self.labels.clone(),
            due_date: shift(&self.due)?,
            deadline_date: shift(&self.deadline)?,
        })
    }
}

/// Enough of a task to let a human find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    pub id: TaskId,
    pub content: String,
    pub url: String,
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (id {}", self.content, self.id)?;
        if !self.url.is_empty() {
            write!(f, ", {}", self.url)?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewTaskData {
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,
    pub order: i64,
    pub priority: u8,
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
}
