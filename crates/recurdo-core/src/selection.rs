//! Finds recurrence roots in a forest and checks the shape of their subtrees.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{CoreError, ValidationError};
use crate::forest::{Forest, NodeId};
use crate::models::{Label, RecurrenceRule, Task};

/// Recurrence rules keyed by the label key tasks carry.
pub type RuleMap = HashMap<String, RecurrenceRule>;

/// Decodes every recurrence label in the workspace.
///
/// One malformed recurrence label anywhere fails the whole call.
pub fn decode_rules(labels: &[Label]) -> Result<RuleMap, CoreError> {
    let mut rules = RuleMap::new();
    for label in labels {
        if let Some(rule) = label.recurrence_rule()? {
            rules.insert(rule.label.clone(), rule);
        }
    }
    Ok(rules)
}

/// A recurrence root that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub node: NodeId,
    pub rule: RecurrenceRule,
    pub due_date: NaiveDate,
}

/// Distinct rules whose label the task carries, in label order.
pub fn matching_rules<'r>(task: &Task, rules: &'r RuleMap) -> Vec<&'r RecurrenceRule> {
    let mut matches: Vec<&RecurrenceRule> = Vec::new();
    for rule in task.labels.iter().filter_map(|label| rules.get(label)) {
        if !matches.iter().any(|m| m.label == rule.label) {
            matches.push(rule);
        }
    }
    matches
}

/// Checks one node. `Ok(None)` means the node carries no recurrence label.
pub fn validate_candidate(
    forest: &Forest,
    node: NodeId,
    rules: &RuleMap,
) -> Result<Option<Candidate>, ValidationError> {
    let root = &forest.node(node).task;
    let rule = match matching_rules(root, rules).as_slice() {
        [] => return Ok(None),
        [rule] => (*rule).clone(),
        many => {
            return Err(ValidationError::MultipleRecurrenceLabels {
                task: root.task_ref(),
                labels: many.iter().map(|r| r.name.clone()).collect(),
            })
        }
    };

    let due_date = root
        .due
        .as_ref()
        .map(|due| due.date)
        .ok_or_else(|| ValidationError::MissingDueDate {
            task: root.task_ref(),
        })?;

    if let Some(nested) = forest
        .descendants(node)
        .iter()
        .find(|n| !matching_rules(&n.task, rules).is_empty())
    {
        return Err(ValidationError::NestedRecurrenceLabel {
            task: nested.task.task_ref(),
            root: root.task_ref(),
        });
    }

    for member in forest.subtree(node) {
        let Some(due) = &member.task.due else {
            continue;
        };
        if due.is_recurring {
            return Err(ValidationError::RecurringDueDate {
                task: member.task.task_ref(),
                root: root.task_ref(),
            });
        }
        if due.has_time_of_day() {
            return Err(ValidationError::TimeOfDayDueDate {
                task: member.task.task_ref(),
                root: root.task_ref(),
            });
        }
    }

    Ok(Some(Candidate {
        node,
        rule,
        due_date,
    }))
}

/// Validates every labeled node in pre-order, whatever its due date.
pub fn validate_all(forest: &Forest, rules: &RuleMap) -> Result<Vec<Candidate>, ValidationError> {
    let mut candidates = Vec::new();
    for node in 0..forest.len() {
        if let Some(candidate) = validate_candidate(forest, node, rules)? {
            candidates.push(candidate);
        }
    }
    Ok(candidates)
}

/// Validates every labeled node, then keeps those due strictly before `cutoff`.
pub fn select(
    forest: &Forest,
    rules: &RuleMap,
    cutoff: NaiveDate,
) -> Result<Vec<Candidate>, ValidationError> {
    let mut candidates = validate_all(forest, rules)?;
    candidates.retain(|c| c.due_date < cutoff);
    Ok(candidates)
}
