//! Remote mutations for one candidate: the shifted subtree copy and the
//! removal of the recurrence label from the original.

use tracing::debug;

use crate::error::CoreError;
use crate::forest::{Forest, NodeId};
use crate::models::{NewTaskData, RecurrenceRule, Task, TaskId};
use crate::period::Period;
use crate::repository::TaskRepository;

/// Recreates the subtree rooted at `node` with every due and deadline date
/// moved forward by `period`.
///
/// Tasks are created one at a time in pre-order: a child's request is only
/// sent once its parent's copy exists and carries the copy's id as
/// `parent_id`. The root copy takes `parent_id` when given, otherwise the
/// original's parent. All dates are shifted before the first request, so an
/// out-of-range date creates nothing.
///
/// Returns the created tasks in creation order.
pub async fn clone_subtree<R>(
    repo: &R,
    forest: &Forest,
    node: NodeId,
    period: Period,
    parent_id: Option<TaskId>,
) -> Result<Vec<Task>, CoreError>
where
    R: TaskRepository + ?Sized,
{
    let mut requests: Vec<Option<NewTaskData>> = forest
        .subtree(node)
        .iter()
        .map(|member| member.task.to_new_task(period, None).map(Some))
        .collect::<Result<_, _>>()?;

    let mut created = Vec::with_capacity(requests.len());
    let mut stack = vec![(node, parent_id)];
    while let Some((current, parent_id)) = stack.pop() {
        let Some(mut request) = requests[current - node].take() else {
            continue;
        };
        if parent_id.is_some() {
            request.parent_id = parent_id;
        }

        let copy = repo.create_task(request).await?;
        debug!(source = %forest.node(current).task.id, copy = %copy.id, "copied task");

        let children = &forest.node(current).children;
        stack.extend(children.iter().rev().map(|&child| (child, Some(copy.id.clone()))));
        created.push(copy);
    }

    Ok(created)
}

/// Removes the rule's label from `task`, keeping every other label.
pub async fn strip_label<R>(repo: &R, task: &Task, rule: &RecurrenceRule) -> Result<(), CoreError>
where
    R: TaskRepository + ?Sized,
{
    let labels: Vec<String> = task
        .labels
        .iter()
        .filter(|label| **label != rule.label)
        .cloned()
        .collect();
    debug!(task_id = %task.id, label = %rule.name, "removing recurrence label");
    repo.set_labels(&task.id, labels).await
}
