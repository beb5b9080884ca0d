//! Turns a flat task snapshot into a forest of parent-linked nodes.
//!
//! Nodes live in an arena stored in pre-order, so a node's subtree is the
//! contiguous slice starting at the node itself. Children are held as arena
//! indices; there are no back-references.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::models::{Task, TaskId};

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub task: Task,
    /// Children in ascending sibling order.
    pub children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct Forest {
    nodes: Vec<TreeNode>,
    subtree_end: Vec<NodeId>,
    roots: Vec<NodeId>,
    detached: Vec<TaskId>,
}

impl Forest {
    /// Builds the forest for one snapshot.
    ///
    /// Siblings (roots included) are sorted by `order`, ties keeping input
    /// order. Tasks unreachable from a parentless task, because their parent
    /// is missing or their parent chain loops, are left out and reported by
    /// [`Forest::detached`]. A repeated id keeps its first occurrence.
    pub fn build(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::with_capacity(tasks.len());
        let mut slots: Vec<Option<Task>> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if seen.insert(task.id.clone()) {
                slots.push(Some(task));
            } else {
                warn!(task_id = %task.id, "ignoring duplicate task in snapshot");
            }
        }

        let mut groups: HashMap<Option<TaskId>, Vec<usize>> = HashMap::new();
        for (index, task) in slots.iter().enumerate() {
            if let Some(task) = task {
                groups.entry(task.parent_id.clone()).or_default().push(index);
            }
        }
        for group in groups.values_mut() {
            group.sort_by_key(|&index| slots[index].as_ref().map_or(0, |t| t.order));
        }

        let mut forest = Forest {
            nodes: Vec::with_capacity(slots.len()),
            ..Default::default()
        };

        // (slot index, arena index of the parent node)
        let mut stack: Vec<(usize, Option<NodeId>)> = groups
            .get(&None)
            .map(|roots| roots.iter().rev().map(|&index| (index, None)).collect())
            .unwrap_or_default();

        while let Some((index, parent)) = stack.pop() {
            let Some(task) = slots[index].take() else {
                continue;
            };
            let node_id = forest.nodes.len();
            if let Some(children) = groups.get(&Some(task.id.clone())) {
                stack.extend(children.iter().rev().map(|&child| (child, Some(node_id))));
            }
            forest.nodes.push(TreeNode {
                task,
                children: Vec::new(),
            });
            match parent {
                Some(parent) => forest.nodes[parent].children.push(node_id),
                None => forest.roots.push(node_id),
            }
        }

        forest.subtree_end = vec![0; forest.nodes.len()];
        for id in (0..forest.nodes.len()).rev() {
            forest.subtree_end[id] = match forest.nodes[id].children.last() {
                Some(&last) => forest.subtree_end[last],
                None => id + 1,
            };
        }

        forest.detached = slots.into_iter().flatten().map(|task| task.id).collect();
        for id in &forest.detached {
            warn!(task_id = %id, "task is not reachable from any top-level task; skipping");
        }

        forest
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Every reachable node, flattened in pre-order.
    pub fn preorder(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// The node and all its descendants, in pre-order.
    pub fn subtree(&self, id: NodeId) -> &[TreeNode] {
        &self.nodes[id..self.subtree_end[id]]
    }

    /// Strict descendants of the node, in pre-order.
    pub fn descendants(&self, id: NodeId) -> &[TreeNode] {
        &self.subtree(id)[1..]
    }

    /// Ids of tasks left out of the forest.
    pub fn detached(&self) -> &[TaskId] {
        &self.detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn task(id: &str, parent: Option<&str>, order: i64) -> Task {
        Task {
            id: id.into(),
            content: format!("task {id}"),
            parent_id: parent.map(TaskId::from),
            order,
            ..Default::default()
        }
    }

    fn ids(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.task.id.0.as_str()).collect()
    }

    #[test]
    fn test_empty_snapshot_builds_empty_forest() {
        let forest = Forest::build(Vec::new());
        assert!(forest.is_empty());
        assert!(forest.roots().is_empty());
    }

    #[test]
    fn test_children_are_sorted_by_sibling_order() {
        let forest = Forest::build(vec![
            task("c2", Some("a"), 2),
            task("b", None, 2),
            task("c1", Some("a"), 1),
            task("a", None, 1),
            task("g", Some("c1"), 1),
        ]);

        assert_eq!(ids(forest.preorder()), vec!["a", "c1", "g", "c2", "b"]);
        let a = &forest.node(forest.roots()[0]);
        assert_eq!(a.task.id.0, "a");
        let children: Vec<&str> = a.children.iter().map(|&c| forest.node(c).task.id.0.as_str()).collect();
        assert_eq!(children, vec!["c1", "c2"]);
    }

    #[test]
    fn test_equal_orders_keep_input_order() {
        let forest = Forest::build(vec![
            task("p", None, 1),
            task("x", Some("p"), 5),
            task("y", Some("p"), 5),
            task("z", Some("p"), 1),
        ]);
        assert_eq!(ids(forest.preorder()), vec!["p", "z", "x", "y"]);
    }

    #[test]
    fn test_subtree_and_descendants_are_contiguous() {
        let forest = Forest::build(vec![
            task("a", None, 1),
            task("b", Some("a"), 1),
            task("c", Some("b"), 1),
            task("d", Some("a"), 2),
            task("e", None, 2),
        ]);
        assert_eq!(ids(forest.subtree(0)), vec!["a", "b", "c", "d"]);
        assert_eq!(ids(forest.descendants(0)), vec!["b", "c", "d"]);
        assert_eq!(ids(forest.descendants(1)), vec!["c"]);
        assert!(forest.descendants(4).is_empty());
    }

    #[test]
    fn test_orphans_and_cycles_are_detached() {
        let forest = Forest::build(vec![
            task("root", None, 1),
            task("orphan", Some("missing"), 1),
            task("loop1", Some("loop2"), 1),
            task("loop2", Some("loop1"), 1),
        ]);
        assert_eq!(ids(forest.preorder()), vec!["root"]);
        let mut detached: Vec<&str> = forest.detached().iter().map(|id| id.0.as_str()).collect();
        detached.sort();
        assert_eq!(detached, vec!["loop1", "loop2", "orphan"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first_occurrence() {
        let mut second = task("a", None, 9);
        second.content = "duplicate".to_string();
        let forest = Forest::build(vec![task("a", None, 1), second]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.preorder()[0].task.content, "task a");
    }

    /// Acyclic snapshots: each task's parent (if any) has a smaller index.
    fn snapshot() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((any::<prop::sample::Index>(), any::<bool>(), 0i64..4), 1..40)
            .prop_map(|specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (parent, has_parent, order))| {
                        let parent = (has_parent && i > 0).then(|| format!("t{}", parent.index(i)));
                        task(&format!("t{i}"), parent.as_deref(), order)
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn test_forest_reproduces_parent_relation(tasks in snapshot()) {
            let forest = Forest::build(tasks.clone());
            prop_assert_eq!(forest.len(), tasks.len());
            prop_assert!(forest.detached().is_empty());

            let mut rebuilt: HashMap<TaskId, Option<TaskId>> = HashMap::new();
            for root in forest.roots() {
                rebuilt.insert(forest.node(*root).task.id.clone(), None);
            }
            for node in forest.preorder() {
                let orders: Vec<i64> = node.children.iter().map(|&c| forest.node(c).task.order).collect();
                prop_assert!(orders.windows(2).all(|w| w[0] <= w[1]));
                for &child in &node.children {
                    rebuilt.insert(forest.node(child).task.id.clone(), Some(node.task.id.clone()));
                }
            }

            let original: HashMap<TaskId, Option<TaskId>> =
                tasks.iter().map(|t| (t.id.clone(), t.parent_id.clone())).collect();
            prop_assert_eq!(rebuilt, original);
        }
    }
}
