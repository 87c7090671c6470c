use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::{TaskId, TaskRecord};

/// Result of scanning a batch for dependency cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub has_cycle: bool,
    /// Each path starts and ends at the same id. Not deduplicated.
    pub cycles: Vec<Vec<TaskId>>,
}

/// Format a cycle path as a human-readable string: `A -> B -> C -> A`.
pub fn format_cycle_path(path: &[TaskId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

struct Frame<'a> {
    node: &'a TaskId,
    next: usize,
}

/// Service for detecting circular dependencies in a task batch
///
/// Edges run from a task to each dependency that is also present in the
/// batch; references to unknown ids are dropped. Traversal is an iterative
/// depth-first search so deep chains cannot overflow the call stack.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector;

impl CycleDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect all cycles reachable by a depth-first walk of the batch.
    ///
    /// Roots are visited in input order. A node marked done is never
    /// re-explored, so a loop only reachable through an already finished node
    /// is not reported again.
    pub fn detect(&self, tasks: &[TaskRecord]) -> CycleReport {
        let (order, graph) = build_graph(tasks);

        let mut marks: HashMap<&TaskId, Mark> = HashMap::with_capacity(order.len());
        let mut cycles = Vec::new();

        for &root in &order {
            if marks.contains_key(root) {
                continue;
            }

            marks.insert(root, Mark::InProgress);
            let mut stack = vec![Frame { node: root, next: 0 }];

            while let Some(frame) = stack.last_mut() {
                let neighbors = graph.get(frame.node).map_or(&[][..], Vec::as_slice);

                if frame.next >= neighbors.len() {
                    marks.insert(frame.node, Mark::Done);
                    stack.pop();
                    continue;
                }

                let neighbor = neighbors[frame.next];
                frame.next += 1;

                match marks.get(neighbor).copied() {
                    Some(Mark::InProgress) => {
                        let start = stack
                            .iter()
                            .position(|f| f.node == neighbor)
                            .unwrap_or(0);
                        let mut path: Vec<TaskId> =
                            stack[start..].iter().map(|f| f.node.clone()).collect();
                        path.push(neighbor.clone());
                        tracing::debug!(cycle = %format_cycle_path(&path), "dependency cycle detected");
                        cycles.push(path);
                    }
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(neighbor, Mark::InProgress);
                        stack.push(Frame {
                            node: neighbor,
                            next: 0,
                        });
                    }
                }
            }
        }

        CycleReport {
            has_cycle: !cycles.is_empty(),
            cycles,
        }
    }
}

/// Adjacency list over known ids, plus the ids in first-seen order.
///
/// Duplicate task ids accumulate their edges under one node.
fn build_graph(tasks: &[TaskRecord]) -> (Vec<&TaskId>, HashMap<&TaskId, Vec<&TaskId>>) {
    let mut order = Vec::with_capacity(tasks.len());
    let mut graph: HashMap<&TaskId, Vec<&TaskId>> = HashMap::with_capacity(tasks.len());

    for task in tasks {
        if !graph.contains_key(&task.id) {
            order.push(&task.id);
            graph.insert(&task.id, Vec::new());
        }
    }

    for task in tasks {
        let edges: Vec<&TaskId> = task
            .dependency_ids()
            .iter()
            .filter(|dep| graph.contains_key(dep))
            .collect();
        if let Some(adjacent) = graph.get_mut(&task.id) {
            adjacent.extend(edges);
        }
    }

    (order, graph)
}
