//! Deterministic, cycle-checked topological sort.

use std::collections::HashMap;

use super::{
    class_id::ClassId,
    error::AnalysisError,
    graph::{DependencyGraph, EdgeKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Finished,
}

/// Order every class so that each one comes after all of its `edge_kind`
/// dependencies.
///
/// Depth-first, post-order. Roots are the graph's entries in their given
/// order followed by every other class in discovery order; successors are
/// visited in edge-list order. Classes without a constraint between them
/// therefore keep first-discovery order, and the result is identical across
/// runs over the same graph.
///
/// Reaching a class that is still in progress is a cycle and fails the whole
/// sort with the chain from the re-entered class along the current path.
pub fn sort_deps_topologically(
    graph: &DependencyGraph,
    edge_kind: EdgeKind,
) -> Result<Vec<ClassId>, AnalysisError> {
    let mut state: HashMap<&ClassId, Visit> = HashMap::with_capacity(graph.len());
    let mut order: Vec<ClassId> = Vec::with_capacity(graph.len());

    let roots = graph
        .entries()
        .iter()
        .filter(|id| graph.contains(id))
        .chain(graph.ids());

    for root in roots {
        if state.contains_key(root) {
            continue;
        }

        // Explicit stack of (class, index of next successor to try); the
        // stack doubles as the current DFS path for cycle reporting.
        let mut stack: Vec<(&ClassId, usize)> = vec![(root, 0)];
        state.insert(root, Visit::InProgress);

        while let Some((current, next)) = stack.last_mut() {
            let current: &ClassId = *current;
            let Some(successor) = graph.edges(current, edge_kind).get(*next) else {
                state.insert(current, Visit::Finished);
                order.push(current.clone());
                stack.pop();
                continue;
            };
            *next += 1;

            match state.get(successor) {
                Some(Visit::Finished) => {}
                Some(Visit::InProgress) => {
                    let start = stack
                        .iter()
                        .position(|(id, _)| *id == successor)
                        .unwrap_or_default();
                    let chain = stack[start..].iter().map(|(id, _)| (*id).clone()).collect();
                    return Err(AnalysisError::CyclicDependency { chain });
                }
                None => {
                    if !graph.contains(successor) {
                        return Err(AnalysisError::InternalInvariant {
                            message: format!("edge target '{successor}' is not in the graph"),
                        });
                    }
                    state.insert(successor, Visit::InProgress);
                    stack.push((successor, 0));
                }
            }
        }
    }

    Ok(order)
}
