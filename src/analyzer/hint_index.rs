use std::collections::{BTreeMap, BTreeSet};

use super::{class_id::ClassId, graph::DependencyGraph};

/// Hint kind name → classes carrying at least one hint of that kind.
pub type HintIndex = BTreeMap<String, BTreeSet<ClassId>>;

/// Invert per-class hints into a per-kind index.
///
/// Kinds nobody uses are absent rather than mapped to an empty set.
pub fn create_at_hints_index(graph: &DependencyGraph) -> HintIndex {
    let mut index = HintIndex::new();
    for record in graph.records() {
        for hint in &record.hints {
            index
                .entry(hint.kind.name().to_string())
                .or_default()
                .insert(record.id.clone());
        }
    }
    index
}
