//! Dependency graph produced by the closure computation.

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use clap::ValueEnum;
use serde::Serialize;

use super::{
    class_id::ClassId,
    hints::{Hint, HintKind},
};

/// Which hint-derived edges to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// `require` hints: the target must be loaded first.
    #[default]
    Load,
    /// `use` and `optional` hints: needed at run time only.
    Use,
}

/// One scanned class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub id: ClassId,
    pub path: PathBuf,
    pub root_index: usize,
    pub hints: Vec<Hint>,
    #[serde(skip)]
    load_edges: Vec<ClassId>,
    #[serde(skip)]
    use_edges: Vec<ClassId>,
}

impl ClassRecord {
    /// Build a record, deriving edge lists from `hints`.
    ///
    /// `ignore` hints remove their target from both lists, self references are
    /// dropped, and duplicates keep their first position. Targets for which
    /// `is_present` is false are left out (unresolved optional dependencies).
    pub fn new(
        id: ClassId,
        path: PathBuf,
        root_index: usize,
        hints: Vec<Hint>,
        is_present: impl Fn(&ClassId) -> bool,
    ) -> Self {
        let (load_edges, use_edges) = derive_edges(&id, &hints, is_present);

        Self {
            id,
            path,
            root_index,
            hints,
            load_edges,
            use_edges,
        }
    }

    pub fn edges(&self, kind: EdgeKind) -> &[ClassId] {
        match kind {
            EdgeKind::Load => &self.load_edges,
            EdgeKind::Use => &self.use_edges,
        }
    }

    /// Whether this class carries `ignore(target)`.
    pub fn ignores(&self, target: &ClassId) -> bool {
        self.hints
            .iter()
            .any(|h| matches!(&h.kind, HintKind::Ignore(t) if t == target))
    }
}

fn derive_edges(
    id: &ClassId,
    hints: &[Hint],
    is_present: impl Fn(&ClassId) -> bool,
) -> (Vec<ClassId>, Vec<ClassId>) {
    let ignored: HashSet<&ClassId> = hints
        .iter()
        .filter_map(|h| match &h.kind {
            HintKind::Ignore(target) => Some(target),
            _ => None,
        })
        .collect();

    let mut load_edges = Vec::new();
    let mut use_edges = Vec::new();
    for hint in hints {
        let (target, edges) = match &hint.kind {
            HintKind::Require(target) => (target, &mut load_edges),
            HintKind::Use(target) | HintKind::Optional(target) => (target, &mut use_edges),
            HintKind::Ignore(_) | HintKind::Resource { .. } => continue,
        };
        if target == id || ignored.contains(target) || edges.contains(target) || !is_present(target)
        {
            continue;
        }
        edges.push(target.clone());
    }
    (load_edges, use_edges)
}

/// Insertion-ordered class records plus the entries the closure started from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    entries: Vec<ClassId>,
    records: Vec<ClassRecord>,
    index: HashMap<ClassId, usize>,
}

impl DependencyGraph {
    pub fn new(entries: Vec<ClassId>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// Insert a record. Returns false (and keeps the original) when the id
    /// is already present; records are immutable once inserted.
    pub fn insert(&mut self, record: ClassRecord) -> bool {
        if self.index.contains_key(&record.id) {
            return false;
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn entries(&self) -> &[ClassId] {
        &self.entries
    }

    pub fn get(&self, id: &ClassId) -> Option<&ClassRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &ClassId) -> bool {
        self.index.contains_key(id)
    }

    /// Records in insertion (discovery) order.
    pub fn records(&self) -> impl Iterator<Item = &ClassRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ClassId> {
        self.records.iter().map(|r| &r.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn edges(&self, id: &ClassId, kind: EdgeKind) -> &[ClassId] {
        self.get(id).map(|r| r.edges(kind)).unwrap_or_default()
    }

    /// First edge whose target has no record, if any.
    pub fn find_dangling_edge(&self) -> Option<(&ClassId, &ClassId)> {
        self.records.iter().find_map(|record| {
            [EdgeKind::Load, EdgeKind::Use]
                .into_iter()
                .flat_map(|kind| record.edges(kind))
                .find(|target| !self.contains(target))
                .map(|target| (&record.id, target))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn id(s: &str) -> ClassId {
        ClassId::parse(s).unwrap()
    }

    fn hint(kind: HintKind) -> Hint {
        Hint { kind, line: 1 }
    }

    fn record(name: &str, hints: Vec<HintKind>) -> ClassRecord {
        ClassRecord::new(
            id(name),
            PathBuf::from(format!("{name}.js")),
            0,
            hints.into_iter().map(hint).collect(),
            |_| true,
        )
    }

    #[test]
    fn test_edges_split_by_kind() {
        let r = record(
            "a.A",
            vec![
                HintKind::Require(id("a.B")),
                HintKind::Use(id("a.C")),
                HintKind::Optional(id("a.D")),
                HintKind::Resource {
                    kind: "asset".to_string(),
                    payload: "x".to_string(),
                },
            ],
        );
        assert_eq!(r.edges(EdgeKind::Load), &[id("a.B")]);
        assert_eq!(r.edges(EdgeKind::Use), &[id("a.C"), id("a.D")]);
    }

    #[test]
    fn test_ignore_removes_edges_regardless_of_position() {
        let r = record(
            "a.A",
            vec![
                HintKind::Require(id("a.X")),
                HintKind::Use(id("a.Y")),
                HintKind::Ignore(id("a.X")),
                HintKind::Ignore(id("a.Y")),
            ],
        );
        assert!(r.edges(EdgeKind::Load).is_empty());
        assert!(r.edges(EdgeKind::Use).is_empty());
        assert!(r.ignores(&id("a.X")));
    }

    #[test]
    fn test_duplicate_and_self_edges_dropped() {
        let r = record(
            "a.A",
            vec![
                HintKind::Require(id("a.C")),
                HintKind::Require(id("a.A")),
                HintKind::Require(id("a.B")),
                HintKind::Require(id("a.C")),
            ],
        );
        assert_eq!(r.edges(EdgeKind::Load), &[id("a.C"), id("a.B")]);
    }

    #[test]
    fn test_absent_targets_dropped() {
        let r = ClassRecord::new(
            id("a.A"),
            PathBuf::from("a/A.js"),
            0,
            vec![hint(HintKind::Optional(id("a.Gone")))],
            |target| *target != id("a.Gone"),
        );
        assert!(r.edges(EdgeKind::Use).is_empty());
    }

    #[test]
    fn test_graph_insertion_order_and_immutability() {
        let mut graph = DependencyGraph::new(vec![id("a.B")]);
        assert!(graph.insert(record("a.B", vec![])));
        assert!(graph.insert(record("a.A", vec![])));
        assert!(!graph.insert(record("a.B", vec![HintKind::Require(id("a.A"))])));

        assert_eq!(graph.ids().cloned().collect::<Vec<_>>(), vec![id("a.B"), id("a.A")]);
        assert!(graph.edges(&id("a.B"), EdgeKind::Load).is_empty());
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_find_dangling_edge() {
        let mut graph = DependencyGraph::new(vec![id("a.A")]);
        graph.insert(record("a.A", vec![HintKind::Use(id("a.B"))]));
        assert_eq!(graph.find_dangling_edge(), Some((&id("a.A"), &id("a.B"))));

        graph.insert(record("a.B", vec![]));
        assert_eq!(graph.find_dangling_edge(), None);
    }
}
