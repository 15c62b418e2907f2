use std::path::PathBuf;

use serde::Serialize;

use crate::{
    analyzer::{ClassId, EdgeKind, Hint, HintIndex},
    cli::args::OutputFormat,
    issues::Issue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Order,
    Paths,
    Hints,
    Graph,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Order(OrderSummary),
    Paths(Vec<PathBuf>),
    Hints(HintIndex),
    Graph(GraphSummary),
    Init(InitSummary),
    /// Analysis stopped on an error; the reason is among the issues.
    Failed,
}

#[derive(Debug)]
pub struct OrderSummary {
    pub edges: EdgeKind,
    pub classes: Vec<ClassId>,
}

/// Serializable view of the dependency graph.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub entries: Vec<ClassId>,
    pub classes: Vec<GraphNode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: ClassId,
    pub path: String,
    pub root_index: usize,
    pub load: Vec<ClassId>,
    #[serde(rename = "use")]
    pub uses: Vec<ClassId>,
    pub hints: Vec<Hint>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running classdeps commands
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub format: OutputFormat,
    pub error_count: usize,
    pub warning_count: usize,
    /// Errors and warnings found during analysis, in discovery order.
    pub issues: Vec<Issue>,
    /// Number of classes in the dependency graph (0 if collection failed).
    pub classes_scanned: usize,
}
