use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, GraphNode, GraphSummary, helper::analyze};
use crate::{
    analyzer::{DependencyGraph, EdgeKind},
    cli::{args::GraphCommand, context::AnalysisContext},
};

pub fn graph(cmd: GraphCommand) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&cmd.common)?;

    analyze(&ctx, CommandKind::Graph, |collected| {
        Ok(CommandSummary::Graph(summarize(&collected.graph)))
    })
}

/// Nodes in discovery order, each with its edge lists.
pub fn summarize(graph: &DependencyGraph) -> GraphSummary {
    GraphSummary {
        entries: graph.entries().to_vec(),
        classes: graph
            .records()
            .map(|record| GraphNode {
                id: record.id.clone(),
                path: record.path.display().to_string(),
                root_index: record.root_index,
                load: record.edges(EdgeKind::Load).to_vec(),
                uses: record.edges(EdgeKind::Use).to_vec(),
                hints: record.hints.clone(),
            })
            .collect(),
    }
}
