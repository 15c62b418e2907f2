use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, OrderSummary, helper::analyze};
use crate::{
    analyzer::sort_deps_topologically,
    cli::{args::OrderCommand, context::AnalysisContext},
};

pub fn order(cmd: OrderCommand) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&cmd.common)?;
    let edges = cmd.edges;

    analyze(&ctx, CommandKind::Order, |collected| {
        let classes = sort_deps_topologically(&collected.graph, edges)?;
        Ok(CommandSummary::Order(OrderSummary { edges, classes }))
    })
}
