use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, helper::analyze};
use crate::{
    analyzer::{EdgeKind, sort_deps_topologically, translate_class_ids_to_paths},
    cli::{args::PathsCommand, context::AnalysisContext},
};

pub fn paths(cmd: PathsCommand) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&cmd.common)?;

    analyze(&ctx, CommandKind::Paths, |collected| {
        let classes = sort_deps_topologically(&collected.graph, EdgeKind::Load)?;
        let paths = translate_class_ids_to_paths(&classes, &ctx.resolver)?;
        Ok(CommandSummary::Paths(paths))
    })
}
