use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, helper::analyze};
use crate::{
    analyzer::create_at_hints_index,
    cli::{args::HintsCommand, context::AnalysisContext},
};

pub fn hints(cmd: HintsCommand) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&cmd.common)?;
    let kind = cmd.kind.map(|k| k.to_lowercase());

    analyze(&ctx, CommandKind::Hints, |collected| {
        let mut index = create_at_hints_index(&collected.graph);
        if let Some(kind) = &kind {
            index.retain(|name, _| name == kind);
        }
        Ok(CommandSummary::Hints(index))
    })
}
