use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    analyzer::{AnalysisError, CollectResult},
    cli::{args::OutputFormat, context::AnalysisContext},
    issues::{Issue, Severity},
};

/// Collect the dependency graph and run `analyze` on it.
///
/// Analysis failures caused by the analyzed code (bad hints, missing
/// classes, cycles) become issues on a `Failed` result. Internal failures
/// are returned as errors.
pub fn analyze<F>(ctx: &AnalysisContext, kind: CommandKind, analyze: F) -> Result<CommandResult>
where
    F: FnOnce(&CollectResult) -> Result<CommandSummary, AnalysisError>,
{
    let (summary, issues, classes_scanned) = match ctx.collect() {
        Ok(collected) => {
            let mut issues: Vec<Issue> =
                collected.warnings.iter().map(Issue::from_warning).collect();
            let summary = match analyze(&collected) {
                Ok(summary) => summary,
                Err(err) => {
                    issues.push(into_issue(err)?);
                    CommandSummary::Failed
                }
            };
            (summary, issues, collected.graph.len())
        }
        Err(err) => (CommandSummary::Failed, vec![into_issue(err)?], 0),
    };

    Ok(finish(kind, summary, issues, classes_scanned, ctx.format))
}

fn into_issue(err: AnalysisError) -> Result<Issue> {
    match Issue::from_error(&err) {
        Some(issue) => Ok(issue),
        None => Err(anyhow::Error::new(err).context("Dependency analysis failed")),
    }
}

pub fn finish(
    kind: CommandKind,
    summary: CommandSummary,
    issues: Vec<Issue>,
    classes_scanned: usize,
    format: OutputFormat,
) -> CommandResult {
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        kind,
        summary,
        format,
        error_count,
        warning_count,
        issues,
        classes_scanned,
    }
}
