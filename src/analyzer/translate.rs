use std::path::PathBuf;

use super::{class_id::ClassId, error::AnalysisError, resolver::Resolver};

/// Map ordered class ids to their source paths, preserving order.
///
/// The ids are expected to come out of a built graph, so every one of them
/// is already canonical and must resolve. A miss here means the graph and the resolver disagree.
pub fn translate_class_ids_to_paths(
    ids: &[ClassId],
    resolver: &Resolver,
) -> Result<Vec<PathBuf>, AnalysisError> {
    ids.iter()
        .map(|id| {
            resolver
                .resolve_canonical(id)
                .map(|resolution| resolution.path)
                .ok_or_else(|| AnalysisError::InternalInvariant {
                    message: format!(
                        "'{id}' is part of the graph but no longer resolves under {} root(s)",
                        resolver.roots().len()
                    ),
                })
        })
        .collect()
}
