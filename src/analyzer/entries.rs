//! Entry list expansion.
//!
//! Entries are either plain class ids or glob patterns over class ids
//! (`app.ui.*`, `app.?.Main`). Patterns are matched against every class file
//! found under the roots.

use std::collections::HashSet;

use glob::Pattern;
use walkdir::WalkDir;

use super::{class_id::ClassId, error::AnalysisError, resolver::Resolver};

/// Check if an entry contains glob wildcards (* or ?).
pub fn is_entry_pattern(entry: &str) -> bool {
    entry.contains('*') || entry.contains('?')
}

/// Expand `entries` into concrete class ids.
///
/// Plain ids keep their position and go through the namespace map. Each
/// pattern is replaced by its matches in sorted order; matches come from
/// file paths and are canonical already. A pattern matching nothing is an
/// error. Duplicates keep their first position.
pub fn expand_entries(
    entries: &[String],
    resolver: &Resolver,
) -> Result<Vec<ClassId>, AnalysisError> {
    let mut available: Option<Vec<ClassId>> = None;
    let mut seen = HashSet::new();
    let mut expanded = Vec::new();

    for entry in entries {
        let entry = entry.trim();
        if !is_entry_pattern(entry) {
            let id = resolver.canonicalize(&ClassId::parse(entry)?);
            if seen.insert(id.clone()) {
                expanded.push(id);
            }
            continue;
        }

        let pattern = Pattern::new(entry).map_err(|_| AnalysisError::InvalidClassId {
            id: entry.to_string(),
        })?;
        let classes = available.get_or_insert_with(|| list_classes(resolver));
        let mut matched: Vec<&ClassId> = classes
            .iter()
            .filter(|id| pattern.matches(id.as_str()))
            .collect();
        if matched.is_empty() {
            return Err(AnalysisError::NoEntryMatch {
                pattern: entry.to_string(),
            });
        }
        matched.sort();
        for id in matched {
            if seen.insert(id.clone()) {
                expanded.push(id.clone());
            }
        }
    }

    Ok(expanded)
}

/// Every class id available under the resolver's roots, first root first,
/// without duplicates.
pub fn list_classes(resolver: &Resolver) -> Vec<ClassId> {
    let mut seen = HashSet::new();
    let mut classes = Vec::new();

    for root in resolver.roots() {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file());
        for entry in walker {
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if let Some(id) = ClassId::from_relative_path(relative, resolver.extension())
                && seen.insert(id.clone())
            {
                classes.push(id);
            }
        }
    }

    classes
}
