//! Class id → source file resolution across ordered root directories.

use std::{collections::BTreeMap, path::PathBuf};

use super::class_id::ClassId;

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = ".js";

/// Alias prefix → canonical prefix table.
///
/// Lookups use the longest alias that matches on whole segments.
#[derive(Debug, Clone, Default)]
pub struct NamespaceMap {
    // Longest alias first; ties broken lexically so lookups are stable.
    entries: Vec<(String, String)>,
}

impl NamespaceMap {
    pub fn new(map: &BTreeMap<String, String>) -> Self {
        let mut entries: Vec<_> = map
            .iter()
            .map(|(alias, canonical)| (alias.clone(), canonical.clone()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite `id` through the longest matching alias, if any.
    pub fn canonicalize(&self, id: &ClassId) -> ClassId {
        self.entries
            .iter()
            .find_map(|(alias, canonical)| id.with_prefix_replaced(alias, canonical))
            .unwrap_or_else(|| id.clone())
    }
}

/// Where a class was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Canonical id (after namespace remapping).
    pub id: ClassId,
    pub path: PathBuf,
    /// Index into the resolver's roots of the winning root.
    pub root_index: usize,
    /// Files for the same id under later roots. Informational only.
    pub duplicates: Vec<PathBuf>,
}

/// Resolves class ids against an ordered list of roots.
#[derive(Debug, Clone)]
pub struct Resolver {
    roots: Vec<PathBuf>,
    namespaces: NamespaceMap,
    extension: String,
}

impl Resolver {
    pub fn new(roots: Vec<PathBuf>, namespaces: NamespaceMap, extension: impl Into<String>) -> Self {
        Self {
            roots,
            namespaces,
            extension: extension.into(),
        }
    }

    /// Resolver with no namespace aliases and the default extension.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self::new(roots, NamespaceMap::default(), DEFAULT_EXTENSION)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn canonicalize(&self, id: &ClassId) -> ClassId {
        self.namespaces.canonicalize(id)
    }

    /// Resolve `id` to the first root containing its source file.
    ///
    /// Every root is probed so that shadowed copies can be reported as
    /// duplicates; the earliest root always wins.
    pub fn resolve(&self, id: &ClassId) -> Option<Resolution> {
        self.resolve_canonical(&self.canonicalize(id))
    }

    /// Like [`Resolver::resolve`], for an id that is already canonical.
    ///
    /// The namespace map is not applied again, so maps whose targets start
    /// with one of their own aliases stay stable.
    pub fn resolve_canonical(&self, id: &ClassId) -> Option<Resolution> {
        let id = id.clone();
        let relative = id.to_relative_path(&self.extension);

        let mut found = self
            .roots
            .iter()
            .enumerate()
            .map(|(index, root)| (index, root.join(&relative)))
            .filter(|(_, path)| path.is_file());

        let (root_index, path) = found.next()?;
        let duplicates = found.map(|(_, path)| path).collect();

        Some(Resolution {
            id,
            path,
            root_index,
            duplicates,
        })
    }
}
