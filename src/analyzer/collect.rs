//! Dependency closure computation.
//!
//! Starting from the entry ids, every discovered class is resolved, read and
//! scanned exactly once. The worklist is FIFO, so discovery order (and with it
//! every ordering derived from the graph) depends only on the inputs.
//!
//! With `parallel` enabled the whole queued frontier is read and scanned on
//! the rayon pool, then merged back by this thread in queue order. The merge
//! is the only place the graph is mutated, so both modes produce identical
//! graphs.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fs,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use rayon::prelude::*;

use super::{
    class_id::ClassId,
    error::{AnalysisError, Warning},
    graph::{ClassRecord, DependencyGraph},
    hints::{Hint, HintErrorMode, HintGrammar, HintKind, HintScan, scan_hints},
    resolver::{Resolution, Resolver},
};

/// Cooperative cancellation flag, checked between worklist items.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Knobs for [`collect_deps_recursive`].
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    pub grammar: HintGrammar,
    pub hint_errors: HintErrorMode,
    /// Read and scan each frontier on the rayon pool.
    pub parallel: bool,
    pub abort: AbortHandle,
}

/// A successfully built graph plus everything worth warning about.
#[derive(Debug, Clone)]
pub struct CollectResult {
    pub graph: DependencyGraph,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone)]
struct Pending {
    id: ClassId,
    referrer: Option<ClassId>,
    optional: bool,
}

/// A class read from disk but not yet merged into the graph.
struct Loaded {
    resolution: Resolution,
    scan: HintScan,
}

/// Compute the dependency closure of `entries`.
///
/// Entries must be canonical ids, as returned by
/// [`expand_entries`](super::entries::expand_entries).
///
/// Fails on the first unresolvable non-optional dependency, unreadable file,
/// malformed hint (unless skipping is configured) or cancellation. No partial
/// graph is returned on failure.
pub fn collect_deps_recursive(
    resolver: &Resolver,
    entries: &[ClassId],
    options: &CollectOptions,
) -> Result<CollectResult, AnalysisError> {
    let mut builder = Builder::new(resolver, entries);

    loop {
        if options.abort.is_aborted() {
            return Err(AnalysisError::Cancelled);
        }
        let batch: Vec<Pending> = if options.parallel {
            builder.queue.drain(..).collect()
        } else {
            builder.queue.pop_front().into_iter().collect()
        };
        if batch.is_empty() {
            break;
        }

        let loaded: Vec<_> = if options.parallel && batch.len() > 1 {
            batch
                .par_iter()
                .map(|pending| load_class(resolver, &pending.id, options))
                .collect()
        } else {
            batch
                .iter()
                .map(|pending| load_class(resolver, &pending.id, options))
                .collect()
        };

        for (pending, loaded) in batch.into_iter().zip(loaded) {
            if options.abort.is_aborted() {
                return Err(AnalysisError::Cancelled);
            }
            builder.merge(pending, loaded?)?;
        }
    }

    builder.finish()
}

fn load_class(
    resolver: &Resolver,
    id: &ClassId,
    options: &CollectOptions,
) -> Result<Option<Loaded>, AnalysisError> {
    let Some(resolution) = resolver.resolve_canonical(id) else {
        return Ok(None);
    };
    let source = fs::read_to_string(&resolution.path).map_err(|source| AnalysisError::Read {
        path: resolution.path.clone(),
        source,
    })?;
    let mut scan = scan_hints(
        &source,
        &resolution.path,
        &options.grammar,
        options.hint_errors,
    )
    .map_err(AnalysisError::HintParse)?;

    // Targets are stored canonical so aliases of one class share a node.
    scan.hints = scan
        .hints
        .into_iter()
        .map(|hint| Hint {
            kind: hint.kind.map_target(|target| resolver.canonicalize(&target)),
            line: hint.line,
        })
        .collect();

    Ok(Some(Loaded { resolution, scan }))
}

struct Scanned {
    id: ClassId,
    path: PathBuf,
    root_index: usize,
    hints: Vec<Hint>,
}

/// Dependency targets to enqueue, in hint order, with their `optional` flag.
fn dependency_targets(id: &ClassId, hints: &[Hint]) -> Vec<(ClassId, bool)> {
    let ignored: HashSet<&ClassId> = hints
        .iter()
        .filter_map(|h| match &h.kind {
            HintKind::Ignore(target) => Some(target),
            _ => None,
        })
        .collect();

    hints
        .iter()
        .filter_map(|hint| match &hint.kind {
            HintKind::Require(target) | HintKind::Use(target) => Some((target, false)),
            HintKind::Optional(target) => Some((target, true)),
            HintKind::Ignore(_) | HintKind::Resource { .. } => None,
        })
        .filter(|(target, _)| *target != id && !ignored.contains(target))
        .map(|(target, optional)| (target.clone(), optional))
        .collect()
}

/// Single owner of all closure state for one run.
struct Builder<'a> {
    resolver: &'a Resolver,
    entries: Vec<ClassId>,
    queue: VecDeque<Pending>,
    queued: HashSet<ClassId>,
    /// First non-optional referrer of every queued id that has one.
    required_by: HashMap<ClassId, ClassId>,
    missing_optional: HashSet<ClassId>,
    scanned: Vec<Scanned>,
    warnings: Vec<Warning>,
}

impl<'a> Builder<'a> {
    fn new(resolver: &'a Resolver, entries: &[ClassId]) -> Self {
        let mut builder = Self {
            resolver,
            entries: Vec::new(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
            required_by: HashMap::new(),
            missing_optional: HashSet::new(),
            scanned: Vec::new(),
            warnings: Vec::new(),
        };
        for id in entries {
            if builder.queued.insert(id.clone()) {
                builder.entries.push(id.clone());
                builder.queue.push_back(Pending {
                    id: id.clone(),
                    referrer: None,
                    optional: false,
                });
            }
        }
        builder
    }

    fn merge(&mut self, pending: Pending, loaded: Option<Loaded>) -> Result<(), AnalysisError> {
        let Some(Loaded { resolution, scan }) = loaded else {
            return self.unresolved(pending);
        };

        if !resolution.duplicates.is_empty() {
            self.warnings.push(Warning::DuplicateClassId {
                id: resolution.id.clone(),
                used: resolution.path.clone(),
                shadowed: resolution.duplicates.clone(),
            });
        }
        self.warnings
            .extend(scan.skipped.into_iter().map(Warning::SkippedHint));

        let id = resolution.id;
        for (target, optional) in dependency_targets(&id, &scan.hints) {
            self.enqueue(target, &id, optional)?;
        }

        self.scanned.push(Scanned {
            id,
            path: resolution.path,
            root_index: resolution.root_index,
            hints: scan.hints,
        });
        Ok(())
    }

    fn enqueue(
        &mut self,
        target: ClassId,
        referrer: &ClassId,
        optional: bool,
    ) -> Result<(), AnalysisError> {
        if !optional {
            if self.missing_optional.contains(&target) {
                return Err(self.unresolved_error(Some(referrer.clone()), target));
            }
            self.required_by
                .entry(target.clone())
                .or_insert_with(|| referrer.clone());
        }
        if self.queued.insert(target.clone()) {
            self.queue.push_back(Pending {
                id: target,
                referrer: Some(referrer.clone()),
                optional,
            });
        }
        Ok(())
    }

    fn unresolved(&mut self, pending: Pending) -> Result<(), AnalysisError> {
        if let Some(referrer) = self.required_by.get(&pending.id) {
            return Err(self.unresolved_error(Some(referrer.clone()), pending.id));
        }
        match (pending.optional, pending.referrer) {
            (true, Some(referrer)) => {
                self.warnings.push(Warning::MissingOptional {
                    referrer,
                    missing: pending.id.clone(),
                });
                self.missing_optional.insert(pending.id);
                Ok(())
            }
            (_, referrer) => Err(self.unresolved_error(referrer, pending.id)),
        }
    }

    fn unresolved_error(&self, referrer: Option<ClassId>, missing: ClassId) -> AnalysisError {
        AnalysisError::UnresolvedDependency {
            referrer,
            missing,
            roots_tried: self.resolver.roots().to_vec(),
        }
    }

    fn finish(self) -> Result<CollectResult, AnalysisError> {
        let missing_optional = &self.missing_optional;
        let records: Vec<ClassRecord> = self
            .scanned
            .iter()
            .map(|s| {
                ClassRecord::new(
                    s.id.clone(),
                    s.path.clone(),
                    s.root_index,
                    s.hints.clone(),
                    |target| !missing_optional.contains(target),
                )
            })
            .collect();

        let mut graph = DependencyGraph::new(self.entries);
        for record in records {
            graph.insert(record);
        }

        if let Some((from, to)) = graph.find_dangling_edge() {
            return Err(AnalysisError::InternalInvariant {
                message: format!("edge {from} -> {to} points outside the graph"),
            });
        }

        Ok(CollectResult {
            graph,
            warnings: self.warnings,
        })
    }
}
