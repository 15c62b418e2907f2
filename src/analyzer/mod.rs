//! Class dependency analysis.
//!
//! Pipeline, leaves first:
//!
//! 1. `hints` - extract annotation hints from one source file
//! 2. `resolver` - map a class id to a file across ordered roots
//! 3. `collect` - worklist closure over the entries, producing a `DependencyGraph`
//! 4. `sort` - deterministic, cycle-checked load order
//! 5. `translate` - ordered class ids to ordered file paths
//! 6. `hint_index` - hint kind to classes
//!
//! `entries` expands wildcard entry patterns before step 3.

pub mod class_id;
pub mod collect;
pub mod entries;
pub mod error;
pub mod graph;
pub mod hint_index;
pub mod hints;
pub mod resolver;
pub mod sort;
pub mod translate;

pub use class_id::ClassId;
pub use collect::{AbortHandle, CollectOptions, CollectResult, collect_deps_recursive};
pub use entries::{expand_entries, list_classes};
pub use error::{AnalysisError, HintParseError, Warning};
pub use graph::{ClassRecord, DependencyGraph, EdgeKind};
pub use hint_index::{HintIndex, create_at_hints_index};
pub use hints::{Hint, HintErrorMode, HintGrammar, HintKind, scan_hints};
pub use resolver::{NamespaceMap, Resolution, Resolver};
pub use sort::sort_deps_topologically;
pub use translate::translate_class_ids_to_paths;
