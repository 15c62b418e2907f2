use std::{fmt, path::PathBuf};

use super::class_id::ClassId;

/// A malformed annotation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintParseError {
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the hint marker.
    pub col: usize,
    pub message: String,
    /// The offending line, for diagnostics.
    pub source_line: String,
}

impl fmt::Display for HintParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.file.display(),
            self.line,
            self.message
        )
    }
}

/// Fatal analysis failures. No partial graph is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Malformed hint at {0}")]
    HintParse(HintParseError),

    #[error(
        "Unresolved dependency '{missing}'{} (searched: {})",
        referrer_suffix(.referrer),
        format_roots(.roots_tried)
    )]
    UnresolvedDependency {
        /// `None` when the missing id is an entry.
        referrer: Option<ClassId>,
        missing: ClassId,
        roots_tried: Vec<PathBuf>,
    },

    #[error("Cyclic dependency: {}", format_chain(.chain))]
    CyclicDependency { chain: Vec<ClassId> },

    #[error("Internal invariant violated: {message}")]
    InternalInvariant { message: String },

    #[error("Failed to read '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid class id: \"{id}\"")]
    InvalidClassId { id: String },

    #[error("Entry pattern \"{pattern}\" matched no classes")]
    NoEntryMatch { pattern: String },

    #[error("Analysis cancelled")]
    Cancelled,
}

/// Non-fatal findings returned alongside a successful collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The same class exists under more than one root; the first root wins.
    DuplicateClassId {
        id: ClassId,
        used: PathBuf,
        shadowed: Vec<PathBuf>,
    },
    /// An `optional` dependency resolved nowhere and was left out.
    MissingOptional { referrer: ClassId, missing: ClassId },
    /// A malformed hint line skipped in lenient mode.
    SkippedHint(HintParseError),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateClassId { id, used, shadowed } => write!(
                f,
                "'{}' found under several roots; using {} (shadowed: {})",
                id,
                used.display(),
                format_roots(shadowed)
            ),
            Warning::MissingOptional { referrer, missing } => write!(
                f,
                "optional dependency '{missing}' of '{referrer}' not found"
            ),
            Warning::SkippedHint(error) => write!(f, "skipped malformed hint at {error}"),
        }
    }
}

fn referrer_suffix(referrer: &Option<ClassId>) -> String {
    match referrer {
        Some(id) => format!(" required by '{id}'"),
        None => " listed as entry".to_string(),
    }
}

fn format_roots(roots: &[PathBuf]) -> String {
    if roots.is_empty() {
        return "no roots".to_string();
    }
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `A -> B -> A`: the chain closed back on its first element.
pub fn format_chain(chain: &[ClassId]) -> String {
    chain
        .iter()
        .chain(chain.first())
        .map(ClassId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
