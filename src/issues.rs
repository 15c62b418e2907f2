//! Issue types for dependency analysis results.
//!
//! Fatal analysis failures that point at a user mistake (bad hint, missing
//! class, cycle) and every non-fatal warning are turned into issues so they
//! can be reported uniformly. Anything else is an internal error and never
//! becomes an issue.

use std::path::Path;

use enum_dispatch::enum_dispatch;

use crate::analyzer::{AnalysisError, ClassId, HintParseError, Warning, error::format_chain};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    HintParse,
    UnresolvedDependency,
    CyclicDependency,
    DuplicateClass,
    MissingOptional,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::HintParse => write!(f, "hint-parse"),
            Rule::UnresolvedDependency => write!(f, "unresolved-dependency"),
            Rule::CyclicDependency => write!(f, "cyclic-dependency"),
            Rule::DuplicateClass => write!(f, "duplicate-class"),
            Rule::MissingOptional => write!(f, "missing-optional"),
        }
    }
}

/// A position inside a source file, with the line text for context display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
}

// ============================================================
// Issue Types
// ============================================================

/// Malformed annotation line. An error when fatal, a warning when skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintParseIssue {
    pub context: SourceContext,
    pub message: String,
    pub skipped: bool,
}

impl From<&HintParseError> for SourceContext {
    fn from(error: &HintParseError) -> Self {
        Self {
            file_path: error.file.display().to_string(),
            line: error.line,
            col: error.col,
            source_line: error.source_line.clone(),
        }
    }
}

/// A dependency (or entry) found under none of the roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDependencyIssue {
    pub referrer: Option<ClassId>,
    pub missing: ClassId,
    pub roots_tried: Vec<String>,
}

impl UnresolvedDependencyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnresolvedDependency
    }
}

/// Load (or use) dependencies forming a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicDependencyIssue {
    pub chain: Vec<ClassId>,
}

impl CyclicDependencyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::CyclicDependency
    }
}

/// Same class under several roots; the first root wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateClassIssue {
    pub id: ClassId,
    pub used: String,
    pub shadowed: Vec<String>,
}

impl DuplicateClassIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DuplicateClass
    }
}

/// `optional` dependency that resolved nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingOptionalIssue {
    pub referrer: ClassId,
    pub missing: ClassId,
}

impl MissingOptionalIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingOptional
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HintParse(HintParseIssue),
    UnresolvedDependency(UnresolvedDependencyIssue),
    CyclicDependency(CyclicDependencyIssue),
    DuplicateClass(DuplicateClassIssue),
    MissingOptional(MissingOptionalIssue),
}

impl Issue {
    /// Issue for a fatal analysis error, or `None` if the error is internal.
    pub fn from_error(error: &AnalysisError) -> Option<Self> {
        match error {
            AnalysisError::HintParse(e) => Some(Issue::HintParse(HintParseIssue {
                context: e.into(),
                message: e.message.clone(),
                skipped: false,
            })),
            AnalysisError::UnresolvedDependency {
                referrer,
                missing,
                roots_tried,
            } => Some(Issue::UnresolvedDependency(UnresolvedDependencyIssue {
                referrer: referrer.clone(),
                missing: missing.clone(),
                roots_tried: roots_tried.iter().map(|r| display_path(r)).collect(),
            })),
            AnalysisError::CyclicDependency { chain } => {
                Some(Issue::CyclicDependency(CyclicDependencyIssue {
                    chain: chain.clone(),
                }))
            }
            _ => None,
        }
    }

    pub fn from_warning(warning: &Warning) -> Self {
        match warning {
            Warning::DuplicateClassId { id, used, shadowed } => {
                Issue::DuplicateClass(DuplicateClassIssue {
                    id: id.clone(),
                    used: display_path(used),
                    shadowed: shadowed.iter().map(|p| display_path(p)).collect(),
                })
            }
            Warning::MissingOptional { referrer, missing } => {
                Issue::MissingOptional(MissingOptionalIssue {
                    referrer: referrer.clone(),
                    missing: missing.clone(),
                })
            }
            Warning::SkippedHint(e) => Issue::HintParse(HintParseIssue {
                context: e.into(),
                message: e.message.clone(),
                skipped: true,
            }),
        }
    }

    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only.
    File { path: &'a str },
    /// A class with no file to point at (it may not exist).
    Class { id: &'a ClassId },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls on
/// `Issue` without a vtable.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for HintParseIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_severity(&self) -> Severity {
        if self.skipped {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    fn report_rule(&self) -> Rule {
        Rule::HintParse
    }

    fn details(&self) -> Option<String> {
        self.skipped.then(|| "line skipped".to_string())
    }

    fn hint(&self) -> Option<String> {
        (!self.skipped).then(|| "use --lenient-hints to skip malformed lines".to_string())
    }
}

impl Report for UnresolvedDependencyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Class {
            id: self.referrer.as_ref().unwrap_or(&self.missing),
        }
    }

    fn message(&self) -> String {
        match &self.referrer {
            Some(referrer) => format!("'{}' required by '{}' not found", self.missing, referrer),
            None => format!("entry '{}' not found", self.missing),
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.roots_tried.is_empty() {
            Some("no root paths configured".to_string())
        } else {
            Some(format!("searched: {}", self.roots_tried.join(", ")))
        }
    }

    fn hint(&self) -> Option<String> {
        self.referrer.as_ref().map(|referrer| {
            format!(
                "add #ignore({}) to '{}' if it is provided elsewhere",
                self.missing, referrer
            )
        })
    }
}

impl Report for CyclicDependencyIssue {
    fn location(&self) -> ReportLocation<'_> {
        match self.chain.first() {
            Some(id) => ReportLocation::Class { id },
            None => ReportLocation::File { path: "" },
        }
    }

    fn message(&self) -> String {
        format!("cycle of {} classes", self.chain.len())
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format_chain(&self.chain))
    }
}

impl Report for DuplicateClassIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.used }
    }

    fn message(&self) -> String {
        format!("'{}' found under more than one root", self.id)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("shadowed: {}", self.shadowed.join(", ")))
    }
}

impl Report for MissingOptionalIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Class { id: &self.referrer }
    }

    fn message(&self) -> String {
        format!("optional '{}' not found", self.missing)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
