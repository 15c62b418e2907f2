//! Annotation hint scanning.
//!
//! Hints live one per line, usually inside comments:
//! - `#require(ns.Base)` - load-time dependency
//! - `#use(ns.Helper)` - runtime dependency
//! - `#optional(ns.Plugin)` - runtime dependency that may be absent
//! - `#ignore(ns.Global)` - suppress a dependency on `ns.Global`
//! - `#asset(ns/icons/*)`, `#cldr` - resource hints with opaque payloads
//!
//! `@kind(arg)` is accepted as well, but only when the keyword is directly
//! followed by `(`, so plain JSDoc tags such as `@ignore` never match.

use std::{path::Path, sync::LazyLock};

use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use super::{class_id::ClassId, error::HintParseError};

/// Resource hint kinds recognized when nothing else is configured.
pub const DEFAULT_RESOURCE_KINDS: &[&str] = &["asset", "cldr"];

// Capture 1: marker, 2: keyword, 3: rest of line.
static HINT_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?://|/\*\*?|\*)\s*)?([#@])([A-Za-z][A-Za-z0-9_-]*)(.*)$").unwrap()
});

/// What a hint says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintKind {
    Require(ClassId),
    Use(ClassId),
    Optional(ClassId),
    Ignore(ClassId),
    Resource { kind: String, payload: String },
}

impl HintKind {
    /// Name used as the hint index key.
    pub fn name(&self) -> &str {
        match self {
            Self::Require(_) => "require",
            Self::Use(_) => "use",
            Self::Optional(_) => "optional",
            Self::Ignore(_) => "ignore",
            Self::Resource { kind, .. } => kind,
        }
    }

    /// Class targeted by a dependency hint; `None` for resource hints.
    pub fn target(&self) -> Option<&ClassId> {
        match self {
            Self::Require(id) | Self::Use(id) | Self::Optional(id) | Self::Ignore(id) => Some(id),
            Self::Resource { .. } => None,
        }
    }

    /// Class id for dependency hints, payload for resource hints.
    pub fn value(&self) -> &str {
        match self {
            Self::Resource { payload, .. } => payload,
            other => other.target().map(ClassId::as_str).unwrap_or_default(),
        }
    }

    pub(crate) fn map_target(self, f: impl FnOnce(ClassId) -> ClassId) -> Self {
        match self {
            Self::Require(id) => Self::Require(f(id)),
            Self::Use(id) => Self::Use(f(id)),
            Self::Optional(id) => Self::Optional(f(id)),
            Self::Ignore(id) => Self::Ignore(f(id)),
            resource @ Self::Resource { .. } => resource,
        }
    }
}

/// A hint together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub kind: HintKind,
    pub line: usize,
}

// Serialized flat as `{ "kind": "require", "value": "ns.Base", "line": 3 }`.
impl Serialize for Hint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Hint", 3)?;
        state.serialize_field("kind", self.kind.name())?;
        state.serialize_field("value", self.kind.value())?;
        state.serialize_field("line", &self.line)?;
        state.end()
    }
}

/// What to do with a malformed hint line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintErrorMode {
    /// The first malformed line fails the scan.
    #[default]
    Fail,
    /// Malformed lines are skipped and reported back.
    Skip,
}

/// The fixed set of keywords a scan recognizes.
#[derive(Debug, Clone)]
pub struct HintGrammar {
    resource_kinds: Vec<String>,
}

impl Default for HintGrammar {
    fn default() -> Self {
        Self::with_resource_kinds(DEFAULT_RESOURCE_KINDS.iter().map(|s| s.to_string()))
    }
}

impl HintGrammar {
    pub fn with_resource_kinds(kinds: impl IntoIterator<Item = String>) -> Self {
        Self {
            resource_kinds: kinds.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn keyword(&self, word: &str) -> Option<Keyword> {
        let word = word.to_lowercase();
        match word.as_str() {
            "require" => Some(Keyword::Require),
            "use" => Some(Keyword::Use),
            "optional" => Some(Keyword::Optional),
            "ignore" => Some(Keyword::Ignore),
            _ if self.resource_kinds.contains(&word) => Some(Keyword::Resource(word)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Keyword {
    Require,
    Use,
    Optional,
    Ignore,
    Resource(String),
}

/// Result of scanning one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HintScan {
    pub hints: Vec<Hint>,
    /// Lines dropped under [`HintErrorMode::Skip`].
    pub skipped: Vec<HintParseError>,
}

/// Extract all hints from `source`, in line order.
pub fn scan_hints(
    source: &str,
    file: &Path,
    grammar: &HintGrammar,
    mode: HintErrorMode,
) -> Result<HintScan, HintParseError> {
    let mut scan = HintScan::default();

    for (line_idx, line) in source.lines().enumerate() {
        match parse_hint_line(line, grammar) {
            LineParse::NotAHint => {}
            LineParse::Hint(kind) => scan.hints.push(Hint {
                kind,
                line: line_idx + 1,
            }),
            LineParse::Malformed { col, message } => {
                let error = HintParseError {
                    file: file.to_path_buf(),
                    line: line_idx + 1,
                    col,
                    message,
                    source_line: line.to_string(),
                };
                match mode {
                    HintErrorMode::Fail => return Err(error),
                    HintErrorMode::Skip => scan.skipped.push(error),
                }
            }
        }
    }

    Ok(scan)
}

#[derive(Debug, PartialEq, Eq)]
enum LineParse {
    NotAHint,
    Hint(HintKind),
    Malformed { col: usize, message: String },
}

fn parse_hint_line(line: &str, grammar: &HintGrammar) -> LineParse {
    let Some(captures) = HINT_LINE_REGEX.captures(line) else {
        return LineParse::NotAHint;
    };
    let (Some(marker), Some(word), Some(rest)) = (captures.get(1), captures.get(2), captures.get(3))
    else {
        return LineParse::NotAHint;
    };
    let Some(keyword) = grammar.keyword(word.as_str()) else {
        return LineParse::NotAHint;
    };
    let rest = rest.as_str();
    if marker.as_str() == "@" && !rest.starts_with('(') {
        return LineParse::NotAHint;
    }

    let col = line[..marker.start()].chars().count() + 1;
    let malformed = |message: String| LineParse::Malformed { col, message };
    let name = word.as_str();

    let argument = match parse_argument(rest) {
        Ok(argument) => argument,
        Err(message) => return malformed(format!("{message} in '{name}' hint")),
    };

    let constructor: fn(ClassId) -> HintKind = match keyword {
        Keyword::Resource(kind) => {
            return LineParse::Hint(HintKind::Resource {
                kind,
                payload: argument.unwrap_or_default(),
            });
        }
        Keyword::Require => HintKind::Require,
        Keyword::Use => HintKind::Use,
        Keyword::Optional => HintKind::Optional,
        Keyword::Ignore => HintKind::Ignore,
    };
    let Some(arg) = argument else {
        return malformed(format!("'{name}' hint requires a class id argument"));
    };
    match ClassId::parse(&arg) {
        Ok(id) => LineParse::Hint(constructor(id)),
        Err(_) => malformed(format!("invalid class id \"{arg}\" in '{name}' hint")),
    }
}

/// Parse `( token )` at the start of `rest`.
///
/// `Ok(None)` means no argument at all (end of line or comment close).
fn parse_argument(rest: &str) -> Result<Option<String>, String> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() || trimmed.starts_with("*/") {
        return Ok(None);
    }
    let Some(after_open) = trimmed.strip_prefix('(') else {
        return Err("expected '('".to_string());
    };

    // A quoted payload may contain ')', so find its closing quote first.
    let after_open = after_open.trim_start();
    if let Some(quote) = after_open.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let body = &after_open[1..];
        let Some(end) = body.find(quote) else {
            return Err("unterminated string".to_string());
        };
        let tail = body[end + 1..].trim_start();
        return if tail.starts_with(')') {
            Ok(Some(body[..end].to_string()))
        } else if tail.is_empty() {
            Err("unclosed parenthesis".to_string())
        } else {
            Err("expected a single argument".to_string())
        };
    }

    let Some(close) = after_open.find(')') else {
        return Err("unclosed parenthesis".to_string());
    };
    let inner = after_open[..close].trim();
    if inner.contains('(') {
        return Err("unbalanced parentheses".to_string());
    }
    if inner.is_empty() {
        return Err("empty argument".to_string());
    }

    if inner.split_whitespace().nth(1).is_some() {
        return Err("expected a single argument".to_string());
    }
    Ok(Some(inner.to_string()))
}
