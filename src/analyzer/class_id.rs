use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer};

use super::error::AnalysisError;

/// A dot-delimited namespaced class identifier, e.g. `ns.ui.Button`.
///
/// Construction validates every segment, so a `ClassId` can always be
/// turned into a relative source path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(String);

impl ClassId {
    pub fn parse(id: &str) -> Result<Self, AnalysisError> {
        if is_valid_class_id(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(AnalysisError::InvalidClassId { id: id.to_string() })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Relative source path: segments joined as directories, plus `extension`.
    pub fn to_relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.segments().collect();
        let file_name = format!(
            "{}{}",
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            extension
        );
        path.set_file_name(file_name);
        path
    }

    /// Inverse of [`ClassId::to_relative_path`]. Returns `None` for files that
    /// do not carry `extension` or whose components are not valid segments.
    pub fn from_relative_path(path: &Path, extension: &str) -> Option<Self> {
        let raw = path.to_str()?;
        let stem = raw.strip_suffix(extension)?;
        let id = stem
            .split(['/', '\\'])
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        is_valid_class_id(&id).then_some(Self(id))
    }

    /// Replace a leading `prefix` (matched on whole segments) with `replacement`.
    pub fn with_prefix_replaced(&self, prefix: &str, replacement: &str) -> Option<Self> {
        let rest = self.0.strip_prefix(prefix)?;
        if !(rest.is_empty() || rest.starts_with('.')) {
            return None;
        }
        let id = format!("{replacement}{rest}");
        let id = id.trim_start_matches('.');
        is_valid_class_id(id).then(|| Self(id.to_string()))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ClassId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

pub fn is_valid_class_id(id: &str) -> bool {
    !id.is_empty() && id.split('.').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
