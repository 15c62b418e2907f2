use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::analyzer::{
    class_id::is_valid_class_id,
    entries::is_entry_pattern,
    hints::DEFAULT_RESOURCE_KINDS,
    resolver::DEFAULT_EXTENSION,
};

pub const CONFIG_FILE_NAME: &str = ".classdepsrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Class roots in priority order. Relative roots are resolved against the
    /// directory holding the config file.
    #[serde(default = "default_root_paths", alias = "roots")]
    pub root_paths: Vec<String>,
    #[serde(default)]
    pub entries: Vec<String>,
    /// Alias prefix to canonical prefix.
    #[serde(default)]
    pub namespace_map: BTreeMap<String, String>,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_resource_hints")]
    pub resource_hints: Vec<String>,
    #[serde(default = "default_strict_hints")]
    pub strict_hints: bool,
    #[serde(default)]
    pub parallel: bool,
}

fn default_root_paths() -> Vec<String> {
    vec!["source/class".to_string()]
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_resource_hints() -> Vec<String> {
    DEFAULT_RESOURCE_KINDS.iter().map(|s| s.to_string()).collect()
}

fn default_strict_hints() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_paths: default_root_paths(),
            entries: Vec::new(),
            namespace_map: BTreeMap::new(),
            extension: default_extension(),
            resource_hints: default_resource_hints(),
            strict_hints: default_strict_hints(),
            parallel: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for an invalid entry (id or glob pattern), an
    /// extension not starting with `.`, a namespace prefix that is not a
    /// class id, or a resource hint that collides with a dependency keyword.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            if is_entry_pattern(entry) {
                Pattern::new(entry)
                    .with_context(|| format!("Invalid glob pattern in 'entries': \"{}\"", entry))?;
            } else if !is_valid_class_id(entry) {
                bail!("Invalid class id in 'entries': \"{}\"", entry);
            }
        }

        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            bail!(
                "Invalid 'extension': \"{}\" (expected something like \".js\")",
                self.extension
            );
        }

        for (alias, canonical) in &self.namespace_map {
            if !is_valid_class_id(alias) {
                bail!("Invalid alias prefix in 'namespaceMap': \"{}\"", alias);
            }
            if !is_valid_class_id(canonical) {
                bail!(
                    "Invalid canonical prefix in 'namespaceMap': \"{}\" (for \"{}\")",
                    canonical,
                    alias
                );
            }
        }

        for kind in &self.resource_hints {
            let lower = kind.to_lowercase();
            if matches!(lower.as_str(), "require" | "use" | "optional" | "ignore") {
                bail!("'resourceHints' cannot redefine the '{}' hint", kind);
            }
            if lower.is_empty() || !lower.starts_with(|c: char| c.is_ascii_alphabetic()) {
                bail!("Invalid hint kind in 'resourceHints': \"{}\"", kind);
            }
        }

        Ok(())
    }

    /// Root directories, with relative ones joined onto `base_dir`.
    pub fn resolved_roots(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.root_paths
            .iter()
            .map(|root| resolve_against(base_dir, Path::new(root)))
            .collect()
    }
}

/// Join `path` onto `base_dir` unless it is absolute or `base_dir` is `.`.
pub fn resolve_against(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base_dir.as_os_str().is_empty() || base_dir == Path::new(".") {
        path.to_path_buf()
    } else {
        base_dir.join(path.strip_prefix(".").unwrap_or(path))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Directory relative config paths are resolved against.
    pub fn base_dir<'a>(&'a self, fallback: &'a Path) -> &'a Path {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(fallback)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
