use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::args::{CommonArgs, OutputFormat};
use crate::{
    analyzer::{
        AbortHandle, AnalysisError, ClassId, CollectOptions, CollectResult, HintErrorMode,
        HintGrammar, NamespaceMap, Resolver, collect_deps_recursive, expand_entries,
    },
    config::{CONFIG_FILE_NAME, Config, load_config},
};

/// Everything an analysis command needs, with CLI overrides applied.
pub struct AnalysisContext {
    /// Effective configuration (CLI args > config file > defaults).
    pub config: Config,
    pub resolver: Resolver,
    /// Entry ids after pattern expansion.
    pub entries: Vec<ClassId>,
    pub options: CollectOptions,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl AnalysisContext {
    /// Create a new `AnalysisContext` from command line arguments.
    ///
    /// Loads configuration from the project root, applies CLI overrides,
    /// builds the resolver and expands entry patterns.
    ///
    /// # Errors
    ///
    /// Returns error if the config file or an override is invalid, no
    /// entries are given, or an entry pattern matches nothing.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // Priority: CLI --project-root arg > current directory
        let project_root = common_args
            .project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&project_root)?;

        if verbose {
            match &config_result.path {
                Some(path) => eprintln!("Note: Using {}", path.display()),
                None => eprintln!(
                    "Note: No {} found, using default configuration",
                    CONFIG_FILE_NAME
                ),
            }
        }

        let base_dir = config_result.base_dir(&project_root).to_path_buf();
        let mut config = config_result.config;

        if !common_args.entries.is_empty() {
            config.entries = common_args.entries.clone();
        }
        if common_args.lenient_hints {
            config.strict_hints = false;
        }
        if common_args.parallel {
            config.parallel = true;
        }
        config.validate().context("Invalid arguments")?;

        if config.entries.is_empty() {
            bail!(
                "No entry classes given (pass them as arguments or set 'entries' in {})",
                CONFIG_FILE_NAME
            );
        }

        let roots = if common_args.roots.is_empty() {
            config.resolved_roots(&base_dir)
        } else {
            common_args.roots.clone()
        };
        for root in &roots {
            if !root.is_dir() {
                eprintln!(
                    "{} root directory {} does not exist",
                    "warning:".bold().yellow(),
                    root.display()
                );
            }
        }

        let resolver = Resolver::new(
            roots,
            NamespaceMap::new(&config.namespace_map),
            config.extension.clone(),
        );
        let entries =
            expand_entries(&config.entries, &resolver).context("Failed to expand entries")?;

        if verbose {
            eprintln!(
                "Note: {} entr{} across {} root(s)",
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" },
                resolver.roots().len()
            );
        }

        let options = CollectOptions {
            grammar: HintGrammar::with_resource_kinds(config.resource_hints.iter().cloned()),
            hint_errors: if config.strict_hints {
                HintErrorMode::Fail
            } else {
                HintErrorMode::Skip
            },
            parallel: config.parallel,
            abort: AbortHandle::new(),
        };

        Ok(Self {
            config,
            resolver,
            entries,
            options,
            format: common_args.format,
            verbose,
        })
    }

    /// Compute the dependency closure of the entries.
    pub fn collect(&self) -> Result<CollectResult, AnalysisError> {
        let result = collect_deps_recursive(&self.resolver, &self.entries, &self.options)?;
        if self.verbose {
            eprintln!(
                "Note: Scanned {} class(es){}",
                result.graph.len(),
                if self.options.parallel {
                    " in parallel"
                } else {
                    ""
                }
            );
        }
        Ok(result)
    }
}
