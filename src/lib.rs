//! classdeps - class dependency analyzer
//!
//! Reads dependency hints (`#require`, `#use`, `#optional`, `#ignore`, and
//! resource hints such as `#asset`) from the comments of class files laid out
//! one class per file under a set of root directories, computes the
//! transitive closure from a list of entry classes and emits a deterministic
//! load order.
//!
//! ## Module Structure
//!
//! - `analyzer`: Scanning, resolution, closure, ordering (library API)
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `issues`: Issue type definitions and reporting

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod issues;
