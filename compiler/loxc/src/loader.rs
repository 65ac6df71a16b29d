//! Module source loading.
//!
//! A fully-qualified module name `a.b.c` is looked up relative to a root
//! directory as `a/b/c.lox`, then as the standard library module
//! `std/c.lox`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

/// Why a module's source text could not be produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no source for module '{name}'{}", searched_suffix(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{0}' is not a valid module name")]
    InvalidName(String),
}

fn searched_suffix(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return String::new();
    }
    let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    format!(" (searched {})", paths.join(", "))
}

/// Source of module text, keyed by fully-qualified module name.
pub trait SourceLoader {
    fn load_source(&self, name: &str) -> Result<String, LoadError>;
}

/// Split `a.b.c` into its segments, rejecting empty ones.
fn segments(name: &str) -> Result<Vec<&str>, LoadError> {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(LoadError::InvalidName(name.to_string()));
    }
    Ok(segments)
}

/// Loads modules from `.lox` files under a root directory.
#[derive(Clone, Debug)]
pub struct FileSourceLoader {
    root: PathBuf,
}

impl FileSourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSourceLoader { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files tried for `name`, in order.
    pub fn candidates(&self, name: &str) -> Result<Vec<PathBuf>, LoadError> {
        let segments = segments(name)?;

        let mut project = self.root.clone();
        project.extend(&segments);
        project.set_extension("lox");

        let mut candidates = vec![project];
        if let Some(unit) = segments.last() {
            let std = self.root.join("std").join(format!("{unit}.lox"));
            if !candidates.contains(&std) {
                candidates.push(std);
            }
        }
        Ok(candidates)
    }
}

impl SourceLoader for FileSourceLoader {
    fn load_source(&self, name: &str) -> Result<String, LoadError> {
        let candidates = self.candidates(name)?;
        for path in &candidates {
            match fs::read_to_string(path) {
                Ok(source) => {
                    trace!(module = name, path = %path.display(), "loaded module source");
                    return Ok(source);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(LoadError::Io {
                        path: path.clone(),
                        source,
                    })
                }
            }
        }
        Err(LoadError::NotFound {
            name: name.to_string(),
            searched: candidates,
        })
    }
}

/// Loads modules from an in-memory table.
#[derive(Clone, Debug, Default)]
pub struct MemorySourceLoader {
    sources: FxHashMap<String, String>,
}

impl MemorySourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), source.into());
    }
}

impl SourceLoader for MemorySourceLoader {
    fn load_source(&self, name: &str) -> Result<String, LoadError> {
        segments(name)?;
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
                searched: Vec::new(),
            })
    }
}
