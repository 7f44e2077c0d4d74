//! Load context: the stack of scripts currently executing.
//!
//! Paths are all POSIX paths relative to the template root. Keeping them
//! logical (rather than real filesystem paths) makes directory traversal
//! structurally impossible: `..` can never climb above `/`, and `/` maps to
//! the template root only in [`LoadContext::resolve`].

use super::error::LoadError;
use crate::{template::DependencyManifest, utils::path};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// Declared dependencies plus the active load stack of one session.
#[derive(Debug, Clone)]
pub struct LoadContext {
    root: PathBuf,
    local: Vec<String>,
    local_set: FxHashSet<String>,
    remote: Vec<String>,
    remote_set: FxHashSet<String>,
    stack: Vec<String>,
    dirnames: Vec<String>,
}

impl LoadContext {
    /// Create a context for a template at `root`.
    ///
    /// Local paths are resolved against `/`; remote URLs are kept verbatim.
    pub fn new<L, R>(root: impl Into<PathBuf>, local: L, remote: R) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let local: Vec<String> = local
            .into_iter()
            .map(|p| path::resolve("/", p.as_ref()))
            .collect();
        let remote: Vec<String> = remote.into_iter().map(Into::into).collect();

        Self {
            root: root.into(),
            local_set: local.iter().cloned().collect(),
            local,
            remote_set: remote.iter().cloned().collect(),
            remote,
            stack: Vec::new(),
            dirnames: vec!["/".to_owned()],
        }
    }

    /// Seed a context from a resolved template.
    pub fn from_manifest(manifest: &DependencyManifest) -> Self {
        Self::new(
            manifest.root.as_str(),
            manifest.local_paths(),
            manifest.remote.iter().cloned(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Declared local scripts, in declared order.
    pub fn local(&self) -> &[String] {
        &self.local
    }

    /// Declared remote scripts, in declared order.
    pub fn remote(&self) -> &[String] {
        &self.remote
    }

    /// Files currently executing, outermost first.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Directories of the executing files, with the `/` sentinel first.
    pub fn dirnames(&self) -> &[String] {
        &self.dirnames
    }

    /// Enter `file`. Must be paired with [`LoadContext::pop`].
    ///
    /// References made by a remote script resolve against `/`.
    pub fn push(&mut self, file: &str) {
        let dir = if path::is_link(file) { "/" } else { path::dirname(file) };
        self.stack.push(file.to_owned());
        self.dirnames.push(dir.to_owned());
    }

    /// Leave the most recently entered file.
    pub fn pop(&mut self) {
        debug_assert!(!self.stack.is_empty(), "unbalanced load context pop");
        if self.stack.pop().is_some() {
            self.dirnames.pop();
        }
    }

    pub fn is_local(&self, file: &str) -> bool {
        self.local_set.contains(file)
    }

    pub fn is_remote(&self, file: &str) -> bool {
        self.remote_set.contains(file)
    }

    /// Normalize a script reference relative to the executing file.
    ///
    /// Links are returned unchanged. Anything already on the stack is a
    /// circular load.
    pub fn normalize(&self, reference: &str) -> Result<String, LoadError> {
        let file = if path::is_link(reference) {
            reference.to_owned()
        } else {
            let base = self.dirnames.last().map_or("/", String::as_str);
            path::resolve(base, reference)
        };

        if self.stack.contains(&file) {
            let parent = self.stack.last().cloned().unwrap_or_default();
            return Err(LoadError::CircularLoad { file, parent });
        }

        Ok(file)
    }

    /// Map a normalized local path to the backing file on disk.
    pub fn resolve(&self, file: &str) -> PathBuf {
        path::segments(file)
            .into_iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}
