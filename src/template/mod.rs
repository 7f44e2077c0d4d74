//! Template descriptor resolution.
//!
//! Turns a template folder into a [`DependencyManifest`]:
//!
//! ```text
//! template.yaml ──► TemplateDescriptor ──┬─► scripts ─┬─ links ──► remote
//!                                        │            └─ globs ──► walk ──► local
//!                                        ├─► assets ──┬─ links ──► remote_assets
//!                                        │            └─ globs ──► walk ──► assets
//!                                        └─► hashes ──► validated against links
//! template.js ───────────────────────────────────────────────────► main
//! ```
//!
//! The walk is depth-first in the folder's iteration order, so the manifest
//! is deterministic for a given tree.

mod descriptor;
mod error;
mod pattern;

pub use descriptor::{DESCRIPTOR_FILES, MAIN_SCRIPT, TemplateDescriptor, is_reserved};
pub use error::TemplateError;
pub use pattern::DependencyMatcher;

use crate::{
    log,
    tree::{FileEntry, Folder},
    utils::path,
};
use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// Manifest
// ============================================================================

/// Resolved dependencies of a template. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyManifest {
    /// Absolute path of the template root.
    pub root: String,
    /// The `template.js` entry script.
    pub main: FileEntry,
    /// Local scripts, in walk order.
    pub local: Vec<FileEntry>,
    /// Remote scripts, in declared order.
    pub remote: Vec<String>,
    /// Local assets, in walk order.
    pub assets: Vec<FileEntry>,
    /// Remote assets, in declared order.
    pub remote_assets: Vec<String>,
    /// Remote URL → integrity hash.
    pub hashes: IndexMap<String, String>,
}

impl DependencyManifest {
    /// Root-relative POSIX path (`/lib/a.js`) of an entry below the root.
    pub fn relative(&self, entry: &FileEntry) -> String {
        let rest = entry
            .path()
            .strip_prefix(self.root.trim_end_matches('/'))
            .unwrap_or(entry.path());
        path::resolve("/", rest)
    }

    /// Root-relative paths of the local scripts, in order.
    pub fn local_paths(&self) -> Vec<String> {
        self.local.iter().map(|entry| self.relative(entry)).collect()
    }

    /// Root-relative paths of the local assets, in order.
    pub fn asset_paths(&self) -> Vec<String> {
        self.assets.iter().map(|entry| self.relative(entry)).collect()
    }
}

// ============================================================================
// Template
// ============================================================================

/// A template rooted at a folder.
pub struct Template {
    root: Box<dyn Folder>,
    descriptor: Option<TemplateDescriptor>,
}

impl Template {
    pub fn new(root: Box<dyn Folder>) -> Self {
        Self {
            root,
            descriptor: None,
        }
    }

    pub fn root(&self) -> &dyn Folder {
        &*self.root
    }

    /// The descriptor, once [`Template::read`] succeeded.
    pub fn descriptor(&self) -> Option<&TemplateDescriptor> {
        self.descriptor.as_ref()
    }

    /// Locate, parse and normalize the descriptor.
    pub fn read(&mut self) -> Result<&TemplateDescriptor, TemplateError> {
        let descriptor = self.read_descriptor()?;
        Ok(&*self.descriptor.insert(descriptor))
    }

    fn read_descriptor(&self) -> Result<TemplateDescriptor, TemplateError> {
        let root_path = self.root.path();
        let io_err = |err| TemplateError::Io(root_path.to_owned(), err);

        let mut found = None;
        for name in DESCRIPTOR_FILES {
            if let Some(file) = self.root.file(&[name]).map_err(io_err)? {
                found = Some(file);
                break;
            }
        }
        let file = found.ok_or_else(|| TemplateError::missing(DESCRIPTOR_FILES[0], root_path))?;

        let content = file
            .read_to_string()
            .map_err(|err| TemplateError::Io(file.path().to_owned(), err))?;
        let descriptor = TemplateDescriptor::parse(&content, file.path())?;

        log!("template"; "read `{}`", file.path());
        Ok(descriptor)
    }

    /// Resolve the template's dependencies, reading the descriptor first if
    /// needed.
    pub fn load(&mut self) -> Result<DependencyManifest, TemplateError> {
        let descriptor = match self.descriptor.take() {
            Some(descriptor) => descriptor,
            None => self.read_descriptor()?,
        };
        let manifest = self.resolve(&descriptor);
        self.descriptor = Some(descriptor);
        manifest
    }

    fn resolve(&self, descriptor: &TemplateDescriptor) -> Result<DependencyManifest, TemplateError> {
        let root = &*self.root;

        let main = root
            .file(&[MAIN_SCRIPT])
            .map_err(|err| TemplateError::Io(root.path().to_owned(), err))?
            .ok_or_else(|| TemplateError::missing(MAIN_SCRIPT, root.path()))?;

        let local = collect(root, &DependencyMatcher::new(&descriptor.scripts)?)?;
        let assets = collect(root, &DependencyMatcher::new(&descriptor.assets)?)?;
        let hashes = check_hashes(descriptor)?;

        let manifest = DependencyManifest {
            root: root.path().to_owned(),
            main,
            local,
            remote: links(&descriptor.scripts),
            assets,
            remote_assets: links(&descriptor.assets),
            hashes,
        };

        log!(
            "template";
            "resolved {} local, {} remote scripts and {} assets",
            manifest.local.len(),
            manifest.remote.len(),
            manifest.assets.len() + manifest.remote_assets.len()
        );
        Ok(manifest)
    }
}

/// Declared remote links, in order.
fn links(list: &[String]) -> Vec<String> {
    list.iter().filter(|item| path::is_link(item)).cloned().collect()
}

/// Every hash must belong to a declared remote resource.
fn check_hashes(descriptor: &TemplateDescriptor) -> Result<IndexMap<String, String>, TemplateError> {
    let declared = |url: &String| descriptor.scripts.contains(url) || descriptor.assets.contains(url);

    for url in descriptor.hashes.keys() {
        if !path::is_link(url) {
            return Err(TemplateError::Config(format!("Unexpected local resource: {url}")));
        }
        if !declared(url) {
            return Err(TemplateError::Config(format!("Undeclared remote resource: {url}")));
        }
    }
    Ok(descriptor.hashes.clone())
}

/// Walk the tree from `root` collecting every file `matcher` accepts.
fn collect(root: &dyn Folder, matcher: &DependencyMatcher) -> Result<Vec<FileEntry>, TemplateError> {
    let mut files = Vec::new();
    if matcher.is_empty() {
        return Ok(files);
    }
    let mut acc = Vec::new();
    walk(root, matcher, &mut acc, &mut files)?;
    Ok(files)
}

fn walk(
    folder: &dyn Folder,
    matcher: &DependencyMatcher,
    acc: &mut Vec<String>,
    files: &mut Vec<FileEntry>,
) -> Result<(), TemplateError> {
    let io_err = |err| TemplateError::Io(folder.path().to_owned(), err);

    folder.iterate(|name| {
        // The descriptor and entry script are never dependencies of themselves.
        if acc.is_empty() && is_reserved(name) {
            return Ok(());
        }
        let Some(entry) = folder.file(&[name]).map_err(io_err)? else {
            return Ok(());
        };

        acc.push(name.to_owned());
        if entry.is_file() {
            if matcher.matches_file(acc) {
                files.push(entry);
            }
        } else if matcher.enters_dir(acc) {
            if let Some(child) = folder.folder(&[name]).map_err(io_err)? {
                walk(&*child, matcher, acc, files)?;
            }
        }
        acc.pop();
        Ok(())
    })
}
