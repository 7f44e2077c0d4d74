//! Virtual file tree for template sources.
//!
//! A template is read through the [`Folder`] capability rather than straight
//! from disk, so the same resolver runs against a directory, an in-memory tree
//! or any other hierarchical store.
//!
//! # Navigation
//!
//! ```text
//! root.file(&["images", "static", "sprite.svg"])
//!        │        │         │          │
//!        │        └─ folder ┴─ folder ─┴─ lookup_file
//!        └── missing intermediate folder → Ok(None)
//! ```
//!
//! Iteration is strictly serial and in the backend's stable order. Dependency
//! matching relies on that order, so backends must never reorder between calls.

mod fs;
mod memory;

pub use fs::FsFolder;
pub use memory::{MemoryFolder, MemoryTree};

use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::{fmt, io, path::Path, sync::Arc};

// ============================================================================
// File Entries
// ============================================================================

/// Lazily readable content behind a [`FileEntry`].
pub trait Contents: Send + Sync {
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// A file (or a directory seen as a file) inside a template.
#[derive(Clone)]
pub struct FileEntry {
    path: String,
    is_file: bool,
    contents: Arc<dyn Contents>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, is_file: bool, contents: Arc<dyn Contents>) -> Self {
        Self {
            path: path.into(),
            is_file,
            contents,
        }
    }

    /// Absolute POSIX path of this entry.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn is_file(&self) -> bool {
        self.is_file
    }

    /// Read the entry's contents. Nothing is cached between calls.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        self.contents.read()
    }

    /// Read the entry's contents as UTF-8 text.
    pub fn read_to_string(&self) -> io::Result<String> {
        String::from_utf8(self.read()?).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

impl fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntry")
            .field("path", &self.path)
            .field("is_file", &self.is_file)
            .finish()
    }
}

impl PartialEq for FileEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.is_file == other.is_file
    }
}

impl Serialize for FileEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileEntry", 2)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("is_file", &self.is_file)?;
        state.end()
    }
}

/// Error returned when a directory is read as a file.
pub(crate) fn is_a_directory(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::IsADirectory,
        format!("illegal operation on a directory, read `{path}`"),
    )
}

// ============================================================================
// Folders
// ============================================================================

/// Capability set a template source backend implements.
///
/// Only single-name lookups are required; multi-segment navigation and
/// iteration are layered on top in `impl dyn Folder`.
pub trait Folder: fmt::Debug {
    /// Absolute POSIX path of this folder.
    fn path(&self) -> &str;

    /// The entry named `name`, which may be a directory. `None` if missing.
    fn lookup_file(&self, name: &str) -> io::Result<Option<FileEntry>>;

    /// The folder named `name`. `None` if missing or not a directory.
    fn lookup_folder(&self, name: &str) -> io::Result<Option<Box<dyn Folder>>>;

    /// Names of the immediate children, in a stable order.
    fn names(&self) -> io::Result<Vec<String>>;
}

impl dyn Folder + '_ {
    /// Get the file (or directory as a file) at `segments`, relative to this
    /// folder. Missing intermediate folders yield `Ok(None)`.
    pub fn file(&self, segments: &[&str]) -> io::Result<Option<FileEntry>> {
        let Some((last, parents)) = segments.split_last() else {
            return Ok(None);
        };
        if parents.is_empty() {
            return self.lookup_file(last);
        }
        match self.walk(parents)? {
            Some(folder) => folder.lookup_file(last),
            None => Ok(None),
        }
    }

    /// Get the folder at `segments`, relative to this folder. Missing
    /// intermediate folders, or a file at the end, yield `Ok(None)`.
    pub fn folder(&self, segments: &[&str]) -> io::Result<Option<Box<dyn Folder>>> {
        let Some((last, parents)) = segments.split_last() else {
            return Ok(None);
        };
        if parents.is_empty() {
            return self.lookup_folder(last);
        }
        match self.walk(parents)? {
            Some(folder) => folder.lookup_folder(last),
            None => Ok(None),
        }
    }

    /// Visit every immediate child name in order, one at a time.
    ///
    /// The first visitor error stops the iteration and is returned.
    pub fn iterate<E, F>(&self, mut visitor: F) -> Result<(), E>
    where
        E: From<io::Error>,
        F: FnMut(&str) -> Result<(), E>,
    {
        for name in self.names()? {
            visitor(&name)?;
        }
        Ok(())
    }

    fn walk(&self, segments: &[&str]) -> io::Result<Option<Box<dyn Folder>>> {
        let mut iter = segments.iter();
        let Some(first) = iter.next() else {
            return Ok(None);
        };
        let mut current = match self.lookup_folder(first)? {
            Some(folder) => folder,
            None => return Ok(None),
        };
        for segment in iter {
            current = match current.lookup_folder(segment)? {
                Some(folder) => folder,
                None => return Ok(None),
            };
        }
        Ok(Some(current))
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Open a template source at `path`.
///
/// Directories open as [`FsFolder`]. Other sources (archives etc.) are not
/// handled here.
pub fn open(path: &Path) -> io::Result<Box<dyn Folder>> {
    let meta = std::fs::metadata(path)?;
    if meta.is_dir() {
        return Ok(Box::new(FsFolder::new(path)?));
    }
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("unsupported template source `{}`", path.display()),
    ))
}
