//! In-memory template folders.
//!
//! Used to embed templates in the binary and to describe template layouts in
//! tests without touching the disk.

use super::{Contents, FileEntry, Folder, is_a_directory};
use crate::utils::path;
use indexmap::IndexMap;
use std::{fmt, io, sync::Arc};

#[derive(Clone)]
enum Node {
    File(Arc<[u8]>),
    Dir(Arc<IndexMap<String, Node>>),
}

/// Builder for an in-memory tree. Entries keep insertion order.
///
/// # Example
/// ```ignore
/// let root = MemoryTree::new()
///     .file("template.yaml", "name: demo")
///     .file("template.js", "")
///     .dir("static", MemoryTree::new().file("app.js", "app()"))
///     .into_folder();
/// ```
#[derive(Default)]
pub struct MemoryTree {
    entries: IndexMap<String, Node>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn file(mut self, name: impl Into<String>, contents: impl AsRef<[u8]>) -> Self {
        self.entries
            .insert(name.into(), Node::File(Arc::from(contents.as_ref())));
        self
    }

    /// Add (or replace) a sub-directory.
    pub fn dir(mut self, name: impl Into<String>, tree: MemoryTree) -> Self {
        self.entries
            .insert(name.into(), Node::Dir(Arc::new(tree.entries)));
        self
    }

    /// Finish the tree as a root folder at `/`.
    pub fn into_folder(self) -> MemoryFolder {
        MemoryFolder {
            path: "/".into(),
            entries: Arc::new(self.entries),
        }
    }
}

/// A folder of a [`MemoryTree`].
#[derive(Clone)]
pub struct MemoryFolder {
    path: String,
    entries: Arc<IndexMap<String, Node>>,
}

impl fmt::Debug for MemoryFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFolder")
            .field("path", &self.path)
            .field("entries", &self.entries.len())
            .finish()
    }
}

struct MemoryContents {
    path: String,
    data: Option<Arc<[u8]>>,
}

impl Contents for MemoryContents {
    fn read(&self) -> io::Result<Vec<u8>> {
        match &self.data {
            Some(data) => Ok(data.to_vec()),
            None => Err(is_a_directory(&self.path)),
        }
    }
}

impl Folder for MemoryFolder {
    fn path(&self) -> &str {
        &self.path
    }

    fn lookup_file(&self, name: &str) -> io::Result<Option<FileEntry>> {
        let Some(node) = self.entries.get(name) else {
            return Ok(None);
        };
        let file = path::join(&self.path, name);
        let data = match node {
            Node::File(data) => Some(Arc::clone(data)),
            Node::Dir(_) => None,
        };
        let is_file = data.is_some();
        let contents = Arc::new(MemoryContents {
            path: file.clone(),
            data,
        });
        Ok(Some(FileEntry::new(file, is_file, contents)))
    }

    fn lookup_folder(&self, name: &str) -> io::Result<Option<Box<dyn Folder>>> {
        match self.entries.get(name) {
            Some(Node::Dir(entries)) => Ok(Some(Box::new(MemoryFolder {
                path: path::join(&self.path, name),
                entries: Arc::clone(entries),
            }))),
            _ => Ok(None),
        }
    }

    fn names(&self) -> io::Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_kept() {
        let folder = MemoryTree::new()
            .file("z.js", "")
            .file("a.js", "")
            .dir("m", MemoryTree::new())
            .into_folder();
        assert_eq!(folder.names().unwrap(), ["z.js", "a.js", "m"]);
    }

    #[test]
    fn test_nested_paths() {
        let folder = MemoryTree::new()
            .dir("a", MemoryTree::new().dir("b", MemoryTree::new().file("c.txt", "c")))
            .into_folder();
        let a = folder.lookup_folder("a").unwrap().unwrap();
        assert_eq!(a.path(), "/a");
        let b = a.lookup_folder("b").unwrap().unwrap();
        let c = b.lookup_file("c.txt").unwrap().unwrap();
        assert_eq!(c.path(), "/a/b/c.txt");
        assert_eq!(c.read().unwrap(), b"c");
    }

    #[test]
    fn test_replace_entry() {
        let folder = MemoryTree::new()
            .file("a.js", "old")
            .file("a.js", "new")
            .into_folder();
        let file = folder.lookup_file("a.js").unwrap().unwrap();
        assert_eq!(file.read_to_string().unwrap(), "new");
    }
}
