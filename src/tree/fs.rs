//! Filesystem-backed template folders.

use super::{Contents, FileEntry, Folder, is_a_directory};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

/// A directory on disk.
///
/// Children are listed sorted by file name, so iteration order does not
/// depend on the platform's `read_dir` order.
#[derive(Debug, Clone)]
pub struct FsFolder {
    dir: PathBuf,
    path: String,
}

impl FsFolder {
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = fs::canonicalize(dir.as_ref())?;
        Ok(Self::at(dir))
    }

    fn at(dir: PathBuf) -> Self {
        let path = to_posix(&dir);
        Self { dir, path }
    }

    /// Directory this folder reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Render an OS path with `/` separators.
fn to_posix(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// `Ok(None)` for missing entries, the metadata otherwise.
fn metadata(path: &Path) -> io::Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

struct DiskContents {
    file: PathBuf,
    is_file: bool,
}

impl Contents for DiskContents {
    fn read(&self) -> io::Result<Vec<u8>> {
        if !self.is_file {
            return Err(is_a_directory(&to_posix(&self.file)));
        }
        fs::read(&self.file)
    }
}

impl Folder for FsFolder {
    fn path(&self) -> &str {
        &self.path
    }

    fn lookup_file(&self, name: &str) -> io::Result<Option<FileEntry>> {
        let file = self.dir.join(name);
        let Some(meta) = metadata(&file)? else {
            return Ok(None);
        };
        let is_file = meta.is_file();
        let path = to_posix(&file);
        Ok(Some(FileEntry::new(
            path,
            is_file,
            Arc::new(DiskContents { file, is_file }),
        )))
    }

    fn lookup_folder(&self, name: &str) -> io::Result<Option<Box<dyn Folder>>> {
        let dir = self.dir.join(name);
        match metadata(&dir)? {
            Some(meta) if meta.is_dir() => Ok(Some(Box::new(Self::at(dir)))),
            _ => Ok(None),
        }
    }

    fn names(&self) -> io::Result<Vec<String>> {
        let mut names = fs::read_dir(&self.dir)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}
