use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{OutputTargetCause, PageLoaderError, Result};

/// Filesystem access rooted at a validated output directory.
#[derive(Debug, Clone)]
pub struct FileManager {
    base_dir: PathBuf,
}

impl FileManager {
    /// Checks that `output_dir` exists, is a directory and accepts new files.
    ///
    /// The stored base directory is canonical, so every path handed out by
    /// the manager is absolute.
    pub fn open(output_dir: &Path) -> Result<Self> {
        let invalid = |cause| PageLoaderError::InvalidOutputTarget {
            path: output_dir.to_path_buf(),
            cause,
        };

        let metadata = fs::metadata(output_dir).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => invalid(OutputTargetCause::Missing),
            io::ErrorKind::NotADirectory => invalid(OutputTargetCause::NotADirectory),
            _ => invalid(OutputTargetCause::NotWritable),
        })?;
        if !metadata.is_dir() {
            return Err(invalid(OutputTargetCause::NotADirectory));
        }
        if metadata.permissions().readonly() || !accepts_new_files(output_dir) {
            return Err(invalid(OutputTargetCause::NotWritable));
        }

        let base_dir =
            fs::canonicalize(output_dir).map_err(|_| invalid(OutputTargetCause::Missing))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates `name` under the base directory unless it already exists.
    pub fn create_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.base_dir.join(name);
        fs::create_dir_all(&path).map_err(|source| PageLoaderError::PersistFailed {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Writes `content` to `relative_path` under the base directory, replacing
    /// any previous file.
    pub fn save_file(&self, relative_path: &Path, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.base_dir.join(relative_path);
        write_bytes(&file_path, content).map_err(|source| PageLoaderError::PersistFailed {
            path: file_path.clone(),
            source,
        })?;
        Ok(file_path)
    }

    pub fn file_exists(&self, relative_path: &Path) -> bool {
        self.base_dir.join(relative_path).exists()
    }
}

fn write_bytes(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    file.flush()
}

/// Permission bits are not the whole story (ACLs, read-only mounts), so try
/// creating a file and remove it again.
fn accepts_new_files(dir: &Path) -> bool {
    let marker = dir.join(format!(".page-loader-write-check-{}", std::process::id()));
    match fs::OpenOptions::new().write(true).create_new(true).open(&marker) {
        Ok(_) => {
            let _ = fs::remove_file(&marker);
            true
        }
        Err(err) => err.kind() == io::ErrorKind::AlreadyExists,
    }
}
