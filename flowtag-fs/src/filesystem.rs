//! Filesystem trait and implementations.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("path error: {0}")]
    Path(String),
}

impl FsError {
    /// Build a not-found error for `path`.
    pub fn not_found(path: &Path) -> Self {
        FsError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        ))
    }
}

/// Trait for filesystem operations.
/// Abstracted for testing with mock implementations.
pub trait Filesystem: Send + Sync {
    /// Read file contents as a string.
    fn read_file(&self, path: &Path) -> Result<String, FsError>;

    /// Write data atomically to a path (write to temp, then rename).
    /// An existing file at `path` is replaced.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and parents if needed.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;
}

/// Temp file used by `write_atomic`: the target file name with `.tmp` appended.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        Ok(fs::read_to_string(path)?)
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        if path.file_name().is_none() {
            return Err(FsError::Path(format!(
                "not a file path: {}",
                path.display()
            )));
        }

        let temp_path = temp_path_for(path);
        fs::write(&temp_path, data)?;

        // Rename is atomic on most filesystems
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path)?;
        Ok(())
    }
}

/// Mock filesystem for testing.
/// Cloning creates a new handle to the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
    read_only: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all files in the mock filesystem.
    pub fn files(&self) -> HashMap<PathBuf, Vec<u8>> {
        self.files.read().unwrap().clone()
    }

    /// Get content of a specific file.
    pub fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// Get content of a specific file as UTF-8 text.
    pub fn get_text(&self, path: &Path) -> Option<String> {
        self.get_file(path)
            .and_then(|data| String::from_utf8(data).ok())
    }

    /// Add a file directly (for test setup).
    pub fn add_file(&self, path: PathBuf, data: impl Into<Vec<u8>>) {
        self.files.write().unwrap().insert(path, data.into());
    }

    /// Make writes to `path` fail with a permission error.
    pub fn deny_writes(&self, path: PathBuf) {
        self.read_only.write().unwrap().insert(path);
    }
}

impl Filesystem for MockFilesystem {
    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        let files = self.files.read().unwrap();
        match files.get(path) {
            Some(data) => String::from_utf8(data.clone())
                .map_err(|e| FsError::Path(format!("invalid utf8: {}", e))),
            None => Err(FsError::not_found(path)),
        }
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        if self.read_only.read().unwrap().contains(path) {
            return Err(FsError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            )));
        }
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
            || self.dirs.read().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        self.dirs.write().unwrap().insert(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // ===========================================
    // Temp path naming
    // ===========================================

    #[test]
    fn test_temp_path_appends_suffix() {
        let path = PathBuf::from("/tmp/output.txt");
        assert_eq!(temp_path_for(&path), PathBuf::from("/tmp/output.txt.tmp"));
    }

    #[test]
    fn test_temp_path_no_extension() {
        let path = PathBuf::from("report");
        assert_eq!(temp_path_for(&path), PathBuf::from("report.tmp"));
    }

    // ===========================================
    // MockFilesystem
    // ===========================================

    #[test]
    fn test_mock_write_atomic() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/tmp/output.txt");

        fs.write_atomic(&path, b"test data").expect("write");

        assert!(fs.exists(&path));
        assert_eq!(fs.get_file(&path), Some(b"test data".to_vec()));
    }

    #[test]
    fn test_mock_write_atomic_overwrites() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/tmp/output.txt");

        fs.write_atomic(&path, b"first").expect("write 1");
        fs.write_atomic(&path, b"second").expect("write 2");

        assert_eq!(fs.get_text(&path).as_deref(), Some("second"));
    }

    #[test]
    fn test_mock_read_file() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/tmp/lookup.csv");
        fs.add_file(path.clone(), "dstport,protocol,tag\n");

        assert_eq!(fs.read_file(&path).expect("read"), "dstport,protocol,tag\n");
    }

    #[test]
    fn test_mock_read_file_not_found() {
        let fs = MockFilesystem::new();
        let result = fs.read_file(Path::new("/missing.csv"));

        match result {
            Err(FsError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn test_mock_read_file_invalid_utf8() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/tmp/binary");
        fs.add_file(path.clone(), vec![0xffu8, 0xfe]);

        assert!(matches!(fs.read_file(&path), Err(FsError::Path(_))));
    }

    #[test]
    fn test_mock_deny_writes() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/readonly/output.txt");
        fs.deny_writes(path.clone());

        let result = fs.write_atomic(&path, b"data");

        assert!(result.is_err());
        assert!(!fs.exists(&path));
    }

    #[test]
    fn test_mock_create_dir_all() {
        let fs = MockFilesystem::new();
        let dir = PathBuf::from("/tmp/reports");

        fs.create_dir_all(&dir).expect("create");

        assert!(fs.exists(&dir));
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let fs = MockFilesystem::new();
        let fs2 = fs.clone();
        let path = PathBuf::from("/tmp/shared.txt");

        fs2.write_atomic(&path, b"shared").expect("write");

        assert!(fs.exists(&path));
        assert_eq!(fs.files().len(), 1);
    }

    // ===========================================
    // RealFilesystem
    // ===========================================

    #[test]
    fn test_real_fs_write_atomic() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("output.txt");

        RealFilesystem.write_atomic(&path, b"hello").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "hello");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_real_fs_write_atomic_overwrites() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("output.txt");
        fs::write(&path, "old contents that are longer").expect("seed");

        RealFilesystem.write_atomic(&path, b"new").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "new");
    }

    #[test]
    fn test_real_fs_write_atomic_missing_dir() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("output.txt");

        let result = RealFilesystem.write_atomic(&path, b"data");

        assert!(matches!(result, Err(FsError::Io(_))));
    }

    #[test]
    fn test_real_fs_read_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("flow_log.txt");
        fs::write(&path, "line1\nline2\n").expect("seed");

        let content = RealFilesystem.read_file(&path).expect("read");

        assert_eq!(content, "line1\nline2\n");
    }

    #[test]
    fn test_real_fs_read_file_not_found() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nonexistent.csv");

        assert!(RealFilesystem.read_file(&path).is_err());
    }

    #[test]
    fn test_real_fs_exists_and_create_dir_all() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");

        assert!(!RealFilesystem.exists(&nested));
        RealFilesystem.create_dir_all(&nested).expect("create");
        assert!(RealFilesystem.exists(&nested));
    }
}
