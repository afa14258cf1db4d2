//! Storage backend abstraction
//!
//! Defines the StorageBackend trait and implementations for persisting export artifacts:
//! - FileSystemStorageBackend: Native file system, atomic publish via temp file + rename
//! - MemoryStorageBackend: In-process map (for embedding and tests)

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Trait for storage backends
///
/// `write_file` must publish atomically: a concurrent reader sees either no file
/// or the complete content, never a partial write.
pub trait StorageBackend {
    /// Read a file from storage
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a file to storage, replacing any previous content
    fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// List files in a directory
    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    /// Check if a file exists
    fn file_exists(&self, path: &str) -> Result<bool, StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        (**self).write_file(path, content)
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        (**self).list_files(dir)
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        (**self).file_exists(path)
    }
}

pub mod filesystem;
pub mod memory;

pub use filesystem::FileSystemStorageBackend;
pub use memory::MemoryStorageBackend;
