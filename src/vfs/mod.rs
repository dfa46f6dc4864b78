//! Read-only virtual filesystem over an [`AssetRegistry`].
//!
//! [`AssetFs::open`] resolves names the same way as
//! [`AssetRegistry::resolve`], so both canonical and cache-busted names open
//! the same file. There are no directories: every handle is a regular file
//! and listing always fails.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use std::time::UNIX_EPOCH;
//! use assetgen::{Asset, AssetRegistry, vfs::{AssetFs, FileSystem}};
//!
//! let registry = AssetRegistry::new([
//!     Asset::new("/hello.txt", b"hi".to_vec(), UNIX_EPOCH),
//! ]).unwrap();
//! let fs = AssetFs::new(&registry);
//!
//! let mut file = fs.open("/hello.txt").unwrap();
//! let mut text = String::new();
//! file.read_to_string(&mut text).unwrap();
//! assert_eq!(text, "hi");
//! ```

mod file;

pub use file::AssetFile;

use std::any::Any;
use std::io::{self, Read, Seek};
use std::time::SystemTime;

use thiserror::Error;

use crate::asset::AssetRegistry;
use crate::utils::path::prepend_slash;

/// Permission bits reported for every asset (`r--r--r--`).
pub const READ_ONLY: u32 = 0o444;

/// Filesystem errors, each carrying the path involved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("open {path}: file does not exist")]
    NotFound { path: String },

    #[error("readdir {path}: permission denied")]
    PermissionDenied { path: String },
}

impl FsError {
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path } | Self::PermissionDenied { path } => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::NotFound { .. } => io::ErrorKind::NotFound,
            Self::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
        }
    }
}

impl From<FsError> for io::Error {
    fn from(err: FsError) -> Self {
        io::Error::new(err.kind(), err)
    }
}

/// Metadata returned by [`File::stat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    name: String,
    size: u64,
    mode: u32,
    mod_time: SystemTime,
    is_dir: bool,
}

impl FileInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Unix permission bits.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn mod_time(&self) -> SystemTime {
        self.mod_time
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Platform-specific data; always `None` for embedded assets.
    pub fn sys(&self) -> Option<&dyn Any> {
        None
    }
}

/// An open, seekable, read-only file.
pub trait File: Read + Seek {
    fn stat(&self) -> Result<FileInfo, FsError>;

    /// List directory entries. `count` bounds the number of entries
    /// returned; `None` means all.
    fn read_dir(&mut self, count: Option<usize>) -> Result<Vec<FileInfo>, FsError>;

    fn close(&mut self) -> Result<(), FsError>;
}

/// Open-by-path access to files.
pub trait FileSystem {
    fn open(&self, name: &str) -> Result<Box<dyn File + '_>, FsError>;
}

/// [`FileSystem`] backed by an asset registry.
#[derive(Debug, Clone, Copy)]
pub struct AssetFs<'r> {
    registry: &'r AssetRegistry,
}

impl<'r> AssetFs<'r> {
    pub const fn new(registry: &'r AssetRegistry) -> Self {
        Self { registry }
    }

    /// Open `name` as a concrete [`AssetFile`].
    pub fn open_file(&self, name: &str) -> Result<AssetFile<'r>, FsError> {
        self.registry
            .resolve(name)
            .map(AssetFile::new)
            .ok_or_else(|| FsError::NotFound {
                path: prepend_slash(name).into_owned(),
            })
    }
}

impl FileSystem for AssetFs<'_> {
    fn open(&self, name: &str) -> Result<Box<dyn File + '_>, FsError> {
        Ok(Box::new(self.open_file(name)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::name::join_name_hash;
    use std::io::{Read, SeekFrom};
    use std::time::{Duration, UNIX_EPOCH};

    fn registry() -> AssetRegistry {
        AssetRegistry::new([
            Asset::new(
                "/app.js",
                b"console.log(1)".to_vec(),
                UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            ),
            Asset::new("/css/site.css", b"body {}".to_vec(), UNIX_EPOCH),
        ])
        .unwrap()
    }

    #[test]
    fn test_open_and_read() {
        let registry = registry();
        let fs = AssetFs::new(&registry);
        let mut file = fs.open("/app.js").unwrap();

        let mut body = String::new();
        file.read_to_string(&mut body).unwrap();
        assert_eq!(body, "console.log(1)");
        assert!(file.close().is_ok());
    }

    #[test]
    fn test_open_hashed_name() {
        let registry = registry();
        let fs = AssetFs::new(&registry);
        let hashed = join_name_hash("/css/site.css", &"e".repeat(40));

        let file = fs.open(&hashed).unwrap();
        assert_eq!(file.stat().unwrap().name(), "/css/site.css");
    }

    #[test]
    fn test_open_missing_prefixes_slash() {
        let registry = registry();
        let fs = AssetFs::new(&registry);

        let err = fs.open("missing.js").err().unwrap();
        assert_eq!(err, FsError::NotFound { path: "/missing.js".into() });

        let err = fs.open("/missing.js").err().unwrap();
        assert_eq!(err.path(), "/missing.js");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_stat() {
        let registry = registry();
        let fs = AssetFs::new(&registry);
        let info = fs.open("/app.js").unwrap().stat().unwrap();

        assert_eq!(info.name(), "/app.js");
        assert_eq!(info.size(), 14);
        assert_eq!(info.mode(), READ_ONLY);
        assert!(!info.is_dir());
        assert!(info.sys().is_none());
        // Stat reports a zero time, not the bundled modification time
        assert_eq!(info.mod_time(), UNIX_EPOCH);
    }

    #[test]
    fn test_read_dir_denied() {
        let registry = registry();
        let fs = AssetFs::new(&registry);
        let mut file = fs.open("/css/site.css").unwrap();

        let err = file.read_dir(None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(file.read_dir(Some(1)).is_err());
    }

    #[test]
    fn test_seek_and_read() {
        let registry = registry();
        let fs = AssetFs::new(&registry);
        let mut file = fs.open("/app.js").unwrap();

        file.seek(SeekFrom::Start(8)).unwrap();
        let mut rest = String::new();
        file.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "log(1)");

        file.seek(SeekFrom::End(-3)).unwrap();
        let mut tail = String::new();
        file.read_to_string(&mut tail).unwrap();
        assert_eq!(tail, "(1)");
    }

    #[test]
    fn test_concurrent_handles_are_independent() {
        let registry = registry();
        let fs = AssetFs::new(&registry);
        let mut a = fs.open_file("/app.js").unwrap();
        let mut b = fs.open_file("/app.js").unwrap();

        let mut buf = [0u8; 7];
        a.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"console");
        b.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"console");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: io::Error = FsError::PermissionDenied { path: "/x".into() }.into();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "readdir /x: permission denied");
    }
}
