//! Handle over one asset's bytes.

use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};
use std::time::UNIX_EPOCH;

use super::{File, FileInfo, FsError, READ_ONLY};
use crate::asset::Asset;

/// Seekable reader over an asset's immutable content.
///
/// Each handle has its own position; the content itself is shared.
#[derive(Debug, Clone)]
pub struct AssetFile<'a> {
    asset: &'a Asset,
    reader: Cursor<&'a [u8]>,
}

impl<'a> AssetFile<'a> {
    pub fn new(asset: &'a Asset) -> Self {
        Self {
            asset,
            reader: Cursor::new(asset.data()),
        }
    }
}

impl Read for AssetFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for AssetFile<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt);
    }
}

impl Seek for AssetFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.reader.seek(pos)
    }
}

impl File for AssetFile<'_> {
    /// Modification time is always the zero time; HTTP serving uses the
    /// asset's recorded time instead.
    fn stat(&self) -> Result<FileInfo, FsError> {
        Ok(FileInfo {
            name: self.asset.name().to_string(),
            size: self.asset.size(),
            mode: READ_ONLY,
            mod_time: UNIX_EPOCH,
            is_dir: false,
        })
    }

    fn read_dir(&mut self, _count: Option<usize>) -> Result<Vec<FileInfo>, FsError> {
        Err(FsError::PermissionDenied {
            path: self.asset.name().to_string(),
        })
    }

    fn close(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}
