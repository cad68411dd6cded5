//! Blob files: persistent files of numbered fixed-size pages.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tessera_common::page::PAGE_SIZE;
use tessera_common::{Result, TesseraError};

/// Process-wide counter handing out unique ids to open blob files.
/// The buffer pool keys frames by (file id, page number).
static NEXT_FILE_ID: AtomicU32 = AtomicU32::new(0);

/// A file of numbered fixed-size pages.
///
/// Pages are numbered from 1; page number 0 is reserved as the "no page"
/// sentinel in on-disk structures. Page `n` lives at byte offset
/// `(n - 1) * PAGE_SIZE`.
pub struct BlobFile {
    /// Open file handle plus the page count it implies.
    inner: Mutex<BlobInner>,
    /// Path this file was opened from.
    path: PathBuf,
    /// Process-unique identifier for buffer pool keying.
    file_id: u32,
    /// Whether writes are followed by fsync.
    fsync_enabled: bool,
}

struct BlobInner {
    file: File,
    num_pages: u32,
}

impl BlobFile {
    /// Creates a new blob file at `path`.
    ///
    /// Fails with `FileExists` if a file is already present.
    pub fn create(path: impl AsRef<Path>, fsync_enabled: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(TesseraError::FileExists(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::from_file(file, path, 0, fsync_enabled))
    }

    /// Opens an existing blob file at `path`.
    ///
    /// Fails with `FileNotFound` if no file is present.
    pub fn open(path: impl AsRef<Path>, fsync_enabled: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TesseraError::FileNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let file_size = file.metadata()?.len();
        let num_pages = (file_size / PAGE_SIZE as u64) as u32;

        Ok(Self::from_file(file, path, num_pages, fsync_enabled))
    }

    fn from_file(file: File, path: PathBuf, num_pages: u32, fsync_enabled: bool) -> Self {
        Self {
            inner: Mutex::new(BlobInner { file, num_pages }),
            path,
            file_id: NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed),
            fsync_enabled,
        }
    }

    /// Returns the process-unique id of this open file.
    #[inline]
    pub fn file_id(&self) -> u32 {
        self.file_id
    }

    /// Returns the path this file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of pages in the file.
    pub fn num_pages(&self) -> u32 {
        self.inner.lock().num_pages
    }

    /// Reads a page from disk.
    pub fn read_page(&self, page_no: u32) -> Result<[u8; PAGE_SIZE]> {
        let mut inner = self.inner.lock();

        if page_no == 0 || page_no > inner.num_pages {
            return Err(TesseraError::PageNotFound {
                file_id: self.file_id,
                page_no,
            });
        }

        let offset = (page_no as u64 - 1) * PAGE_SIZE as u64;
        inner.file.seek(SeekFrom::Start(offset))?;

        let mut buffer = [0u8; PAGE_SIZE];
        inner.file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    /// Writes a page to disk.
    pub fn write_page(&self, page_no: u32, data: &[u8; PAGE_SIZE]) -> Result<()> {
        let mut inner = self.inner.lock();

        if page_no == 0 || page_no > inner.num_pages {
            return Err(TesseraError::PageNotFound {
                file_id: self.file_id,
                page_no,
            });
        }

        let offset = (page_no as u64 - 1) * PAGE_SIZE as u64;
        inner.file.seek(SeekFrom::Start(offset))?;
        inner.file.write_all(data)?;

        if self.fsync_enabled {
            inner.file.sync_all()?;
        }

        Ok(())
    }

    /// Allocates a new zeroed page at the end of the file.
    ///
    /// Returns the new page number.
    pub fn allocate_page(&self) -> Result<u32> {
        let mut inner = self.inner.lock();

        let page_no = inner.num_pages + 1;
        let offset = (page_no as u64 - 1) * PAGE_SIZE as u64;
        inner.file.seek(SeekFrom::Start(offset))?;
        inner.file.write_all(&[0u8; PAGE_SIZE])?;

        if self.fsync_enabled {
            inner.file.sync_all()?;
        }

        inner.num_pages = page_no;
        Ok(page_no)
    }

    /// Flushes pending writes to disk.
    pub fn sync(&self) -> Result<()> {
        self.inner.lock().file.sync_all()?;
        Ok(())
    }
}

impl std::fmt::Debug for BlobFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobFile")
            .field("path", &self.path)
            .field("file_id", &self.file_id)
            .field("num_pages", &self.num_pages())
            .finish()
    }
}
