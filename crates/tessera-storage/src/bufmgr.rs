//! Buffer manager: blob-file I/O routed through the buffer pool.
//!
//! Pages are fetched with a pin, mutated in memory, and written back
//! lazily on eviction or when the owning file is flushed. Every pin is
//! scoped: [`PinnedPage`] releases its pin on drop, on every exit path.

use crate::blob::BlobFile;
use parking_lot::{Mutex, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tessera_buffer::{BufferPool, EvictedPage, FrameId};
use tessera_common::page::{PageId, PAGE_SIZE};
use tessera_common::{Result, StorageConfig, TesseraError};

/// Buffer manager handle.
///
/// Cheap to clone; all clones share one pool and one open-file registry.
#[derive(Clone)]
pub struct BufferManager {
    inner: Arc<ManagerInner>,
}

struct ManagerInner {
    /// Shared page frame pool.
    pool: BufferPool,
    /// Open blob files by file id, so evicted dirty pages can be written
    /// back to their owning file.
    files: Mutex<HashMap<u32, Arc<BlobFile>>>,
    /// Directory data and index files live in.
    data_dir: PathBuf,
    /// Whether blob files fsync after writes.
    fsync_enabled: bool,
}

impl BufferManager {
    /// Creates a buffer manager for the configured data directory.
    pub fn new(config: StorageConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        Ok(Self {
            inner: Arc::new(ManagerInner {
                pool: BufferPool::new(config.buffer_pool_frames),
                files: Mutex::new(HashMap::new()),
                data_dir: config.data_dir,
                fsync_enabled: config.fsync_enabled,
            }),
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// Creates a blob file named `name` under the data directory.
    ///
    /// Fails with `FileExists` if the file is already present.
    pub fn create_file(&self, name: &str) -> Result<Arc<BlobFile>> {
        let path = self.inner.data_dir.join(name);
        let file = Arc::new(BlobFile::create(path, self.inner.fsync_enabled)?);
        self.inner
            .files
            .lock()
            .insert(file.file_id(), Arc::clone(&file));
        Ok(file)
    }

    /// Opens an existing blob file named `name` under the data directory.
    ///
    /// Fails with `FileNotFound` if no such file is present.
    pub fn open_file(&self, name: &str) -> Result<Arc<BlobFile>> {
        let path = self.inner.data_dir.join(name);
        let file = Arc::new(BlobFile::open(path, self.inner.fsync_enabled)?);
        self.inner
            .files
            .lock()
            .insert(file.file_id(), Arc::clone(&file));
        Ok(file)
    }

    /// Allocates a fresh page in `file` and pins it.
    ///
    /// The returned frame is zeroed.
    pub fn alloc_page(&self, file: &BlobFile) -> Result<PinnedPage> {
        let page_no = file.allocate_page()?;
        let page_id = PageId::new(file.file_id(), page_no);

        let (frame, evicted) = self.inner.pool.new_page(page_id)?;
        let page = PinnedPage::new(self.clone(), page_id, frame.frame_id());

        if let Some(evicted) = evicted {
            self.write_back(evicted)?;
        }
        Ok(page)
    }

    /// Fetches a page of `file` and pins it, reading from disk on a pool
    /// miss.
    pub fn fetch_page(&self, file: &BlobFile, page_no: u32) -> Result<PinnedPage> {
        let page_id = PageId::new(file.file_id(), page_no);

        if let Some(frame) = self.inner.pool.fetch_page(page_id) {
            return Ok(PinnedPage::new(self.clone(), page_id, frame.frame_id()));
        }

        let bytes = file.read_page(page_no)?;
        let (frame, evicted) = self.inner.pool.load_page(page_id, &bytes)?;
        let page = PinnedPage::new(self.clone(), page_id, frame.frame_id());

        if let Some(evicted) = evicted {
            self.write_back(evicted)?;
        }
        Ok(page)
    }

    /// Writes every dirty resident page of `file` back to disk.
    ///
    /// Fails with `PagePinned` if any frame of the file is still pinned;
    /// nothing is written in that case.
    pub fn flush_file(&self, file: &BlobFile) -> Result<()> {
        let pages = self.inner.pool.pages_of_file(file.file_id());

        for page_id in &pages {
            if let Some(frame) = self.inner.pool.frame(*page_id) {
                if frame.is_pinned() {
                    return Err(TesseraError::PagePinned {
                        file_id: page_id.file_id,
                        page_no: page_id.page_no,
                    });
                }
            }
        }

        for page_id in pages {
            if let Some(frame) = self.inner.pool.frame(page_id) {
                if frame.is_dirty() {
                    let data = frame.read_data();
                    file.write_page(page_id.page_no, &data)?;
                    drop(data);
                    frame.set_dirty(false);
                }
            }
        }

        file.sync()
    }

    /// Writes an evicted dirty page back to its owning file.
    fn write_back(&self, evicted: EvictedPage) -> Result<()> {
        let file = self
            .inner
            .files
            .lock()
            .get(&evicted.page_id.file_id)
            .cloned();

        match file {
            Some(file) => file.write_page(evicted.page_id.page_no, &evicted.data),
            None => Err(TesseraError::Internal(format!(
                "evicted page {} belongs to an unregistered file",
                evicted.page_id
            ))),
        }
    }

    fn unpin(&self, page_id: PageId, dirty: bool) {
        self.inner.pool.unpin_page(page_id, dirty);
    }
}

impl std::fmt::Debug for BufferManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferManager")
            .field("data_dir", &self.inner.data_dir)
            .field("num_frames", &self.inner.pool.num_frames())
            .finish()
    }
}

/// A scoped page pin.
///
/// Holds one pin on a buffer frame; dropping the guard releases the pin,
/// marking the frame dirty if any mutable access occurred. Because drops
/// run on every exit path, a page can never leak its pin through an
/// early return or error.
pub struct PinnedPage {
    mgr: BufferManager,
    page_id: PageId,
    frame_id: FrameId,
    dirty: AtomicBool,
}

impl PinnedPage {
    fn new(mgr: BufferManager, page_id: PageId, frame_id: FrameId) -> Self {
        Self {
            mgr,
            page_id,
            frame_id,
            dirty: AtomicBool::new(false),
        }
    }

    /// Returns the page number of the pinned page.
    #[inline]
    pub fn page_no(&self) -> u32 {
        self.page_id.page_no
    }

    /// Read access to the page bytes.
    #[inline]
    pub fn data(&self) -> RwLockReadGuard<'_, Box<[u8; PAGE_SIZE]>> {
        self.mgr.inner.pool.frame_at(self.frame_id).read_data()
    }

    /// Write access to the page bytes; marks the page dirty.
    #[inline]
    pub fn data_mut(&self) -> RwLockWriteGuard<'_, Box<[u8; PAGE_SIZE]>> {
        self.dirty.store(true, Ordering::Relaxed);
        self.mgr.inner.pool.frame_at(self.frame_id).write_data()
    }

    /// Marks the page dirty so the unpin records a pending write-back.
    #[inline]
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }
}

impl Drop for PinnedPage {
    fn drop(&mut self) {
        self.mgr
            .unpin(self.page_id, self.dirty.load(Ordering::Relaxed));
    }
}

impl std::fmt::Debug for PinnedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinnedPage")
            .field("page_id", &self.page_id)
            .field("frame_id", &self.frame_id)
            .finish()
    }
}
