//! Relation files and the left-to-right record scan.

use crate::blob::BlobFile;
use crate::bufmgr::{BufferManager, PinnedPage};
use crate::record::RecordId;
use crate::relation::page::RelationPage;
use bytes::Bytes;
use std::sync::Arc;
use tessera_common::{Result, TesseraError};

/// A relation: a blob file of slotted record pages.
pub struct RelationFile {
    mgr: BufferManager,
    file: Arc<BlobFile>,
    name: String,
}

impl RelationFile {
    /// Creates a new, empty relation named `name`.
    pub fn create(mgr: &BufferManager, name: &str) -> Result<Self> {
        let file = mgr.create_file(name)?;
        Ok(Self {
            mgr: mgr.clone(),
            file,
            name: name.to_string(),
        })
    }

    /// Opens an existing relation named `name`.
    pub fn open(mgr: &BufferManager, name: &str) -> Result<Self> {
        let file = mgr.open_file(name)?;
        Ok(Self {
            mgr: mgr.clone(),
            file,
            name: name.to_string(),
        })
    }

    /// Returns the relation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying blob file.
    pub fn file(&self) -> &Arc<BlobFile> {
        &self.file
    }

    /// Appends a record, returning its record id.
    ///
    /// Fills the last page; allocates a fresh page when it has no room.
    pub fn append(&self, record: &[u8]) -> Result<RecordId> {
        if record.len() > RelationPage::MAX_RECORD_SIZE {
            return Err(TesseraError::Internal(format!(
                "record of {} bytes exceeds page capacity {}",
                record.len(),
                RelationPage::MAX_RECORD_SIZE
            )));
        }

        let last = self.file.num_pages();
        if last > 0 {
            let page = self.mgr.fetch_page(&self.file, last)?;
            let slot = RelationPage::insert_record(&mut page.data_mut()[..], record);
            if let Some(slot_no) = slot {
                return Ok(RecordId::new(last, slot_no));
            }
            // Page is full; fall through to a fresh one. The failed
            // attempt did not modify the page, but the write access
            // already marked it dirty, which is merely conservative.
        }

        let page = self.mgr.alloc_page(&self.file)?;
        let page_no = page.page_no();
        let slot = RelationPage::insert_record(&mut page.data_mut()[..], record);
        match slot {
            Some(slot_no) => Ok(RecordId::new(page_no, slot_no)),
            None => Err(TesseraError::Internal(
                "record does not fit in an empty page".to_string(),
            )),
        }
    }

    /// Reads the record with the given id.
    pub fn record(&self, rid: RecordId) -> Result<Bytes> {
        let page = self.mgr.fetch_page(&self.file, rid.page_no)?;
        let data = page.data();
        match RelationPage::record(&data[..], rid.slot_no) {
            Some(bytes) => Ok(Bytes::copy_from_slice(bytes)),
            None => Err(TesseraError::Internal(format!(
                "no record at {rid}"
            ))),
        }
    }

    /// Flushes all dirty pages of the relation.
    pub fn flush(&self) -> Result<()> {
        self.mgr.flush_file(&self.file)
    }

    /// Starts a scan over every record, in page then slot order.
    pub fn scan(&self) -> RelationScan {
        RelationScan {
            mgr: self.mgr.clone(),
            file: Arc::clone(&self.file),
            page: None,
            page_no: 0,
            next_slot: 1,
        }
    }
}

/// Forward scan over a relation's records.
///
/// Pins one page at a time and yields `(record id, record bytes)` pairs;
/// exhaustion is reported as `EndOfFile`.
pub struct RelationScan {
    mgr: BufferManager,
    file: Arc<BlobFile>,
    /// Currently pinned page, if the scan has started.
    page: Option<PinnedPage>,
    /// Page number of the pinned page (0 before the first page).
    page_no: u32,
    /// Next 1-based slot to visit on the current page.
    next_slot: u16,
}

impl RelationScan {
    /// Advances to the next record.
    ///
    /// Fails with `EndOfFile` once every record has been returned; the
    /// scan holds no pin afterwards.
    pub fn next_record(&mut self) -> Result<(RecordId, Bytes)> {
        loop {
            if self.page.is_none() {
                let next_page_no = self.page_no + 1;
                if next_page_no > self.file.num_pages() {
                    return Err(TesseraError::EndOfFile);
                }
                self.page = Some(self.mgr.fetch_page(&self.file, next_page_no)?);
                self.page_no = next_page_no;
                self.next_slot = 1;
            }

            let page = self.page.as_ref().ok_or_else(|| {
                TesseraError::Internal("scan lost its pinned page".to_string())
            })?;
            let data = page.data();

            if self.next_slot > RelationPage::record_count(&data[..]) {
                drop(data);
                self.page = None;
                continue;
            }

            let record = match RelationPage::record(&data[..], self.next_slot) {
                Some(bytes) => Bytes::copy_from_slice(bytes),
                None => {
                    return Err(TesseraError::Internal(format!(
                        "missing record at {}:{}",
                        self.page_no, self.next_slot
                    )))
                }
            };

            let rid = RecordId::new(self.page_no, self.next_slot);
            self.next_slot += 1;
            return Ok((rid, record));
        }
    }
}
