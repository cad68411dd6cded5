//! Storage engine for Tessera.
//!
//! This crate provides:
//! - Blob files: persistent files of numbered fixed-size pages
//! - A buffer manager marrying blob files to the buffer pool, with
//!   scoped page pins
//! - Record identifiers and relation files of slotted record pages
//! - A disk-resident B+ tree secondary index over a relation attribute

mod blob;
mod btree;
mod bufmgr;
mod record;
mod relation;

pub use blob::BlobFile;
pub use btree::{
    BTreeIndex, InternalView, LeafView, MetaView, INTERNAL_KEY_CAPACITY, LEAF_ENTRY_CAPACITY,
};
pub use bufmgr::{BufferManager, PinnedPage};
pub use record::RecordId;
pub use relation::{RelationFile, RelationPage, RelationScan};
