//! Disk-resident B+ tree secondary index.
//!
//! The index maps an integer attribute of a relation's records to the
//! record ids that produced it. Every node is one page of the index
//! file: page 1 holds the metadata, page 2 the initial (root) leaf, and
//! splits allocate further pages on demand. Leaves are chained
//! left-to-right through right-sibling pointers, which is what range
//! scans walk.
//!
//! `node` holds the page codec and the in-node algorithms; `index` the
//! tree operations, the scan engine, and the open/close lifecycle.

mod index;
mod node;

pub use index::BTreeIndex;
pub use node::{InternalView, LeafView, MetaView, INTERNAL_KEY_CAPACITY, LEAF_ENTRY_CAPACITY};
