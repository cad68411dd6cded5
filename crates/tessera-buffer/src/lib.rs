//! Buffer pool management for Tessera.
//!
//! This crate provides in-memory page caching with:
//! - Fixed-size buffer pool with configurable frame count
//! - Clock eviction policy for cache management
//! - Pin counting to protect in-use frames from eviction
//! - Dirty page tracking for write-back

mod frame;
mod pool;
mod replacer;

pub use frame::{BufferFrame, FrameId};
pub use pool::{BufferPool, EvictedPage};
pub use replacer::ClockReplacer;
