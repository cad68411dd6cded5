//! Page codec and in-node algorithms for the B+ tree.
//!
//! Three typed views reinterpret a raw page buffer: meta page, internal
//! node, leaf node. Views alias the page bytes directly; constructing one
//! fails with a layout error when the buffer is smaller than a page.
//!
//! Occupied slots always form a contiguous prefix. The first unused slot
//! is marked by `slot_no == 0` in a leaf's rid array and by a child
//! pointer of 0 in an internal node; key values are never used as
//! sentinels, so a key of 0 is as valid as any other.

use crate::record::RecordId;
use tessera_common::page::{INVALID_PAGE_NO, PAGE_SIZE};
use tessera_common::{Result, TesseraError};

/// Serialized size of a key.
const KEY_SIZE: usize = 4;

/// Serialized size of a child page pointer.
const PAGE_NO_SIZE: usize = 4;

/// Number of (key, rid) entries a leaf holds.
//                            right sibling        key        rid
pub const LEAF_ENTRY_CAPACITY: usize =
    (PAGE_SIZE - PAGE_NO_SIZE) / (KEY_SIZE + RecordId::DISK_SIZE);

/// Number of keys an internal node holds; it has one more child pointer.
//                              level   extra child          key     child
pub const INTERNAL_KEY_CAPACITY: usize =
    (PAGE_SIZE - 4 - PAGE_NO_SIZE) / (KEY_SIZE + PAGE_NO_SIZE);

// Leaf layout: key array, rid array, right sibling pointer.
const LEAF_KEYS_OFFSET: usize = 0;
const LEAF_RIDS_OFFSET: usize = LEAF_KEYS_OFFSET + LEAF_ENTRY_CAPACITY * KEY_SIZE;
const LEAF_SIBLING_OFFSET: usize =
    LEAF_RIDS_OFFSET + LEAF_ENTRY_CAPACITY * RecordId::DISK_SIZE;

// Internal layout: level, key array, child pointer array.
const INTERNAL_LEVEL_OFFSET: usize = 0;
const INTERNAL_KEYS_OFFSET: usize = 4;
const INTERNAL_CHILDREN_OFFSET: usize =
    INTERNAL_KEYS_OFFSET + INTERNAL_KEY_CAPACITY * KEY_SIZE;

// Meta layout: relation name, attribute byte offset, key type tag, root.
const META_NAME_LEN: usize = 20;
const META_ATTR_OFFSET: usize = META_NAME_LEN;
const META_KEY_TYPE_OFFSET: usize = META_ATTR_OFFSET + 4;
const META_ROOT_OFFSET: usize = META_KEY_TYPE_OFFSET + 4;

// Every layout must fit within one page.
const _: () = assert!(LEAF_SIBLING_OFFSET + PAGE_NO_SIZE <= PAGE_SIZE);
const _: () = assert!(
    INTERNAL_CHILDREN_OFFSET + (INTERNAL_KEY_CAPACITY + 1) * PAGE_NO_SIZE <= PAGE_SIZE
);
const _: () = assert!(META_ROOT_OFFSET + 4 <= PAGE_SIZE);

fn check_page(data: &[u8]) -> Result<()> {
    if data.len() < PAGE_SIZE {
        return Err(TesseraError::Layout {
            needed: PAGE_SIZE,
            actual: data.len(),
        });
    }
    Ok(())
}

#[inline]
fn read_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn write_i32(data: &mut [u8], offset: usize, value: i32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn write_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// View over the index meta page (always page 1).
pub struct MetaView<B> {
    data: B,
}

impl<B: AsRef<[u8]>> MetaView<B> {
    /// Creates a meta view over a page buffer.
    pub fn new(data: B) -> Result<Self> {
        check_page(data.as_ref())?;
        Ok(Self { data })
    }

    /// Returns the stored relation name.
    pub fn relation_name(&self) -> String {
        let bytes = &self.data.as_ref()[..META_NAME_LEN];
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(META_NAME_LEN);
        String::from_utf8_lossy(&bytes[..end]).into_owned()
    }

    /// Returns the stored attribute byte offset.
    pub fn attr_byte_offset(&self) -> i32 {
        read_i32(self.data.as_ref(), META_ATTR_OFFSET)
    }

    /// Returns the stored key type tag.
    pub fn key_type_tag(&self) -> u32 {
        read_u32(self.data.as_ref(), META_KEY_TYPE_OFFSET)
    }

    /// Returns the current root page number.
    pub fn root_page_no(&self) -> u32 {
        read_u32(self.data.as_ref(), META_ROOT_OFFSET)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> MetaView<B> {
    /// Stores the relation name, truncated to the field width.
    pub fn set_relation_name(&mut self, name: &str) {
        let field = &mut self.data.as_mut()[..META_NAME_LEN];
        field.fill(0);
        let bytes = name.as_bytes();
        let len = bytes.len().min(META_NAME_LEN);
        field[..len].copy_from_slice(&bytes[..len]);
    }

    /// Stores the attribute byte offset.
    pub fn set_attr_byte_offset(&mut self, offset: i32) {
        write_i32(self.data.as_mut(), META_ATTR_OFFSET, offset);
    }

    /// Stores the key type tag.
    pub fn set_key_type_tag(&mut self, tag: u32) {
        write_u32(self.data.as_mut(), META_KEY_TYPE_OFFSET, tag);
    }

    /// Stores the root page number.
    pub fn set_root_page_no(&mut self, page_no: u32) {
        write_u32(self.data.as_mut(), META_ROOT_OFFSET, page_no);
    }
}

/// View over an internal (non-leaf) node page.
pub struct InternalView<B> {
    data: B,
}

impl<B: AsRef<[u8]>> InternalView<B> {
    /// Creates an internal-node view over a page buffer.
    pub fn new(data: B) -> Result<Self> {
        check_page(data.as_ref())?;
        Ok(Self { data })
    }

    /// Returns the node level: 1 when children are leaves, 0 otherwise.
    pub fn level(&self) -> i32 {
        read_i32(self.data.as_ref(), INTERNAL_LEVEL_OFFSET)
    }

    /// Returns the separator key in slot `i`.
    pub fn key_at(&self, i: usize) -> i32 {
        read_i32(self.data.as_ref(), INTERNAL_KEYS_OFFSET + i * KEY_SIZE)
    }

    /// Returns the child page number in slot `i`.
    pub fn child_at(&self, i: usize) -> u32 {
        read_u32(
            self.data.as_ref(),
            INTERNAL_CHILDREN_OFFSET + i * PAGE_NO_SIZE,
        )
    }

    /// Returns the number of occupied key slots.
    ///
    /// Key slot `i` is occupied exactly when child slot `i + 1` is, so
    /// occupancy is read off the child array, never off key values.
    pub fn key_count(&self) -> usize {
        let mut count = 0;
        while count < INTERNAL_KEY_CAPACITY && self.child_at(count + 1) != INVALID_PAGE_NO {
            count += 1;
        }
        count
    }

    /// Returns true if no further key fits.
    pub fn is_full(&self) -> bool {
        self.child_at(INTERNAL_KEY_CAPACITY) != INVALID_PAGE_NO
    }

    /// Selects the child subtree to descend into for `probe`.
    ///
    /// Child `i` holds keys strictly below separator `i`; the rightmost
    /// occupied child holds everything at or above the last separator.
    pub fn select_child(&self, probe: i32) -> u32 {
        let n = self.key_count();
        for i in 0..n {
            if self.key_at(i) > probe {
                return self.child_at(i);
            }
        }
        self.child_at(n)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> InternalView<B> {
    /// Sets the node level.
    pub fn set_level(&mut self, level: i32) {
        write_i32(self.data.as_mut(), INTERNAL_LEVEL_OFFSET, level);
    }

    /// Writes the separator key in slot `i`.
    pub fn set_key(&mut self, i: usize, key: i32) {
        write_i32(self.data.as_mut(), INTERNAL_KEYS_OFFSET + i * KEY_SIZE, key);
    }

    /// Writes the child page number in slot `i`.
    pub fn set_child(&mut self, i: usize, page_no: u32) {
        write_u32(
            self.data.as_mut(),
            INTERNAL_CHILDREN_OFFSET + i * PAGE_NO_SIZE,
            page_no,
        );
    }

    /// Initializes an empty node with its first separator and both
    /// children. Only root replacement reaches this state; an ordinary
    /// split inserts into a node that already owns the left child.
    pub fn init_root(&mut self, left_child: u32, key: i32, right_child: u32) {
        self.set_key(0, key);
        self.set_child(0, left_child);
        self.set_child(1, right_child);
    }

    /// Inserts a separator and the child to its right, keeping keys
    /// sorted and key slot `i` aligned with child slot `i + 1`.
    ///
    /// Precondition: the node is not full. Entries at or above the
    /// insertion point shift one slot right in a single carry pass;
    /// equal keys keep their existing order.
    pub fn insert(&mut self, key: i32, right_child: u32) {
        let mut carry = (key, right_child);
        for i in 0..INTERNAL_KEY_CAPACITY {
            if self.child_at(i + 1) == INVALID_PAGE_NO {
                self.set_key(i, carry.0);
                self.set_child(i + 1, carry.1);
                return;
            }
            if self.key_at(i) > key {
                let displaced = (self.key_at(i), self.child_at(i + 1));
                self.set_key(i, carry.0);
                self.set_child(i + 1, carry.1);
                carry = displaced;
            }
        }
    }

    /// Splits a full node, moving its upper half into `right` and
    /// zeroing the vacated slots.
    ///
    /// Keys above the middle and the children to their right move; the
    /// middle key itself is cleared and returned for promotion, retained
    /// on neither side.
    pub fn split_upper_half<B2>(&mut self, right: &mut InternalView<B2>) -> i32
    where
        B2: AsRef<[u8]> + AsMut<[u8]>,
    {
        let mid = INTERNAL_KEY_CAPACITY / 2;

        for i in (mid + 1)..INTERNAL_KEY_CAPACITY {
            right.set_key(i - mid - 1, self.key_at(i));
            self.set_key(i, 0);
        }
        for i in (mid + 1)..=INTERNAL_KEY_CAPACITY {
            right.set_child(i - mid - 1, self.child_at(i));
            self.set_child(i, INVALID_PAGE_NO);
        }

        let promoted = self.key_at(mid);
        self.set_key(mid, 0);
        promoted
    }
}

/// View over a leaf node page.
pub struct LeafView<B> {
    data: B,
}

impl<B: AsRef<[u8]>> LeafView<B> {
    /// Creates a leaf view over a page buffer.
    pub fn new(data: B) -> Result<Self> {
        check_page(data.as_ref())?;
        Ok(Self { data })
    }

    /// Returns the key in slot `i`.
    pub fn key_at(&self, i: usize) -> i32 {
        read_i32(self.data.as_ref(), LEAF_KEYS_OFFSET + i * KEY_SIZE)
    }

    /// Returns the record id in slot `i`.
    pub fn rid_at(&self, i: usize) -> RecordId {
        let offset = LEAF_RIDS_OFFSET + i * RecordId::DISK_SIZE;
        RecordId::from_bytes(&self.data.as_ref()[offset..offset + RecordId::DISK_SIZE])
    }

    /// Returns true when slot `i` holds an entry.
    pub fn is_occupied(&self, i: usize) -> bool {
        i < LEAF_ENTRY_CAPACITY && self.rid_at(i).slot_no != 0
    }

    /// Returns the number of occupied slots.
    pub fn entry_count(&self) -> usize {
        let mut count = 0;
        while self.is_occupied(count) {
            count += 1;
        }
        count
    }

    /// Returns true if no further entry fits.
    pub fn is_full(&self) -> bool {
        self.rid_at(LEAF_ENTRY_CAPACITY - 1).slot_no != 0
    }

    /// Returns the page number of the right sibling leaf, or 0 when this
    /// is the rightmost leaf.
    pub fn right_sibling(&self) -> u32 {
        read_u32(self.data.as_ref(), LEAF_SIBLING_OFFSET)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> LeafView<B> {
    /// Writes the key in slot `i`.
    pub fn set_key(&mut self, i: usize, key: i32) {
        write_i32(self.data.as_mut(), LEAF_KEYS_OFFSET + i * KEY_SIZE, key);
    }

    /// Writes the record id in slot `i`.
    pub fn set_rid(&mut self, i: usize, rid: RecordId) {
        let offset = LEAF_RIDS_OFFSET + i * RecordId::DISK_SIZE;
        self.data.as_mut()[offset..offset + RecordId::DISK_SIZE].copy_from_slice(&rid.to_bytes());
    }

    /// Sets the right sibling page number.
    pub fn set_right_sibling(&mut self, page_no: u32) {
        write_u32(self.data.as_mut(), LEAF_SIBLING_OFFSET, page_no);
    }

    /// Inserts an entry, keeping keys sorted.
    ///
    /// Precondition: the leaf is not full. A single carry pass shifts
    /// displaced entries one slot right; the new entry lands at the
    /// first position whose key is strictly greater, so equal keys keep
    /// insertion order.
    pub fn insert(&mut self, key: i32, rid: RecordId) {
        let mut carry = (key, rid);
        for i in 0..LEAF_ENTRY_CAPACITY {
            if !self.is_occupied(i) {
                self.set_key(i, carry.0);
                self.set_rid(i, carry.1);
                return;
            }
            if self.key_at(i) > key {
                let displaced = (self.key_at(i), self.rid_at(i));
                self.set_key(i, carry.0);
                self.set_rid(i, carry.1);
                carry = displaced;
            }
        }
    }

    /// Splits a full leaf, moving its upper half into `right` and
    /// zeroing the vacated slots so both sides keep a contiguous
    /// occupied prefix.
    ///
    /// The sibling pointers are relinked by the caller, which knows the
    /// page numbers.
    pub fn split_upper_half<B2>(&mut self, right: &mut LeafView<B2>)
    where
        B2: AsRef<[u8]> + AsMut<[u8]>,
    {
        let mid = LEAF_ENTRY_CAPACITY / 2;
        for i in mid..LEAF_ENTRY_CAPACITY {
            right.set_key(i - mid, self.key_at(i));
            right.set_rid(i - mid, self.rid_at(i));
            self.set_key(i, 0);
            self.set_rid(i, RecordId::new(0, 0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::page::PAGE_SIZE;

    fn page() -> Box<[u8; PAGE_SIZE]> {
        Box::new([0u8; PAGE_SIZE])
    }

    #[test]
    fn test_capacities() {
        assert_eq!(LEAF_ENTRY_CAPACITY, 818);
        assert_eq!(INTERNAL_KEY_CAPACITY, 1023);
    }

    #[test]
    fn test_views_reject_short_buffers() {
        let short = [0u8; 512];
        assert!(matches!(
            LeafView::new(&short[..]),
            Err(TesseraError::Layout { .. })
        ));
        assert!(matches!(
            InternalView::new(&short[..]),
            Err(TesseraError::Layout { .. })
        ));
        assert!(matches!(
            MetaView::new(&short[..]),
            Err(TesseraError::Layout { .. })
        ));
    }

    #[test]
    fn test_meta_roundtrip() {
        let mut buf = page();
        let mut meta = MetaView::new(&mut buf[..]).unwrap();

        meta.set_relation_name("orders");
        meta.set_attr_byte_offset(16);
        meta.set_key_type_tag(0);
        meta.set_root_page_no(2);

        let meta = MetaView::new(&buf[..]).unwrap();
        assert_eq!(meta.relation_name(), "orders");
        assert_eq!(meta.attr_byte_offset(), 16);
        assert_eq!(meta.key_type_tag(), 0);
        assert_eq!(meta.root_page_no(), 2);
    }

    #[test]
    fn test_meta_name_truncated_to_field_width() {
        let mut buf = page();
        let mut meta = MetaView::new(&mut buf[..]).unwrap();

        meta.set_relation_name("a_very_long_relation_name_indeed");
        assert_eq!(meta.relation_name().len(), 20);
        assert_eq!(meta.relation_name(), "a_very_long_relation");
    }

    #[test]
    fn test_leaf_empty_state() {
        let buf = page();
        let leaf = LeafView::new(&buf[..]).unwrap();

        assert_eq!(leaf.entry_count(), 0);
        assert!(!leaf.is_full());
        assert!(!leaf.is_occupied(0));
        assert_eq!(leaf.right_sibling(), 0);
    }

    #[test]
    fn test_leaf_insert_keeps_sorted() {
        let mut buf = page();
        let mut leaf = LeafView::new(&mut buf[..]).unwrap();

        for (slot, key) in [(1u16, 30), (2, 10), (3, 20), (4, 25)] {
            leaf.insert(key, RecordId::new(1, slot));
        }

        assert_eq!(leaf.entry_count(), 4);
        let keys: Vec<_> = (0..4).map(|i| leaf.key_at(i)).collect();
        assert_eq!(keys, vec![10, 20, 25, 30]);
        assert_eq!(leaf.rid_at(0), RecordId::new(1, 2));
        assert_eq!(leaf.rid_at(3), RecordId::new(1, 1));
    }

    #[test]
    fn test_leaf_insert_duplicates_keep_insertion_order() {
        let mut buf = page();
        let mut leaf = LeafView::new(&mut buf[..]).unwrap();

        leaf.insert(5, RecordId::new(1, 1));
        leaf.insert(5, RecordId::new(1, 2));
        leaf.insert(4, RecordId::new(1, 3));
        leaf.insert(5, RecordId::new(1, 4));

        let entries: Vec<_> = (0..4).map(|i| (leaf.key_at(i), leaf.rid_at(i))).collect();
        assert_eq!(
            entries,
            vec![
                (4, RecordId::new(1, 3)),
                (5, RecordId::new(1, 1)),
                (5, RecordId::new(1, 2)),
                (5, RecordId::new(1, 4)),
            ]
        );
    }

    #[test]
    fn test_leaf_zero_key_is_a_real_key() {
        let mut buf = page();
        let mut leaf = LeafView::new(&mut buf[..]).unwrap();

        leaf.insert(0, RecordId::new(1, 1));
        leaf.insert(-5, RecordId::new(1, 2));

        assert_eq!(leaf.entry_count(), 2);
        assert_eq!(leaf.key_at(0), -5);
        assert_eq!(leaf.key_at(1), 0);
    }

    #[test]
    fn test_leaf_fills_to_capacity() {
        let mut buf = page();
        let mut leaf = LeafView::new(&mut buf[..]).unwrap();

        for i in 0..LEAF_ENTRY_CAPACITY {
            assert!(!leaf.is_full());
            leaf.insert(i as i32, RecordId::new(1, (i + 1) as u16));
        }

        assert!(leaf.is_full());
        assert_eq!(leaf.entry_count(), LEAF_ENTRY_CAPACITY);
    }

    #[test]
    fn test_leaf_split_moves_upper_half() {
        let mut left_buf = page();
        let mut right_buf = page();
        let mut left = LeafView::new(&mut left_buf[..]).unwrap();
        let mut right = LeafView::new(&mut right_buf[..]).unwrap();

        for i in 0..LEAF_ENTRY_CAPACITY {
            left.insert(i as i32, RecordId::new(1, (i + 1) as u16));
        }

        left.split_upper_half(&mut right);

        let mid = LEAF_ENTRY_CAPACITY / 2;
        assert_eq!(left.entry_count(), mid);
        assert_eq!(right.entry_count(), LEAF_ENTRY_CAPACITY - mid);
        assert_eq!(right.key_at(0), mid as i32);

        // Vacated slots are fully cleared.
        assert_eq!(left.key_at(mid), 0);
        assert_eq!(left.rid_at(mid), RecordId::new(0, 0));
    }

    #[test]
    fn test_internal_init_root() {
        let mut buf = page();
        let mut node = InternalView::new(&mut buf[..]).unwrap();

        node.set_level(1);
        node.init_root(2, 50, 3);

        assert_eq!(node.level(), 1);
        assert_eq!(node.key_count(), 1);
        assert_eq!(node.key_at(0), 50);
        assert_eq!(node.child_at(0), 2);
        assert_eq!(node.child_at(1), 3);
        assert!(!node.is_full());
    }

    #[test]
    fn test_internal_insert_keeps_key_child_alignment() {
        let mut buf = page();
        let mut node = InternalView::new(&mut buf[..]).unwrap();

        node.init_root(10, 100, 11);
        node.insert(300, 13);
        node.insert(200, 12);

        assert_eq!(node.key_count(), 3);
        let keys: Vec<_> = (0..3).map(|i| node.key_at(i)).collect();
        assert_eq!(keys, vec![100, 200, 300]);
        let children: Vec<_> = (0..4).map(|i| node.child_at(i)).collect();
        assert_eq!(children, vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_internal_select_child() {
        let mut buf = page();
        let mut node = InternalView::new(&mut buf[..]).unwrap();

        node.init_root(10, 100, 11);
        node.insert(200, 12);

        // probe below the first separator
        assert_eq!(node.select_child(5), 10);
        assert_eq!(node.select_child(99), 10);
        // probe between separators; equal goes right
        assert_eq!(node.select_child(100), 11);
        assert_eq!(node.select_child(150), 11);
        // probe at or above the last separator
        assert_eq!(node.select_child(200), 12);
        assert_eq!(node.select_child(9999), 12);
    }

    #[test]
    fn test_internal_select_child_single_separator() {
        let mut buf = page();
        let mut node = InternalView::new(&mut buf[..]).unwrap();
        node.init_root(2, 0, 3);

        assert_eq!(node.select_child(-1), 2);
        assert_eq!(node.select_child(0), 3);
        assert_eq!(node.select_child(1), 3);
    }

    #[test]
    fn test_internal_fills_to_capacity() {
        let mut buf = page();
        let mut node = InternalView::new(&mut buf[..]).unwrap();

        node.init_root(1, 0, 2);
        for i in 1..INTERNAL_KEY_CAPACITY {
            assert!(!node.is_full());
            node.insert(i as i32, (i + 2) as u32);
        }

        assert!(node.is_full());
        assert_eq!(node.key_count(), INTERNAL_KEY_CAPACITY);
    }

    #[test]
    fn test_internal_split_promotes_middle_key() {
        let mut left_buf = page();
        let mut right_buf = page();
        let mut left = InternalView::new(&mut left_buf[..]).unwrap();
        let mut right = InternalView::new(&mut right_buf[..]).unwrap();

        left.set_level(1);
        left.init_root(1, 0, 2);
        for i in 1..INTERNAL_KEY_CAPACITY {
            left.insert(i as i32, (i + 2) as u32);
        }

        right.set_level(left.level());
        let promoted = left.split_upper_half(&mut right);

        let mid = INTERNAL_KEY_CAPACITY / 2;
        assert_eq!(promoted, mid as i32);

        // The promoted key lives on neither side.
        assert_eq!(left.key_count(), mid);
        assert_eq!(left.key_at(mid - 1), (mid - 1) as i32);
        assert_eq!(right.key_count(), INTERNAL_KEY_CAPACITY - mid - 1);
        assert_eq!(right.key_at(0), (mid + 1) as i32);

        // Children stay aligned on both sides.
        assert_eq!(left.child_at(mid), (mid + 1) as u32);
        assert_eq!(right.child_at(0), (mid + 2) as u32);
    }

    #[test]
    fn test_internal_insert_after_split_keeps_order() {
        let mut left_buf = page();
        let mut right_buf = page();
        let mut left = InternalView::new(&mut left_buf[..]).unwrap();
        let mut right = InternalView::new(&mut right_buf[..]).unwrap();

        left.init_root(1, 0, 2);
        for i in 1..INTERNAL_KEY_CAPACITY {
            left.insert(i as i32, (i + 2) as u32);
        }
        right.set_level(left.level());
        let promoted = left.split_upper_half(&mut right);

        // Both halves accept further separators.
        left.insert(promoted - 1, 9000);
        right.insert(promoted + 1, 9001);

        for node in [&left, &right] {
            let n = node.key_count();
            for i in 1..n {
                assert!(node.key_at(i - 1) <= node.key_at(i));
            }
        }
    }
}
