//! Child storage for the inner node kinds.
//!
//! - [`sorted_keyed_mapping::SortedKeyedMapping`]: Node4 and Node16, parallel arrays of key
//!   bytes and children kept in ascending key order.
//! - [`indexed_mapping::IndexedMapping`]: Node48, a 256-entry byte to slot index over a pool of
//!   48 children.
//! - [`direct_mapping::DirectMapping`]: Node256, one slot per byte value.

pub mod direct_mapping;
pub mod indexed_mapping;
pub mod sorted_keyed_mapping;

pub trait NodeMapping<N> {
    /// Adds a child under `key`. The key must not already be present and the mapping must
    /// have room.
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn delete_child(&mut self, key: u8) -> Option<N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize;
    /// Lowest keyed child.
    fn first(&self) -> Option<(u8, &N)>;
    /// Highest keyed child.
    fn last(&self) -> Option<(u8, &N)>;

    fn is_full(&self) -> bool {
        self.num_children() >= self.width()
    }

    /// Moves every child, in ascending key order, into `other`.
    fn move_into<NM: NodeMapping<N>>(&mut self, other: &mut NM);
}
