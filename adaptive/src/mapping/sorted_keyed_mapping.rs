use crate::mapping::NodeMapping;
use crate::utils::u8_keys::{
    u8_keys_find_insert_position_sorted, u8_keys_find_key_position_sorted,
};

/// Maps a key to a node, using a sorted array of keys and a corresponding array of nodes.
/// Only the first `num_children` positions are live.
/// When an item is inserted or deleted the items to the right of it are shifted, in order to
/// keep the array sorted, so iteration order is key order without any extra work.
pub struct SortedKeyedMapping<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: [Option<N>; WIDTH],
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> Default for SortedKeyedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> SortedKeyedMapping<N, WIDTH> {
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: [0; WIDTH],
            children: [const { None }; WIDTH],
            num_children: 0,
        }
    }

    pub fn from_resized<const OLD_WIDTH: usize>(km: &mut SortedKeyedMapping<N, OLD_WIDTH>) -> Self {
        debug_assert!(km.num_children as usize <= WIDTH);
        let mut new = SortedKeyedMapping::new();
        km.move_into(&mut new);
        new
    }

    pub fn from_indexed<const IDX_WIDTH: usize>(
        im: &mut crate::mapping::indexed_mapping::IndexedMapping<N, IDX_WIDTH>,
    ) -> Self {
        debug_assert!(im.num_children() <= WIDTH);
        let mut new = SortedKeyedMapping::new();
        im.move_into(&mut new);
        new
    }

    /// Removes and returns the only child. Used when a Node4 collapses into its child.
    pub fn take_only_child(&mut self) -> Option<(u8, N)> {
        debug_assert_eq!(self.num_children, 1);
        let child = self.children[0].take()?;
        self.num_children = 0;
        Some((self.keys[0], child))
    }

    /// The live key bytes, in ascending order.
    pub fn keys(&self) -> &[u8] {
        &self.keys[..self.num_children as usize]
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, &N)> {
        let n = self.num_children as usize;
        self.keys[..n]
            .iter()
            .zip(self.children[..n].iter())
            .filter_map(|(k, c)| c.as_ref().map(|c| (*k, c)))
    }
}

impl<N, const WIDTH: usize> NodeMapping<N> for SortedKeyedMapping<N, WIDTH> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        let n = self.num_children as usize;
        assert!(n < WIDTH, "add_child: no space left");
        debug_assert!(self.seek_child(key).is_none());
        let idx = u8_keys_find_insert_position_sorted::<WIDTH>(key, &self.keys, n);

        // Shift to make room.
        self.keys.copy_within(idx..n, idx + 1);
        self.children[idx..=n].rotate_right(1);

        self.keys[idx] = key;
        self.children[idx] = Some(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        self.children[idx].as_ref()
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        self.children[idx].as_mut()
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let n = self.num_children as usize;
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, n)?;
        let node = self.children[idx].take();

        // Shift keys and children to the left.
        self.keys.copy_within(idx + 1..n, idx);
        self.children[idx..n].rotate_left(1);
        self.keys[n - 1] = 0;
        self.num_children -= 1;

        node
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline(always)]
    fn width(&self) -> usize {
        WIDTH
    }

    fn first(&self) -> Option<(u8, &N)> {
        self.iter().next()
    }

    fn last(&self) -> Option<(u8, &N)> {
        self.iter().next_back()
    }

    fn move_into<NM: NodeMapping<N>>(&mut self, other: &mut NM) {
        let n = self.num_children as usize;
        for i in 0..n {
            if let Some(child) = self.children[i].take() {
                other.add_child(self.keys[i], child);
            }
        }
        self.num_children = 0;
    }
}
