use crate::mapping::NodeMapping;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::utils::bitset::Bitset64;

/// A mapping from keys to separate child slots.
///
/// `child_ptr_indexes[key]` is 0 when the key is absent, otherwise `n` where the child lives
/// in pool slot `n - 1`. The pool is unordered; `occupied` tracks which slots are in use so a
/// free one is found without scanning the children.
pub struct IndexedMapping<N, const WIDTH: usize> {
    pub(crate) child_ptr_indexes: [u8; 256],
    pub(crate) children: [Option<N>; WIDTH],
    pub(crate) occupied: Bitset64<1>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> Default for IndexedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> IndexedMapping<N, WIDTH> {
    pub fn new() -> Self {
        assert!(WIDTH <= 64, "IndexedMapping pool is limited to 64 slots");
        Self {
            child_ptr_indexes: [0; 256],
            children: [const { None }; WIDTH],
            occupied: Bitset64::new(),
            num_children: 0,
        }
    }

    pub fn from_sorted_keyed<const KM_WIDTH: usize>(
        km: &mut SortedKeyedMapping<N, KM_WIDTH>,
    ) -> Self {
        let mut im = IndexedMapping::new();
        km.move_into(&mut im);
        im
    }

    pub fn from_direct(dm: &mut DirectMapping<N>) -> Self {
        debug_assert!(dm.num_children() <= WIDTH);
        let mut im = IndexedMapping::new();
        dm.move_into(&mut im);
        im
    }

    /// Pool slot holding the child for `key`, if any.
    #[inline]
    pub fn slot_for(&self, key: u8) -> Option<usize> {
        match self.child_ptr_indexes[key as usize] {
            0 => None,
            n => Some(n as usize - 1),
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, &N)> {
        (0..=u8::MAX).filter_map(move |key| {
            let slot = self.slot_for(key)?;
            self.children[slot].as_ref().map(|c| (key, c))
        })
    }
}

impl<N, const WIDTH: usize> NodeMapping<N> for IndexedMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!(self.slot_for(key).is_none());
        let pos = match self.occupied.first_empty() {
            Some(pos) if pos < WIDTH => pos,
            _ => unreachable!("add_child on a full Node48"),
        };
        self.children[pos] = Some(node);
        self.child_ptr_indexes[key as usize] = (pos + 1) as u8;
        self.occupied.set(pos);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let slot = self.slot_for(key)?;
        self.children[slot].as_ref()
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let slot = self.slot_for(key)?;
        self.children[slot].as_mut()
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let slot = self.slot_for(key)?;
        self.child_ptr_indexes[key as usize] = 0;
        self.occupied.unset(slot);
        self.num_children -= 1;
        self.children[slot].take()
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline]
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
        for key in 0..=u8::MAX {
            if let Some(child) = self.delete_child(key) {
                other.add_child(key, child);
            }
        }
    }
}
