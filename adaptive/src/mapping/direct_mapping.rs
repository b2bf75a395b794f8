use crate::mapping::NodeMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::utils::bitset::Bitset64;

/// One slot per possible key byte.
pub struct DirectMapping<N> {
    pub(crate) children: [Option<N>; 256],
    occupied: Bitset64<4>,
    num_children: usize,
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: [const { None }; 256],
            occupied: Bitset64::new(),
            num_children: 0,
        }
    }

    pub fn from_indexed<const WIDTH: usize>(im: &mut IndexedMapping<N, WIDTH>) -> Self {
        let mut new_mapping = DirectMapping::<N>::new();
        im.move_into(&mut new_mapping);
        new_mapping
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, &N)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(key, c)| c.as_ref().map(|c| (key as u8, c)))
    }
}

impl<N> NodeMapping<N> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!(self.children[key as usize].is_none());
        self.children[key as usize] = Some(node);
        self.occupied.set(key as usize);
        self.num_children += 1;
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children[key as usize].as_ref()
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children[key as usize].as_mut()
    }

    #[inline]
    fn delete_child(&mut self, key: u8) -> Option<N> {
        let n = self.children[key as usize].take();
        if n.is_some() {
            self.occupied.unset(key as usize);
            self.num_children -= 1;
        }
        n
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children
    }

    #[inline]
    fn width(&self) -> usize {
        256
    }

    fn first(&self) -> Option<(u8, &N)> {
        let key = self.occupied.first_set()?;
        self.children[key].as_ref().map(|c| (key as u8, c))
    }

    fn last(&self) -> Option<(u8, &N)> {
        let key = self.occupied.last_set()?;
        self.children[key].as_ref().map(|c| (key as u8, c))
    }

    fn move_into<NM: NodeMapping<N>>(&mut self, other: &mut NM) {
        let keys: Vec<usize> = self.occupied.iter().collect();
        for key in keys {
            if let Some(child) = self.delete_child(key as u8) {
                other.add_child(key as u8, child);
            }
        }
    }
}
