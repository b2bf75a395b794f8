use num_traits::PrimInt;

/// Fixed-width occupancy bitset over `WORDS` words of `W`.
///
/// The Node48 mapping uses one to find a free pool slot, the Node256 mapping to find its lowest
/// and highest child and to walk the children in key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitset<W: PrimInt, const WORDS: usize> {
    words: [W; WORDS],
}

pub type Bitset64<const WORDS: usize> = Bitset<u64, WORDS>;

impl<W: PrimInt, const WORDS: usize> Default for Bitset<W, WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: PrimInt, const WORDS: usize> Bitset<W, WORDS> {
    const BITS: usize = std::mem::size_of::<W>() * 8;

    pub fn new() -> Self {
        Self {
            words: [W::zero(); WORDS],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        WORDS * Self::BITS
    }

    /// Word index and single-bit mask for `pos`.
    #[inline]
    fn locate(&self, pos: usize) -> (usize, W) {
        assert!(pos < self.capacity(), "bit {pos} out of range");
        (pos / Self::BITS, W::one() << (pos % Self::BITS))
    }

    #[inline]
    pub fn set(&mut self, pos: usize) {
        let (word, mask) = self.locate(pos);
        self.words[word] = self.words[word] | mask;
    }

    #[inline]
    pub fn unset(&mut self, pos: usize) {
        let (word, mask) = self.locate(pos);
        self.words[word] = self.words[word] & !mask;
    }

    #[inline]
    pub fn is_set(&self, pos: usize) -> bool {
        let (word, mask) = self.locate(pos);
        !(self.words[word] & mask).is_zero()
    }

    /// Lowest clear bit.
    pub fn first_empty(&self) -> Option<usize> {
        self.words
            .iter()
            .position(|w| *w != W::max_value())
            .map(|i| i * Self::BITS + self.words[i].trailing_ones() as usize)
    }

    /// Lowest set bit.
    pub fn first_set(&self) -> Option<usize> {
        self.words
            .iter()
            .position(|w| !w.is_zero())
            .map(|i| i * Self::BITS + self.words[i].trailing_zeros() as usize)
    }

    /// Highest set bit.
    pub fn last_set(&self) -> Option<usize> {
        self.words
            .iter()
            .rposition(|w| !w.is_zero())
            .map(|i| (i + 1) * Self::BITS - 1 - self.words[i].leading_zeros() as usize)
    }

    /// Set bits in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..self.capacity()).filter(move |&pos| self.is_set(pos))
    }
}
