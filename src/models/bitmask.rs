use rayon::prelude::*;

use crate::error::{MaskError, MaskResult};

/// Storage word. Every row starts on a fresh word.
pub(crate) type Word = u64;

/// Bits per storage word.
pub(crate) const WORD_BITS: usize = Word::BITS as usize;

/// Compact 2D bit mask.
///
/// Bits are packed into 64-bit words, one padded run of words per row. Bit
/// `x % 64` of word `x / 64` holds column `x`. Bits past `width` in the last
/// word of a row are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmask {
    width: usize,
    height: usize,
    words_per_row: usize,
    data: Vec<Word>,
}

impl Bitmask {
    /// Create an empty mask with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS);
        Self {
            width,
            height,
            words_per_row,
            data: vec![0; words_per_row * height],
        }
    }

    /// Create a mask with every bit set
    pub fn filled(width: usize, height: usize) -> Self {
        let mut mask = Self::new(width, height);
        mask.fill();
        mask
    }

    /// Create a mask whose bit `(x, y)` is `f(x, y)`
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool + Sync) -> Self {
        Self::build_rows(width, height, false, f)
    }

    /// Fill a new mask row by row, optionally spreading rows over the rayon pool.
    pub(crate) fn build_rows<F>(width: usize, height: usize, parallel: bool, f: F) -> Self
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        let mut mask = Self::new(width, height);
        if mask.data.is_empty() {
            return mask;
        }

        let words_per_row = mask.words_per_row;
        let fill_row = |y: usize, row: &mut [Word]| {
            for x in 0..width {
                if f(x, y) {
                    row[x / WORD_BITS] |= 1 << (x % WORD_BITS);
                }
            }
        };

        if parallel {
            mask.data
                .par_chunks_mut(words_per_row)
                .enumerate()
                .for_each(|(y, row)| fill_row(y, row));
        } else {
            mask.data
                .chunks_mut(words_per_row)
                .enumerate()
                .for_each(|(y, row)| fill_row(y, row));
        }
        mask
    }

    /// Get mask width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get mask height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: i32, y: i32) -> MaskResult<bool> {
        if !self.contains(x, y) {
            return Err(MaskError::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.get_bit(x as usize, y as usize))
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: i32, y: i32, value: bool) -> MaskResult<()> {
        if !self.contains(x, y) {
            return Err(MaskError::out_of_bounds(x, y, self.width, self.height));
        }
        let (x, y) = (x as usize, y as usize);
        if value {
            self.set_bit(x, y);
        } else {
            self.clear_bit(x, y);
        }
        Ok(())
    }

    /// Number of set bits
    pub fn count(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True when no bit is set (always the case for a zero-sized mask)
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&w| w == 0)
    }

    /// Set every bit to 1
    pub fn fill(&mut self) {
        self.data.fill(Word::MAX);
        self.mask_padding();
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Complement every bit in place
    pub fn invert(&mut self) {
        for word in &mut self.data {
            *word = !*word;
        }
        self.mask_padding();
    }

    /// Iterate the coordinates of set bits in raster order
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let words_per_row = self.words_per_row;
        self.data.iter().enumerate().flat_map(move |(i, &word)| {
            let y = i / words_per_row;
            let base = (i % words_per_row) * WORD_BITS;
            Ones(word).map(move |bit| (base + bit, y))
        })
    }

    pub(crate) fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Bit at (x, y); callers guarantee the position is in range.
    #[inline]
    pub(crate) fn get_bit(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width && y < self.height);
        (self.data[y * self.words_per_row + x / WORD_BITS] >> (x % WORD_BITS)) & 1 == 1
    }

    /// Bit at (x, y), treating everything outside the mask as unset.
    #[inline]
    pub(crate) fn get_or_unset(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && (x as u64) < self.width as u64
            && (y as u64) < self.height as u64
            && self.get_bit(x as usize, y as usize)
    }

    #[inline]
    pub(crate) fn set_bit(&mut self, x: usize, y: usize) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.words_per_row + x / WORD_BITS] |= 1 << (x % WORD_BITS);
    }

    #[inline]
    pub(crate) fn clear_bit(&mut self, x: usize, y: usize) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.words_per_row + x / WORD_BITS] &= !(1 << (x % WORD_BITS));
    }

    pub(crate) fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    pub(crate) fn row(&self, y: usize) -> &[Word] {
        let start = y * self.words_per_row;
        &self.data[start..start + self.words_per_row]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Word] {
        let start = y * self.words_per_row;
        &mut self.data[start..start + self.words_per_row]
    }

    /// Valid-bit mask for the last word of each row.
    pub(crate) fn tail_mask(&self) -> Word {
        match self.width % WORD_BITS {
            0 => Word::MAX,
            used => (1 << used) - 1,
        }
    }

    /// Zero the bits past `width` in every row.
    pub(crate) fn mask_padding(&mut self) {
        if self.words_per_row == 0 {
            return;
        }
        let tail = self.tail_mask();
        if tail == Word::MAX {
            return;
        }
        let last = self.words_per_row - 1;
        for row in self.data.chunks_mut(self.words_per_row) {
            row[last] &= tail;
        }
    }

    /// The 64 bits of row `y` starting at column `x0`.
    ///
    /// `x0` may be negative or past the right edge; columns outside the mask
    /// read as zero. Bit `i` of the result is column `x0 + i`.
    pub(crate) fn window(&self, y: usize, x0: isize) -> Word {
        let width = self.width as isize;
        if x0 >= width || x0 + WORD_BITS as isize <= 0 {
            return 0;
        }
        let row = self.row(y);
        if x0 < 0 {
            return row[0] << (-x0) as u32;
        }
        let block = x0 as usize / WORD_BITS;
        let shift = x0 as usize % WORD_BITS;
        let lo = row[block] >> shift;
        if shift == 0 || block + 1 >= row.len() {
            lo
        } else {
            lo | (row[block + 1] << (WORD_BITS - shift))
        }
    }
}

/// Iterator over the positions of set bits in a word, lowest first.
struct Ones(Word);

impl Iterator for Ones {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}
