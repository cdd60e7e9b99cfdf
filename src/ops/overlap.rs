//! Offset-aware mask-to-mask operators.
//!
//! Every operator places `other` with its origin at `offset` in `self`'s
//! coordinate space and only touches the rows and word columns the two masks
//! share. Offsets may be negative or entirely out of range.

use std::ops::Range;

use crate::models::bitmask::{WORD_BITS, Word};
use crate::models::{Bitmask, Point};

/// Rows and word columns of the base mask covered by the placed mask.
struct Overlap {
    rows: Range<usize>,
    blocks: Range<usize>,
    dx: isize,
    dy: isize,
}

impl Overlap {
    fn between(base: &Bitmask, other: &Bitmask, (dx, dy): (isize, isize)) -> Option<Self> {
        let x0 = dx.max(0);
        let x1 = (dx + other.width() as isize).min(base.width() as isize);
        let y0 = dy.max(0);
        let y1 = (dy + other.height() as isize).min(base.height() as isize);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self {
            rows: y0 as usize..y1 as usize,
            blocks: x0 as usize / WORD_BITS..(x1 as usize - 1) / WORD_BITS + 1,
            dx,
            dy,
        })
    }

    /// Bits of `other` lining up with word `block` of base row `y`.
    #[inline]
    fn other_word(&self, other: &Bitmask, y: usize, block: usize) -> Word {
        let oy = (y as isize - self.dy) as usize;
        other.window(oy, (block * WORD_BITS) as isize - self.dx)
    }
}

/// Widen an offset so origin arithmetic cannot overflow.
fn origin(offset: Point) -> (isize, isize) {
    (offset.x as isize, offset.y as isize)
}

impl Bitmask {
    /// OR `other` into this mask at `offset`.
    ///
    /// Bits of `other` falling outside this mask are dropped.
    pub fn draw(&mut self, other: &Bitmask, offset: impl Into<Point>) {
        self.draw_at(other, origin(offset.into()));
    }

    /// [`Bitmask::draw`] with an already widened origin.
    pub(crate) fn draw_at(&mut self, other: &Bitmask, at: (isize, isize)) {
        let Some(region) = Overlap::between(self, other, at) else {
            return;
        };
        let last = self.words_per_row() - 1;
        let tail = self.tail_mask();
        for y in region.rows.clone() {
            for block in region.blocks.clone() {
                let bits = region.other_word(other, y, block);
                self.row_mut(y)[block] |= bits;
            }
            if region.blocks.end == last + 1 {
                self.row_mut(y)[last] &= tail;
            }
        }
    }

    /// Clear every bit of this mask that is set in `other` placed at `offset`.
    pub fn erase(&mut self, other: &Bitmask, offset: impl Into<Point>) {
        let Some(region) = Overlap::between(self, other, origin(offset.into())) else {
            return;
        };
        for y in region.rows.clone() {
            for block in region.blocks.clone() {
                let bits = region.other_word(other, y, block);
                self.row_mut(y)[block] &= !bits;
            }
        }
    }

    /// First position where both masks have a set bit, in this mask's coordinates.
    ///
    /// The scan walks 64-column word blocks left to right and, inside a block,
    /// rows top to bottom; the leftmost coincident bit of the first hit word
    /// wins. This is not raster order.
    pub fn overlap(&self, other: &Bitmask, offset: impl Into<Point>) -> Option<Point> {
        let region = Overlap::between(self, other, origin(offset.into()))?;
        for block in region.blocks.clone() {
            for y in region.rows.clone() {
                let hit = self.row(y)[block] & region.other_word(other, y, block);
                if hit != 0 {
                    let x = block * WORD_BITS + hit.trailing_zeros() as usize;
                    return Some(Point::new(x as i32, y as i32));
                }
            }
        }
        None
    }

    /// Number of positions where both masks have a set bit.
    pub fn overlap_area(&self, other: &Bitmask, offset: impl Into<Point>) -> usize {
        let Some(region) = Overlap::between(self, other, origin(offset.into())) else {
            return 0;
        };
        let mut area = 0usize;
        for y in region.rows.clone() {
            let row = self.row(y);
            for block in region.blocks.clone() {
                area += (row[block] & region.other_word(other, y, block)).count_ones() as usize;
            }
        }
        area
    }

    /// A mask the size of this one holding exactly the coincident set bits.
    pub fn overlap_mask(&self, other: &Bitmask, offset: impl Into<Point>) -> Bitmask {
        let mut out = Bitmask::new(self.width(), self.height());
        let Some(region) = Overlap::between(self, other, origin(offset.into())) else {
            return out;
        };
        for y in region.rows.clone() {
            for block in region.blocks.clone() {
                let bits = self.row(y)[block] & region.other_word(other, y, block);
                out.row_mut(y)[block] = bits;
            }
        }
        out
    }
}
