//! 8-connected component labeling.
//!
//! One raster pass assigns provisional labels using the SAUF decision tree
//! (look at the pixel above first, then upper-right, upper-left and left) and
//! records equivalences in a union-find. A second pass rewrites every pixel
//! with its canonical label. Canonical labels count up from 1 in discovery
//! order, i.e. by the raster position of each component's first pixel.

use tracing::debug;

use super::union_find::UnionFind;
use crate::error::{MaskError, MaskResult};
use crate::models::{Bitmask, Point, Rect};

/// Per-pixel component labels for one mask.
pub(crate) struct Labeling {
    width: usize,
    height: usize,
    /// 0 for unset pixels, otherwise the canonical label.
    labels: Vec<u32>,
    /// Pixel count per canonical label; index 0 is unused.
    sizes: Vec<usize>,
}

impl Labeling {
    #[tracing::instrument(level = "debug", skip_all, fields(size = ?mask.size()))]
    pub(crate) fn of(mask: &Bitmask) -> Self {
        let (width, height) = mask.size();
        let mut labels = vec![0u32; width * height];
        let mut uf = UnionFind::new();

        // First pass: provisional labels. Unset pixels stay 0, so the label
        // buffer doubles as the neighbourhood lookup.
        for (x, y) in mask.iter_set() {
            let idx = y * width + x;
            let above = |dx: isize| -> u32 {
                let nx = x as isize + dx;
                if y == 0 || nx < 0 || nx as usize >= width {
                    0
                } else {
                    labels[idx - width - x + nx as usize]
                }
            };

            let b = above(0);
            let label = if b != 0 {
                b
            } else {
                let c = above(1);
                let a = above(-1);
                let d = if x > 0 { labels[idx - 1] } else { 0 };
                if c != 0 {
                    if a != 0 {
                        uf.union(c, a);
                    } else if d != 0 {
                        uf.union(c, d);
                    }
                    c
                } else if a != 0 {
                    a
                } else if d != 0 {
                    d
                } else {
                    uf.make_set()
                }
            };
            labels[idx] = label;
        }

        // Resolve equivalences. Walking provisional labels in increasing
        // order meets each set at its smallest label first.
        let mut canonical = vec![0u32; uf.len()];
        let mut next = 0u32;
        for provisional in 1..uf.len() as u32 {
            let root = uf.find(provisional) as usize;
            if canonical[root] == 0 {
                next += 1;
                canonical[root] = next;
            }
            canonical[provisional as usize] = canonical[root];
        }

        // Second pass: canonical labels and sizes.
        let mut sizes = vec![0usize; next as usize + 1];
        for label in labels.iter_mut().filter(|l| **l != 0) {
            *label = canonical[*label as usize];
            sizes[*label as usize] += 1;
        }

        debug!(components = next, "labeled mask");
        Self {
            width,
            height,
            labels,
            sizes,
        }
    }

    /// Number of components.
    pub(crate) fn count(&self) -> usize {
        self.sizes.len() - 1
    }

    pub(crate) fn label_at(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.width + x]
    }

    pub(crate) fn size_of(&self, label: u32) -> usize {
        self.sizes[label as usize]
    }

    /// Largest component; the earliest discovered wins ties.
    pub(crate) fn largest(&self) -> Option<u32> {
        let mut best: Option<u32> = None;
        for label in 1..self.sizes.len() as u32 {
            if best.is_none_or(|b| self.size_of(label) > self.size_of(b)) {
                best = Some(label);
            }
        }
        best
    }

    /// A mask holding only the pixels of `label`.
    pub(crate) fn component_mask(&self, label: u32) -> Bitmask {
        let mut mask = Bitmask::new(self.width, self.height);
        for (idx, _) in self.labels.iter().enumerate().filter(|(_, l)| **l == label) {
            mask.set_bit(idx % self.width, idx / self.width);
        }
        mask
    }

    /// One mask per component of at least `minimum` pixels, in label order.
    pub(crate) fn component_masks(&self, minimum: usize) -> Vec<Bitmask> {
        let mut slot = vec![usize::MAX; self.sizes.len()];
        let mut masks = Vec::new();
        for label in 1..self.sizes.len() {
            if self.sizes[label] >= minimum {
                slot[label] = masks.len();
                masks.push(Bitmask::new(self.width, self.height));
            }
        }

        for (idx, &label) in self.labels.iter().enumerate() {
            let target = slot[label as usize];
            if label != 0 && target != usize::MAX {
                masks[target].set_bit(idx % self.width, idx / self.width);
            }
        }
        masks
    }

    /// Tight bounding rectangle of each component, in label order.
    pub(crate) fn bounding_rects(&self) -> Vec<Rect> {
        // (min_x, min_y, max_x, max_y)
        let mut bounds = vec![(usize::MAX, usize::MAX, 0usize, 0usize); self.sizes.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let label = self.label_at(x, y);
                if label == 0 {
                    continue;
                }
                let entry = &mut bounds[label as usize];
                entry.0 = entry.0.min(x);
                entry.1 = entry.1.min(y);
                entry.2 = entry.2.max(x);
                entry.3 = entry.3.max(y);
            }
        }

        bounds
            .into_iter()
            .skip(1)
            .map(|(min_x, min_y, max_x, max_y)| {
                Rect::new(
                    min_x as i32,
                    min_y as i32,
                    (max_x - min_x + 1) as i32,
                    (max_y - min_y + 1) as i32,
                )
            })
            .collect()
    }
}

impl Bitmask {
    /// A connected component (8-connectivity) of this mask.
    ///
    /// With `pos`, the component containing that pixel, or an empty mask when
    /// the pixel is unset. Without it, the largest component; among equally
    /// large ones the first found in raster order.
    pub fn connected_component(&self, pos: Option<Point>) -> MaskResult<Bitmask> {
        if let Some(p) = pos {
            if !self.contains(p.x, p.y) {
                return Err(MaskError::out_of_bounds(p.x, p.y, self.width(), self.height()));
            }
            if !self.get_bit(p.x as usize, p.y as usize) {
                return Ok(Bitmask::new(self.width(), self.height()));
            }
        }

        let labeling = Labeling::of(self);
        let label = match pos {
            Some(p) => Some(labeling.label_at(p.x as usize, p.y as usize)),
            None => labeling.largest(),
        };
        Ok(match label {
            Some(label) => labeling.component_mask(label),
            None => Bitmask::new(self.width(), self.height()),
        })
    }

    /// Every connected component with at least `max(minimum, 1)` pixels.
    ///
    /// Components come out in raster order of their top-left-most pixel.
    pub fn connected_components(&self, minimum: usize) -> Vec<Bitmask> {
        Labeling::of(self).component_masks(minimum.max(1))
    }

    /// Bounding rectangle of every connected component, in the same order as
    /// [`Bitmask::connected_components`].
    pub fn get_bounding_rects(&self) -> Vec<Rect> {
        Labeling::of(self).bounding_rects()
    }
}
