use crate::models::{Bitmask, Point};

impl Bitmask {
    /// Convolve this mask with `other`.
    ///
    /// Bit `(i - offset.x, j - offset.y)` of the result is set when `other`,
    /// moved so its bottom-right pixel sits at `(i, j)`, overlaps this mask.
    /// Without `output` the result is a fresh mask of size
    /// `(w1 + w2 - 1, h1 + h2 - 1)`; a supplied `output` is OR-ed into and
    /// returned, so several convolutions can accumulate into one buffer.
    #[tracing::instrument(level = "debug", skip_all, fields(
        size = ?self.size(),
        other = ?other.size(),
        accumulate = output.is_some(),
    ))]
    pub fn convolve(
        &self,
        other: &Bitmask,
        output: Option<Bitmask>,
        offset: impl Into<Point>,
    ) -> Bitmask {
        let offset: Point = offset.into();
        let mut output = output.unwrap_or_else(|| {
            Bitmask::new(
                (self.width() + other.width()).saturating_sub(1),
                (self.height() + other.height()).saturating_sub(1),
            )
        });

        // Widened so extreme offsets clip instead of overflowing.
        let corner_x = other.width() as isize - 1 - offset.x as isize;
        let corner_y = other.height() as isize - 1 - offset.y as isize;
        for (x, y) in other.iter_set() {
            output.draw_at(self, (corner_x - x as isize, corner_y - y as isize));
        }
        output
    }
}
