use crate::error::{MaskError, MaskResult};
use crate::models::Bitmask;

impl Bitmask {
    /// Nearest-neighbour resample into a new `width` x `height` mask.
    ///
    /// Target pixel `(x, y)` takes the source bit at
    /// `(x * src_w / width, y * src_h / height)`. Zero dimensions give an
    /// empty mask; negative ones are rejected.
    pub fn scale(&self, width: i32, height: i32) -> MaskResult<Bitmask> {
        if width < 0 || height < 0 {
            return Err(MaskError::invalid_argument(format!(
                "cannot scale to negative size {width}x{height}"
            )));
        }
        let (width, height) = (width as usize, height as usize);
        let (src_w, src_h) = self.size();
        if src_w == 0 || src_h == 0 {
            return Ok(Bitmask::new(width, height));
        }
        Ok(Bitmask::from_fn(width, height, |x, y| {
            self.get_bit(x * src_w / width, y * src_h / height)
        }))
    }
}
