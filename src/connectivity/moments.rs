use crate::models::{Bitmask, Point};

/// Raw image moments of the set bits, up to second order.
#[derive(Debug, Default)]
struct Moments {
    m00: u128,
    m10: u128,
    m01: u128,
    m11: u128,
    m20: u128,
    m02: u128,
}

impl Moments {
    fn of(mask: &Bitmask) -> Self {
        let mut m = Self::default();
        for (x, y) in mask.iter_set() {
            let (x, y) = (x as u128, y as u128);
            m.m00 += 1;
            m.m10 += x;
            m.m01 += y;
            m.m11 += x * y;
            m.m20 += x * x;
            m.m02 += y * y;
        }
        m
    }
}

/// `num / den` rounded half up, for non-negative integers.
fn round_div(num: u128, den: u128) -> i32 {
    ((2 * num + den) / (2 * den)) as i32
}

impl Bitmask {
    /// Mean position of the set bits, rounded to the nearest pixel.
    ///
    /// Returns `(0, 0)` for a mask with no bits set.
    pub fn centroid(&self) -> Point {
        let m = Moments::of(self);
        if m.m00 == 0 {
            return Point::new(0, 0);
        }
        Point::new(round_div(m.m10, m.m00), round_div(m.m01, m.m00))
    }

    /// Orientation of the set bits' principal axis in degrees, in `[-90, 90]`.
    ///
    /// Positive angles turn counter-clockwise on screen (y grows downward).
    /// Only meaningful for a single blob; `0.0` for an empty mask.
    pub fn angle(&self) -> f64 {
        let m = Moments::of(self);
        if m.m00 == 0 {
            return 0.0;
        }
        let n = m.m00 as f64;
        let xc = m.m10 as f64 / n;
        let yc = m.m01 as f64 / n;
        let mu11 = m.m11 as f64 / n - xc * yc;
        let mu20 = m.m20 as f64 / n - xc * xc;
        let mu02 = m.m02 as f64 / n - yc * yc;
        -90.0 * (2.0 * mu11).atan2(mu20 - mu02) / std::f64::consts::PI
    }
}
