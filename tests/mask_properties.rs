//! Behavioural tests for the public mask API
//!
//! These cover the algebraic properties callers rely on (double inversion,
//! overlap symmetry), the literal draw/erase interaction, and the shape
//! queries on small hand-built masks.

use bitmask::{Bitmask, MaskError, Point, Rect};

/// Deterministic pseudo-random mask (xorshift), roughly `density`/256 full.
fn noise(width: usize, height: usize, seed: u64, density: u8) -> Bitmask {
    let mut mask = Bitmask::new(width, height);
    let mut state = seed | 1;
    for y in 0..height {
        for x in 0..width {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            if (state & 0xff) < density as u64 {
                mask.set(x as i32, y as i32, true).unwrap();
            }
        }
    }
    mask
}

fn block(width: usize, height: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> Bitmask {
    Bitmask::from_fn(width, height, |x, y| {
        (x0..=x1).contains(&x) && (y0..=y1).contains(&y)
    })
}

#[test]
fn test_double_invert_is_identity() {
    for (w, h, seed) in [(1, 1, 3), (63, 9, 5), (64, 4, 7), (65, 12, 11), (200, 3, 13)] {
        let original = noise(w, h, seed, 100);
        let mut mask = original.clone();
        mask.invert();
        assert_eq!(mask.count(), w * h - original.count());
        mask.invert();
        assert_eq!(mask, original);
    }
}

#[test]
fn test_overlap_area_symmetric_under_negated_offset() {
    let a = noise(150, 40, 21, 90);
    let b = noise(70, 33, 42, 140);
    for offset in [
        Point::new(0, 0),
        Point::new(17, 5),
        Point::new(-30, 12),
        Point::new(64, -8),
        Point::new(127, 39),
        Point::new(-69, -32),
        Point::new(500, 0),
    ] {
        let forward = a.overlap_area(&b, offset);
        assert_eq!(forward, b.overlap_area(&a, -offset));
        assert_eq!(forward, a.overlap_mask(&b, offset).count());
        assert_eq!(forward == 0, a.overlap(&b, offset).is_none());
    }
}

#[test]
fn test_overlap_point_is_a_shared_bit() {
    let a = noise(130, 20, 5, 30);
    let b = noise(90, 25, 6, 30);
    for dx in (-80..120).step_by(13) {
        for dy in (-20..20).step_by(7) {
            if let Some(p) = a.overlap(&b, (dx, dy)) {
                assert!(a.get(p.x, p.y).unwrap());
                assert!(b.get(p.x - dx, p.y - dy).unwrap());
            }
        }
    }
}

#[test]
fn test_draw_then_erase_clears_whole_footprint() {
    let mut mask = Bitmask::new(4, 4);
    mask.set(1, 1, true).unwrap();
    let other = Bitmask::filled(2, 2);

    mask.draw(&other, (0, 0));
    mask.erase(&other, (0, 0));

    assert_eq!(mask, Bitmask::new(4, 4));
}

#[test]
fn test_overlap_scenario_with_partial_block() {
    let a = block(10, 10, 0, 0, 2, 2);
    let b = block(10, 10, 8, 8, 9, 9);

    assert_eq!(a.overlap(&b, (0, 0)), None);

    let hit = a.overlap(&b, (-8, -8)).expect("blocks overlap");
    assert!((0..=1).contains(&hit.x));
    assert!((0..=1).contains(&hit.y));
    assert_eq!(a.overlap_area(&b, (-8, -8)), 4);
}

#[test]
fn test_connected_components_basic_cases() {
    assert!(Bitmask::new(6, 6).connected_components(0).is_empty());

    let comps = Bitmask::filled(3, 3).connected_components(0);
    assert_eq!(comps.len(), 1);
    assert_eq!(comps[0].count(), 9);
}

#[test]
fn test_components_partition_the_mask() {
    let mask = noise(97, 41, 77, 70);
    let comps = mask.connected_components(0);
    let rects = mask.get_bounding_rects();
    assert_eq!(comps.len(), rects.len());

    let mut union = Bitmask::new(97, 41);
    for (comp, rect) in comps.iter().zip(&rects) {
        assert_eq!(comp.overlap_area(&union, (0, 0)), 0);
        union.draw(comp, (0, 0));
        for (x, y) in comp.iter_set() {
            assert!(rect.contains(Point::new(x as i32, y as i32)));
        }
        // Every component is itself a single component.
        assert_eq!(comp.connected_components(0).len(), 1);
    }
    assert_eq!(union, mask);

    let largest = mask.connected_component(None).unwrap();
    let max = comps.iter().map(Bitmask::count).max().unwrap_or(0);
    assert_eq!(largest.count(), max);
}

#[test]
fn test_component_minimum_filters_small_ones() {
    let mask = noise(80, 30, 99, 60);
    let all = mask.connected_components(0);
    let big = mask.connected_components(3);
    assert_eq!(big.len(), all.iter().filter(|c| c.count() >= 3).count());
    assert_eq!(mask.connected_components(1).len(), all.len());
}

#[test]
fn test_connected_component_position_errors() {
    let mask = Bitmask::filled(3, 3);
    assert!(matches!(
        mask.connected_component(Some(Point::new(-1, 0))),
        Err(MaskError::OutOfBounds { .. })
    ));
    assert_eq!(mask.connected_component(Some(Point::new(2, 2))).unwrap().count(), 9);
}

#[test]
fn test_bounding_rects_of_blocks() {
    let mut mask = Bitmask::new(20, 10);
    mask.draw(&Bitmask::filled(3, 2), (1, 1));
    mask.draw(&Bitmask::filled(4, 4), (10, 5));
    assert_eq!(
        mask.get_bounding_rects(),
        vec![Rect::new(1, 1, 3, 2), Rect::new(10, 5, 4, 4)]
    );
}

#[test]
fn test_centroid_cases() {
    assert_eq!(Bitmask::new(5, 5).centroid(), Point::new(0, 0));

    let mut mask = Bitmask::new(5, 5);
    mask.set(2, 3, true).unwrap();
    assert_eq!(mask.centroid(), Point::new(2, 3));

    assert_eq!(block(20, 20, 4, 6, 8, 10).centroid(), Point::new(6, 8));
}

#[test]
fn test_angle_is_bounded() {
    assert_eq!(Bitmask::new(4, 4).angle(), 0.0);
    for seed in 1..6 {
        let angle = noise(30, 30, seed, 50).angle();
        assert!((-90.0..=90.0).contains(&angle));
    }
}

#[test]
fn test_outline_of_solid_square() {
    let outline = Bitmask::filled(3, 3).outline(1).unwrap();
    assert_eq!(outline.len(), 8);
    assert!(!outline.contains(&Point::new(1, 1)));

    // Consecutive points (wrapping) are 8-neighbours.
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        assert!((a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1);
        assert_ne!(a, b);
    }
}

#[test]
fn test_outline_of_larger_rectangle() {
    let mask = block(12, 12, 2, 3, 8, 7);
    let outline = mask.outline(1).unwrap();
    // Perimeter of a 7x5 solid rectangle.
    assert_eq!(outline.len(), 2 * 7 + 2 * 3);
    assert_eq!(outline[0], Point::new(2, 3));
    assert_eq!(mask.outline(2).unwrap().len(), 10);
    assert!(Bitmask::new(3, 3).outline(1).unwrap().is_empty());
}

#[test]
fn test_scale_edge_cases() {
    let mask = noise(10, 10, 3, 128);
    assert_eq!(mask.scale(0, 0).unwrap().size(), (0, 0));
    assert!(matches!(mask.scale(-1, 5), Err(MaskError::InvalidArgument(_))));
    assert_eq!(mask.scale(10, 10).unwrap(), mask);
    assert_eq!(mask.scale(20, 20).unwrap().count(), mask.count() * 4);
}

#[test]
fn test_convolve_detects_any_overlap() {
    let a = noise(40, 20, 8, 20);
    let b = noise(7, 5, 9, 80);
    let conv = a.convolve(&b, None, (0, 0));
    assert_eq!(conv.size(), (46, 24));
    for j in 0..24i32 {
        for i in 0..46i32 {
            let origin = Point::new(i - 6, j - 4);
            assert_eq!(conv.get(i, j).unwrap(), a.overlap(&b, origin).is_some());
        }
    }
}

#[test]
fn test_zero_sized_masks_are_inert() {
    let mut empty = Bitmask::new(0, 7);
    let full = Bitmask::filled(5, 5);
    empty.fill();
    empty.draw(&full, (0, 0));
    assert_eq!(empty.count(), 0);
    assert!(empty.connected_components(0).is_empty());
    assert!(empty.get_bounding_rects().is_empty());
    assert!(empty.outline(1).unwrap().is_empty());
    assert_eq!(empty.centroid(), Point::new(0, 0));
    assert_eq!(full.overlap(&empty, (0, 0)), None);
}
