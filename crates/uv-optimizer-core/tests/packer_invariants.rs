use uv_optimizer_core::model::Rect;
use uv_optimizer_core::packer::GuillotinePacker;

fn disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].overlaps(&rects[j]) {
                return false;
            }
        }
    }
    true
}

fn within(rects: &[Rect], w: u32, h: u32) -> bool {
    rects.iter().all(|r| r.x + r.w <= w && r.y + r.h <= h)
}

/// Every pixel of the surface must be covered by a placed slot or a free
/// region, and free regions must never overlap placed slots.
fn check_tiling(p: &GuillotinePacker, w: u32, h: u32) {
    for free in p.free_regions() {
        for placed in p.placed() {
            assert!(
                !free.overlaps(placed),
                "free region {:?} overlaps placed {:?}",
                free,
                placed
            );
        }
    }
    for y in 0..h {
        for x in 0..w {
            let probe = Rect::new(x, y, 1, 1);
            let covered = p.placed().iter().any(|r| r.overlaps(&probe))
                || p.free_regions().iter().any(|r| r.overlaps(&probe));
            assert!(covered, "pixel ({}, {}) is neither placed nor free", x, y);
        }
    }
}

#[test]
fn bottom_left_prefers_lowest_y_then_x() {
    let mut p = GuillotinePacker::new(16, 16);
    let a = p.insert(4, 4).expect("first");
    let b = p.insert(4, 4).expect("second");
    assert_eq!((a.x, a.y), (0, 0));
    assert_eq!((b.x, b.y), (4, 0));
}

#[test]
fn fills_row_before_moving_down() {
    let mut p = GuillotinePacker::new(16, 16);
    let mut slots = Vec::new();
    for _ in 0..8 {
        slots.push(p.insert(4, 4).expect("fits"));
    }
    assert!(disjoint(&slots));
    assert!(within(&slots, 16, 16));
    // first row fills left to right, then the next row starts
    assert!(slots[..4].iter().all(|s| s.y == 0));
    assert!(slots[4..].iter().all(|s| s.y == 4));
}

#[test]
fn rejects_oversized_and_keeps_state() {
    let mut p = GuillotinePacker::new(16, 16);
    assert!(p.insert(17, 4).is_none());
    assert!(p.insert(4, 17).is_none());
    assert!(p.insert(16, 16).is_some());
    assert!(p.insert(1, 1).is_none());
}

#[test]
fn free_regions_never_overlap_placed() {
    let mut p = GuillotinePacker::new(64, 64);
    for (w, h) in [(32, 20), (20, 32), (10, 10), (30, 8), (8, 30), (16, 16)] {
        p.insert(w, h).expect("fits");
        check_tiling(&p, 64, 64);
    }
    assert!(!p.has_overlapping_placements());
}

#[test]
fn zero_size_insert_consumes_no_space() {
    let mut p = GuillotinePacker::new(16, 16);
    let z = p.insert(0, 0).expect("zero-size placement");
    assert_eq!((z.w, z.h), (0, 0));
    // the whole surface is still usable
    assert!(p.insert(16, 16).is_some());
}

#[test]
fn occupancy_tracks_placed_area() {
    let mut p = GuillotinePacker::new(32, 32);
    p.insert(16, 16).expect("fits");
    p.insert(16, 16).expect("fits");
    let occ = p.occupancy();
    assert!((occ - 0.5).abs() < 1e-9, "occupancy {}", occ);
}

#[test]
fn random_inserts_stay_disjoint_and_in_bounds() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(2025);
    let mut p = GuillotinePacker::new(128, 128);
    let mut slots: Vec<Rect> = Vec::new();
    for _ in 0..60 {
        let w = rng.gen_range(1..=24);
        let h = rng.gen_range(1..=24);
        if let Some(s) = p.insert(w, h) {
            slots.push(s);
        }
        for free in p.free_regions() {
            for placed in p.placed() {
                assert!(!free.overlaps(placed));
            }
        }
    }
    assert!(!slots.is_empty());
    assert!(disjoint(&slots));
    assert!(within(&slots, 128, 128));
    assert!(!p.has_overlapping_placements());
}
