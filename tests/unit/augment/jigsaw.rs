use super::*;

use image::Rgba;

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, (x ^ y) as u8, 255]))
}

fn grid(rows: u32, cols: u32) -> Grid {
    Grid::new(rows, cols).unwrap()
}

fn is_permutation(dest: &[usize]) -> bool {
    let mut sorted = dest.to_vec();
    sorted.sort_unstable();
    sorted.iter().copied().eq(0..dest.len())
}

#[test]
fn destinations_form_a_permutation() {
    for seed in 0..20 {
        let mut rng = AugmentRng::seeded(seed);
        let dest = destinations(grid(7, 7), 3, &mut rng);
        assert_eq!(dest.len(), 49);
        assert!(is_permutation(&dest));
    }
}

#[test]
fn zero_steps_is_identity() {
    let mut rng = AugmentRng::seeded(9);
    let dest = destinations(grid(4, 5), 0, &mut rng);
    assert!(dest.iter().enumerate().all(|(i, &d)| i == d));
}

#[test]
fn single_step_moves_at_most_one_neighbour() {
    let g = grid(7, 7);
    for seed in 0..20 {
        let mut rng = AugmentRng::seeded(seed);
        for (i, &d) in destinations(g, 1, &mut rng).iter().enumerate() {
            let (iy, ix) = ((i / 7) as i64, (i % 7) as i64);
            let (dy, dx) = ((d / 7) as i64, (d % 7) as i64);
            assert!((iy - dy).abs() + (ix - dx).abs() <= 1);
        }
    }
}

#[test]
fn same_seed_same_output() {
    let jig = Jigsaw::new(grid(7, 7), 1);
    let mut a = gradient(100, 100);
    let mut b = a.clone();
    jig.augment(&mut a, &mut AugmentRng::seeded(5)).unwrap();
    jig.augment(&mut b, &mut AugmentRng::seeded(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn dimensions_are_preserved_for_uneven_grids() {
    let jig = Jigsaw::new(grid(7, 7), 2);
    for (w, h) in [(100, 100), (101, 37), (5, 3), (1, 1)] {
        let mut img = gradient(w, h);
        jig.augment(&mut img, &mut AugmentRng::seeded(11)).unwrap();
        assert_eq!(img.dimensions(), (w, h));
    }
}

#[test]
fn evenly_divisible_images_keep_their_pixels() {
    let src = gradient(70, 35);
    let mut changed = false;
    for seed in 0..10 {
        let mut img = src.clone();
        Jigsaw::new(grid(7, 7), 1)
            .augment(&mut img, &mut AugmentRng::seeded(seed))
            .unwrap();

        let mut before: Vec<[u8; 4]> = src.pixels().map(|p| p.0).collect();
        let mut after: Vec<[u8; 4]> = img.pixels().map(|p| p.0).collect();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
        changed |= img != src;
    }
    assert!(changed);
}

#[test]
fn swapping_two_cells_moves_whole_blocks() {
    let src = gradient(4, 2);
    // 1x2 grid: left half <-> right half.
    let out = apply_destinations(&src, grid(1, 2), &[1, 0]);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(out.get_pixel(x + 2, y), src.get_pixel(x, y));
            assert_eq!(out.get_pixel(x, y), src.get_pixel(x + 2, y));
        }
    }
}

#[test]
fn padding_is_split_across_both_sides() {
    // Width 4 on a 1x3 grid: cells of 2px on a 6px canvas, one padding column per side.
    let src = RgbaImage::from_fn(4, 1, |x, _| Rgba([10 * (x as u8 + 1), 0, 0, 255]));
    let out = apply_destinations(&src, grid(1, 3), &[1, 0, 2]);

    assert_eq!(out.get_pixel(0, 0), src.get_pixel(2, 0));
    assert_eq!(out.get_pixel(1, 0), &Rgba([0, 0, 0, 0]));
    assert_eq!(out.get_pixel(2, 0), src.get_pixel(0, 0));
    assert_eq!(out.get_pixel(3, 0), src.get_pixel(3, 0));
}

#[test]
fn identity_destinations_reproduce_padded_input() {
    let src = gradient(101, 37);
    let ids: Vec<usize> = (0..49).collect();
    assert_eq!(apply_destinations(&src, grid(7, 7), &ids), src);
}
