use super::*;

use image::Rgba;

fn noisy(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 37 % 256) as u8, (y * 53 % 256) as u8, ((x + y) * 11 % 256) as u8, 255])
    })
}

#[test]
fn point_counts_are_at_least_one() {
    assert_eq!(points_along(0.0, 100), 1);
    assert_eq!(points_along(0.1, 100), 10);
    assert_eq!(points_along(1.0, 7), 7);
}

#[test]
fn nearest_point_is_monotonic_and_covers_all_cells() {
    let n = 4;
    let idx: Vec<usize> = (0..40).map(|i| nearest_point(i, 40, n)).collect();
    assert!(idx.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(idx[0], 0);
    assert_eq!(idx[39], n - 1);
    for k in 0..n {
        assert!(idx.contains(&k));
    }
}

#[test]
fn full_replacement_flattens_each_cell() {
    let mut img = noisy(40, 30);
    let vor = Voronoi {
        rows_frac: UniformRange::fixed(0.1),
        cols_frac: UniformRange::fixed(0.1),
        p_replace: 1.0,
    };
    vor.augment(&mut img, &mut AugmentRng::seeded(3)).unwrap();

    let (n_rows, n_cols) = (3, 4);
    for y in 0..30 {
        for x in 0..40 {
            let (ry, cx) = (nearest_point(y, 30, n_rows), nearest_point(x, 40, n_cols));
            // Every pixel equals the first pixel of its cell.
            let (fy, fx) = (
                (0..30).find(|&v| nearest_point(v, 30, n_rows) == ry).unwrap(),
                (0..40).find(|&v| nearest_point(v, 40, n_cols) == cx).unwrap(),
            );
            assert_eq!(img.get_pixel(x, y), img.get_pixel(fx, fy));
        }
    }
}

#[test]
fn zero_replacement_is_identity() {
    let src = noisy(20, 20);
    let mut img = src.clone();
    let vor = Voronoi {
        rows_frac: UniformRange { lo: 0.03, hi: 0.1 },
        cols_frac: UniformRange::fixed(0.1),
        p_replace: 0.0,
    };
    vor.augment(&mut img, &mut AugmentRng::seeded(4)).unwrap();
    assert_eq!(img, src);
}

#[test]
fn cell_mean_is_rounded_average() {
    let mut img = RgbaImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            Rgba([0, 10, 255, 255])
        } else {
            Rgba([3, 20, 0, 255])
        }
    });
    let vor = Voronoi {
        rows_frac: UniformRange::fixed(0.0),
        cols_frac: UniformRange::fixed(0.0),
        p_replace: 1.0,
    };
    vor.augment(&mut img, &mut AugmentRng::seeded(5)).unwrap();
    assert_eq!(img.get_pixel(0, 0), &Rgba([2, 15, 128, 255]));
    assert_eq!(img.get_pixel(1, 0), &Rgba([2, 15, 128, 255]));
}
