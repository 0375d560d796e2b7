use ndarray::{s, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use synflow::{quadratic_flow, warp, Image};

/// Mean squared error over the interior, skipping a border margin where the
/// clamped warp replicates edge pixels.
fn interior_mse(a: &Image, b: &Image, margin: usize) -> f64 {
    let (h, w) = a.dim();
    let ai = a.slice(s![margin..h - margin, margin..w - margin]);
    let bi = b.slice(s![margin..h - margin, margin..w - margin]);
    let n = ai.len() as f64;
    ai.iter()
        .zip(bi.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        / n
}

// A smooth low-amplitude texture warped forward and back should land close
// to where it started; bilinear resampling loses a little, a broken sign
// convention loses a lot.
#[test]
fn forward_then_inverse_warp_approximately_restores_the_image() {
    let (h, w) = (64, 64);
    let image = Array2::from_shape_fn((h, w), |(y, x)| {
        ((x as f64 * 0.21).sin() + (y as f64 * 0.17).cos() + 2.0) / 4.0
    });

    let mut rng = ChaCha8Rng::seed_from_u64(55);
    let flow = quadratic_flow((h, w), 1.5, &mut rng).unwrap();

    let warped = warp(&image, &flow.mapv(|v| -v.re), &flow.mapv(|v| -v.im)).unwrap();
    let restored = warp(&warped, &flow.mapv(|v| v.re), &flow.mapv(|v| v.im)).unwrap();

    let forward_err = interior_mse(&image, &warped, 4);
    let roundtrip_err = interior_mse(&image, &restored, 4);

    assert!(
        roundtrip_err < forward_err,
        "round trip ({roundtrip_err:.6}) should beat a single warp ({forward_err:.6})"
    );
    assert!(
        roundtrip_err < 1e-3,
        "round trip error too large: {roundtrip_err:.6}"
    );
}

#[test]
fn warping_a_constant_image_changes_nothing() {
    let image = Array2::from_elem((32, 32), 0.7);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let flow = quadratic_flow((32, 32), 4.0, &mut rng).unwrap();
    let out = warp(&image, &flow.mapv(|v| -v.re), &flow.mapv(|v| -v.im)).unwrap();
    for &v in out.iter() {
        assert!((v - 0.7).abs() < 1e-12);
    }
}
