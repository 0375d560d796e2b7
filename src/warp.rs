//! Backward warping and resizing of grayscale images.
//!
//! The scenario builder turns a forward displacement field into a warped
//! image by sampling the source at `(x + dx, y + dy)` for every output pixel
//! (backward/inverse mapping). Sampling is bilinear with coordinates clamped
//! to the image rectangle, so warps never read outside the source.

use crate::{Error, Image, Result};
use ndarray::Array2;

/// Bilinear sample at a continuous position, clamped to the image rectangle.
fn sample_bilinear(image: &Image, x: f64, y: f64) -> f64 {
    let (h, w) = image.dim();
    let x = x.clamp(0.0, (w - 1) as f64);
    let y = y.clamp(0.0, (h - 1) as f64);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let top = image[[y0, x0]] * (1.0 - fx) + image[[y0, x1]] * fx;
    let bottom = image[[y1, x0]] * (1.0 - fx) + image[[y1, x1]] * fx;
    top * (1.0 - fy) + bottom * fy
}

/// Resample an image through a backward displacement field.
///
/// `out[y, x] = image(x + dx[y, x], y + dy[y, x])`, bilinear, clamped at the
/// borders. `dx` and `dy` are in pixels and must match the image shape.
///
/// Note the convention: the caller owns the sign. A *forward* flow (source
/// to target) is applied by passing its negation, which is what
/// [`crate::scenario::build_scenario`] does.
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] if `dx` or `dy` differ in shape from `image`
/// - [`Error::Domain`] if the image is empty
pub fn warp(image: &Image, dx: &Array2<f64>, dy: &Array2<f64>) -> Result<Image> {
    let (h, w) = image.dim();
    if h == 0 || w == 0 {
        return Err(Error::Domain("image must be non-empty"));
    }
    for field in [dx, dy] {
        if field.dim() != (h, w) {
            return Err(Error::ShapeMismatch {
                expected: (h, w),
                got: field.dim(),
            });
        }
    }

    Ok(Array2::from_shape_fn((h, w), |(y, x)| {
        sample_bilinear(
            image,
            x as f64 + dx[[y, x]],
            y as f64 + dy[[y, x]],
        )
    }))
}

/// Uniformly resize an image by a scale ratio, bilinear.
///
/// The output shape is `(round(H * ratio), round(W * ratio))`, at least 1x1.
/// Sampling aligns the corner pixels of input and output.
///
/// # Errors
///
/// - [`Error::InvalidRatio`] if `ratio` is not positive finite
/// - [`Error::Domain`] if the image is empty
pub fn resize_by_ratio(image: &Image, ratio: f64) -> Result<Image> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(Error::InvalidRatio(ratio));
    }
    let (h, w) = image.dim();
    if h == 0 || w == 0 {
        return Err(Error::Domain("image must be non-empty"));
    }

    let out_h = ((h as f64 * ratio).round() as usize).max(1);
    let out_w = ((w as f64 * ratio).round() as usize).max(1);

    // Corner-aligned source coordinate for output index i of n.
    let src = |i: usize, n_out: usize, n_in: usize| -> f64 {
        if n_out > 1 {
            i as f64 * (n_in - 1) as f64 / (n_out - 1) as f64
        } else {
            0.0
        }
    };

    Ok(Array2::from_shape_fn((out_h, out_w), |(y, x)| {
        sample_bilinear(image, src(x, out_w, w), src(y, out_h, h))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ramp(h: usize, w: usize) -> Image {
        Array2::from_shape_fn((h, w), |(y, x)| (y * w + x) as f64)
    }

    #[test]
    fn zero_displacement_is_identity() {
        let img = ramp(6, 9);
        let zeros = Array2::zeros((6, 9));
        let out = warp(&img, &zeros, &zeros).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn integer_translation_shifts_content() {
        let img = ramp(5, 8);
        // dx = +2 everywhere: out[y, x] = img[y, x + 2] away from the border.
        let dx = Array2::from_elem((5, 8), 2.0);
        let dy = Array2::zeros((5, 8));
        let out = warp(&img, &dx, &dy).unwrap();
        for y in 0..5 {
            for x in 0..6 {
                assert_eq!(out[[y, x]], img[[y, x + 2]]);
            }
            // Past the right edge the sample clamps to the last column.
            assert_eq!(out[[y, 6]], img[[y, 7]]);
            assert_eq!(out[[y, 7]], img[[y, 7]]);
        }
    }

    #[test]
    fn subpixel_translation_interpolates() {
        let img = array![[0.0, 1.0], [0.0, 1.0]];
        let dx = Array2::from_elem((2, 2), 0.5);
        let dy = Array2::zeros((2, 2));
        let out = warp(&img, &dx, &dy).unwrap();
        assert!((out[[0, 0]] - 0.5).abs() < 1e-12);
        assert!((out[[1, 0]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn warp_rejects_shape_mismatch() {
        let img = ramp(4, 4);
        let ok = Array2::zeros((4, 4));
        let bad = Array2::zeros((4, 5));
        assert!(matches!(
            warp(&img, &bad, &ok),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            warp(&img, &ok, &bad),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn resize_ratio_one_keeps_shape_and_content() {
        let img = ramp(7, 5);
        let out = resize_by_ratio(&img, 1.0).unwrap();
        assert_eq!(out.dim(), (7, 5));
        for (a, b) in out.iter().zip(img.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn resize_halves_and_doubles() {
        let img = ramp(8, 12);
        let down = resize_by_ratio(&img, 0.5).unwrap();
        assert_eq!(down.dim(), (4, 6));
        let up = resize_by_ratio(&img, 2.0).unwrap();
        assert_eq!(up.dim(), (16, 24));
        // Corner alignment preserves the extreme values.
        assert!((up[[0, 0]] - img[[0, 0]]).abs() < 1e-12);
        assert!((up[[15, 23]] - img[[7, 11]]).abs() < 1e-12);
    }

    #[test]
    fn resize_rejects_bad_ratio() {
        let img = ramp(4, 4);
        assert!(matches!(
            resize_by_ratio(&img, 0.0),
            Err(Error::InvalidRatio(_))
        ));
        assert!(matches!(
            resize_by_ratio(&img, f64::INFINITY),
            Err(Error::InvalidRatio(_))
        ));
    }

    #[test]
    fn resize_never_collapses_below_one_pixel() {
        let img = ramp(3, 3);
        let out = resize_by_ratio(&img, 0.01).unwrap();
        assert_eq!(out.dim(), (1, 1));
    }
}
