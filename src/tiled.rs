//! Piecewise-uniform random flow smoothed into a continuous field.
//!
//! The generator draws one random displacement per coarse tile, expands each
//! tile to a block of pixels, blurs the block edges away with a Gaussian, and
//! rescales to the requested peak magnitude. The result is locally coherent
//! (nearby pixels move together, like tissue or rigid patches) yet globally
//! random, which is what a registration solver actually has to cope with.
//! Larger tiles give slower-varying flow.
//!
//! A quirk preserved from the original toolkit: the default tile size is
//! derived from the *first* dimension only (`ceil(H / 6)`), so non-square
//! fields get the same tile size in both axes regardless of width. Callers
//! depending on exact fixtures rely on this; do not "fix" it.

use crate::smooth::gaussian_smooth;
use crate::{normalize_peak, Error, Flow, Result};
use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;

/// Options for [`tiled_flow`]. `None` fields are derived from the shape.
#[derive(Debug, Clone)]
pub struct TiledFlowConfig {
    /// Peak vector length of the generated field.
    pub max_magnitude: f64,
    /// Edge length of a coarse tile in pixels. Default: `ceil(H / 6)`.
    pub tile_size: Option<usize>,
    /// Gaussian amplitude used to blur tile seams. Default:
    /// `ceil(tile_size / 2)`, bumped to the next even value when odd.
    pub filter_amp: Option<usize>,
}

impl Default for TiledFlowConfig {
    fn default() -> Self {
        Self {
            max_magnitude: 10.0,
            tile_size: None,
            filter_amp: None,
        }
    }
}

impl TiledFlowConfig {
    /// Effective tile size for a field of the given height.
    fn effective_tile_size(&self, height: usize) -> Result<usize> {
        match self.tile_size {
            Some(0) => Err(Error::InvalidTileSize(0)),
            Some(t) => Ok(t),
            // Height only, by design; see the module docs.
            None => Ok((height + 5) / 6),
        }
    }

    /// Effective filter amplitude for the given tile size.
    fn effective_filter_amp(&self, tile_size: usize) -> usize {
        match self.filter_amp {
            Some(a) => a,
            None => {
                let mut amp = (tile_size + 1) / 2;
                if amp % 2 == 1 {
                    amp += 1;
                }
                amp
            }
        }
    }
}

/// Locally coherent random displacement field.
///
/// Pipeline: coarse `ceil(H/T) x ceil(W/T)` grid of vectors with components
/// drawn independently uniform in `[-max_magnitude, max_magnitude]`, block
/// expansion to pixel resolution (top-left aligned, so the last row/column of
/// tiles may be cropped), Gaussian blur of the resulting complex field, and
/// a final rescale so the peak vector length equals `max_magnitude` exactly.
///
/// With `tile_size >= max(H, W)` the whole field is one tile and the result
/// degenerates to a constant vector of length `max_magnitude`, equivalent to
/// [`crate::uniform_flow`] with a random direction.
///
/// # Errors
///
/// - [`Error::InvalidMagnitude`] if `max_magnitude` is not positive finite
/// - [`Error::InvalidTileSize`] if a zero tile size was supplied
/// - [`Error::DegenerateField`] if the blurred field is zero everywhere
///   (all components drew exactly zero; vanishing probability)
/// - [`Error::Domain`] if the shape is empty
pub fn tiled_flow(
    shape: (usize, usize),
    config: &TiledFlowConfig,
    rng: &mut impl Rng,
) -> Result<Flow> {
    let (h, w) = shape;
    if h == 0 || w == 0 {
        return Err(Error::Domain("field shape must be non-empty"));
    }
    let m = config.max_magnitude;
    if !m.is_finite() || m <= 0.0 {
        return Err(Error::InvalidMagnitude(m));
    }

    let tile = config.effective_tile_size(h)?;
    let amp = config.effective_filter_amp(tile);

    let tiles_h = (h + tile - 1) / tile;
    let tiles_w = (w + tile - 1) / tile;

    // One draw per tile component, horizontal then vertical, row-major.
    let coarse = Array2::from_shape_fn((tiles_h, tiles_w), |_| {
        let horizontal = rng.gen_range(-m..=m);
        let vertical = rng.gen_range(-m..=m);
        Complex64::new(horizontal, vertical)
    });

    // Block expansion and top-left crop in one step: pixel (y, x) reads the
    // tile it falls in.
    let field = Array2::from_shape_fn((h, w), |(y, x)| coarse[[y / tile, x / tile]]);

    let smoothed = gaussian_smooth(&field, (amp, amp));
    normalize_peak(smoothed, m)
}
