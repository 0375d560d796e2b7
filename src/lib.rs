//! # synflow
//!
//! Synthetic displacement fields and image fixtures for optical-flow
//! registration experiments.
//!
//! ## The Problem
//!
//! Evaluating a registration algorithm needs image pairs with *known* ground
//! truth. Real imagery rarely comes with a dense displacement field attached,
//! so this crate manufactures fixtures: a base image, a smooth random flow
//! field, and the image warped by that flow. The flow is the ground truth the
//! algorithm under test should recover.
//!
//! ## Key Functions
//!
//! | Function | Use Case | Randomness |
//! |----------|----------|------------|
//! | [`uniform_flow`] | Constant-vector field (pure translation) | none |
//! | [`quadratic_flow`] | Smooth analytic field from a random quadratic | 3 normal draws |
//! | [`tiled::tiled_flow`] | Locally coherent random deformation | per-tile uniform |
//! | [`images::chessboard`] | High-contrast synthetic test image | none |
//! | [`scenario::build_scenario`] | Full `(image, warped, flow)` triple | delegated |
//! | [`dataset::PairTable`] | Real image pairs from a CSV table | row choice |
//!
//! ## Quick Start
//!
//! ```rust
//! use num_complex::Complex64;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use synflow::{build_scenario, uniform_flow, FlowKind, ImageKind};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! // A constant field of magnitude 5 pointing along +x.
//! let flow = uniform_flow((64, 64), Complex64::new(1.0, 0.0), 5.0).unwrap();
//! assert_eq!(flow[[0, 0]], Complex64::new(5.0, 0.0));
//!
//! // A full (image, warped, flow) fixture triple.
//! let scenario = build_scenario(
//!     &ImageKind::chessboard(10, 4),
//!     &FlowKind::Quadratic { max_magnitude: 3.0 },
//!     &mut rng,
//! )
//! .unwrap();
//! assert_eq!(scenario.image.dim(), scenario.warped.dim());
//! assert_eq!(scenario.image.dim(), scenario.flow.dim());
//! ```
//!
//! ## Conventions
//!
//! - A **flow** is an `Array2<Complex64>` of shape `(H, W)`: the real part is
//!   the horizontal (x) displacement, the imaginary part the vertical (y)
//!   displacement, both in pixels.
//! - Every generator rescales its output so the **peak** vector length equals
//!   the requested `max_magnitude` exactly.
//! - Generators take an explicit `&mut impl Rng`; there is no global RNG
//!   state. Seed a `ChaCha8Rng` for reproducible fixtures.
//!
//! ## What Can Go Wrong
//!
//! 1. **Zero direction vector**: [`uniform_flow`] cannot normalize a zero
//!    vector; it returns [`Error::ZeroDirection`] instead of NaN.
//! 2. **Degenerate field**: a field that is zero everywhere cannot be peak
//!    normalized; generators return [`Error::DegenerateField`] before any
//!    division happens.
//! 3. **Odd board size**: the chessboard tiling assumes an even tile count
//!    per side; odd sizes are rejected, not silently malformed.
//! 4. **Non-square default tile size**: [`tiled::tiled_flow`] derives its
//!    default tile size from the *height* only. See the module docs.
//!
//! ## References
//!
//! - Horn & Schunck (1981). "Determining Optical Flow"
//! - Baker et al. (2011). "A Database and Evaluation Methodology for Optical
//!   Flow" (Middlebury)
//! - Butler et al. (2012). "A Naturalistic Open Source Movie for Optical Flow
//!   Evaluation" (MPI Sintel)
//! - Modersitzki (2009). "FAIR: Flexible Algorithms for Image Registration"

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;
use thiserror::Error;

pub mod dataset;
pub mod images;
pub mod scenario;
pub mod smooth;
pub mod tiled;
pub mod warp;

pub use images::{chessboard, load_grayscale};
pub use scenario::{build_scenario, FlowKind, ImageKind, Scenario};
pub use smooth::gaussian_smooth;
pub use tiled::{tiled_flow, TiledFlowConfig};
pub use warp::{resize_by_ratio, warp};

/// A dense displacement field: re = horizontal shift, im = vertical shift,
/// in pixels, row-major `(H, W)`.
pub type Flow = Array2<Complex64>;

/// A grayscale image, row-major `(H, W)`.
pub type Image = Array2<f64>;

/// Fixture-generation error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Direction vector of a uniform field has zero length.
    #[error("direction vector must be non-zero")]
    ZeroDirection,

    /// Requested peak magnitude is not a positive finite number.
    #[error("peak magnitude must be positive and finite, got {0}")]
    InvalidMagnitude(f64),

    /// Chessboard tiling requires an even, non-zero number of tiles per side.
    #[error("board size must be even and non-zero, got {0}")]
    OddBoardSize(usize),

    /// Tile size of zero pixels.
    #[error("tile size must be >= 1, got {0}")]
    InvalidTileSize(usize),

    /// Resize ratio is not a positive finite number.
    #[error("resize ratio must be positive and finite, got {0}")]
    InvalidRatio(f64),

    /// Displacement field shape does not match the image shape.
    #[error("displacement shape mismatch: image is {expected:?}, field is {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A generated field has zero peak magnitude before the final rescale.
    #[error("field has zero peak magnitude, cannot rescale")]
    DegenerateField,

    /// Pair table contains no rows with status `"training"`.
    #[error("no rows with status \"training\" in pair table")]
    NoTrainingRows,

    /// Pair table header is missing a required column.
    #[error("pair table is missing required column {0:?}")]
    MissingColumn(&'static str),

    /// An image asset failed to read or decode.
    #[error("failed to decode image asset: {0}")]
    Asset(#[from] image::ImageError),

    /// The pair table failed to read or parse.
    #[error("failed to parse pair table: {0}")]
    Csv(#[from] csv::Error),

    /// Domain error (invalid inputs for the mathematical definition).
    #[error("{0}")]
    Domain(&'static str),
}

/// Result type for fixture-generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Euclidean length of a displacement vector.
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use synflow::vector_length;
///
/// assert_eq!(vector_length(Complex64::new(3.0, 4.0)), 5.0);
/// ```
#[inline]
pub fn vector_length(v: Complex64) -> f64 {
    v.norm()
}

/// Largest vector length over all cells of a field.
///
/// Returns `0.0` for an empty field.
pub fn peak_magnitude(field: &Flow) -> f64 {
    field.iter().map(|&v| vector_length(v)).fold(0.0, f64::max)
}

/// Rescale a field so its peak vector length equals `max_magnitude` exactly.
///
/// All generators funnel through this, so the peak-magnitude invariant is
/// enforced in one place. Errors are detected before any division:
///
/// - [`Error::InvalidMagnitude`] if `max_magnitude` is not positive finite
/// - [`Error::DegenerateField`] if the field is zero everywhere (or empty)
pub fn normalize_peak(field: Flow, max_magnitude: f64) -> Result<Flow> {
    if !max_magnitude.is_finite() || max_magnitude <= 0.0 {
        return Err(Error::InvalidMagnitude(max_magnitude));
    }
    let peak = peak_magnitude(&field);
    if peak <= 0.0 {
        return Err(Error::DegenerateField);
    }
    let scale = max_magnitude / peak;
    Ok(field.mapv(|v| v * scale))
}

/// Constant-vector displacement field.
///
/// Every cell equals `direction` scaled so its length is `max_magnitude`:
/// the field is `max_magnitude * direction / |direction|` everywhere. This is
/// the simplest useful fixture, a pure translation.
///
/// # Errors
///
/// - [`Error::ZeroDirection`] if `|direction| == 0` (the scale factor would
///   divide by zero)
/// - [`Error::InvalidMagnitude`] if `max_magnitude` is not positive finite
/// - [`Error::Domain`] if the shape is empty
///
/// # Example
///
/// ```rust
/// use num_complex::Complex64;
/// use synflow::{uniform_flow, vector_length};
///
/// let flow = uniform_flow((4, 6), Complex64::new(1.0, 1.0), 2.0).unwrap();
/// assert!((vector_length(flow[[3, 5]]) - 2.0).abs() < 1e-12);
/// ```
pub fn uniform_flow(
    shape: (usize, usize),
    direction: Complex64,
    max_magnitude: f64,
) -> Result<Flow> {
    let (h, w) = shape;
    if h == 0 || w == 0 {
        return Err(Error::Domain("field shape must be non-empty"));
    }
    if vector_length(direction) <= 0.0 {
        return Err(Error::ZeroDirection);
    }
    let field = Array2::from_elem((h, w), direction);
    normalize_peak(field, max_magnitude)
}

/// Smooth analytic field from a random quadratic over the complex plane.
///
/// Draws three independent standard-normal scalars `a`, `b`, `c`, lays a
/// complex coordinate grid `z = x + iy` over the unit square (`x` linear in
/// `[0, 1]` across columns, `y` linear in `[0, 1]` down rows), and evaluates
/// `f(z) = a + b z + c z²` elementwise. The result is rescaled to peak
/// magnitude `max_magnitude`.
///
/// Quadratics give fields that rotate and stretch smoothly across the frame,
/// a reasonable stand-in for global low-order deformation. Same seed, same
/// field.
///
/// # Errors
///
/// - [`Error::InvalidMagnitude`] if `max_magnitude` is not positive finite
/// - [`Error::DegenerateField`] if all three coefficients draw exactly zero
///   (vanishing probability, but checked rather than divided through)
/// - [`Error::Domain`] if the shape is empty
pub fn quadratic_flow(
    shape: (usize, usize),
    max_magnitude: f64,
    rng: &mut impl Rng,
) -> Result<Flow> {
    let (h, w) = shape;
    if h == 0 || w == 0 {
        return Err(Error::Domain("field shape must be non-empty"));
    }

    let a: f64 = rng.sample(StandardNormal);
    let b: f64 = rng.sample(StandardNormal);
    let c: f64 = rng.sample(StandardNormal);

    // Unit-interval coordinate for index i out of n samples; a single sample
    // sits at the left endpoint.
    let coord = |i: usize, n: usize| -> f64 {
        if n > 1 {
            i as f64 / (n - 1) as f64
        } else {
            0.0
        }
    };

    let field = Array2::from_shape_fn((h, w), |(row, col)| {
        let z = Complex64::new(coord(col, w), coord(row, h));
        z * z * c + z * b + a
    });

    normalize_peak(field, max_magnitude)
}
