//! Composition of image and flow generators into fixture triples.
//!
//! A scenario is the unit a registration experiment consumes: a base image,
//! the ground-truth flow, and the image warped by that flow. The image is
//! generated first and the flow takes its shape, so the three always agree.

use crate::images::{chessboard, load_grayscale};
use crate::tiled::{tiled_flow, TiledFlowConfig};
use crate::warp::warp;
use crate::{quadratic_flow, uniform_flow, Flow, Image, Result};
use num_complex::Complex64;
use rand::Rng;
use std::path::PathBuf;

/// Which base image to generate.
#[derive(Debug, Clone)]
pub enum ImageKind {
    /// A grayscale photograph loaded from disk.
    Photo { path: PathBuf },
    /// A synthetic checkerboard; see [`chessboard`].
    Chessboard {
        tile_size: usize,
        board_size: usize,
    },
}

impl ImageKind {
    /// Photograph loaded from `path`.
    pub fn photo(path: impl Into<PathBuf>) -> Self {
        ImageKind::Photo { path: path.into() }
    }

    /// Checkerboard with the given tile and board sizes.
    pub fn chessboard(tile_size: usize, board_size: usize) -> Self {
        ImageKind::Chessboard {
            tile_size,
            board_size,
        }
    }

    fn generate(&self) -> Result<Image> {
        match self {
            ImageKind::Photo { path } => load_grayscale(path),
            ImageKind::Chessboard {
                tile_size,
                board_size,
            } => chessboard(*tile_size, *board_size),
        }
    }
}

/// Which flow generator to run.
#[derive(Debug, Clone)]
pub enum FlowKind {
    /// Constant field; see [`uniform_flow`].
    Uniform {
        direction: Complex64,
        max_magnitude: f64,
    },
    /// Random quadratic field; see [`quadratic_flow`].
    Quadratic { max_magnitude: f64 },
    /// Tile-based random field; see [`tiled_flow`].
    Tiled(TiledFlowConfig),
}

impl Default for FlowKind {
    /// The quadratic field at magnitude 10, the original toolkit's default.
    fn default() -> Self {
        FlowKind::Quadratic {
            max_magnitude: 10.0,
        }
    }
}

impl FlowKind {
    fn generate(&self, shape: (usize, usize), rng: &mut impl Rng) -> Result<Flow> {
        match self {
            FlowKind::Uniform {
                direction,
                max_magnitude,
            } => uniform_flow(shape, *direction, *max_magnitude),
            FlowKind::Quadratic { max_magnitude } => {
                quadratic_flow(shape, *max_magnitude, rng)
            }
            FlowKind::Tiled(config) => tiled_flow(shape, config, rng),
        }
    }
}

/// One registration fixture: base image, warped image, ground-truth flow.
///
/// Created whole, immutable thereafter; all three arrays are owned by the
/// caller with no shared state.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub image: Image,
    pub warped: Image,
    pub flow: Flow,
}

/// Generate a fixture triple.
///
/// The base image is generated first; the flow is generated at the image's
/// shape; the warped image is the base resampled through the *negated* flow.
/// The flow describes forward displacement from source to warped, and the
/// backward-mapping warp consumes the inverse, hence the sign flip.
///
/// # Errors
///
/// Propagates the selected generators' errors unchanged; nothing partial is
/// returned on failure.
pub fn build_scenario(
    image_kind: &ImageKind,
    flow_kind: &FlowKind,
    rng: &mut impl Rng,
) -> Result<Scenario> {
    let image = image_kind.generate()?;
    let flow = flow_kind.generate(image.dim(), rng)?;

    let dx = flow.mapv(|v| -v.re);
    let dy = flow.mapv(|v| -v.im);
    let warped = warp(&image, &dx, &dy)?;

    Ok(Scenario {
        image,
        warped,
        flow,
    })
}
