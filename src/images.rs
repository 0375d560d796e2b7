//! Base images for registration fixtures.
//!
//! Two sources: a photograph loaded from disk (the original toolkit ships a
//! fixed 256x256 grayscale reference picture) and a synthetic checkerboard.
//! Both come back as real-valued grayscale arrays; photographs are scaled to
//! `[0, 1]`, the checkerboard is exactly 0/1.

use crate::{Error, Image, Result};
use log::debug;
use ndarray::Array2;
use std::path::Path;

/// Load an image file and convert it to real-valued grayscale in `[0, 1]`.
///
/// Any format the `image` crate decodes is accepted. Color inputs are
/// luma-converted first.
///
/// # Errors
///
/// - [`Error::Asset`] if the file does not decode (missing files surface as
///   the decoder's I/O variant)
pub fn load_grayscale(path: &Path) -> Result<Image> {
    let decoded = image::open(path)?;
    let gray = decoded.into_luma8();
    let (w, h) = gray.dimensions();
    debug!("loaded {} as {}x{} grayscale", path.display(), w, h);

    Ok(Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
        gray.get_pixel(x as u32, y as u32)[0] as f64 / 255.0
    }))
}

/// Synthetic checkerboard of alternating 0/1 tiles.
///
/// The board is `board_size x board_size` tiles, each `tile_size x tile_size`
/// pixels, built by scaling up the minimal 2x2 repeating unit. The top-left
/// tile is black (0), its right neighbor white (1). The stock fixture is
/// `chessboard(50, 4)`, a 200x200 board.
///
/// # Errors
///
/// - [`Error::OddBoardSize`] if `board_size` is odd or zero; the 2x2 repeat
///   unit only tiles an even count, and an odd board would come out with a
///   truncated pattern
/// - [`Error::InvalidTileSize`] if `tile_size` is zero
///
/// # Example
///
/// ```rust
/// use synflow::chessboard;
///
/// let board = chessboard(10, 4).unwrap();
/// assert_eq!(board.dim(), (40, 40));
/// assert_eq!(board[[0, 0]], 0.0);
/// assert_eq!(board[[0, 10]], 1.0);
/// ```
pub fn chessboard(tile_size: usize, board_size: usize) -> Result<Image> {
    if tile_size == 0 {
        return Err(Error::InvalidTileSize(0));
    }
    if board_size == 0 || board_size % 2 != 0 {
        return Err(Error::OddBoardSize(board_size));
    }

    let n = tile_size * board_size;
    Ok(Array2::from_shape_fn((n, n), |(y, x)| {
        let tile_row = y / tile_size;
        let tile_col = x / tile_size;
        ((tile_row + tile_col) % 2) as f64
    }))
}
