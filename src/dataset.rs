//! Real image pairs from a CSV metadata table.
//!
//! The alternate fixture source: instead of synthesizing a flow, pick a
//! (target, source) image pair that was acquired independently and let the
//! registration algorithm find the deformation. The table lives at
//! `<dir>/metadata.csv` with at least the columns `status`, `Target image`,
//! and `Source image`; rows marked `training` are eligible for random
//! selection. Image paths are relative to the table's directory.

use crate::images::load_grayscale;
use crate::warp::resize_by_ratio;
use crate::{Error, Image, Result};
use log::{debug, info};
use ndarray::Array2;
use rand::Rng;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Name of the metadata table inside a dataset directory.
pub const METADATA_FILE: &str = "metadata.csv";

/// Status value marking a row as usable for training fixtures.
pub const TRAINING_STATUS: &str = "training";

/// One row of the pair table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRecord {
    pub status: String,
    pub target: String,
    pub source: String,
}

/// In-memory pair table.
#[derive(Debug, Clone)]
pub struct PairTable {
    records: Vec<PairRecord>,
}

impl PairTable {
    /// Load `<dir>/metadata.csv`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(METADATA_FILE);
        debug!("reading pair table {}", path.display());
        let reader = csv::Reader::from_path(&path)?;
        Self::from_reader(reader)
    }

    /// Parse a pair table from an already-open CSV reader.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingColumn`] if a required header is absent
    /// - [`Error::Csv`] on malformed rows
    pub fn from_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let column = |name: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(Error::MissingColumn(name))
        };
        let status_col = column("status")?;
        let target_col = column("Target image")?;
        let source_col = column("Source image")?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(PairRecord {
                status: row.get(status_col).unwrap_or_default().to_string(),
                target: row.get(target_col).unwrap_or_default().to_string(),
                source: row.get(source_col).unwrap_or_default().to_string(),
            });
        }
        Ok(Self { records })
    }

    /// All rows, in table order.
    pub fn records(&self) -> &[PairRecord] {
        &self.records
    }

    /// Rows with status `"training"`, in table order.
    pub fn training_rows(&self) -> impl Iterator<Item = &PairRecord> {
        self.records.iter().filter(|r| r.status == TRAINING_STATUS)
    }

    /// Pick one training row uniformly at random.
    ///
    /// # Errors
    ///
    /// - [`Error::NoTrainingRows`] if the table has no training rows
    pub fn random_training_pair(&self, rng: &mut impl Rng) -> Result<&PairRecord> {
        let rows: Vec<&PairRecord> = self.training_rows().collect();
        if rows.is_empty() {
            return Err(Error::NoTrainingRows);
        }
        let pick = rows[rng.gen_range(0..rows.len())];
        info!("selected training pair {} / {}", pick.target, pick.source);
        Ok(pick)
    }
}

/// Zero-pad two images at the bottom/right to their elementwise max shape.
pub fn pad_to_common(a: &Image, b: &Image) -> (Image, Image) {
    let (ha, wa) = a.dim();
    let (hb, wb) = b.dim();
    let h = ha.max(hb);
    let w = wa.max(wb);

    let pad = |img: &Image| -> Image {
        let (hi, wi) = img.dim();
        Array2::from_shape_fn((h, w), |(y, x)| {
            if y < hi && x < wi {
                img[[y, x]]
            } else {
                0.0
            }
        })
    };
    (pad(a), pad(b))
}

/// Load both images of a pair and pad them to a common shape.
///
/// Paths in the record are resolved relative to `dir`.
pub fn load_pair(dir: &Path, record: &PairRecord) -> Result<(Image, Image)> {
    let target = load_grayscale(&resolve(dir, &record.target))?;
    let source = load_grayscale(&resolve(dir, &record.source))?;
    Ok(pad_to_common(&target, &source))
}

fn resolve(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Diagonal pixel count of an image, `sqrt(H^2 + W^2)`.
pub fn diagonal(image: &Image) -> f64 {
    let (h, w) = image.dim();
    ((h * h + w * w) as f64).sqrt()
}

/// Uniformly rescale both images of a pair so the diagonal of the first
/// matches `target_diag`, preserving aspect ratio.
///
/// Both images get the *same* ratio, so a pair that was padded to a common
/// shape stays shape-matched.
///
/// # Errors
///
/// - [`Error::InvalidRatio`] if `target_diag` is not positive finite (or the
///   pair is empty, making the ratio infinite)
pub fn rescale_pair_to_diagonal(
    pair: (&Image, &Image),
    target_diag: f64,
) -> Result<(Image, Image)> {
    let (a, b) = pair;
    let diag = diagonal(a);
    if diag <= 0.0 {
        return Err(Error::Domain("cannot rescale an empty image pair"));
    }
    let ratio = target_diag / diag;
    Ok((resize_by_ratio(a, ratio)?, resize_by_ratio(b, ratio)?))
}
