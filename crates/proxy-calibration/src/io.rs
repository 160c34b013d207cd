//! Output file handling

use crate::types::*;
use std::path::{Path, PathBuf};

/// Write a finished calibration document to `<output_dir>/<paper>_calibration.pdf`,
/// replacing any earlier file of the same name.
pub async fn write_document(
    bytes: Vec<u8>,
    output_dir: impl AsRef<Path>,
    paper: PaperSize,
) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| CalibrationError::IoFailure {
            path: output_dir.to_owned(),
            source,
        })?;

    let path = output_dir.join(paper.output_filename());
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| CalibrationError::IoFailure {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}
