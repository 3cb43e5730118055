//! Fixed file names used by the image conversions.
//!
//! External benchmark tooling expects these exact names, so they are the
//! defaults everywhere. [`ConversionPaths`] resolves them against a root
//! directory, which is the current directory unless told otherwise.

use std::path::PathBuf;

/// Image read by the exporter
pub const INPUT_IMAGE: &str = "input.png";
/// Matrix file written by the exporter
pub const EXPORT_MATRIX: &str = "input.txt";
/// Grayscale copy of the exporter's input
pub const EXPORT_GRAY_IMAGE: &str = "gray_input.png";
/// Matrix file read by the importer
pub const IMPORT_MATRIX: &str = "output.txt";
/// Image written by the importer
pub const IMPORT_GRAY_IMAGE: &str = "gray_output.png";

/// File locations for one export or import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPaths {
    pub input_image: PathBuf,
    pub export_matrix: PathBuf,
    pub export_gray_image: PathBuf,
    pub import_matrix: PathBuf,
    pub import_gray_image: PathBuf,
}

impl ConversionPaths {
    /// Use the fixed names inside `root_path`.
    pub fn with_root(root_path: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        Self {
            input_image: root_path.join(INPUT_IMAGE),
            export_matrix: root_path.join(EXPORT_MATRIX),
            export_gray_image: root_path.join(EXPORT_GRAY_IMAGE),
            import_matrix: root_path.join(IMPORT_MATRIX),
            import_gray_image: root_path.join(IMPORT_GRAY_IMAGE),
        }
    }
}

impl Default for ConversionPaths {
    fn default() -> Self {
        Self::with_root(".")
    }
}
