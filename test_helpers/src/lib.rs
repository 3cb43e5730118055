//! Test support for the converter workspace.
//!
//! Provides project root discovery, a persistent `test_output/` directory
//! for artifacts worth inspecting by eye, and synthetic grayscale images
//! with known pixel values.
//!
//! ```rust,no_run
//! use test_helpers::{gradient_image, output_path};
//!
//! let img = gradient_image(16, 8);
//! img.save(output_path("gradient.png")).unwrap();
//! ```

use image::{GrayImage, Luma};
use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Errors raised by the test infrastructure.
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    /// No Cargo.toml with a `[workspace]` section above the current directory.
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Locate the workspace root by walking up from the current directory until
/// a Cargo.toml containing `[workspace]` is found.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {e}"))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {e}"))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// `<project_root>/test_output`, created on first use.
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }

    output_dir
}

/// Path of an artifact inside [`get_output_dir`].
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}

/// Grayscale image where every pixel holds `value`.
pub fn uniform_image(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

/// Grayscale image with a diagonal ramp: pixel (x, y) is `(7x + 13y) mod 256`.
///
/// Every row differs from its neighbours, so transposed or shifted reads
/// show up as mismatches.
pub fn gradient_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((7 * x + 13 * y) % 256) as u8]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_exists() {
        let root = find_project_root().expect("Failed to find project root");
        assert!(root.join("Cargo.toml").exists());
        assert!(root.join("converter").exists());
    }

    #[test]
    fn test_output_path() {
        let path = output_path("test.png");
        assert_eq!(path, get_output_dir().join("test.png"));
        assert!(get_output_dir().is_dir());
    }

    #[test]
    fn test_gradient_values() {
        let img = gradient_image(40, 30);
        assert_eq!(img.dimensions(), (40, 30));
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(1, 0)[0], 7);
        assert_eq!(img.get_pixel(0, 1)[0], 13);
        assert_eq!(img.get_pixel(39, 29)[0], ((7 * 39 + 13 * 29) % 256) as u8);
    }

    #[test]
    fn test_uniform_values() {
        let img = uniform_image(3, 2, 200);
        assert!(img.pixels().all(|p| p[0] == 200));
    }
}
