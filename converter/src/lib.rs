//! Matrix file tooling for an external convolution benchmark.
//!
//! The benchmark consumes plain-text matrix files: blocks of
//! `"<lines> <columns>"` followed by space-separated rows. This crate
//! produces and consumes those files:
//!
//! - [`generate`]: random matrix + kernel fixtures named after their sizes
//! - [`convert::export_image`]: image → grayscale matrix + 7x7 Gaussian kernel
//! - [`convert::import_matrix`]: benchmark output → grayscale image
//!
//! The shared text format lives in [`grid`] (writing) and [`matrix_file`]
//! (reading).

pub mod convert;
pub mod generate;
pub mod grid;
pub mod image_io;
pub mod kernel;
pub mod matrix_file;
pub mod paths;

pub use convert::{export_image, import_matrix, ConvertError};
pub use generate::{generate_fixture, Fixture, FixtureSpec, GenerateError};
pub use grid::{write_grid, write_random_grid, GridShape};
pub use matrix_file::{read_blocks, read_body_grid, GridBlock, MatrixFile, MatrixFileError};
pub use paths::ConversionPaths;
