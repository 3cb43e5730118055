//! Image ⇄ matrix file conversions.
//!
//! [`export_image`] turns a picture into the benchmark's input file: the
//! grayscale pixel grid followed by the blur kernel. [`import_matrix`] takes
//! the benchmark's numeric output and renders it back as a grayscale image.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use image::{GrayImage, ImageError};
use thiserror::Error;

use crate::grid::write_grid;
use crate::image_io::{array2_to_gray_image, gray_image_to_array2, quantize_grid};
use crate::kernel::write_kernel;
use crate::matrix_file::{read_body_grid, MatrixFileError};
use crate::paths::ConversionPaths;

/// Errors from the image conversions.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Image error for {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: ImageError,
    },
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed matrix file {path}: {source}")]
    Format {
        path: String,
        #[source]
        source: MatrixFileError,
    },
    #[error("Image {path} has no pixels")]
    EmptyImage { path: String },
}

fn image_err(path: &Path) -> impl FnOnce(ImageError) -> ConvertError + '_ {
    move |source| ConvertError::Image {
        path: path.display().to_string(),
        source,
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ConvertError + '_ {
    move |source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write `img` as a matrix file: the pixel block, then the kernel block.
///
/// The header is `"<height> <width>"` and rows follow raster order.
pub fn write_image_matrix<W>(sink: &mut W, img: &GrayImage) -> std::io::Result<()>
where
    W: Write + ?Sized,
{
    write_grid(sink, &gray_image_to_array2(img))?;
    write_kernel(sink)
}

/// Decode `paths.input_image`, write its grayscale matrix plus kernel to
/// `paths.export_matrix`, and save the grayscale image to
/// `paths.export_gray_image`.
///
/// Returns the grayscale image that was written.
pub fn export_image(paths: &ConversionPaths) -> Result<GrayImage, ConvertError> {
    let source = &paths.input_image;
    let gray = image::open(source).map_err(image_err(source))?.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return Err(ConvertError::EmptyImage {
            path: source.display().to_string(),
        });
    }
    log::debug!(
        "Loaded {} as {}x{} grayscale",
        source.display(),
        gray.width(),
        gray.height()
    );

    let target = &paths.export_matrix;
    let file = File::create(target).map_err(io_err(target))?;
    let mut out = BufWriter::new(file);
    write_image_matrix(&mut out, &gray).map_err(io_err(target))?;
    out.flush().map_err(io_err(target))?;
    log::info!("Wrote matrix file {}", target.display());

    let gray_path = &paths.export_gray_image;
    gray.save(gray_path).map_err(image_err(gray_path))?;
    log::info!("Wrote grayscale image {}", gray_path.display());

    Ok(gray)
}

/// Read the single grid in `paths.import_matrix` and save it as an 8-bit
/// grayscale image at `paths.import_gray_image`.
///
/// Values are quantized with [`crate::image_io::quantize_intensity`].
/// Returns the image that was written.
pub fn import_matrix(paths: &ConversionPaths) -> Result<GrayImage, ConvertError> {
    let source = &paths.import_matrix;
    let file = File::open(source).map_err(io_err(source))?;
    let grid = read_body_grid(BufReader::new(file)).map_err(|source_err| ConvertError::Format {
        path: source.display().to_string(),
        source: source_err,
    })?;
    let (height, width) = grid.dim();
    log::debug!("Read {height}x{width} grid from {}", source.display());

    let img = array2_to_gray_image(&quantize_grid(&grid));
    let target = &paths.import_gray_image;
    img.save(target).map_err(image_err(target))?;
    log::info!("Wrote grayscale image {}", target.display());

    Ok(img)
}
