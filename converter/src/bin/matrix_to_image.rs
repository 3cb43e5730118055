//! Render a benchmark output matrix as a grayscale image.
//!
//! Reads the single grid in `output.txt` and writes `gray_output.png`.
//! Values are rounded and clamped to [0, 255].

use clap::Parser;
use converter::paths::{IMPORT_GRAY_IMAGE, IMPORT_MATRIX};
use converter::{import_matrix, ConversionPaths};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "matrix_to_image",
    about = "Convert a numeric matrix file to a grayscale image",
    long_about = None
)]
struct Args {
    /// Directory holding the input and receiving the output
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Matrix file to read, relative to --dir
    #[arg(long, default_value = IMPORT_MATRIX)]
    matrix: PathBuf,

    /// Image to write, relative to --dir
    #[arg(long, default_value = IMPORT_GRAY_IMAGE)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut paths = ConversionPaths::with_root(&args.dir);
    paths.import_matrix = args.dir.join(&args.matrix);
    paths.import_gray_image = args.dir.join(&args.output);

    let img = import_matrix(&paths)?;
    println!(
        "{} -> {} ({}x{})",
        paths.import_matrix.display(),
        paths.import_gray_image.display(),
        img.width(),
        img.height()
    );

    Ok(())
}
