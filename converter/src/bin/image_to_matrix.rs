//! Export an image as a benchmark input file.
//!
//! Reads `input.png`, writes its grayscale pixels followed by the 7x7
//! Gaussian kernel to `input.txt`, and saves the grayscale image as
//! `gray_input.png`. All names are resolved inside `--dir` and can be
//! overridden individually.

use clap::Parser;
use converter::paths::{EXPORT_GRAY_IMAGE, EXPORT_MATRIX, INPUT_IMAGE};
use converter::{export_image, ConversionPaths};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "image_to_matrix",
    about = "Convert an image to a grayscale matrix file with blur kernel",
    long_about = None
)]
struct Args {
    /// Directory holding the input and receiving the outputs
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Input image, relative to --dir
    #[arg(long, default_value = INPUT_IMAGE)]
    input: PathBuf,

    /// Matrix file to write, relative to --dir
    #[arg(long, default_value = EXPORT_MATRIX)]
    matrix: PathBuf,

    /// Grayscale copy to write, relative to --dir
    #[arg(long, default_value = EXPORT_GRAY_IMAGE)]
    gray: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut paths = ConversionPaths::with_root(&args.dir);
    paths.input_image = args.dir.join(&args.input);
    paths.export_matrix = args.dir.join(&args.matrix);
    paths.export_gray_image = args.dir.join(&args.gray);

    let gray = export_image(&paths)?;
    println!(
        "{} ({}x{}) -> {}, {}",
        paths.input_image.display(),
        gray.width(),
        gray.height(),
        paths.export_matrix.display(),
        paths.export_gray_image.display()
    );

    Ok(())
}
