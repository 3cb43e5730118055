//! Generate a random matrix + kernel fixture for the convolution benchmark.
//!
//! Writes `matrix_<ml>_<mc>_kernel_<kl>_<kc>.txt` holding a random matrix
//! block followed by a random kernel block, each cell in [0, 255]. If the
//! file already exists it is left alone. The file name is printed either way.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_matrix -- 1024 1024 7 7
//! ```

use clap::Parser;
use converter::{generate_fixture, FixtureSpec};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "generate_matrix",
    about = "Generate a random matrix/kernel fixture file",
    long_about = None
)]
struct Args {
    /// Number of rows in the matrix
    matrix_lines: NonZeroUsize,

    /// Number of columns in the matrix
    matrix_columns: NonZeroUsize,

    /// Number of rows in the kernel
    kernel_lines: NonZeroUsize,

    /// Number of columns in the kernel
    kernel_columns: NonZeroUsize,

    /// Directory to create the fixture in
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let spec = FixtureSpec::new(
        args.matrix_lines.get(),
        args.matrix_columns.get(),
        args.kernel_lines.get(),
        args.kernel_columns.get(),
    );
    let fixture = generate_fixture(&args.dir, spec, &mut rand::rng())?;

    // Only the bare name, matching what the benchmark scripts capture.
    let name = fixture
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| spec.file_name());
    println!("{name}");

    Ok(())
}
