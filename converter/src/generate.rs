//! Random matrix/kernel fixture generation.
//!
//! A fixture is one matrix file holding a random matrix block followed by a
//! random kernel block, named after its four dimensions. Fixtures are never
//! overwritten: the file is opened with exclusive create, so an existing
//! fixture turns the call into a no-op that still reports the name.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

use crate::grid::{write_random_grid, GridShape};

/// Errors from fixture generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid dimensions {0}: every dimension must be a positive integer")]
    InvalidDimensions(FixtureSpec),
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The four requested dimensions, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSpec {
    pub matrix_lines: usize,
    pub matrix_columns: usize,
    pub kernel_lines: usize,
    pub kernel_columns: usize,
}

impl FixtureSpec {
    pub fn new(
        matrix_lines: usize,
        matrix_columns: usize,
        kernel_lines: usize,
        kernel_columns: usize,
    ) -> Self {
        Self {
            matrix_lines,
            matrix_columns,
            kernel_lines,
            kernel_columns,
        }
    }

    /// `matrix_<ml>_<mc>_kernel_<kl>_<kc>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "matrix_{}_{}_kernel_{}_{}.txt",
            self.matrix_lines, self.matrix_columns, self.kernel_lines, self.kernel_columns
        )
    }

    /// Matrix and kernel shapes, or an error if any dimension is zero.
    pub fn shapes(&self) -> Result<(GridShape, GridShape), GenerateError> {
        let matrix = GridShape::new(self.matrix_lines, self.matrix_columns);
        let kernel = GridShape::new(self.kernel_lines, self.kernel_columns);
        match (matrix, kernel) {
            (Some(matrix), Some(kernel)) => Ok((matrix, kernel)),
            _ => Err(GenerateError::InvalidDimensions(*self)),
        }
    }
}

impl fmt::Display for FixtureSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} matrix, {}x{} kernel",
            self.matrix_lines, self.matrix_columns, self.kernel_lines, self.kernel_columns
        )
    }
}

/// Result of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fixture {
    /// A new file was written
    Created(PathBuf),
    /// A file with this name was already present and left untouched
    Existing(PathBuf),
}

impl Fixture {
    pub fn path(&self) -> &Path {
        match self {
            Fixture::Created(path) | Fixture::Existing(path) => path,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Fixture::Created(_))
    }
}

/// Create the fixture for `spec` inside `dir`, drawing cells from `rng`.
///
/// Dimensions are validated before touching the filesystem. If the file
/// already exists nothing is written and `rng` is not advanced.
pub fn generate_fixture<R: Rng + ?Sized>(
    dir: &Path,
    spec: FixtureSpec,
    rng: &mut R,
) -> Result<Fixture, GenerateError> {
    let (matrix, kernel) = spec.shapes()?;
    let path = dir.join(spec.file_name());

    let fixture = create_exclusive(path, |file| write_blocks(file, matrix, kernel, rng))?;
    if fixture.was_created() {
        log::info!("Wrote fixture {} ({spec})", fixture.path().display());
    }
    Ok(fixture)
}

/// Create `path` only if it does not exist yet and fill it with `write`.
///
/// A failed write removes the file again so a later run starts clean
/// instead of treating the partial file as an existing fixture.
fn create_exclusive<F>(path: PathBuf, write: F) -> Result<Fixture, GenerateError>
where
    F: FnOnce(File) -> io::Result<()>,
{
    let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            log::info!("Fixture {} already exists, leaving it in place", path.display());
            return Ok(Fixture::Existing(path));
        }
        Err(source) => return Err(GenerateError::Io { path, source }),
    };

    if let Err(source) = write(file) {
        if let Err(e) = std::fs::remove_file(&path) {
            log::warn!("Failed to remove partial fixture {}: {e}", path.display());
        }
        return Err(GenerateError::Io { path, source });
    }

    Ok(Fixture::Created(path))
}

fn write_blocks<R: Rng + ?Sized>(
    file: File,
    matrix: GridShape,
    kernel: GridShape,
    rng: &mut R,
) -> io::Result<()> {
    let mut out = BufWriter::new(file);
    write_random_grid(&mut out, matrix, rng)?;
    write_random_grid(&mut out, kernel, rng)?;
    out.flush()
}
