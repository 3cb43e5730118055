//! Grid shapes and the text writer shared by every matrix file producer.
//!
//! A block in a matrix file is a header line `"<lines> <columns>"`, then
//! `lines` rows of `columns` space-separated cells, then one blank line.
//! Blocks are concatenated to build a file (matrix followed by kernel).

use std::fmt::{self, Display};
use std::io::{self, Write};

use ndarray::Array2;
use rand::Rng;

/// Dimensions of a grid block, rows first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of rows
    pub lines: usize,
    /// Number of cells per row
    pub columns: usize,
}

impl GridShape {
    /// Create a shape, rejecting empty dimensions.
    pub fn new(lines: usize, columns: usize) -> Option<Self> {
        if lines == 0 || columns == 0 {
            return None;
        }
        Some(Self { lines, columns })
    }

    /// Shape of an existing array, `None` when either axis is empty.
    pub fn of<T>(grid: &Array2<T>) -> Option<Self> {
        let (lines, columns) = grid.dim();
        Self::new(lines, columns)
    }

    /// Total number of cells, `None` if it does not fit in `usize`
    pub fn cell_count(&self) -> Option<usize> {
        self.lines.checked_mul(self.columns)
    }
}

impl Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.lines, self.columns)
    }
}

/// Write one header line for `shape`.
pub fn write_header<W: Write + ?Sized>(sink: &mut W, shape: GridShape) -> io::Result<()> {
    writeln!(sink, "{shape}")
}

/// Write one space-separated row of cells.
fn write_row<W, I>(sink: &mut W, cells: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: Display,
{
    let mut first = true;
    for cell in cells {
        if first {
            write!(sink, "{cell}")?;
            first = false;
        } else {
            write!(sink, " {cell}")?;
        }
    }
    writeln!(sink)
}

/// Write a complete block for `grid`: header, rows in raster order, blank line.
///
/// Cells are rendered with their `Display` impl, so `u8` grids come out as
/// plain integers and `f64` grids keep their shortest round-trip form.
///
/// A grid with an empty axis is rejected with `InvalidInput` before
/// anything is written.
pub fn write_grid<W, T>(sink: &mut W, grid: &Array2<T>) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Display,
{
    let shape = GridShape::of(grid).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "grid blocks need at least one row and column",
        )
    })?;
    write_header(sink, shape)?;
    for row in grid.rows() {
        write_row(sink, row.iter())?;
    }
    writeln!(sink)
}

/// Write a block of cells drawn uniformly from `[0, 255]`.
///
/// Each cell is sampled independently from `rng`. The generator is borrowed,
/// not reseeded, so consecutive blocks in one file stay independent.
pub fn write_random_grid<W, R>(sink: &mut W, shape: GridShape, rng: &mut R) -> io::Result<()>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
{
    write_header(sink, shape)?;
    for _ in 0..shape.lines {
        write_row(sink, (0..shape.columns).map(|_| rng.random_range(0..=255u8)))?;
    }
    writeln!(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_shape_rejects_zero() {
        assert!(GridShape::new(0, 3).is_none());
        assert!(GridShape::new(3, 0).is_none());
        assert_eq!(
            GridShape::new(1, 1),
            Some(GridShape {
                lines: 1,
                columns: 1
            })
        );
    }

    #[test]
    fn test_cell_count_overflow() {
        assert_eq!(GridShape::new(3, 4).unwrap().cell_count(), Some(12));
        assert_eq!(GridShape::new(usize::MAX, 2).unwrap().cell_count(), None);
    }

    #[test]
    fn test_write_grid_layout() {
        let grid = array![[1u8, 2, 3], [4, 5, 6]];
        let text = render(|buf| write_grid(buf, &grid));
        assert_eq!(text, "2 3\n1 2 3\n4 5 6\n\n");
    }

    #[test]
    fn test_write_grid_floats_keep_literal_digits() {
        let grid = array![[0.00000067f64, 0.22508352]];
        let text = render(|buf| write_grid(buf, &grid));
        assert_eq!(text, "1 2\n0.00000067 0.22508352\n\n");
    }

    #[test]
    fn test_write_grid_rejects_empty() {
        let grid = Array2::<u8>::zeros((0, 4));
        let mut buf = Vec::new();
        let err = write_grid(&mut buf, &grid).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_random_grid_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let shape = GridShape::new(4, 9).unwrap();
        let text = render(|buf| write_random_grid(buf, shape, &mut rng));

        let lines: Vec<&str> = text.split('\n').collect();
        // header + 4 rows + blank line + trailing empty split
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "4 9");
        for row in &lines[1..5] {
            let cells: Vec<u16> = row.split(' ').map(|t| t.parse().unwrap()).collect();
            assert_eq!(cells.len(), 9);
            assert!(cells.iter().all(|&c| c <= 255));
        }
        assert_eq!(lines[5], "");
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_random_grid_single_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let shape = GridShape::new(1, 1).unwrap();
        let text = render(|buf| write_random_grid(buf, shape, &mut rng));
        let mut parts = text.lines();
        assert_eq!(parts.next(), Some("1 1"));
        let cell: u16 = parts.next().unwrap().parse().unwrap();
        assert!(cell <= 255);
        assert_eq!(parts.next(), Some(""));
        assert_eq!(parts.next(), None);
    }

    #[test]
    fn test_rng_not_reset_between_blocks() {
        let shape = GridShape::new(8, 8).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let first = render(|buf| write_random_grid(buf, shape, &mut rng));
        let second = render(|buf| write_random_grid(buf, shape, &mut rng));
        assert_ne!(first, second);

        let mut replay = StdRng::seed_from_u64(99);
        let again = render(|buf| write_random_grid(buf, shape, &mut replay));
        assert_eq!(first, again);
    }

    #[test]
    fn test_sink_errors_propagate() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut rng = StdRng::seed_from_u64(3);
        let shape = GridShape::new(2, 2).unwrap();
        let err = write_random_grid(&mut Broken, shape, &mut rng).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
