//! The fixed 7x7 Gaussian blur kernel appended to every exported image.
//!
//! Downstream convolution code reads this table straight out of the matrix
//! file, so the weights are literals and must not be recomputed. Note the
//! `0.000191117` at row 2, column 0; the mirrored cells read `0.00019117`.

use std::io::{self, Write};

use ndarray::Array2;

use crate::grid::write_grid;

/// Side length of [`GAUSSIAN_7X7`]
pub const KERNEL_SIZE: usize = 7;

/// Discretized 2-D Gaussian weights, center 0.22508352.
#[rustfmt::skip]
pub const GAUSSIAN_7X7: [[f64; KERNEL_SIZE]; KERNEL_SIZE] = [
    [0.00000067, 0.00002292, 0.00019117, 0.00038771, 0.00019117, 0.00002292, 0.00000067],
    [0.00002292, 0.00078633, 0.00655965, 0.01330373, 0.00655965, 0.00078633, 0.00002292],
    [0.000191117, 0.00655965, 0.05472157, 0.11098164, 0.05472157, 0.00655965, 0.00019117],
    [0.00038771, 0.01330373, 0.11098164, 0.22508352, 0.11098164, 0.01330373, 0.00038771],
    [0.00019117, 0.00655965, 0.05472157, 0.11098164, 0.05472157, 0.00655965, 0.00019117],
    [0.00002292, 0.00078633, 0.00655965, 0.01330373, 0.00655965, 0.00078633, 0.00002292],
    [0.00000067, 0.00002292, 0.00019117, 0.00038771, 0.00019117, 0.00002292, 0.00000067],
];

/// The kernel as an array, shape (7, 7).
pub fn gaussian_kernel() -> Array2<f64> {
    Array2::from_shape_fn((KERNEL_SIZE, KERNEL_SIZE), |(y, x)| GAUSSIAN_7X7[y][x])
}

/// Append the kernel block (header `7 7`) to `sink`.
pub fn write_kernel<W: Write + ?Sized>(sink: &mut W) -> io::Result<()> {
    write_grid(sink, &gaussian_kernel())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kernel_sums_to_one() {
        assert_abs_diff_eq!(gaussian_kernel().sum(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_kernel_peak_at_center() {
        let kernel = gaussian_kernel();
        let peak = kernel.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(peak, 0.22508352);
        assert_eq!(kernel[[3, 3]], peak);
    }

    #[test]
    fn test_kernel_text_is_verbatim() {
        let mut buf = Vec::new();
        write_kernel(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "7 7");
        assert_eq!(
            lines[3],
            "0.000191117 0.00655965 0.05472157 0.11098164 0.05472157 0.00655965 0.00019117"
        );
        assert_eq!(
            lines[4],
            "0.00038771 0.01330373 0.11098164 0.22508352 0.11098164 0.01330373 0.00038771"
        );
        assert_eq!(
            lines[7],
            "0.00000067 0.00002292 0.00019117 0.00038771 0.00019117 0.00002292 0.00000067"
        );
        assert_eq!(lines[8], "");
        assert_eq!(lines.len(), 9);
    }
}
