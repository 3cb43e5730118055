//! Conversions between `ndarray` grids and `image::GrayImage`.
//!
//! Arrays are indexed `[y, x]` with shape (height, width); images are
//! addressed `(x, y)` with dimensions (width, height).

use image::{GrayImage, Luma};
use ndarray::Array2;

/// Converts an ndarray Array2<u8> to an image::GrayImage
///
/// Array indices [y, x] map to pixel coordinates (x, y).
///
/// # Arguments
/// * `arr` - Reference to an Array2<u8> containing grayscale pixel values
///
/// # Returns
/// * A new GrayImage containing the same data as the input array
pub fn array2_to_gray_image(arr: &Array2<u8>) -> GrayImage {
    let (height, width) = arr.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([arr[[y as usize, x as usize]]])
    })
}

/// Converts a GrayImage into an Array2<u8> of shape (height, width).
///
/// Rows of the array follow the image's raster scan order.
pub fn gray_image_to_array2(img: &GrayImage) -> Array2<u8> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        img.get_pixel(x as u32, y as u32)[0]
    })
}

/// Map a floating point intensity onto the 8-bit range.
///
/// Values are rounded to the nearest integer (halves away from zero) and
/// clamped to [0, 255]. NaN becomes 0.
pub fn quantize_intensity(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Quantize a float grid with [`quantize_intensity`].
pub fn quantize_grid(grid: &Array2<f64>) -> Array2<u8> {
    grid.mapv(quantize_intensity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_array_to_image_orientation() {
        let arr = array![[1u8, 2, 3], [4, 5, 6]];
        let img = array2_to_gray_image(&arr);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 0)[0], 3);
        assert_eq!(img.get_pixel(0, 1)[0], 4);
    }

    #[test]
    fn test_image_array_round_trip() {
        let img = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 40 + y) as u8]));
        let arr = gray_image_to_array2(&img);
        assert_eq!(arr.dim(), (3, 5));
        assert_eq!(arr[[2, 4]], 162);
        assert_eq!(array2_to_gray_image(&arr), img);
    }

    #[test]
    fn test_quantize_rounds_and_clamps() {
        assert_eq!(quantize_intensity(-12.0), 0);
        assert_eq!(quantize_intensity(0.49), 0);
        assert_eq!(quantize_intensity(0.5), 1);
        assert_eq!(quantize_intensity(127.6), 128);
        assert_eq!(quantize_intensity(255.4), 255);
        assert_eq!(quantize_intensity(1e9), 255);
        assert_eq!(quantize_intensity(f64::NAN), 0);
        assert_eq!(quantize_intensity(f64::INFINITY), 255);
    }

    #[test]
    fn test_quantize_grid_shape() {
        let grid = array![[0.2, 300.0], [-4.0, 99.5]];
        assert_eq!(quantize_grid(&grid), array![[0u8, 255], [0, 100]]);
    }
}
