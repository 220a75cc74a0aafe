//! Page preprocessing ahead of OCR.
//!
//! Scanned and photographed pages are turned into a clean binary image:
//!
//! 1. luma conversion
//! 2. 3×3 median filter against salt-and-pepper scan noise
//! 3. Gaussian-weighted adaptive threshold over an 11×11 neighborhood
//!
//! The threshold follows the usual definition: a pixel becomes white when it is brighter
//! than the Gaussian-weighted mean of its neighborhood minus a constant offset. Borders
//! replicate the edge pixels.

use crate::error::{DocReaderError, Result};
use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::median_filter;

/// Side of the square neighborhood used by the adaptive threshold.
pub const ADAPTIVE_BLOCK_SIZE: u32 = 11;

/// Constant subtracted from the weighted local mean.
pub const ADAPTIVE_OFFSET: i32 = 2;

/// Radius of the median filter (radius 1 is a 3×3 window).
pub const MEDIAN_RADIUS: u32 = 1;

/// Decode an uploaded image.
///
/// # Errors
///
/// Returns [`DocReaderError::ImageProcessing`] when the bytes are not a decodable image.
/// This is a hard failure: unlike OCR errors it is not recovered by the image extractor.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| DocReaderError::image_processing_with_source("Failed to decode image", e))
}

/// Produce the binary page handed to the OCR backend.
///
/// The output has the same dimensions as the input and contains only `0` and `255`.
pub fn preprocess(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let denoised = median_filter(&gray, MEDIAN_RADIUS, MEDIAN_RADIUS);
    adaptive_threshold_gaussian(&denoised, ADAPTIVE_BLOCK_SIZE, ADAPTIVE_OFFSET)
}

/// Gaussian adaptive threshold.
///
/// `block_size` must be odd; even values are bumped to the next odd size. Sigma is
/// derived from the block size the same way OpenCV does for its Gaussian kernels.
pub fn adaptive_threshold_gaussian(image: &GrayImage, block_size: u32, offset: i32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return GrayImage::new(width, height);
    }

    let block_size = if block_size % 2 == 0 { block_size + 1 } else { block_size.max(1) };
    let kernel = gaussian_kernel(block_size);
    let radius = (block_size / 2) as i64;

    let w = width as usize;
    let h = height as usize;
    let src = image.as_raw();

    // Separable blur: horizontal pass into `row_pass`, vertical pass reads from it.
    let mut row_pass = vec![0.0f64; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = clamp_index(x as i64 + k as i64 - radius, w);
                acc += weight * f64::from(src[y * w + sx]);
            }
            row_pass[y * w + x] = acc;
        }
    }

    let mut output = GrayImage::new(width, height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = clamp_index(y as i64 + k as i64 - radius, h);
                acc += weight * row_pass[sy * w + x];
            }
            let mean = acc.round().clamp(0.0, 255.0) as i32;
            let pixel = i32::from(src[y * w + x]);
            let value = if pixel > mean - offset { 255 } else { 0 };
            output.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }

    output
}

fn gaussian_kernel(size: u32) -> Vec<f64> {
    let sigma = 0.3 * ((f64::from(size) - 1.0) * 0.5 - 1.0) + 0.8;
    let center = f64::from(size / 2);
    let scale = -0.5 / (sigma * sigma);

    let mut kernel: Vec<f64> = (0..size)
        .map(|i| {
            let d = f64::from(i) - center;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}

#[inline]
fn clamp_index(index: i64, len: usize) -> usize {
    index.clamp(0, len as i64 - 1) as usize
}
