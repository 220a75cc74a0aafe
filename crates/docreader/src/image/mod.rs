//! Image decoding and OCR preprocessing.

pub mod preprocessing;

pub use preprocessing::{
    ADAPTIVE_BLOCK_SIZE, ADAPTIVE_OFFSET, MEDIAN_RADIUS, adaptive_threshold_gaussian, decode_image, preprocess,
};
