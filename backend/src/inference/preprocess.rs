//! Image preprocessing for the CNN
//!
//! Uploads are decoded, converted to 8-bit RGB, resized to 128×128 and scaled
//! to [0, 1] in NHWC order with a batch dimension of one.

use image::{imageops::FilterType, DynamicImage, ImageError, RgbImage};
use shared::{IMAGE_SIZE, IMAGE_TENSOR_SHAPE};

use crate::error::PredictionError;

/// Normalized CNN input, `[1, 128, 128, 3]` row-major
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn shape(&self) -> [usize; 4] {
        IMAGE_TENSOR_SHAPE
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Build from a tensor-shaped buffer; `None` when the length is wrong
    pub fn from_vec(data: Vec<f32>) -> Option<Self> {
        let expected: usize = IMAGE_TENSOR_SHAPE.iter().product();
        (data.len() == expected).then_some(Self { data })
    }

    fn from_rgb(rgb: &RgbImage) -> Self {
        let data = rgb.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect();
        Self { data }
    }
}

/// Decode an upload; fails on unknown, unsupported or corrupt data
pub fn decode_upload(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes)
}

/// Decode raw upload bytes and normalize them
pub fn prepare_upload(bytes: &[u8]) -> Result<ImageTensor, PredictionError> {
    let image = decode_upload(bytes).map_err(|e| {
        tracing::error!("Image decode failed: {}", e);
        PredictionError::ImagePreparation(e.to_string())
    })?;
    Ok(prepare_image(&image))
}

/// Normalize an already-decoded image
pub fn prepare_image(image: &DynamicImage) -> ImageTensor {
    let rgb = image.to_rgb8();
    let rgb = if rgb.dimensions() == (IMAGE_SIZE, IMAGE_SIZE) {
        rgb
    } else {
        image::imageops::resize(&rgb, IMAGE_SIZE, IMAGE_SIZE, FilterType::CatmullRom)
    };
    ImageTensor::from_rgb(&rgb)
}
