//! Prepares the square model input crop and maps detections back into the source image.

use anyhow::{bail, Result};
use fast_image_resize::{FilterType, ResizeAlg, ResizeOptions, Resizer};
use image::{imageops, DynamicImage, GenericImageView};
use ndarray::Array4;
use serde::{Deserialize, Serialize};
use crate::common::{Detection, Rect};

/// Square region of the source image fed to the model.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub size: u32,
}

impl CropRegion {
    pub fn new(left: u32, top: u32, size: u32) -> Self {
        Self { left, top, size }
    }

    /// Largest square centered in a `width x height` image.
    pub fn centered(width: u32, height: u32) -> Self {
        let size = width.min(height);
        Self {
            left: (width - size) / 2,
            top: (height - size) / 2,
            size,
        }
    }

    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.size > 0
            && self.left.saturating_add(self.size) <= width
            && self.top.saturating_add(self.size) <= height
    }

    /// Maps a detection expressed in `input_size x input_size` model pixels to source-image pixels.
    pub fn map_detection(&self, detection: &Detection, input_size: u32) -> Detection {
        let ratio = self.size as f32 / input_size as f32;
        let rect = detection.rect;
        Detection {
            rect: Rect::new(
                self.left as f32 + rect.x * ratio,
                self.top as f32 + rect.y * ratio,
                rect.width * ratio,
                rect.height * ratio,
            ),
            ..detection.clone()
        }
    }
}

/// Crops `crop` out of `image`, resizes it to `input_size` and normalizes RGB to `[0, 1]`.
///
/// Returns an NHWC tensor of shape `[1, input_size, input_size, 3]`.
pub fn prepare_input(image: &DynamicImage, crop: &CropRegion, input_size: u32) -> Result<Array4<f32>> {
    let (width, height) = image.dimensions();
    if !crop.fits(width, height) {
        bail!("Crop {:?} does not fit inside a {}x{} image", crop, width, height);
    }
    if input_size == 0 {
        bail!("Model input size must be greater than zero");
    }

    let src = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut dst = DynamicImage::new_rgb8(input_size, input_size);

    let options = ResizeOptions::new()
        .resize_alg(ResizeAlg::Convolution(FilterType::Bilinear))
        .crop(crop.left as f64, crop.top as f64, crop.size as f64, crop.size as f64);

    let mut resizer = Resizer::new();
    if let Err(err) = resizer.resize(&src, &mut dst, &options) {
        log::warn!("Failed to use `fast_image_resize` ({}). Falling back.", err);
        let cropped = imageops::crop_imm(&src, crop.left, crop.top, crop.size, crop.size).to_image();
        dst = imageops::resize(&cropped, input_size, input_size, imageops::FilterType::Triangle).into();
    }

    normalize(&dst)
}

fn normalize(img: &DynamicImage) -> Result<Array4<f32>> {
    let (w, h) = img.dimensions();
    let buf = img.to_rgb8().into_raw();
    if buf.len() != (w * h * 3) as usize {
        bail!("Unexpected buffer size: got {}, expected {}", buf.len(), w * h * 3);
    }

    let float_data: Vec<f32> = buf.iter().map(|&v| v as f32 / 255.0).collect();
    Ok(Array4::from_shape_vec((1, h as usize, w as usize, 3), float_data)?)
}
