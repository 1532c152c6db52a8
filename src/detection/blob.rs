use image::{DynamicImage, imageops::FilterType};
use ndarray::Array4;

/// Fixed network input edge for the SSD family.
pub const INPUT_SIZE: u32 = 300;

/// Per-channel mean subtracted before scaling.
pub const MEAN: f32 = 127.5;

/// Scale factor applied after mean subtraction.
pub const SCALE: f32 = 0.1;

/// Builds the fixed-size NCHW input blob for an SSD forward pass.
///
/// The image is resized to 300x300 with bilinear filtering, then each
/// channel value becomes `(v - 127.5) * 0.1`. Planes are ordered R, G, B;
/// the decoder already hands us RGB so no channel swap is needed.
pub fn blob_from_image(image: &DynamicImage) -> Array4<f32> {
    let size = INPUT_SIZE as usize;
    let resized = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();

    let mut blob = Array4::<f32>::zeros((1, 3, size, size));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            blob[[0, channel, y as usize, x as usize]] =
                (pixel[channel] as f32 - MEAN) * SCALE;
        }
    }
    blob
}
