pub mod blob;
pub mod nms;

use image::DynamicImage;
use tracing::debug;

use crate::classes::ClassNameTable;
use crate::engine::{RawOutput, SsdNetwork};
use crate::error::DnnError;
use crate::models::{BoundingBox, Detection};

/// Width of one SSD output row:
/// `(batch_id, class_id, confidence, xmin, ymin, xmax, ymax)`.
pub const OUTPUT_ROW_LEN: usize = 7;

/// A decoded output row that survived thresholding and clamping, before
/// non-max suppression and name resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub class_id: u32,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// The detection pipeline with its fixed thresholds.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    pub confidence_threshold: f32,
    pub nms_threshold: f32,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.4,
            nms_threshold: 0.4,
        }
    }
}

impl Detector {
    /// Runs one full pass: blob, forward, decode, NMS, name resolution.
    ///
    /// Either returns the complete detection list or an error; no partial
    /// list is ever produced.
    pub fn detect(
        &self,
        image: &DynamicImage,
        network: &mut SsdNetwork,
        classes: &ClassNameTable,
    ) -> Result<Vec<Detection>, DnnError> {
        let input = blob::blob_from_image(image);
        let output = network.forward(input)?;
        self.interpret(&output, image.width(), image.height(), classes)
    }

    /// Turns a raw forward-pass output into the final detection list:
    /// shape check, decode, NMS, class-name resolution.
    pub fn interpret(
        &self,
        output: &RawOutput,
        image_width: u32,
        image_height: u32,
        classes: &ClassNameTable,
    ) -> Result<Vec<Detection>, DnnError> {
        if output.shape.last().copied() != Some(OUTPUT_ROW_LEN as i64) {
            return Err(DnnError::Inference(format!(
                "unexpected output shape {:?}, expected trailing dimension {}",
                output.shape, OUTPUT_ROW_LEN
            )));
        }

        let candidates = decode_output(
            &output.data,
            image_width,
            image_height,
            self.confidence_threshold,
        );
        debug!(candidates = candidates.len(), "decoded output rows");

        let boxes: Vec<BoundingBox> = candidates.iter().map(|c| c.bbox).collect();
        let scores: Vec<f32> = candidates.iter().map(|c| c.confidence).collect();
        let kept = nms::nms_indices(
            &boxes,
            &scores,
            self.confidence_threshold,
            self.nms_threshold,
        );
        debug!(kept = kept.len(), "non-max suppression done");

        Ok(kept
            .into_iter()
            .map(|index| {
                let candidate = &candidates[index];
                Detection {
                    class_id: candidate.class_id,
                    confidence: candidate.confidence,
                    bbox: candidate.bbox,
                    class_name: classes.resolve(candidate.class_id),
                }
            })
            .collect())
    }
}

/// Decodes flat SSD output rows into clamped pixel-space candidates.
///
/// Coordinates are normalized against the original image size, truncated to
/// integers, the origin clamped to zero and the extent capped to what
/// remains of the image. Rows at or below the confidence threshold and rows
/// whose clamped box has no area are dropped.
pub fn decode_output(
    data: &[f32],
    image_width: u32,
    image_height: u32,
    confidence_threshold: f32,
) -> Vec<Candidate> {
    let img_w = image_width as f32;
    let img_h = image_height as f32;
    let mut candidates = Vec::new();

    for row in data.chunks_exact(OUTPUT_ROW_LEN) {
        let confidence = row[2];
        if confidence <= confidence_threshold {
            continue;
        }

        let x_min = row[3] * img_w;
        let y_min = row[4] * img_h;
        let x_max = row[5] * img_w;
        let y_max = row[6] * img_h;

        // Width and height come from the raw corners before the origin is
        // clamped, then get capped to the remaining extent of the image.
        let x = (x_min as i32).max(0);
        let y = (y_min as i32).max(0);
        let width = ((x_max - x_min) as i32).min(image_width as i32 - x);
        let height = ((y_max - y_min) as i32).min(image_height as i32 - y);

        if width <= 0 || height <= 0 {
            continue;
        }

        candidates.push(Candidate {
            class_id: (row[1] as i32).max(0) as u32,
            confidence,
            bbox: BoundingBox {
                x: x as u32,
                y: y as u32,
                width: width as u32,
                height: height as u32,
            },
        });
    }

    candidates
}
