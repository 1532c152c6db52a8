#![allow(dead_code)]

use std::io::Write;

use image::{DynamicImage, ImageBuffer, Rgb};
use ssdview::engine::RawOutput;
use ssdview::models::BoundingBox;
use tempfile::NamedTempFile;

/// Creates a gradient test image so that annotations are distinguishable
/// from the background everywhere.
pub fn test_image(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 64u8])
    });
    DynamicImage::ImageRgb8(img)
}

/// One SSD output row: `(batch, class, confidence, xmin, ymin, xmax, ymax)`.
pub fn ssd_row(class_id: f32, confidence: f32, corners: [f32; 4]) -> [f32; 7] {
    [
        0.0, class_id, confidence, corners[0], corners[1], corners[2], corners[3],
    ]
}

/// Packs rows into the raw output a forward pass would yield, with the
/// usual `[1, 1, N, 7]` shape.
pub fn raw_output(rows: &[[f32; 7]]) -> RawOutput {
    RawOutput {
        shape: vec![1, 1, rows.len() as i64, 7],
        data: rows.concat(),
    }
}

/// Writes a class-names file, one name per line.
/// The file is cleaned up when the returned handle drops.
pub fn class_file(names: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("Failed to create temp class file");
    for name in names {
        writeln!(file, "{name}").expect("Failed to write class name");
    }
    file.flush().expect("Failed to flush class file");
    file
}

pub fn bbox(x: u32, y: u32, width: u32, height: u32) -> BoundingBox {
    BoundingBox {
        x,
        y,
        width,
        height,
    }
}
