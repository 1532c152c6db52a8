use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::debug;

use crate::models::{BoundingBox, Detection};

/// Box colors, picked by `class_id % 5`: red, blue, yellow, purple, teal.
pub const PALETTE: [Rgb<u8>; 5] = [
    Rgb([255, 0, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 255, 0]),
    Rgb([128, 0, 128]),
    Rgb([0, 128, 128]),
];

/// Fixed summary shown when a detect run finds nothing above threshold.
pub const NO_DETECTIONS_SUMMARY: &str = "Detection results:\nNo objects detected above threshold";

/// Results-panel placeholder before the first detect run.
pub const IDLE_SUMMARY: &str = "Detection results:\nNo detections yet";

// Label plate geometry. Glyph metrics are estimated per character so the
// plate size is deterministic whether or not a font resolved.
const LABEL_FONT_SIZE: f32 = 16.0;
const LABEL_TEXT_HEIGHT: u32 = 16;
const LABEL_CHAR_WIDTH: f32 = 8.0;
const LABEL_VERTICAL_PAD: u32 = 4;
const LABEL_GAP: i32 = 5;

// Font files probed at startup; the first one that parses wins.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-fonts/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn class_color(class_id: u32) -> Rgb<u8> {
    PALETTE[class_id as usize % PALETTE.len()]
}

/// `"{name}: {confidence}%"` with one decimal, e.g. `dog: 90.0%`.
pub fn label_text(detection: &Detection) -> String {
    format!(
        "{}: {:.1}%",
        detection.class_name,
        detection.confidence * 100.0
    )
}

/// Top-left corner of the label plate: above the box, unless that would
/// clip off the top of the image, in which case below it.
pub fn label_origin(bbox: &BoundingBox, plate_height: u32) -> (i32, i32) {
    let above = bbox.y as i32 - plate_height as i32 - LABEL_GAP;
    if above < 0 {
        (bbox.x as i32, bbox.bottom() as i32 + LABEL_GAP)
    } else {
        (bbox.x as i32, above)
    }
}

/// Human-readable results text: a count header plus one line per detection,
/// or the fixed no-objects message.
pub fn summary(detections: &[Detection]) -> String {
    if detections.is_empty() {
        return NO_DETECTIONS_SUMMARY.to_string();
    }

    let mut text = format!("Detection results:\nFound {} objects:", detections.len());
    for detection in detections {
        text.push_str("\n- ");
        text.push_str(&label_text(detection));
    }
    text
}

/// Draws detection overlays onto copies of the source image.
pub struct Renderer {
    font: Option<FontVec>,
}

impl Renderer {
    /// Probes the system font paths once; label plates render without
    /// glyphs when nothing resolves.
    pub fn new() -> Self {
        let font = FONT_PATHS
            .iter()
            .find_map(|path| std::fs::read(path).ok())
            .and_then(|bytes| FontVec::try_from_vec(bytes).ok());
        if font.is_none() {
            debug!("no label font found, plates will render without text");
        }
        Self { font }
    }

    pub fn with_font(font: Option<FontVec>) -> Self {
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Returns an annotated copy of the source image; the source itself and
    /// the detection list are left untouched.
    pub fn annotate(&self, source: &DynamicImage, detections: &[Detection]) -> RgbImage {
        let mut canvas = source.to_rgb8();
        for detection in detections {
            let color = class_color(detection.class_id);
            draw_box(&mut canvas, &detection.bbox, color);
            self.draw_label(&mut canvas, detection, color);
        }
        canvas
    }

    fn draw_label(&self, canvas: &mut RgbImage, detection: &Detection, color: Rgb<u8>) {
        let text = label_text(detection);
        let text_width = (text.len() as f32 * LABEL_CHAR_WIDTH) as u32;
        let plate_height = LABEL_TEXT_HEIGHT + LABEL_VERTICAL_PAD;
        let (x, y) = label_origin(&detection.bbox, plate_height);

        let available = canvas.width() as i32 - x;
        let plate_width = (text_width as i32).min(available);
        if plate_width <= 0 {
            return;
        }

        let plate = Rect::at(x, y).of_size(plate_width as u32, plate_height);
        draw_filled_rect_mut(canvas, plate, color);

        if let Some(font) = &self.font {
            let scale = PxScale::from(LABEL_FONT_SIZE);
            let text_color = Rgb([0u8, 0u8, 0u8]);
            draw_text_mut(
                canvas,
                text_color,
                x,
                y + LABEL_VERTICAL_PAD as i32 / 2,
                scale,
                font,
                &text,
            );
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// 2-pixel border: a hollow rect plus one inset by a pixel.
fn draw_box(canvas: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>) {
    let outer = Rect::at(bbox.x as i32, bbox.y as i32).of_size(bbox.width, bbox.height);
    draw_hollow_rect_mut(canvas, outer, color);

    if bbox.width > 2 && bbox.height > 2 {
        let inner = Rect::at(bbox.x as i32 + 1, bbox.y as i32 + 1)
            .of_size(bbox.width - 2, bbox.height - 2);
        draw_hollow_rect_mut(canvas, inner, color);
    }
}
