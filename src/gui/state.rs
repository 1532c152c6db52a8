use std::path::Path;

use image::{DynamicImage, ImageReader, RgbImage};
use tracing::warn;

use crate::classes::ClassNameTable;
use crate::detection::Detector;
use crate::engine::SsdNetwork;
use crate::models::Detection;
use crate::render::{self, Renderer};

/// All shared application state, owned by the UI shell and mutated only from
/// action handlers. Each action method applies one user action, appends its
/// outcome to the log, and reports whether anything on screen changed.
pub struct AppState {
    /// Pristine decoded source image; never drawn on.
    pub source: Option<DynamicImage>,
    /// Working copy shown on screen, re-derived from `source`.
    pub display: Option<RgbImage>,
    pub classes: ClassNameTable,
    pub network: Option<SsdNetwork>,
    pub detector: Detector,
    pub renderer: Renderer,
    pub detections: Vec<Detection>,
    pub results_text: String,
    /// Append-only log shown in the UI.
    pub log: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        let mut state = Self {
            source: None,
            display: None,
            classes: ClassNameTable::empty(),
            network: None,
            detector: Detector::default(),
            renderer: Renderer::new(),
            detections: Vec::new(),
            results_text: render::IDLE_SUMMARY.to_string(),
            log: Vec::new(),
        };
        state.push_log(format!("ssdview {}", env!("CARGO_PKG_VERSION")));
        state.push_log("Inference runtime ready (ONNX Runtime).");
        state.push_log("Ready to load images and SSD detection models.");
        state.push_log(
            "Supported formats: TensorFlow (.pb), ONNX (.onnx), \
             Caffe (.caffemodel + .prototxt), Torch (.t7)",
        );
        state
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn can_detect(&self) -> bool {
        self.source.is_some() && self.network.is_some()
    }

    pub fn can_reset(&self) -> bool {
        self.source.is_some()
    }

    /// Decodes an image file; on success replaces both the source and the
    /// display copy, on failure leaves prior state untouched.
    pub fn load_image(&mut self, path: &Path) -> bool {
        let decoded = ImageReader::open(path)
            .map_err(image::ImageError::IoError)
            .and_then(|reader| reader.decode());
        match decoded {
            Ok(img) => {
                self.display = Some(img.to_rgb8());
                self.source = Some(img);
                self.push_log(format!("Image loaded: {}", path.display()));
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "image decode failed");
                self.push_log("Failed to load image!");
                false
            }
        }
    }

    /// Replaces the class-name table. Any failure, including a cancelled
    /// dialog, leaves the table cleared rather than stale.
    pub fn load_class_names(&mut self, choice: Option<&Path>) -> bool {
        self.classes.clear();
        let Some(path) = choice else {
            self.push_log("Class names can't be loaded.");
            return false;
        };
        match ClassNameTable::load(path) {
            Ok(table) => {
                self.push_log(format!(
                    "Loaded {} class names from {}",
                    table.len(),
                    path.display()
                ));
                self.classes = table;
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "class names unreadable");
                self.push_log(format!(
                    "Failed to open class names file: {}",
                    path.display()
                ));
                self.push_log("Class names can't be loaded.");
                false
            }
        }
    }

    /// Constructs the network handle. A failed load never leaves a usable
    /// handle behind.
    pub fn load_network(&mut self, model: &Path, config: Option<&Path>) -> bool {
        match SsdNetwork::load(model, config) {
            Ok(network) => {
                self.network = Some(network);
                self.push_log(format!(
                    "SSD detection model loaded successfully: {}",
                    model.display()
                ));
                if let Some(config) = config {
                    self.push_log(format!("Config file: {}", config.display()));
                }
                true
            }
            Err(e) => {
                self.network = None;
                self.push_log(format!("Model loading error: {e}"));
                false
            }
        }
    }

    /// Runs the detection pipeline over the source image and publishes the
    /// results atomically; on any failure the previous detections, summary,
    /// and display pixels remain as they were.
    pub fn detect(&mut self) -> bool {
        let (Some(source), Some(network)) = (self.source.as_ref(), self.network.as_mut()) else {
            self.push_log("Please load both image and model first!");
            return false;
        };

        match self.detector.detect(source, network, &self.classes) {
            Ok(detections) => {
                let annotated = self.renderer.annotate(source, &detections);
                let count = detections.len();
                self.results_text = render::summary(&detections);
                self.detections = detections;
                self.display = Some(annotated);
                if count == 0 {
                    self.push_log("No objects detected above confidence threshold.");
                } else {
                    self.push_log(format!("Detected {count} objects successfully!"));
                }
                true
            }
            Err(e) => {
                self.push_log(format!("Object detection error: {e}"));
                false
            }
        }
    }

    /// Re-derives the display copy from the pristine source, dropping any
    /// annotations. The last detection list and summary are kept.
    pub fn reset(&mut self) -> bool {
        match self.source.as_ref() {
            Some(source) => {
                self.display = Some(source.to_rgb8());
                self.push_log("Image reset to original state.");
                true
            }
            None => {
                self.push_log("No image to reset!");
                false
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
