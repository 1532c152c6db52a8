//! Integration tests for the detection pipeline's post-forward stages:
//! output interpretation, thresholding, clamping, NMS, and class-name
//! resolution.

mod common;

use common::*;
use ssdview::classes::ClassNameTable;
use ssdview::detection::Detector;
use ssdview::engine::RawOutput;

#[test]
fn test_single_detection_resolves_name() -> anyhow::Result<()> {
    // 1. Three known classes, one confident full-image hit for class 2
    let classes = ClassNameTable::from_names(vec!["cat".into(), "dog".into(), "bird".into()]);
    let output = raw_output(&[ssd_row(2.0, 0.9, [0.0, 0.0, 1.0, 1.0])]);

    // 2. Interpret against a 640x480 source image
    let detector = Detector::default();
    let detections = detector.interpret(&output, 640, 480, &classes)?;

    // 3. Exactly one detection, named via the 1-based convention
    assert_eq!(detections.len(), 1);
    let detection = &detections[0];
    assert_eq!(detection.class_id, 2);
    assert_eq!(detection.class_name, "dog");
    assert_eq!(detection.bbox, bbox(0, 0, 640, 480));
    assert_eq!(ssdview::render::label_text(detection), "dog: 90.0%");

    Ok(())
}

#[test]
fn test_empty_table_synthesizes_names() -> anyhow::Result<()> {
    let classes = ClassNameTable::empty();
    let output = raw_output(&[ssd_row(5.0, 0.8, [0.1, 0.1, 0.4, 0.4])]);

    let detections = Detector::default().interpret(&output, 100, 100, &classes)?;

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].class_name, "Class 5");

    Ok(())
}

#[test]
fn test_threshold_is_strictly_greater() -> anyhow::Result<()> {
    // Confidence at exactly the threshold never appears in the output.
    let classes = ClassNameTable::empty();
    let output = raw_output(&[
        ssd_row(1.0, 0.4, [0.0, 0.0, 0.5, 0.5]),
        ssd_row(1.0, 0.1, [0.5, 0.5, 1.0, 1.0]),
    ]);

    let detections = Detector::default().interpret(&output, 100, 100, &classes)?;
    assert!(detections.is_empty());

    Ok(())
}

#[test]
fn test_boxes_stay_inside_image_bounds() -> anyhow::Result<()> {
    // 1. Corners reaching well outside the frame on every side
    let classes = ClassNameTable::empty();
    let output = raw_output(&[
        ssd_row(1.0, 0.9, [-0.5, -0.5, 0.5, 0.5]),
        ssd_row(2.0, 0.8, [0.5, 0.5, 1.5, 1.5]),
        ssd_row(3.0, 0.7, [-0.2, 0.75, 0.4, 1.3]),
    ]);

    let (width, height) = (320, 200);
    let detections = Detector::default().interpret(&output, width, height, &classes)?;

    // 2. Every accepted box is clamped and has positive area
    assert_eq!(detections.len(), 3);
    for detection in &detections {
        let b = detection.bbox;
        assert!(b.width >= 1 && b.height >= 1);
        assert!(b.right() <= width, "box {b:?} exceeds width");
        assert!(b.bottom() <= height, "box {b:?} exceeds height");
    }

    Ok(())
}

#[test]
fn test_overlapping_duplicates_are_suppressed() -> anyhow::Result<()> {
    // Two near-identical boxes for the same object plus one far away.
    let classes = ClassNameTable::empty();
    let output = raw_output(&[
        ssd_row(1.0, 0.95, [0.1, 0.1, 0.4, 0.4]),
        ssd_row(1.0, 0.85, [0.11, 0.11, 0.41, 0.41]),
        ssd_row(2.0, 0.6, [0.7, 0.7, 0.9, 0.9]),
    ]);

    let detections = Detector::default().interpret(&output, 1000, 1000, &classes)?;

    assert_eq!(detections.len(), 2);
    // Survivors come back in descending-confidence order.
    assert!(detections[0].confidence > detections[1].confidence);
    assert_eq!(detections[0].class_id, 1);
    assert_eq!(detections[1].class_id, 2);

    Ok(())
}

#[test]
fn test_malformed_output_shape_is_rejected() {
    let classes = ClassNameTable::empty();
    let output = RawOutput {
        shape: vec![1, 1, 4, 6],
        data: vec![0.0; 24],
    };

    let result = Detector::default().interpret(&output, 100, 100, &classes);
    assert!(result.is_err());
}

#[test]
fn test_no_rows_yields_empty_list() -> anyhow::Result<()> {
    let classes = ClassNameTable::from_names(vec!["cat".into()]);
    let output = raw_output(&[]);

    let detections = Detector::default().interpret(&output, 100, 100, &classes)?;
    assert!(detections.is_empty());

    Ok(())
}

#[test]
fn test_class_file_round_trip() -> anyhow::Result<()> {
    // 1. Write a names file and load it back
    let file = class_file(&["cat", "dog", "bird"]);
    let classes = ClassNameTable::load(file.path())?;

    // 2. Table size and the 1-based lookup convention
    assert_eq!(classes.len(), 3);
    assert_eq!(classes.resolve(2), "dog");
    assert_eq!(classes.resolve(0), "Class 0");
    assert_eq!(classes.resolve(9), "Class 9");

    Ok(())
}
