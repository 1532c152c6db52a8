use std::cmp::Ordering;

use crate::models::BoundingBox;

/// Intersection-over-union of two pixel rectangles.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let inter_left = a.x.max(b.x);
    let inter_top = a.y.max(b.y);
    let inter_right = a.right().min(b.right());
    let inter_bottom = a.bottom().min(b.bottom());

    if inter_right <= inter_left || inter_bottom <= inter_top {
        return 0.0;
    }

    let inter = ((inter_right - inter_left) * (inter_bottom - inter_top)) as f32;
    let union = (a.area() + b.area()) as f32 - inter;
    if union <= 0.0 { 0.0 } else { inter / union }
}

/// Greedy non-max suppression.
///
/// Candidates with a score at or below `score_threshold` are dropped, the
/// rest are visited in descending score order, and a candidate is suppressed
/// when its IoU with an already-kept box exceeds `nms_threshold`. Returns
/// indices into `boxes` in the order they were kept.
pub fn nms_indices(
    boxes: &[BoundingBox],
    scores: &[f32],
    score_threshold: f32,
    nms_threshold: f32,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len())
        .filter(|&i| scores[i] > score_threshold)
        .collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut kept: Vec<usize> = Vec::new();
    for candidate in order {
        let suppressed = kept
            .iter()
            .any(|&k| iou(&boxes[k], &boxes[candidate]) > nms_threshold);
        if !suppressed {
            kept.push(candidate);
        }
    }
    kept
}
